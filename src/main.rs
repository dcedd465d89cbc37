use clap::Parser;
use photo_pdf::assembler::DocumentAssembler;
use photo_pdf::cli::{Cli, Commands};
use photo_pdf::config::{Config, SavePolicy};
use photo_pdf::error::{PhotoPdfError, Result};
use photo_pdf::gallery::{self, FolderGallery, GalleryPicker, PathListPicker};
use photo_pdf::interactive;
use photo_pdf::output::{self, SaveStrategy};
use photo_pdf::permission::{self, PermissionGate, PermissionService};
use photo_pdf::pipeline::PipelineRunner;
use photo_pdf::reader::FsByteReader;
use photo_pdf::render::HtmlPdfRenderer;
use photo_pdf::session::Session;
use std::path::PathBuf;

type Assembler = DocumentAssembler<
    Box<dyn PermissionService>,
    Box<dyn GalleryPicker>,
    FsByteReader,
    HtmlPdfRenderer,
    Box<dyn SaveStrategy>,
>;

fn build_assembler(
    config: &Config,
    policy: SavePolicy,
    picker: Box<dyn GalleryPicker>,
    read_dir: PathBuf,
) -> Result<Assembler> {
    let config = Config {
        save_policy: policy,
        ..config.clone()
    };

    let write_dir = if policy.needs_write_access() {
        Some(config.resolved_public_dir()?)
    } else {
        None
    };
    let permissions = PermissionGate::new(permission::service_for_mode(
        config.permission_mode,
        read_dir,
        write_dir,
    ));
    let runner = PipelineRunner::new(FsByteReader, HtmlPdfRenderer::default())
        .with_max_name_chars(config.max_name_chars);
    let placer = output::strategy_from_config(&config)?;

    Ok(DocumentAssembler::new(
        permissions,
        picker,
        runner,
        placer,
        policy.needs_write_access(),
    ))
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Scan { folder, recursive } => {
            let folder = match folder {
                Some(f) => f,
                None => config.resolved_gallery_dir()?,
            };
            let images = gallery::scan_folder(&folder, recursive)?;
            println!("📷 {} ({}枚)\n", folder.display(), images.len());
            for (i, image) in images.iter().enumerate() {
                println!(
                    "  {:>3}. {}  {}  {}",
                    i + 1,
                    image.display_name(),
                    image.declared_size.map(|s| format!("{} bytes", s)).unwrap_or_default(),
                    image.date.as_deref().unwrap_or("-"),
                );
            }
        }

        Commands::Build { name, images, folder, recursive, policy } => {
            println!("📄 photo-pdf - PDF作成\n");

            let policy = policy.unwrap_or(config.save_policy);
            let (picker, read_dir): (Box<dyn GalleryPicker>, PathBuf) = if images.is_empty() {
                let folder = match folder {
                    Some(f) => f,
                    None => config.resolved_gallery_dir()?,
                };
                (Box::new(FolderGallery::new(folder.clone(), recursive)), folder)
            } else {
                let read_dir = images[0]
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."));
                (Box::new(PathListPicker::new(images)), read_dir)
            };

            let assembler = build_assembler(&config, policy, picker, read_dir)?;
            let mut session = Session::new();
            session.set_name(name);

            // 1. 画像選択
            println!("[1/2] 画像を選択中...");
            assembler.select_images(&mut session).await?;
            if session.selection.is_empty() {
                return Err(PhotoPdfError::Cancelled);
            }
            println!("✔ {}枚を選択\n", session.selection.len());

            // 2. 生成と配置
            println!("[2/2] PDFを作成中... (保存方針: {})", policy);
            let outcome = assembler.generate_and_place(&mut session).await?;
            interactive::print_outcome(&outcome);

            println!("\n✅ 完了");
        }

        Commands::Session { folder, recursive, policy } => {
            let policy = policy.unwrap_or(config.save_policy);
            let folder = match folder {
                Some(f) => f,
                None => config.resolved_gallery_dir()?,
            };
            let picker: Box<dyn GalleryPicker> = Box::new(FolderGallery::new(folder.clone(), recursive));
            let assembler = build_assembler(&config, policy, picker, folder)?;

            println!("📄 photo-pdf - 対話セッション (保存方針: {})\n", policy);
            let mut session = Session::new();
            interactive::run_session(&assembler, &mut session).await?;
        }

        Commands::Config {
            show,
            set_policy,
            set_public_dir,
            set_private_dir,
            set_gallery_dir,
            set_permission_mode,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(policy) = set_policy {
                config.save_policy = policy;
                changed = true;
            }
            if let Some(dir) = set_public_dir {
                config.public_dir = Some(dir);
                changed = true;
            }
            if let Some(dir) = set_private_dir {
                config.private_dir = Some(dir);
                changed = true;
            }
            if let Some(dir) = set_gallery_dir {
                config.gallery_dir = Some(dir);
                changed = true;
            }
            if let Some(mode) = set_permission_mode {
                config.permission_mode = mode;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let show_dir = |dir: Result<PathBuf>| {
                    dir.map(|d| d.display().to_string())
                        .unwrap_or_else(|_| "未設定".to_string())
                };
                println!("設定:");
                println!("  保存方針: {}", config.save_policy);
                println!("  公開保存先: {}", show_dir(config.resolved_public_dir()));
                println!("  専用保存先: {}", show_dir(config.resolved_private_dir()));
                println!("  ギャラリー: {}", show_dir(config.resolved_gallery_dir()));
                println!("  権限確認: {}", config.permission_mode);
                println!(
                    "  共有コマンド: {} {}",
                    config.share_command.program,
                    config.share_command.args.join(" ")
                );
                println!("  名前の最大文字数: {}", config.max_name_chars);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env = env_logger::Env::default().default_filter_or(cli.default_log_level());
    env_logger::Builder::from_env(env).init();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e.user_notice());
        std::process::exit(1);
    }
}
