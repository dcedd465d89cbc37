//! 対話セッション
//!
//! 画像の追加・削除・全消去・名前入力・PDF作成をメニューから行う。
//! エラーは通知を表示してメニューに戻る。

use crate::assembler::DocumentAssembler;
use crate::error::{PhotoPdfError, Result};
use crate::gallery::GalleryPicker;
use crate::output::{PlaceOutcome, SaveStrategy};
use crate::permission::PermissionService;
use crate::reader::ByteReader;
use crate::render::DocumentRenderer;
use crate::session::Session;
use dialoguer::{Confirm, Input, Select};

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Add,
    Remove,
    Clear,
    Rename,
    List,
    Generate,
    Quit,
}

impl SessionAction {
    pub const ALL: [SessionAction; 7] = [
        SessionAction::Add,
        SessionAction::Remove,
        SessionAction::Clear,
        SessionAction::Rename,
        SessionAction::List,
        SessionAction::Generate,
        SessionAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::Add => "画像を追加",
            SessionAction::Remove => "画像を削除",
            SessionAction::Clear => "すべて消去",
            SessionAction::Rename => "ドキュメント名を入力",
            SessionAction::List => "選択中の画像を表示",
            SessionAction::Generate => "PDFを作成",
            SessionAction::Quit => "終了",
        }
    }
}

fn input_error(e: dialoguer::Error) -> PhotoPdfError {
    PhotoPdfError::Config(format!("入力エラー: {}", e))
}

fn prompt_action(session: &Session) -> Result<SessionAction> {
    let labels: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();
    let prompt = format!(
        "選択中: {}枚 / 名前: {}",
        session.selection.len(),
        if session.name_input.trim().is_empty() { "(未入力)" } else { session.name_input.trim() }
    );
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(input_error)?;
    Ok(SessionAction::ALL[index])
}

fn print_selection(session: &Session) {
    if session.selection.is_empty() {
        println!("  (画像が選択されていません)");
        return;
    }
    for (i, image) in session.selection.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, image.display_name());
    }
}

pub fn print_outcome(outcome: &PlaceOutcome) {
    match outcome {
        PlaceOutcome::Saved { location } => println!("✔ 保存しました: {}", location.display()),
        PlaceOutcome::Shared { location } => {
            println!("✔ 共有を開きました: {}", location.display())
        }
    }
}

/// 対話セッションを実行
pub async fn run_session<P, G, R, D, S>(
    assembler: &DocumentAssembler<P, G, R, D, S>,
    session: &mut Session,
) -> Result<()>
where
    P: PermissionService,
    G: GalleryPicker,
    R: ByteReader,
    D: DocumentRenderer,
    S: SaveStrategy,
{
    loop {
        let action = prompt_action(session)?;

        let result: Result<()> = match action {
            SessionAction::Add => match assembler.select_images(session).await {
                Ok(0) => Ok(()),
                Ok(added) => {
                    println!("✔ {}枚追加しました（計{}枚）", added, session.selection.len());
                    Ok(())
                }
                Err(e) => Err(e),
            },
            SessionAction::Remove => {
                print_selection(session);
                let position: usize = Input::new()
                    .with_prompt("削除する番号")
                    .interact_text()
                    .map_err(input_error)?;
                if let Some(removed) = session.remove_position(position) {
                    println!("✔ 削除しました: {}", removed.display_name());
                }
                Ok(())
            }
            SessionAction::Clear => {
                let cleared = session.selection.clear(|s| {
                    Confirm::new()
                        .with_prompt(format!("{}枚をすべて消去しますか？", s.len()))
                        .default(false)
                        .interact()
                        .unwrap_or(false)
                });
                if cleared {
                    println!("✔ 選択をすべて消去しました");
                }
                Ok(())
            }
            SessionAction::Rename => {
                let name: String = Input::new()
                    .with_prompt("ドキュメント名")
                    .with_initial_text(session.name_input.clone())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(input_error)?;
                session.set_name(name);
                Ok(())
            }
            SessionAction::List => {
                print_selection(session);
                Ok(())
            }
            SessionAction::Generate => {
                println!("- PDFを作成中...");
                assembler
                    .generate_and_place(session)
                    .await
                    .map(|outcome| print_outcome(&outcome))
            }
            SessionAction::Quit => return Ok(()),
        };

        if let Err(e) = result {
            eprintln!("❌ {}", e.user_notice());
        }
        println!();
    }
}
