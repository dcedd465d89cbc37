use crate::config::{PermissionMode, SavePolicy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-pdf")]
#[command(about = "ギャラリーの写真を1つのPDFにまとめて保存・共有するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// `RUST_LOG` 未指定時のログレベル
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// ギャラリーの画像を一覧表示
    Scan {
        /// 画像フォルダ（省略時は設定のギャラリーフォルダ）
        folder: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 画像からPDFを作って保存/共有
    Build {
        /// ドキュメント名（拡張子なし）
        #[arg(short, long)]
        name: String,

        /// 画像ファイル（指定順がページ順。省略時は対話で選択）
        images: Vec<PathBuf>,

        /// 対話選択に使うフォルダ
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 保存方針（設定より優先）
        #[arg(short, long)]
        policy: Option<SavePolicy>,
    },

    /// 対話セッション（追加・削除・全消去・生成）
    Session {
        /// 画像フォルダ
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 保存方針（設定より優先）
        #[arg(short, long)]
        policy: Option<SavePolicy>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 保存方針を設定
        #[arg(long)]
        set_policy: Option<SavePolicy>,

        /// 公開保存先フォルダを設定
        #[arg(long)]
        set_public_dir: Option<PathBuf>,

        /// 専用保存先フォルダを設定
        #[arg(long)]
        set_private_dir: Option<PathBuf>,

        /// ギャラリーフォルダを設定
        #[arg(long)]
        set_gallery_dir: Option<PathBuf>,

        /// 権限確認の方法を設定
        #[arg(long)]
        set_permission_mode: Option<PermissionMode>,
    },
}
