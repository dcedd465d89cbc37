use crate::error::{PhotoPdfError, Result};
use photo_pdf_common::MAX_NAME_CHARS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 保存方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SavePolicy {
    /// 公開のダウンロード領域に直接書き込む
    #[default]
    DirectSave,
    /// アプリ専用領域に移して共有シートを開く
    ShareOnly,
}

impl SavePolicy {
    /// ストレージ書き込み権限が必要か
    pub fn needs_write_access(&self) -> bool {
        matches!(self, SavePolicy::DirectSave)
    }
}

impl std::fmt::Display for SavePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavePolicy::DirectSave => write!(f, "direct-save"),
            SavePolicy::ShareOnly => write!(f, "share-only"),
        }
    }
}

/// 権限確認の方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionMode {
    /// フォルダの読み書き可否を調べる
    #[default]
    Probe,
    /// 対話で確認する
    Prompt,
    /// 常に許可
    Grant,
}

impl std::fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionMode::Probe => write!(f, "probe"),
            PermissionMode::Prompt => write!(f, "prompt"),
            PermissionMode::Grant => write!(f, "grant"),
        }
    }
}

/// 共有コマンド
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ShareCommand {
    fn default() -> Self {
        #[cfg(target_os = "macos")]
        let program = "open";
        #[cfg(windows)]
        let program = "explorer";
        #[cfg(not(any(target_os = "macos", windows)))]
        let program = "xdg-open";

        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub save_policy: SavePolicy,
    /// 公開のダウンロード領域（省略時はOSのダウンロードフォルダ）
    pub public_dir: Option<PathBuf>,
    /// アプリ専用の保存領域
    pub private_dir: Option<PathBuf>,
    /// 画像を探すフォルダ（省略時はOSのピクチャフォルダ）
    pub gallery_dir: Option<PathBuf>,
    pub share_command: ShareCommand,
    pub permission_mode: PermissionMode,
    pub max_name_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_policy: SavePolicy::default(),
            public_dir: None,
            private_dir: None,
            gallery_dir: None,
            share_command: ShareCommand::default(),
            permission_mode: PermissionMode::default(),
            max_name_chars: MAX_NAME_CHARS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoPdfError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-pdf").join("config.json"))
    }

    pub fn resolved_public_dir(&self) -> Result<PathBuf> {
        self.public_dir
            .clone()
            .or_else(dirs::download_dir)
            .ok_or_else(|| PhotoPdfError::Config("ダウンロードフォルダが見つかりません".into()))
    }

    pub fn resolved_private_dir(&self) -> Result<PathBuf> {
        self.private_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("photo-pdf").join("documents")))
            .ok_or_else(|| PhotoPdfError::Config("データフォルダが見つかりません".into()))
    }

    pub fn resolved_gallery_dir(&self) -> Result<PathBuf> {
        self.gallery_dir
            .clone()
            .or_else(dirs::picture_dir)
            .ok_or_else(|| PhotoPdfError::Config("ピクチャフォルダが見つかりません".into()))
    }
}
