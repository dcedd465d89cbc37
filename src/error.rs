use thiserror::Error;

/// 権限拒否時に添える案内
pub const SETTINGS_HINT: &str = "システム設定を開き、このアプリに写真（とストレージ）へのアクセスを許可してください";

#[derive(Error, Debug)]
pub enum PhotoPdfError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("アクセスが許可されていません: {0}")]
    PermissionDenied(String),

    #[error("{position}枚目の画像を読み込めません ({file_name}): {reason}")]
    ReadFailure {
        /// 1始まりの位置
        position: usize,
        file_name: String,
        reason: String,
    },

    #[error("PDF生成エラー: {0}")]
    Render(String),

    #[error("保存エラー: {0}")]
    Save(String),

    #[error("共有エラー: {0}")]
    Share(String),

    #[error("PDFを生成中です。完了するまでお待ちください")]
    AlreadyGenerating,

    #[error("{0}")]
    Invalid(#[from] photo_pdf_common::Error),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("画像の選択がキャンセルされました")]
    Cancelled,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

/// ユーザーに見せるエラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 許可すれば再試行できる
    PermissionDenied,
    /// 該当画像を外す/選び直せば再試行できる
    ReadFailure,
    /// 下位サービスのメッセージをそのまま見せる
    RenderOrSaveFailure,
    /// 入力検証・状態による拒否
    Rejected,
}

impl PhotoPdfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PhotoPdfError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            PhotoPdfError::ReadFailure { .. } => ErrorKind::ReadFailure,
            PhotoPdfError::Render(_)
            | PhotoPdfError::Save(_)
            | PhotoPdfError::Share(_)
            | PhotoPdfError::Io(_) => ErrorKind::RenderOrSaveFailure,
            PhotoPdfError::Config(_)
            | PhotoPdfError::AlreadyGenerating
            | PhotoPdfError::Invalid(_)
            | PhotoPdfError::FolderNotFound(_)
            | PhotoPdfError::NoImagesFound(_)
            | PhotoPdfError::Cancelled
            | PhotoPdfError::JsonParse(_) => ErrorKind::Rejected,
        }
    }

    /// 1件の通知として表示する文面
    pub fn user_notice(&self) -> String {
        match self {
            PhotoPdfError::PermissionDenied(_) => format!("{}\n{}", self, SETTINGS_HINT),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PhotoPdfError>;
