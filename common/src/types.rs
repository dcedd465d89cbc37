//! 画像参照の型定義
//!
//! CLIとテストで共有される型:
//! - ImageRef: ギャラリー画像への不変ハンドル

use serde::{Deserialize, Serialize};

/// ギャラリー画像への参照
///
/// 一度取得したら変更しない。選択リストに載っている間だけ保持され、
/// パイプラインは1回の生成の間しか参照しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// 画像の所在（ファイルパスまたはURI）
    pub location: String,

    /// 表示用ファイル名
    #[serde(default)]
    pub file_name: String,

    /// 申告されたファイルサイズ（バイト）
    #[serde(default)]
    pub declared_size: Option<u64>,

    /// 撮影日時（EXIF DateTimeOriginal）
    #[serde(default)]
    pub date: Option<String>,
}

impl ImageRef {
    /// 所在だけから参照を作る（ファイル名は末尾要素）
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        let file_name = location
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            location,
            file_name,
            declared_size: None,
            date: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.declared_size = Some(size);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// 表示名（ファイル名が空なら所在）
    pub fn display_name(&self) -> &str {
        if self.file_name.is_empty() {
            &self.location
        } else {
            &self.file_name
        }
    }
}
