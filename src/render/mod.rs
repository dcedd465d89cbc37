//! PDFレンダラ
//!
//! マークアップを受け取り、一時ファイルとしてPDFを1つ返す。

mod html_pdf;

pub use html_pdf::HtmlPdfRenderer;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// レンダリング済みPDF（一時ファイル）
///
/// 出力先への移動か削除が済むまでパイプラインが所有する。
#[derive(Debug)]
pub struct RenderedDocument {
    path: PathBuf,
    page_count: usize,
}

impl RenderedDocument {
    pub fn new(path: PathBuf, page_count: usize) -> Self {
        Self { path, page_count }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// 一時ファイルを削除する
    pub async fn discard(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("一時PDFの削除に失敗: {}: {}", self.path.display(), e);
            }
        }
    }
}

/// 外部レンダリングサービス
///
/// エラーは下位サービスのメッセージをそのまま返す
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, markup: &str) -> std::result::Result<RenderedDocument, String>;
}
