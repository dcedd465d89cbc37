//! 出力配置
//!
//! レンダリング済みPDFを `名前.pdf` として最終的な場所に置く。
//! 保存方針は設定で選ぶ:
//! - DirectSave: 公開のダウンロード領域に書き込む
//! - ShareOnly: アプリ専用領域に移してから共有サーフェスを開く

pub mod share;

pub use share::{CommandShareSurface, ShareSurface, PDF_CONTENT_TYPE};

use crate::config::{Config, SavePolicy};
use crate::error::{PhotoPdfError, Result};
use crate::render::RenderedDocument;
use async_trait::async_trait;
use photo_pdf_common::DocumentName;
use std::path::{Path, PathBuf};

/// 配置結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// 公開領域に保存した
    Saved { location: PathBuf },
    /// 専用領域に置いて共有サーフェスに渡した
    Shared { location: PathBuf },
}

impl PlaceOutcome {
    pub fn location(&self) -> &Path {
        match self {
            PlaceOutcome::Saved { location } | PlaceOutcome::Shared { location } => location,
        }
    }
}

/// 保存方針
///
/// 新しいプラットフォームはこのトレイトの実装を足して対応する
#[async_trait]
pub trait SaveStrategy: Send + Sync {
    async fn place(&self, doc: RenderedDocument, name: &DocumentName) -> Result<PlaceOutcome>;
}

/// ファイルを移動する。デバイスをまたぐ場合はコピーして元を消す
pub async fn relocate(src: &Path, dest: &Path) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    match tokio::fs::rename(src, dest).await {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!("rename失敗、コピーで移動: {}", e);
            tokio::fs::copy(src, dest).await?;
            tokio::fs::remove_file(src).await?;
            Ok(())
        }
    }
}

// ============================================
// DirectSave
// ============================================

/// 公開領域への書き込み
#[async_trait]
pub trait PublicStorageWriter: Send + Sync {
    async fn write_to_public_area(&self, file: &Path, file_name: &str) -> std::io::Result<PathBuf>;
}

/// ダウンロードフォルダにコピーする（同名は上書き、途中失敗では既存ファイルを壊さない）
#[derive(Debug, Clone)]
pub struct FsPublicStorage {
    dir: PathBuf,
}

impl FsPublicStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl PublicStorageWriter for FsPublicStorage {
    async fn write_to_public_area(&self, file: &Path, file_name: &str) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let dest = self.dir.join(file_name);
        // 書き終えるまで最終名には触らない
        let part = self.dir.join(format!(".{}.part", file_name));
        let written = match tokio::fs::copy(file, &part).await {
            Ok(_) => tokio::fs::rename(&part, &dest).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(e);
        }
        Ok(dest)
    }
}

pub struct DirectSave<W> {
    writer: W,
}

impl<W: PublicStorageWriter> DirectSave<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W: PublicStorageWriter> SaveStrategy for DirectSave<W> {
    async fn place(&self, doc: RenderedDocument, name: &DocumentName) -> Result<PlaceOutcome> {
        let file_name = name.file_name();
        let written = self.writer.write_to_public_area(doc.path(), &file_name).await;
        doc.discard().await;

        let location = written.map_err(|e| PhotoPdfError::Save(e.to_string()))?;
        log::info!("保存: {}", location.display());
        Ok(PlaceOutcome::Saved { location })
    }
}

// ============================================
// ShareOnly
// ============================================

pub struct ShareOnly<S> {
    private_dir: PathBuf,
    surface: S,
}

impl<S: ShareSurface> ShareOnly<S> {
    pub fn new(private_dir: impl Into<PathBuf>, surface: S) -> Self {
        Self {
            private_dir: private_dir.into(),
            surface,
        }
    }
}

#[async_trait]
impl<S: ShareSurface> SaveStrategy for ShareOnly<S> {
    async fn place(&self, doc: RenderedDocument, name: &DocumentName) -> Result<PlaceOutcome> {
        let dest = self.private_dir.join(name.file_name());

        if let Err(e) = relocate(doc.path(), &dest).await {
            doc.discard().await;
            return Err(PhotoPdfError::Save(e.to_string()));
        }
        log::info!("専用領域に移動: {}", dest.display());

        self.surface
            .share(&dest, PDF_CONTENT_TYPE)
            .await
            .map_err(|e| PhotoPdfError::Share(e.to_string()))?;

        Ok(PlaceOutcome::Shared { location: dest })
    }
}

/// 設定の保存方針から戦略を作る
pub fn strategy_from_config(config: &Config) -> Result<Box<dyn SaveStrategy>> {
    Ok(match config.save_policy {
        SavePolicy::DirectSave => Box::new(DirectSave::new(FsPublicStorage::new(
            config.resolved_public_dir()?,
        ))),
        SavePolicy::ShareOnly => Box::new(ShareOnly::new(
            config.resolved_private_dir()?,
            CommandShareSurface::new(config.share_command.clone()),
        )),
    })
}

#[async_trait]
impl SaveStrategy for Box<dyn SaveStrategy> {
    async fn place(&self, doc: RenderedDocument, name: &DocumentName) -> Result<PlaceOutcome> {
        (**self).place(doc, name).await
    }
}
