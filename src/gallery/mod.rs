//! ギャラリー（画像フォルダ）と画像ピッカー

mod exif;

use crate::error::{PhotoPdfError, Result};
use async_trait::async_trait;
use dialoguer::MultiSelect;
use photo_pdf_common::ImageRef;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// スキャン対象の拡張子（すべてPDFに描画できる形式）
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// 画像を複数選ぶ
///
/// `Ok(None)` はユーザーによるキャンセル
#[async_trait]
pub trait GalleryPicker: Send + Sync {
    async fn pick_many(&self) -> Result<Option<Vec<ImageRef>>>;
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// ファイルパスから画像参照を作る（サイズ・撮影日時つき）
pub fn image_ref_from_path(path: &Path) -> ImageRef {
    let mut image = ImageRef::new(path.display().to_string());
    if let Ok(meta) = std::fs::metadata(path) {
        image = image.with_size(meta.len());
    }
    if let Ok(date) = exif::extract_date(path) {
        image = image.with_date(date);
    }
    image
}

/// フォルダ内の画像をファイル名順に列挙
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<ImageRef>> {
    if !folder.is_dir() {
        return Err(PhotoPdfError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<ImageRef> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_image_path(e.path()))
        .map(|e| image_ref_from_path(e.path()))
        .collect();

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    log::debug!("{}: {}枚の画像を検出", folder.display(), images.len());

    Ok(images)
}

/// フォルダをスキャンして対話で選ぶピッカー
pub struct FolderGallery {
    folder: PathBuf,
    recursive: bool,
}

impl FolderGallery {
    pub fn new(folder: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            folder: folder.into(),
            recursive,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

#[async_trait]
impl GalleryPicker for FolderGallery {
    async fn pick_many(&self) -> Result<Option<Vec<ImageRef>>> {
        let images = scan_folder(&self.folder, self.recursive)?;
        if images.is_empty() {
            return Err(PhotoPdfError::NoImagesFound(
                self.folder.display().to_string(),
            ));
        }

        let picked = tokio::task::spawn_blocking(move || {
            let labels: Vec<String> = images
                .iter()
                .map(|img| match &img.date {
                    Some(date) => format!("{} ({})", img.display_name(), date),
                    None => img.display_name().to_string(),
                })
                .collect();

            let chosen = MultiSelect::new()
                .with_prompt("PDFにする画像を選択（スペースで選択、Enterで確定、Escでキャンセル）")
                .items(&labels)
                .interact_opt()
                .map_err(|e| PhotoPdfError::Config(format!("入力エラー: {}", e)))?;

            Ok::<_, PhotoPdfError>(chosen.map(|indices| {
                indices.into_iter().map(|i| images[i].clone()).collect::<Vec<_>>()
            }))
        })
        .await
        .map_err(|e| PhotoPdfError::Config(format!("入力タスクエラー: {}", e)))??;

        Ok(picked)
    }
}

#[async_trait]
impl GalleryPicker for Box<dyn GalleryPicker> {
    async fn pick_many(&self) -> Result<Option<Vec<ImageRef>>> {
        (**self).pick_many().await
    }
}

/// 指定済みのパスをそのまま返すピッカー
pub struct PathListPicker {
    paths: Vec<PathBuf>,
}

impl PathListPicker {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl GalleryPicker for PathListPicker {
    async fn pick_many(&self) -> Result<Option<Vec<ImageRef>>> {
        if self.paths.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            self.paths.iter().map(|p| image_ref_from_path(p)).collect(),
        ))
    }
}
