//! 画像バイト列の読み込み

use async_trait::async_trait;
use photo_pdf_common::ImageRef;
use thiserror::Error;

/// 読み込み失敗
#[derive(Error, Debug)]
pub enum ReadError {
    /// クラウドのみの画像など、端末上に実体がない
    #[error("端末に保存されていません（クラウド上のみの可能性があります）")]
    NotLocallyAvailable,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ByteReader: Send + Sync {
    async fn read_bytes(&self, image: &ImageRef) -> std::result::Result<Vec<u8>, ReadError>;
}

/// ファイルシステムから読む
#[derive(Debug, Clone, Copy, Default)]
pub struct FsByteReader;

#[async_trait]
impl ByteReader for FsByteReader {
    async fn read_bytes(&self, image: &ImageRef) -> std::result::Result<Vec<u8>, ReadError> {
        let bytes = match tokio::fs::read(&image.location).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ReadError::NotLocallyAvailable);
            }
            Err(e) => return Err(ReadError::Io(e)),
        };

        // サイズ申告があるのに中身が空 → 未ダウンロードのプレースホルダ
        if bytes.is_empty() && image.declared_size.unwrap_or(0) > 0 {
            return Err(ReadError::NotLocallyAvailable);
        }

        log::debug!("{}: {} bytes", image.display_name(), bytes.len());
        Ok(bytes)
    }
}
