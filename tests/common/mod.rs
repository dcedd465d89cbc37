//! テスト用の外部サービス代替

#![allow(dead_code)]

use async_trait::async_trait;
use photo_pdf::output::ShareSurface;
use photo_pdf::reader::{ByteReader, ReadError};
use photo_pdf::render::{DocumentRenderer, RenderedDocument};
use photo_pdf_common::ImageRef;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// 所在ごとに固定バイト列を返し、呼び出しを記録する
#[derive(Default)]
pub struct RecordingReader {
    pub data: HashMap<String, Vec<u8>>,
    pub missing: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingReader {
    pub fn with_images(images: &[(&str, &[u8])]) -> Self {
        Self {
            data: images
                .iter()
                .map(|(loc, bytes)| (loc.to_string(), bytes.to_vec()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn missing(mut self, location: &str) -> Self {
        self.missing.insert(location.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ByteReader for RecordingReader {
    async fn read_bytes(&self, image: &ImageRef) -> Result<Vec<u8>, ReadError> {
        self.calls.lock().unwrap().push(image.location.clone());
        if self.missing.contains(&image.location) {
            return Err(ReadError::NotLocallyAvailable);
        }
        self.data
            .get(&image.location)
            .cloned()
            .ok_or(ReadError::NotLocallyAvailable)
    }
}

/// 受け取ったマークアップを記録し、ダミーPDFを書き出す
pub struct RecordingRenderer {
    dir: PathBuf,
    seq: AtomicUsize,
    pub markups: Mutex<Vec<String>>,
    pub fail_with: Option<String>,
}

impl RecordingRenderer {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            seq: AtomicUsize::new(0),
            markups: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn failing(dir: &Path, message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(dir)
        }
    }

    pub fn call_count(&self) -> usize {
        self.markups.lock().unwrap().len()
    }

    pub fn last_markup(&self) -> Option<String> {
        self.markups.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DocumentRenderer for RecordingRenderer {
    async fn render(&self, markup: &str) -> Result<RenderedDocument, String> {
        self.markups.lock().unwrap().push(markup.to_string());
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let path = self.dir.join(format!("render-{}.pdf", seq));
        tokio::fs::write(&path, b"%PDF-1.7\n%dummy\n")
            .await
            .map_err(|e| e.to_string())?;
        Ok(RenderedDocument::new(path, 1))
    }
}

/// 共有呼び出しを記録する
#[derive(Default, Clone)]
pub struct RecordingShare {
    pub calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

#[async_trait]
impl ShareSurface for RecordingShare {
    async fn share(&self, file: &Path, content_type: &str) -> std::io::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((file.to_path_buf(), content_type.to_string()));
        Ok(())
    }
}

/// 読み込み開始を知らせ、解放されるまで待つリーダー
#[derive(Default)]
pub struct GatedReader {
    pub started: Notify,
    pub release: Notify,
}

#[async_trait]
impl ByteReader for GatedReader {
    async fn read_bytes(&self, _image: &ImageRef) -> Result<Vec<u8>, ReadError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(vec![0xFF, 0xD8, 0xFF, 0x00])
    }
}

pub fn image(location: &str) -> ImageRef {
    ImageRef::new(location)
}
