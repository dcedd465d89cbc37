//! 画像 → PDF 生成パイプライン
//!
//! 1. 生成状態を Idle → Generating（どの経路でも Idle に戻る）
//! 2. 選択を開始時点でスナップショットし、順に読み込む（1枚でも失敗したら全体を中止）
//! 3. base64で埋め込んだマークアップを組み立てる
//! 4. レンダラに渡してPDFを1つ受け取る

use crate::error::{PhotoPdfError, Result};
use crate::reader::ByteReader;
use crate::render::{DocumentRenderer, RenderedDocument};
use photo_pdf_common::{
    build_markup, encode_image, DocumentName, GenerationGate, GenerationState, Selection,
    MAX_NAME_CHARS,
};

pub struct PipelineRunner<R, D> {
    reader: R,
    renderer: D,
    gate: GenerationGate,
    max_name_chars: usize,
}

impl<R: ByteReader, D: DocumentRenderer> PipelineRunner<R, D> {
    pub fn new(reader: R, renderer: D) -> Self {
        Self {
            reader,
            renderer,
            gate: GenerationGate::new(),
            max_name_chars: MAX_NAME_CHARS,
        }
    }

    pub fn with_max_name_chars(mut self, max_name_chars: usize) -> Self {
        self.max_name_chars = max_name_chars;
        self
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn renderer(&self) -> &D {
        &self.renderer
    }

    pub fn gate(&self) -> &GenerationGate {
        &self.gate
    }

    pub fn state(&self) -> GenerationState {
        self.gate.state()
    }

    /// 入力されたドキュメント名を検証
    pub fn validate_name(&self, raw_name: &str) -> Result<DocumentName> {
        Ok(DocumentName::parse_with_limit(raw_name, self.max_name_chars)?)
    }

    /// 選択中の画像からPDFを生成
    pub async fn generate(&self, selection: &Selection, raw_name: &str) -> Result<RenderedDocument> {
        let _ticket = self.gate.try_begin().ok_or(PhotoPdfError::AlreadyGenerating)?;

        if selection.is_empty() {
            return Err(photo_pdf_common::Error::EmptySelection.into());
        }
        let name = self.validate_name(raw_name)?;
        let images = selection.snapshot();

        log::info!("PDF生成開始: {} ({}枚)", name, images.len());

        let mut embedded = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            let bytes = self
                .reader
                .read_bytes(image)
                .await
                .map_err(|e| PhotoPdfError::ReadFailure {
                    position: i + 1,
                    file_name: image.display_name().to_string(),
                    reason: e.to_string(),
                })?;
            embedded.push(encode_image(&bytes));
        }

        let markup = build_markup(name.as_str(), &embedded)?;
        log::debug!("マークアップ: {} bytes", markup.len());

        let document = self
            .renderer
            .render(&markup)
            .await
            .map_err(PhotoPdfError::Render)?;

        log::info!(
            "PDF生成完了: {} ({}ページ)",
            document.path().display(),
            document.page_count()
        );
        Ok(document)
    }
}
