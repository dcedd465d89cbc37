//! 埋め込み画像マークアップ → PDF
//!
//! `<img src="data:...;base64,...">` を順に取り出し、
//! 本文幅いっぱいで上から流してA4ページに配置する。

use super::{DocumentRenderer, RenderedDocument};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use lazy_static::lazy_static;
use photo_pdf_common::layout::{flow_layout, mm_to_pt, page_count, PageLayout};
use printpdf::image::RawImage;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use regex::Regex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

lazy_static! {
    static ref IMG_SRC_RE: Regex =
        Regex::new(r#"<img\b[^>]*?\bsrc="data:(image/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/=]*)""#)
            .expect("valid img regex");
    static ref TITLE_RE: Regex = Regex::new(r"<title>([^<]*)</title>").expect("valid title regex");
}

static RENDER_SEQ: AtomicU64 = AtomicU64::new(0);

/// マークアップから取り出した画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// マークアップ内の埋め込み画像を出現順に取り出す
pub fn extract_images(markup: &str) -> Result<Vec<ExtractedImage>, String> {
    IMG_SRC_RE
        .captures_iter(markup)
        .enumerate()
        .map(|(i, caps)| {
            let bytes = B64
                .decode(&caps[2])
                .map_err(|e| format!("{}番目の画像データが不正です: {}", i + 1, e))?;
            Ok(ExtractedImage {
                mime_type: caps[1].to_string(),
                bytes,
            })
        })
        .collect()
}

fn extract_title(markup: &str) -> String {
    TITLE_RE
        .captures(markup)
        .map(|caps| {
            caps[1]
                .replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&quot;", "\"")
                .replace("&#39;", "'")
                .replace("&amp;", "&")
        })
        .unwrap_or_default()
}

/// printpdfでPDFを書き出すレンダラ
#[derive(Debug, Clone)]
pub struct HtmlPdfRenderer {
    output_dir: PathBuf,
    layout: PageLayout,
}

impl Default for HtmlPdfRenderer {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl HtmlPdfRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            layout: PageLayout::a4(),
        }
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    fn temp_path(&self) -> PathBuf {
        let seq = RENDER_SEQ.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        self.output_dir
            .join(format!("photo-pdf-{}-{}-{}.pdf", std::process::id(), stamp, seq))
    }
}

/// PDFバイト列とページ数を作る
fn render_pdf(markup: &str, layout: &PageLayout) -> Result<(Vec<u8>, usize), String> {
    let images = extract_images(markup)?;
    if images.is_empty() {
        return Err("マークアップに画像がありません".to_string());
    }

    let mut doc = PdfDocument::new(&extract_title(markup));
    let mut warnings = Vec::new();
    let mut xobjects = Vec::with_capacity(images.len());
    let mut sizes = Vec::with_capacity(images.len());

    for (i, image) in images.iter().enumerate() {
        let raw = RawImage::decode_from_bytes(&image.bytes, &mut warnings).map_err(|e| {
            format!("{}番目の画像をデコードできません ({}): {}", i + 1, image.mime_type, e)
        })?;
        sizes.push((raw.width as u32, raw.height as u32));
        let xobj_id = XObjectId::new();
        doc.resources.xobjects.map.insert(xobj_id.clone(), XObject::Image(raw));
        xobjects.push(xobj_id);
    }

    let placements = flow_layout(layout, &sizes);
    let pages_total = page_count(&placements);
    let mut page_ops: Vec<Vec<Op>> = (0..pages_total).map(|_| Vec::new()).collect();

    for ((placement, xobj_id), &(img_w, img_h)) in placements.iter().zip(&xobjects).zip(&sizes) {
        let transform = XObjectTransform {
            translate_x: Some(Pt(mm_to_pt(placement.x_mm))),
            translate_y: Some(Pt(placement.bottom_pt(layout))),
            scale_x: Some(mm_to_pt(placement.width_mm) / img_w.max(1) as f32),
            scale_y: Some(mm_to_pt(placement.height_mm) / img_h.max(1) as f32),
            rotate: None,
            dpi: Some(72.0),
        };
        page_ops[placement.page].push(Op::UseXobject {
            id: xobj_id.clone(),
            transform,
        });
    }

    doc.pages = page_ops
        .into_iter()
        .map(|ops| PdfPage::new(Mm(layout.page_width_mm), Mm(layout.page_height_mm), ops))
        .collect();

    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        log::debug!("printpdf: {:?}", warning);
    }

    Ok((bytes, pages_total))
}

#[async_trait]
impl DocumentRenderer for HtmlPdfRenderer {
    async fn render(&self, markup: &str) -> Result<RenderedDocument, String> {
        let markup = markup.to_string();
        let layout = self.layout;
        let (bytes, pages) = tokio::task::spawn_blocking(move || render_pdf(&markup, &layout))
            .await
            .map_err(|e| format!("レンダリングタスクエラー: {}", e))??;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| format!("一時フォルダを作成できません: {}", e))?;
        let path = self.temp_path();
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| format!("一時PDFを書き込めません: {}", e))?;

        log::info!("PDFをレンダリング: {} ({}ページ, {} bytes)", path.display(), pages, bytes.len());
        Ok(RenderedDocument::new(path, pages))
    }
}
