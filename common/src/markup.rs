//! HTMLマークアップ生成
//!
//! 画像1枚につき `<img>` ブロックを1つ、選択順に並べる。
//! 画像はbase64の `data:` URIで埋め込み、幅100%で連続して流す。
//! 改ページ指定は入れない。

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;

/// 画像ブロックに付けるクラス名
pub const IMAGE_BLOCK_CLASS: &str = "page-image";

const STYLE: &str = "html,body{margin:0;padding:0;}\
img.page-image{display:block;width:100%;height:auto;margin:0;}";

/// 埋め込み済み画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub mime_type: &'static str,
    /// base64エンコード済みデータ
    pub data: String,
}

impl EmbeddedImage {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// 先頭バイトから画像のMIMEタイプを判定
///
/// 判定できない場合は `image/jpeg` とみなす
pub fn detect_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'B', b'M', ..] => "image/bmp",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}

/// 画像バイト列をbase64で埋め込み形式にする
pub fn encode_image(bytes: &[u8]) -> EmbeddedImage {
    EmbeddedImage {
        mime_type: detect_mime(bytes),
        data: B64.encode(bytes),
    }
}

/// ドキュメントのマークアップを組み立てる
///
/// 画像が0枚なら `NothingToRender`
pub fn build_markup(title: &str, images: &[EmbeddedImage]) -> Result<String> {
    if images.is_empty() {
        return Err(Error::NothingToRender);
    }

    let mut html = String::with_capacity(
        256 + images.iter().map(|i| i.data.len() + 64).sum::<usize>(),
    );
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    for image in images {
        html.push_str(&format!(
            "<img class=\"{}\" src=\"{}\" />\n",
            IMAGE_BLOCK_CLASS,
            image.data_uri()
        ));
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

/// マークアップ内の画像ブロック数
pub fn count_image_blocks(markup: &str) -> usize {
    markup
        .matches(&format!("<img class=\"{}\"", IMAGE_BLOCK_CLASS))
        .count()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
