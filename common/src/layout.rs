//! レイアウト設定モジュール
//!
//! mm基準のページ定義と、画像を幅いっぱいで上から順に流す配置計算

// ============================================
// mm基準レイアウト
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 余白設定（mm）
pub const MARGIN_MM: f32 = 10.0;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// ページ設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageLayout {
    pub fn a4() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: MARGIN_MM,
        }
    }

    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm * 2.0
    }

    pub fn content_height_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm * 2.0
    }
}

/// 1枚の画像の配置（mm、y はページ上端から）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// 0始まりのページ番号
    pub page: usize,
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Placement {
    /// PDF座標系（左下原点）での下端Y（pt）
    pub fn bottom_pt(&self, layout: &PageLayout) -> f32 {
        mm_to_pt(layout.page_height_mm - self.y_mm - self.height_mm)
    }
}

/// 画像サイズ（px）の列から配置を計算する
///
/// 各画像は本文幅いっぱいに縮尺し、前の画像の直下に続ける。
/// 残り高さに収まらなければ次のページへ送る。
/// 1ページに収まらない縦長画像は本文高さに合わせて縮め、左右中央に置く。
pub fn flow_layout(layout: &PageLayout, sizes: &[(u32, u32)]) -> Vec<Placement> {
    let content_w = layout.content_width_mm();
    let content_h = layout.content_height_mm();

    let mut placements = Vec::with_capacity(sizes.len());
    let mut page = 0;
    let mut cursor = 0.0_f32;

    for &(w_px, h_px) in sizes {
        let (w_px, h_px) = (w_px.max(1) as f32, h_px.max(1) as f32);
        let mut width = content_w;
        let mut height = content_w * h_px / w_px;

        if height > content_h {
            height = content_h;
            width = content_h * w_px / h_px;
        }

        if cursor > 0.0 && cursor + height > content_h + f32::EPSILON {
            page += 1;
            cursor = 0.0;
        }

        placements.push(Placement {
            page,
            x_mm: layout.margin_mm + (content_w - width) / 2.0,
            y_mm: layout.margin_mm + cursor,
            width_mm: width,
            height_mm: height,
        });
        cursor += height;
    }

    placements
}

/// 配置結果のページ数
pub fn page_count(placements: &[Placement]) -> usize {
    placements.last().map(|p| p.page + 1).unwrap_or(0)
}
