//! 作業セッション
//!
//! 選択リストと入力中のドキュメント名をまとめて持つ。
//! 保存に成功したら `reset` で新しいセッションに戻す。

use photo_pdf_common::{ImageRef, Selection};

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub selection: Selection,
    /// 未検証の入力（前後の空白もそのまま）
    pub name_input: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, images: Vec<ImageRef>) {
        self.selection.append(images);
    }

    /// 1始まりの位置で削除。範囲外は何もしない
    pub fn remove_position(&mut self, position: usize) -> Option<ImageRef> {
        position
            .checked_sub(1)
            .and_then(|index| self.selection.remove_at(index))
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name_input = name.into();
    }

    pub fn reset(&mut self) {
        self.selection = Selection::new();
        self.name_input.clear();
    }
}
