//! 選択リスト管理
//!
//! 順序がそのままPDFのページ順になる。重複は許す。

use crate::types::ImageRef;

/// 選択中の画像リスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<ImageRef>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾に追加（既存の順序は維持、重複除去なし）
    pub fn append<I>(&mut self, images: I)
    where
        I: IntoIterator<Item = ImageRef>,
    {
        self.items.extend(images);
    }

    /// 指定位置を削除。範囲外なら何もしない
    pub fn remove_at(&mut self, index: usize) -> Option<ImageRef> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// 確認が取れた場合のみ全削除
    ///
    /// `confirm` は現在の選択を受け取り、消してよければ `true` を返す。
    /// 空の選択では確認を求めない。
    pub fn clear<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(&Selection) -> bool,
    {
        if self.items.is_empty() {
            return false;
        }
        if !confirm(self) {
            return false;
        }
        self.items.clear();
        true
    }

    /// 生成開始時点のスナップショット
    pub fn snapshot(&self) -> Vec<ImageRef> {
        self.items.clone()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRef> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageRef> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a ImageRef;
    type IntoIter = std::slice::Iter<'a, ImageRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<ImageRef> for Selection {
    fn from_iter<T: IntoIterator<Item = ImageRef>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
