//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("ドキュメント名が空です")]
    EmptyName,

    #[error("ドキュメント名が長すぎます（{len}文字 / 最大{max}文字）")]
    NameTooLong { len: usize, max: usize },

    #[error("ドキュメント名に使用できない文字が含まれています: {0:?}")]
    InvalidNameChar(char),

    #[error("画像が選択されていません")]
    EmptySelection,

    #[error("PDFにする画像がありません")]
    NothingToRender,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
