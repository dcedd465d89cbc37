//! ドキュメント名
//!
//! 入力文字列は前後の空白を除去してから使う。
//! 出力ファイル名は `名前 + ".pdf"`。

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// ドキュメント名の最大文字数（既定値）
pub const MAX_NAME_CHARS: usize = 100;

/// ファイル名に使えない文字
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// 検証済みのドキュメント名
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentName(String);

impl DocumentName {
    /// 既定の最大長で検証
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with_limit(raw, MAX_NAME_CHARS)
    }

    /// 最大長を指定して検証
    pub fn parse_with_limit(raw: &str, max_chars: usize) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyName);
        }

        let len = trimmed.chars().count();
        if len > max_chars {
            return Err(Error::NameTooLong { len, max: max_chars });
        }

        if let Some(c) = trimmed
            .chars()
            .find(|c| FORBIDDEN_CHARS.contains(c) || c.is_control())
        {
            return Err(Error::InvalidNameChar(c));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 出力ファイル名
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.0)
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
