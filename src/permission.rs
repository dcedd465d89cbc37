//! 権限ゲート
//!
//! 画像選択・保存の前に読み取り（必要なら書き込み）権限を確認する。
//! 拒否されたらワークフローはそこで止まる。

use crate::config::PermissionMode;
use crate::error::{PhotoPdfError, Result};
use async_trait::async_trait;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

/// プラットフォームの権限サービス
#[async_trait]
pub trait PermissionService: Send + Sync {
    async fn request_read_access(&self) -> bool;
    async fn request_write_access(&self) -> bool;
}

/// 権限ゲート
pub struct PermissionGate<S> {
    service: S,
}

impl<S: PermissionService> PermissionGate<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// 読み取り権限と、`needs_write` のとき書き込み権限を求める
    pub async fn request_access(&self, needs_write: bool) -> bool {
        if !self.service.request_read_access().await {
            log::warn!("写真の読み取り権限が拒否されました");
            return false;
        }
        if needs_write && !self.service.request_write_access().await {
            log::warn!("ストレージの書き込み権限が拒否されました");
            return false;
        }
        true
    }

    /// 拒否時は `PermissionDenied` を返す
    pub async fn ensure_access(&self, needs_write: bool) -> Result<()> {
        if self.request_access(needs_write).await {
            Ok(())
        } else if needs_write {
            Err(PhotoPdfError::PermissionDenied(
                "写真の読み取りまたはファイルの保存が許可されていません".into(),
            ))
        } else {
            Err(PhotoPdfError::PermissionDenied(
                "写真の読み取りが許可されていません".into(),
            ))
        }
    }
}

/// 固定の応答を返す権限サービス
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissionService {
    pub read: bool,
    pub write: bool,
}

impl StaticPermissionService {
    pub fn granted() -> Self {
        Self { read: true, write: true }
    }

    pub fn denied() -> Self {
        Self { read: false, write: false }
    }
}

#[async_trait]
impl PermissionService for StaticPermissionService {
    async fn request_read_access(&self) -> bool {
        self.read
    }

    async fn request_write_access(&self) -> bool {
        self.write
    }
}

/// フォルダの実際の読み書き可否で判断する権限サービス
pub struct FsPermissionService {
    read_dir: PathBuf,
    write_dir: Option<PathBuf>,
}

impl FsPermissionService {
    pub fn new(read_dir: impl Into<PathBuf>, write_dir: Option<PathBuf>) -> Self {
        Self {
            read_dir: read_dir.into(),
            write_dir,
        }
    }
}

fn can_read_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).is_ok()
}

/// 実際に小さなファイルを作って消せるかで判断する
///
/// まだ無いフォルダは、存在する一番近い親で確かめる（フォルダは作らない）
fn can_write_dir(dir: &Path) -> bool {
    let mut target = dir;
    while !target.exists() {
        match target.parent() {
            Some(parent) if parent.as_os_str().is_empty() => target = Path::new("."),
            Some(parent) => target = parent,
            None => return false,
        }
    }

    let probe = target.join(format!(".photo-pdf-write-check-{}", std::process::id()));
    match std::fs::OpenOptions::new().write(true).create_new(true).open(&probe) {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(e) => {
            log::debug!("書き込み確認に失敗: {} ({})", target.display(), e);
            false
        }
    }
}

#[async_trait]
impl PermissionService for FsPermissionService {
    async fn request_read_access(&self) -> bool {
        let dir = self.read_dir.clone();
        tokio::task::spawn_blocking(move || can_read_dir(&dir))
            .await
            .unwrap_or(false)
    }

    async fn request_write_access(&self) -> bool {
        let Some(dir) = self.write_dir.clone() else {
            return true;
        };
        tokio::task::spawn_blocking(move || can_write_dir(&dir))
            .await
            .unwrap_or(false)
    }
}

/// 対話で許可を求める権限サービス
pub struct PromptPermissionService;

async fn confirm(prompt: &'static str) -> bool {
    tokio::task::spawn_blocking(move || {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    })
    .await
    .unwrap_or(false)
}

#[async_trait]
impl PermissionService for PromptPermissionService {
    async fn request_read_access(&self) -> bool {
        confirm("写真へのアクセスを許可しますか？").await
    }

    async fn request_write_access(&self) -> bool {
        confirm("ダウンロードフォルダへの保存を許可しますか？").await
    }
}

/// 設定に応じた権限サービスを作る
pub fn service_for_mode(
    mode: PermissionMode,
    read_dir: PathBuf,
    write_dir: Option<PathBuf>,
) -> Box<dyn PermissionService> {
    match mode {
        PermissionMode::Probe => Box::new(FsPermissionService::new(read_dir, write_dir)),
        PermissionMode::Prompt => Box::new(PromptPermissionService),
        PermissionMode::Grant => Box::new(StaticPermissionService::granted()),
    }
}

#[async_trait]
impl PermissionService for Box<dyn PermissionService> {
    async fn request_read_access(&self) -> bool {
        (**self).request_read_access().await
    }

    async fn request_write_access(&self) -> bool {
        (**self).request_write_access().await
    }
}
