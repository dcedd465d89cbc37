//! 共有サーフェス
//!
//! 共有シートを開いた時点で完了とみなし、ユーザー操作の終了は待たない。

use crate::config::ShareCommand;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[async_trait]
pub trait ShareSurface: Send + Sync {
    async fn share(&self, file: &Path, content_type: &str) -> std::io::Result<()>;
}

/// 外部コマンド（xdg-open など）でファイルを開く
#[derive(Debug, Clone)]
pub struct CommandShareSurface {
    command: ShareCommand,
}

impl CommandShareSurface {
    pub fn new(command: ShareCommand) -> Self {
        Self { command }
    }
}

#[async_trait]
impl ShareSurface for CommandShareSurface {
    async fn share(&self, file: &Path, content_type: &str) -> std::io::Result<()> {
        log::debug!(
            "共有: {} {:?} {} ({})",
            self.command.program,
            self.command.args,
            file.display(),
            content_type
        );

        // 終了は待たない
        let _child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(file)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()?;
        Ok(())
    }
}
