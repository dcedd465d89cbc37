//! ドキュメントアセンブラ
//!
//! 権限確認 → 画像選択 → PDF生成 → 配置 を順に呼ぶ。
//! 配置に成功したらセッションをリセットする。

use crate::error::Result;
use crate::gallery::GalleryPicker;
use crate::output::{PlaceOutcome, SaveStrategy};
use crate::permission::{PermissionGate, PermissionService};
use crate::pipeline::PipelineRunner;
use crate::reader::ByteReader;
use crate::render::DocumentRenderer;
use crate::session::Session;

pub struct DocumentAssembler<P, G, R, D, S> {
    permissions: PermissionGate<P>,
    picker: G,
    runner: PipelineRunner<R, D>,
    placer: S,
    needs_write: bool,
}

impl<P, G, R, D, S> DocumentAssembler<P, G, R, D, S>
where
    P: PermissionService,
    G: GalleryPicker,
    R: ByteReader,
    D: DocumentRenderer,
    S: SaveStrategy,
{
    /// `needs_write` は保存方針が書き込み権限を必要とするか
    pub fn new(
        permissions: PermissionGate<P>,
        picker: G,
        runner: PipelineRunner<R, D>,
        placer: S,
        needs_write: bool,
    ) -> Self {
        Self {
            permissions,
            picker,
            runner,
            placer,
            needs_write,
        }
    }

    pub fn runner(&self) -> &PipelineRunner<R, D> {
        &self.runner
    }

    /// 画像を選んで選択リストの末尾に足す。キャンセル時は0
    pub async fn select_images(&self, session: &mut Session) -> Result<usize> {
        self.permissions.ensure_access(false).await?;

        match self.picker.pick_many().await? {
            Some(images) => {
                let count = images.len();
                session.append(images);
                log::debug!("{}枚追加（計{}枚）", count, session.selection.len());
                Ok(count)
            }
            None => {
                log::debug!("画像選択がキャンセルされました");
                Ok(0)
            }
        }
    }

    /// PDFを生成して配置する
    pub async fn generate_and_place(&self, session: &mut Session) -> Result<PlaceOutcome> {
        self.permissions.ensure_access(self.needs_write).await?;

        let document = self
            .runner
            .generate(&session.selection, &session.name_input)
            .await?;
        let name = match self.runner.validate_name(&session.name_input) {
            Ok(name) => name,
            Err(e) => {
                document.discard().await;
                return Err(e);
            }
        };

        let outcome = self.placer.place(document, &name).await?;
        session.reset();
        Ok(outcome)
    }
}
