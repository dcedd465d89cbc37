//! 生成状態（Idle / Generating）
//!
//! 同時に走るPDF生成は1件まで。`try_begin` が返すチケットを
//! ドロップするとIdleに戻るので、成功・失敗どちらの経路でも解放される。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 生成状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Generating,
}

/// 生成の排他ゲート
#[derive(Debug, Clone, Default)]
pub struct GenerationGate {
    busy: Arc<AtomicBool>,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GenerationState {
        if self.busy.load(Ordering::Acquire) {
            GenerationState::Generating
        } else {
            GenerationState::Idle
        }
    }

    /// Idle → Generating。既に生成中なら `None`
    pub fn try_begin(&self) -> Option<GenerationTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GenerationTicket {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// 生成中であることを表すチケット
#[derive(Debug)]
pub struct GenerationTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for GenerationTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
