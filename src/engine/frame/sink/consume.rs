//! ### English
//! Consumer side: claim-and-commit on the render thread.
//!
//! ### 中文
//! 消费者侧：在渲染线程上 claim 并 commit。

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::trace;

use crate::engine::error::FrameSinkError;
use crate::engine::frame::surface::FrameSurface;
use crate::engine::frame::{SINK_COMMITTING, SINK_FRAME_READY, SINK_RELEASED};

use super::FrameSink;

/// ### English
/// Clears `SINK_COMMITTING` when the commit section ends, including by unwinding, so a panicking
/// commit cannot leave `release()` waiting forever.
///
/// ### 中文
/// 在 commit 区间结束时（包括 panic 展开）清除 `SINK_COMMITTING`，避免 commit 中的 panic
/// 让 `release()` 永远等待。
struct CommitSection<'a> {
    state: &'a AtomicU8,
}

impl Drop for CommitSection<'_> {
    fn drop(&mut self) {
        self.state.fetch_and(!SINK_COMMITTING, Ordering::Release);
    }
}

impl<S: FrameSurface> FrameSink<S> {
    /// ### English
    /// Commits the latest frame if one is pending. Call once per render tick, on the thread that
    /// owns `context`, before sampling the video texture.
    ///
    /// Returns `Ok(true)` if a commit ran, `Ok(false)` if no frame was pending. Claiming the frame
    /// clears the ready bit in the same atomic step; a notification racing with the commit sets it
    /// again and is committed on the next tick.
    ///
    /// ### 中文
    /// 若有待处理帧则 commit 最新帧。每个渲染 tick 调用一次，须在持有 `context` 的线程上、
    /// 采样视频纹理之前调用。
    ///
    /// 执行了 commit 返回 `Ok(true)`，无待处理帧返回 `Ok(false)`。claim 与清除 ready 位是同一个
    /// 原子步骤；与 commit 并发的通知会重新设置该位，并在下一个 tick 被 commit。
    pub fn consume_frame_if_ready(&self, context: &S::Context) -> Result<bool, FrameSinkError> {
        let state = &self.cell.state;
        let mut current = state.load(Ordering::Acquire);
        loop {
            if current & SINK_RELEASED != 0 {
                return Err(self.released_usage("consume_frame_if_ready"));
            }
            if current & SINK_FRAME_READY == 0 {
                return Ok(false);
            }
            debug_assert!(
                current & SINK_COMMITTING == 0,
                "consume_frame_if_ready called from two threads at once"
            );

            match state.compare_exchange_weak(
                current,
                (current & !SINK_FRAME_READY) | SINK_COMMITTING,
                Ordering::Acquire,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }

        {
            let _section = CommitSection { state };
            self.surface.update_tex_image(context);
        }
        self.record_commit();
        trace!("frame committed");
        Ok(true)
    }
}
