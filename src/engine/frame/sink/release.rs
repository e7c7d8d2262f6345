//! ### English
//! Terminal teardown for `FrameSink`.
//!
//! ### 中文
//! `FrameSink` 的终止清理。

use std::sync::atomic::Ordering;

use tracing::{debug, trace};

use crate::engine::error::FrameSinkError;
use crate::engine::frame::surface::FrameSurface;
use crate::engine::frame::{SINK_COMMITTING, SINK_RELEASED};
use crate::engine::lockfree::Backoff;

use super::FrameSink;

impl<S: FrameSurface> FrameSink<S> {
    /// ### English
    /// Moves the sink to `Released` and invalidates the surface.
    ///
    /// If a commit is in flight, waits (spin, then yield) until it finishes; commits are short.
    /// A concurrent notify never delays release. Must not be called from inside the surface's own
    /// commit.
    ///
    /// A second call returns `FrameSinkError::Released` and does nothing.
    ///
    /// ### 中文
    /// 将 sink 切换为 `Released` 并使 surface 失效。
    ///
    /// 若有进行中的 commit，会等待（先自旋后让出）其结束；commit 耗时很短。
    /// 并发的 notify 不会延迟 release。不得在 surface 自身的 commit 中调用。
    ///
    /// 第二次调用返回 `FrameSinkError::Released`，不做任何事。
    pub fn release(&self) -> Result<(), FrameSinkError> {
        if self.release_if_live() {
            Ok(())
        } else {
            Err(self.released_usage("release"))
        }
    }

    /// ### English
    /// Runs the release steps unless the sink is already released. Returns whether this call did
    /// the release. An earlier release is not reported as misuse.
    ///
    /// ### 中文
    /// 除非 sink 已被释放，否则执行释放步骤。返回本次调用是否完成了释放。
    /// 先前已释放的情况不视为误用。
    pub(crate) fn release_if_live(&self) -> bool {
        let state = &self.cell.state;
        let mut backoff = Backoff::new();
        let mut current = state.load(Ordering::Acquire);
        loop {
            if current & SINK_RELEASED != 0 {
                return false;
            }
            if current & SINK_COMMITTING != 0 {
                let was_spinning = !backoff.is_yielding();
                backoff.snooze();
                if was_spinning && backoff.is_yielding() {
                    trace!("release still waiting on in-flight commit");
                }
                current = state.load(Ordering::Acquire);
                continue;
            }

            match state.compare_exchange_weak(
                current,
                SINK_RELEASED,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }

        self.surface.release();
        debug!(stats = ?self.stats(), "frame sink released");
        true
    }
}
