//! ### English
//! Producer side: frame-available notification.
//!
//! ### 中文
//! 生产者侧：新帧可用通知。

use std::sync::atomic::Ordering;

use crate::engine::error::FrameSinkError;
use crate::engine::frame::surface::FrameSurface;
use crate::engine::frame::{SINK_FRAME_READY, SINK_RELEASED};

use super::FrameSink;

impl<S: FrameSurface> FrameSink<S> {
    /// ### English
    /// Marks a new frame as available. Safe from any thread and never blocks; performs no
    /// context-bound work.
    ///
    /// Repeated notifications before the next consume coalesce into one pending frame (counted in
    /// `SinkStats::coalesced`). The update is a Release RMW even when the bit is already set, so
    /// everything the producer wrote before this call is visible to the commit that observes it.
    ///
    /// ### 中文
    /// 标记有新帧可用。可在任意线程调用，从不阻塞，也不做任何上下文绑定的操作。
    ///
    /// 在下一次 consume 之前的重复通知会合并为一个待处理帧（计入 `SinkStats::coalesced`）。
    /// 即使该位已被设置，本次更新也是一次 Release RMW，保证生产者在调用前写入的内容
    /// 对观察到它的 commit 可见。
    pub fn notify_frame_available(&self) -> Result<(), FrameSinkError> {
        let state = &self.cell.state;
        let mut current = state.load(Ordering::Relaxed);
        loop {
            if current & SINK_RELEASED != 0 {
                return Err(self.released_usage("notify_frame_available"));
            }

            match state.compare_exchange_weak(
                current,
                current | SINK_FRAME_READY,
                Ordering::Release,
                Ordering::Relaxed,
            ) {
                Ok(previous) => {
                    self.record_notify(previous & SINK_FRAME_READY != 0);
                    return Ok(());
                }
                Err(actual) => current = actual,
            }
        }
    }
}
