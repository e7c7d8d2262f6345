//! ### English
//! Per-frame listener contract and the `FrameSink` adapter.
//!
//! ### 中文
//! 每帧监听器契约，以及 `FrameSink` 的适配实现。

use crate::engine::error::FrameSinkError;
use crate::engine::frame::{FrameSink, FrameSurface};

/// ### English
/// What the ticker should do with a listener after dispatch.
///
/// ### 中文
/// 派发之后 ticker 应如何处理该监听器。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerStatus {
    Keep,
    Detach,
}

/// ### English
/// Called once per render tick on the thread owning `C`, before any draw call.
///
/// ### 中文
/// 在持有 `C` 的线程上每个渲染 tick 调用一次，先于任何绘制调用。
pub trait FrameListener<C: ?Sized>: Send + Sync {
    fn on_draw_frame(&self, context: &C) -> ListenerStatus;
}

impl<S: FrameSurface> FrameListener<S::Context> for FrameSink<S> {
    /// ### English
    /// Commits the pending frame, if any. A released sink asks to be detached.
    ///
    /// ### 中文
    /// 若有待处理帧则 commit。已释放的 sink 请求被移除。
    fn on_draw_frame(&self, context: &S::Context) -> ListenerStatus {
        if self.is_released() {
            return ListenerStatus::Detach;
        }
        match self.consume_frame_if_ready(context) {
            Ok(_) => ListenerStatus::Keep,
            Err(FrameSinkError::Released) => ListenerStatus::Detach,
        }
    }
}
