/// ### English
/// Latest-wins frame handoff between an asynchronous producer (decoder/camera callback, any thread)
/// and the render thread (consumer). A single atomic state word replaces an OS lock.
///
/// ### 中文
/// 异步生产者（解码器/相机回调，任意线程）与渲染线程（消费者）之间 latest-wins 的帧交接。
/// 用单个原子状态字代替系统锁。
mod sink;
mod surface;

pub use sink::FrameSink;
pub use surface::FrameSurface;

/// ### English
/// A new frame was written since the last commit.
///
/// ### 中文
/// 自上次 commit 以来写入了新帧。
pub(crate) const SINK_FRAME_READY: u8 = 1 << 0;
/// ### English
/// The consumer is inside the commit step (release must wait).
///
/// ### 中文
/// 消费者正处于 commit 步骤中（release 必须等待）。
pub(crate) const SINK_COMMITTING: u8 = 1 << 1;
/// ### English
/// Terminal: the surface has been invalidated.
///
/// ### 中文
/// 终止状态：surface 已失效。
pub(crate) const SINK_RELEASED: u8 = 1 << 7;

/// ### English
/// Observable sink state.
///
/// ### 中文
/// 可观测的 sink 状态。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkState {
    /// ### English
    /// No frame pending (initial state).
    ///
    /// ### 中文
    /// 无待处理帧（初始状态）。
    Idle,
    /// ### English
    /// A frame is pending; the next consume commits it.
    ///
    /// ### 中文
    /// 有待处理帧；下一次 consume 会 commit 它。
    Ready,
    /// ### English
    /// `release()` has run; every further call is rejected.
    ///
    /// ### 中文
    /// 已执行 `release()`；之后的调用都会被拒绝。
    Released,
}

impl SinkState {
    #[inline]
    pub(crate) fn from_bits(bits: u8) -> Self {
        if bits & SINK_RELEASED != 0 {
            Self::Released
        } else if bits & SINK_FRAME_READY != 0 {
            Self::Ready
        } else {
            Self::Idle
        }
    }
}

/// ### English
/// Counters for one sink. `coalesced` counts notifications that found a frame already pending,
/// i.e. frames dropped under backpressure.
///
/// ### 中文
/// 单个 sink 的计数器。`coalesced` 统计遇到已有待处理帧的通知次数，即背压下丢弃的帧数。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub notified: u64,
    pub coalesced: u64,
    /// ### English
    /// Commits the sink ran. A commit whose surface had nothing new staged (the producer
    /// notified without writing) still counts; `GlTextureSurface` leaves the texture untouched
    /// in that case.
    ///
    /// ### 中文
    /// sink 执行的 commit 次数。即使 surface 没有新的暂存内容（生产者只通知未写入），该次
    /// commit 仍会计入；此时 `GlTextureSurface` 不会改动纹理。
    pub committed: u64,
}
