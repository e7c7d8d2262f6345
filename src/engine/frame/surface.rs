//! ### English
//! The frame buffer contract a `FrameSink` is bound to.
//!
//! ### 中文
//! `FrameSink` 所绑定的帧缓冲契约。

/// ### English
/// An externally owned renderable target fed by a producer.
///
/// The sink never owns frame memory: it only decides *when* `update_tex_image` may run.
///
/// - `handle` is what the producer writes into. It is fixed for the surface's lifetime.
/// - `update_tex_image` is the commit. It runs on the render thread, inside the sink's commit
///   section, and may touch `Context`-bound state (GL calls).
/// - `release` invalidates the surface. The sink calls it exactly once.
///
/// ### 中文
/// 由生产者写入、外部持有的可渲染目标。
///
/// sink 从不持有帧内存：它只决定 `update_tex_image` *何时* 可以执行。
///
/// - `handle` 是生产者写入的目标，在 surface 生命周期内固定不变。
/// - `update_tex_image` 即 commit：在渲染线程、sink 的 commit 区间内执行，可访问
///   `Context` 绑定的状态（GL 调用）。
/// - `release` 使 surface 失效，sink 只会调用一次。
pub trait FrameSurface: Send + Sync {
    type Handle: Clone + Send + Sync;
    type Context: ?Sized;

    fn handle(&self) -> &Self::Handle;

    fn update_tex_image(&self, context: &Self::Context);

    fn release(&self);
}
