/// ### English
/// Engine internals: the frame sink, its surfaces, render-thread dispatch and GL loading.
///
/// ### 中文
/// 引擎内部模块：frame sink、其 surface、渲染线程派发与 GL 加载。
pub(crate) mod cache;
pub mod config;
pub mod error;
pub mod flags;
pub mod frame;
pub(crate) mod lockfree;
pub mod rendering;
pub mod surface;
pub mod tick;

pub use config::SinkConfig;
pub use error::{FrameSinkError, RenderContextError, SurfaceError};
pub use frame::{FrameSink, FrameSurface, SinkState, SinkStats};
pub use rendering::{GlVersion, RenderContext};
pub use surface::{GlTextureSurface, PixelFrame, PixelSurface};
pub use tick::{
    FrameListener, FrameListenerRegistry, FrameTicker, ListenerId, ListenerStatus, TickReport,
};

/// ### English
/// Sink bound to a GL texture, as created through the C ABI.
///
/// ### 中文
/// 绑定到 GL 纹理的 sink（即通过 C ABI 创建的类型）。
pub type GlVideoSink = FrameSink<GlTextureSurface>;
