//! ### English
//! C ABI surface for `viro_video_sink`.
//!
//! All exported symbols are `extern "C"` functions and tolerate NULL handles. Handles are boxed
//! Rust objects; every `*_create`/`*_get_*` returning a handle has a matching `*_destroy`.
//!
//! Threading:
//! - `ViroVideoSink`, `ViroVideoSurface` and `ViroFrameRegistry` may be used from any thread.
//! - `ViroRenderContext` must stay on the thread that created it (the one owning the GL context).
//!
//! ### 中文
//! `viro_video_sink` 的 C ABI 接口层。
//!
//! 所有导出符号均为 `extern "C"` 函数，并容忍 NULL 句柄。句柄是 boxed Rust 对象；每个返回句柄的
//! `*_create`/`*_get_*` 都有对应的 `*_destroy`。
//!
//! 线程约束：
//! - `ViroVideoSink`、`ViroVideoSurface` 与 `ViroFrameRegistry` 可在任意线程使用。
//! - `ViroRenderContext` 必须留在创建它的线程（持有 GL 上下文的线程）。
mod abi;
mod registry;
mod render;
mod sink;
mod surface;

use std::ffi::{c_char, c_void};
use std::sync::Arc;

use gleam::gl::Gl;

use crate::engine::{
    FrameListenerRegistry, FrameSinkError, FrameTicker, GlVideoSink, PixelSurface,
    RenderContext, SinkStats, SurfaceError,
};

/// ### English
/// Success.
///
/// ### 中文
/// 成功。
pub const VIRO_VIDEO_SINK_OK: i32 = 0;
/// ### English
/// NULL handle or malformed argument.
///
/// ### 中文
/// NULL 句柄或参数格式错误。
pub const VIRO_VIDEO_SINK_ERR_INVALID_ARGUMENT: i32 = -1;
/// ### English
/// The sink (or its surface) was already released.
///
/// ### 中文
/// sink（或其 surface）已被释放。
pub const VIRO_VIDEO_SINK_ERR_RELEASED: i32 = -2;
/// ### English
/// Frame size or data length is invalid.
///
/// ### 中文
/// 帧尺寸或数据长度非法。
pub const VIRO_VIDEO_SINK_ERR_INVALID_FRAME: i32 = -3;

/// ### English
/// C ABI version for `viro_video_sink`.
///
/// ### 中文
/// `viro_video_sink` 的 C ABI 版本号。
const VIRO_VIDEO_SINK_ABI_VERSION: u32 = 1;

/// ### English
/// Host-provided GL symbol resolver (`eglGetProcAddress`-compatible).
///
/// ### 中文
/// 宿主提供的 GL 符号解析函数（与 `eglGetProcAddress` 兼容）。
pub type ViroGlLoader = unsafe extern "C" fn(name: *const c_char) -> *const c_void;

#[repr(C)]
/// ### English
/// Opaque sink handle bound to one GL texture.
///
/// ### 中文
/// 绑定到一个 GL 纹理的不透明 sink 句柄。
pub struct ViroVideoSink {
    sink: Arc<GlVideoSink>,
}

#[repr(C)]
/// ### English
/// Opaque producer handle: the surface a decoder writes RGBA frames into.
///
/// ### 中文
/// 不透明的生产者句柄：解码器写入 RGBA 帧的 surface。
pub struct ViroVideoSurface {
    surface: Arc<PixelSurface>,
}

#[repr(C)]
/// ### English
/// Opaque render-thread handle: loaded GL functions plus the per-frame listener ticker.
///
/// ### 中文
/// 不透明的渲染线程句柄：已加载的 GL 函数以及每帧监听器 ticker。
pub struct ViroRenderContext {
    context: RenderContext,
    ticker: FrameTicker<dyn Gl>,
}

#[repr(C)]
/// ### English
/// Opaque, thread-safe handle for registering sinks with a render context.
///
/// ### 中文
/// 不透明、线程安全的句柄，用于向渲染上下文注册 sink。
pub struct ViroFrameRegistry {
    registry: FrameListenerRegistry<dyn Gl>,
}

#[repr(C)]
/// ### English
/// Sink counters returned to the host.
///
/// ### 中文
/// 返回给宿主的 sink 计数器。
pub struct ViroVideoSinkStats {
    /// ### English
    /// Accepted `notify_frame_available` calls.
    ///
    /// ### 中文
    /// 被接受的 `notify_frame_available` 调用次数。
    pub notified: u64,
    /// ### English
    /// Notifications that found a frame already pending (dropped frames).
    ///
    /// ### 中文
    /// 遇到已有待处理帧的通知次数（即丢帧数）。
    pub coalesced: u64,
    /// ### English
    /// Commits performed on the render thread.
    ///
    /// ### 中文
    /// 在渲染线程上执行的 commit 次数。
    pub committed: u64,
    /// ### English
    /// Staged frames overwritten before being uploaded.
    ///
    /// ### 中文
    /// 在上传之前被覆盖的暂存帧数量。
    pub replaced: u64,
}

impl ViroVideoSinkStats {
    fn new(stats: SinkStats, replaced: u64) -> Self {
        Self {
            notified: stats.notified,
            coalesced: stats.coalesced,
            committed: stats.committed,
            replaced,
        }
    }
}

#[inline]
fn sink_status(result: Result<(), FrameSinkError>) -> i32 {
    match result {
        Ok(()) => VIRO_VIDEO_SINK_OK,
        Err(FrameSinkError::Released) => VIRO_VIDEO_SINK_ERR_RELEASED,
    }
}

#[inline]
fn surface_status(result: Result<(), SurfaceError>) -> i32 {
    match result {
        Ok(()) => VIRO_VIDEO_SINK_OK,
        Err(SurfaceError::Released) => VIRO_VIDEO_SINK_ERR_RELEASED,
        Err(SurfaceError::InvalidSize { .. } | SurfaceError::LengthMismatch { .. }) => {
            VIRO_VIDEO_SINK_ERR_INVALID_FRAME
        }
    }
}
