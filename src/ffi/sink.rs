//! ### English
//! C ABI bindings for the sink lifecycle, producer notification and render-thread commit.
//!
//! ### 中文
//! sink 生命周期、生产者通知与渲染线程 commit 的 C ABI 绑定。

use std::sync::Arc;

use tracing::warn;

use crate::engine::{FrameSink, GlTextureSurface, SinkConfig};

use super::{
    VIRO_VIDEO_SINK_ERR_INVALID_ARGUMENT, VIRO_VIDEO_SINK_OK, ViroRenderContext, ViroVideoSink,
    ViroVideoSinkStats, ViroVideoSurface, sink_status,
};

#[unsafe(no_mangle)]
/// ### English
/// Creates a sink bound to the `GL_TEXTURE_2D` name `texture_id`.
///
/// `flags` is a `VIRO_VIDEO_SINK_FLAG_*` mask. Returns NULL when `texture_id` is 0.
///
/// ### 中文
/// 创建绑定到 `GL_TEXTURE_2D` 纹理名 `texture_id` 的 sink。
///
/// `flags` 为 `VIRO_VIDEO_SINK_FLAG_*` 位掩码。`texture_id` 为 0 时返回 NULL。
pub extern "C" fn viro_video_sink_create(texture_id: u32, flags: u32) -> *mut ViroVideoSink {
    if texture_id == 0 {
        warn!("viro_video_sink_create called with texture 0");
        return std::ptr::null_mut();
    }

    let config = SinkConfig::from_flags(flags);
    let surface = GlTextureSurface::new(texture_id, &config);
    let sink = Arc::new(FrameSink::with_config(surface, config));
    Box::into_raw(Box::new(ViroVideoSink { sink }))
}

#[unsafe(no_mangle)]
/// ### English
/// Destroys a sink handle, releasing the sink first if the host has not.
///
/// A render context that still lists the sink detaches it on its next frame.
///
/// ### 中文
/// 销毁 sink 句柄；若宿主尚未 release，会先执行 release。
///
/// 仍挂载该 sink 的渲染上下文会在下一帧将其移除。
pub unsafe extern "C" fn viro_video_sink_destroy(sink: *mut ViroVideoSink) {
    if sink.is_null() {
        return;
    }

    let handle = unsafe { Box::from_raw(sink) };
    handle.sink.release_if_live();
}

#[unsafe(no_mangle)]
/// ### English
/// Producer side: signals that a new frame was written to the sink's surface.
/// Safe from any thread; never blocks.
///
/// ### 中文
/// 生产者侧：通知已有新帧写入该 sink 的 surface。可在任意线程调用，从不阻塞。
pub unsafe extern "C" fn viro_video_sink_notify_frame_available(
    sink: *const ViroVideoSink,
) -> i32 {
    if sink.is_null() {
        return VIRO_VIDEO_SINK_ERR_INVALID_ARGUMENT;
    }

    sink_status(unsafe { (*sink).sink.notify_frame_available() })
}

#[unsafe(no_mangle)]
/// ### English
/// Render side: commits the latest frame into the texture if one is pending.
/// Must be called on the thread that created `context`.
///
/// Returns 1 if a frame was committed, 0 if none was pending, or a negative status code.
///
/// ### 中文
/// 渲染侧：若有待处理帧，则将最新帧 commit 到纹理。必须在创建 `context` 的线程上调用。
///
/// commit 了帧返回 1，无待处理帧返回 0，出错返回负的状态码。
pub unsafe extern "C" fn viro_video_sink_consume_frame_if_ready(
    sink: *const ViroVideoSink,
    context: *const ViroRenderContext,
) -> i32 {
    if sink.is_null() || context.is_null() {
        return VIRO_VIDEO_SINK_ERR_INVALID_ARGUMENT;
    }

    let gl = unsafe { (*context).context.gl() };
    match unsafe { (*sink).sink.consume_frame_if_ready(gl) } {
        Ok(committed) => i32::from(committed),
        Err(err) => sink_status(Err(err)),
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Lifecycle side: releases the sink and invalidates its surface. Call once at teardown.
///
/// ### 中文
/// 生命周期侧：释放 sink 并使其 surface 失效。在销毁时调用一次。
pub unsafe extern "C" fn viro_video_sink_release(sink: *const ViroVideoSink) -> i32 {
    if sink.is_null() {
        return VIRO_VIDEO_SINK_ERR_INVALID_ARGUMENT;
    }

    sink_status(unsafe { (*sink).sink.release() })
}

#[unsafe(no_mangle)]
/// ### English
/// Writes the sink's counters into `out`.
///
/// ### 中文
/// 将 sink 的计数器写入 `out`。
pub unsafe extern "C" fn viro_video_sink_get_stats(
    sink: *const ViroVideoSink,
    out: *mut ViroVideoSinkStats,
) -> i32 {
    if sink.is_null() || out.is_null() {
        return VIRO_VIDEO_SINK_ERR_INVALID_ARGUMENT;
    }

    let sink = unsafe { &(*sink).sink };
    let replaced = sink.surface_handle().replaced_frames();
    unsafe {
        out.write(ViroVideoSinkStats::new(sink.stats(), replaced));
    }
    VIRO_VIDEO_SINK_OK
}

#[unsafe(no_mangle)]
/// ### English
/// Returns a new producer handle for the sink's surface (release with
/// `viro_video_surface_destroy`). The handle stays valid after the sink is released; writes
/// through it then fail with `VIRO_VIDEO_SINK_ERR_RELEASED`.
///
/// ### 中文
/// 返回该 sink 的 surface 的新生产者句柄（用 `viro_video_surface_destroy` 释放）。
/// sink 被 release 后句柄仍然有效，但通过它的写入会返回 `VIRO_VIDEO_SINK_ERR_RELEASED`。
pub unsafe extern "C" fn viro_video_sink_get_surface(
    sink: *const ViroVideoSink,
) -> *mut ViroVideoSurface {
    if sink.is_null() {
        return std::ptr::null_mut();
    }

    let surface = unsafe { (*sink).sink.surface_handle().clone() };
    Box::into_raw(Box::new(ViroVideoSurface { surface }))
}
