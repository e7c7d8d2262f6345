//! ### English
//! C ABI bindings for the producer-side pixel surface.
//!
//! ### 中文
//! 生产者侧像素 surface 的 C ABI 绑定。

use dpi::PhysicalSize;

use super::{VIRO_VIDEO_SINK_ERR_INVALID_ARGUMENT, ViroVideoSurface, surface_status};

#[unsafe(no_mangle)]
/// ### English
/// Stages a tightly packed RGBA8 frame (`width * height * 4` bytes) as the surface's latest
/// frame. Copies `pixels`; the caller keeps ownership.
///
/// Follow with `viro_video_sink_notify_frame_available` so the render thread picks it up.
///
/// ### 中文
/// 将紧密排列的 RGBA8 帧（`width * height * 4` 字节）暂存为该 surface 的最新帧。
/// 会复制 `pixels`；调用方保留其所有权。
///
/// 之后调用 `viro_video_sink_notify_frame_available`，让渲染线程取走该帧。
pub unsafe extern "C" fn viro_video_surface_write_rgba(
    surface: *const ViroVideoSurface,
    width: u32,
    height: u32,
    pixels: *const u8,
    len: usize,
) -> i32 {
    if surface.is_null() || pixels.is_null() {
        return VIRO_VIDEO_SINK_ERR_INVALID_ARGUMENT;
    }

    let pixels = unsafe { std::slice::from_raw_parts(pixels, len) };
    let size = PhysicalSize::new(width, height);
    surface_status(unsafe { (*surface).surface.write_rgba(size, pixels) })
}

#[unsafe(no_mangle)]
/// ### English
/// Destroys a producer handle.
///
/// ### 中文
/// 销毁生产者句柄。
pub unsafe extern "C" fn viro_video_surface_destroy(surface: *mut ViroVideoSurface) {
    if surface.is_null() {
        return;
    }

    unsafe {
        drop(Box::from_raw(surface));
    }
}
