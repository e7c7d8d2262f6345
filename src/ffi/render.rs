//! ### English
//! C ABI bindings for the render-thread context and per-frame listener dispatch.
//!
//! ### 中文
//! 渲染线程上下文与每帧监听器派发的 C ABI 绑定。

use std::ffi::{CString, c_void};

use tracing::warn;

use crate::engine::{FrameTicker, RenderContext};

use super::{ViroFrameRegistry, ViroGlLoader, ViroRenderContext};

#[unsafe(no_mangle)]
/// ### English
/// Loads GL through `loader` for the context current on the calling thread.
///
/// Returns NULL if `loader` is NULL, no GL version can be read, or the version is older than
/// GL/GLES 2.0. The returned handle must only be used and destroyed on this thread.
///
/// ### 中文
/// 通过 `loader` 为调用线程上当前 current 的上下文加载 GL。
///
/// 若 `loader` 为 NULL、无法读取 GL 版本，或版本低于 GL/GLES 2.0，则返回 NULL。
/// 返回的句柄只能在本线程上使用与销毁。
pub unsafe extern "C" fn viro_render_context_create(
    loader: Option<ViroGlLoader>,
) -> *mut ViroRenderContext {
    let Some(loader) = loader else {
        return std::ptr::null_mut();
    };

    let resolve = |name: &str| -> *const c_void {
        match CString::new(name) {
            Ok(name) => unsafe { loader(name.as_ptr()) },
            Err(_) => std::ptr::null(),
        }
    };

    match RenderContext::load(resolve) {
        Ok(context) => Box::into_raw(Box::new(ViroRenderContext {
            context,
            ticker: FrameTicker::new(),
        })),
        Err(err) => {
            warn!(%err, "failed to create render context");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Destroys a render context. Registered sinks are dropped from the dispatch list, not released.
///
/// ### 中文
/// 销毁渲染上下文。已注册的 sink 只会从派发列表中移除，不会被 release。
pub unsafe extern "C" fn viro_render_context_destroy(context: *mut ViroRenderContext) {
    if context.is_null() {
        return;
    }

    unsafe {
        drop(Box::from_raw(context));
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Per-frame hook: gives every registered sink a chance to commit its latest frame.
///
/// Call once per rendered frame, before drawing, on the context's thread.
/// Returns the number of sinks dispatched this frame; released sinks are detached afterwards.
///
/// ### 中文
/// 每帧钩子：让每个已注册的 sink 有机会 commit 其最新帧。
///
/// 每渲染一帧、在绘制之前，于该上下文所在线程调用一次。
/// 返回本帧被派发的 sink 数量；已释放的 sink 随后会被移除。
pub unsafe extern "C" fn viro_render_context_draw_frame(context: *mut ViroRenderContext) -> u32 {
    if context.is_null() {
        return 0;
    }

    let ViroRenderContext { context, ticker } = unsafe { &mut *context };
    let report = ticker.tick(context.gl());
    u32::try_from(report.dispatched).unwrap_or(u32::MAX)
}

#[unsafe(no_mangle)]
/// ### English
/// Returns a thread-safe registry handle for this context (release with
/// `viro_frame_registry_destroy`). The registry outlives the context; operations on it after
/// the context is destroyed fail.
///
/// ### 中文
/// 返回该上下文的线程安全注册句柄（用 `viro_frame_registry_destroy` 释放）。
/// 注册句柄可比上下文存活更久；上下文销毁后对其的操作会失败。
pub unsafe extern "C" fn viro_render_context_registry(
    context: *const ViroRenderContext,
) -> *mut ViroFrameRegistry {
    if context.is_null() {
        return std::ptr::null_mut();
    }

    let registry = unsafe { (*context).ticker.registry() };
    Box::into_raw(Box::new(ViroFrameRegistry { registry }))
}
