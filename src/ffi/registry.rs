//! ### English
//! C ABI bindings for attaching sinks to a render context from any thread.
//!
//! ### 中文
//! 从任意线程将 sink 挂载到渲染上下文的 C ABI 绑定。

use std::sync::Arc;

use gleam::gl::Gl;

use crate::engine::{FrameListener, ListenerId};

use super::{ViroFrameRegistry, ViroVideoSink};

#[unsafe(no_mangle)]
/// ### English
/// Attaches `sink` to the registry's render context. Takes effect on the next
/// `viro_render_context_draw_frame`.
///
/// Returns a non-zero listener id, or 0 if an argument is NULL or the context is gone.
///
/// ### 中文
/// 将 `sink` 挂载到该注册句柄对应的渲染上下文。在下一次 `viro_render_context_draw_frame` 时生效。
///
/// 返回非零监听器 id；参数为 NULL 或上下文已销毁时返回 0。
pub unsafe extern "C" fn viro_frame_registry_add_sink(
    registry: *const ViroFrameRegistry,
    sink: *const ViroVideoSink,
) -> u32 {
    if registry.is_null() || sink.is_null() {
        return 0;
    }

    let listener: Arc<dyn FrameListener<dyn Gl>> = unsafe { (*sink).sink.clone() };
    unsafe { (*registry).registry.add(listener) }.map_or(0, ListenerId::get)
}

#[unsafe(no_mangle)]
/// ### English
/// Detaches the listener `id` returned by `viro_frame_registry_add_sink`.
///
/// Returns 1 if the removal was queued, 0 otherwise.
///
/// ### 中文
/// 移除由 `viro_frame_registry_add_sink` 返回的监听器 `id`。
///
/// 移除请求成功入队返回 1，否则返回 0。
pub unsafe extern "C" fn viro_frame_registry_remove(
    registry: *const ViroFrameRegistry,
    id: u32,
) -> u8 {
    if registry.is_null() {
        return 0;
    }
    let Some(id) = ListenerId::from_raw(id) else {
        return 0;
    };

    u8::from(unsafe { (*registry).registry.remove(id) })
}

#[unsafe(no_mangle)]
/// ### English
/// Destroys a registry handle. Sinks already attached stay attached.
///
/// ### 中文
/// 销毁注册句柄。已挂载的 sink 保持挂载。
pub unsafe extern "C" fn viro_frame_registry_destroy(registry: *mut ViroFrameRegistry) {
    if registry.is_null() {
        return;
    }

    unsafe {
        drop(Box::from_raw(registry));
    }
}
