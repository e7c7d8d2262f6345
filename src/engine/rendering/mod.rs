//! ### English
//! Rendering module entry point: GL loading for the render thread.
//!
//! ### 中文
//! 渲染模块入口：渲染线程的 GL 加载。

mod gl_context;

pub use gl_context::{GlVersion, RenderContext};
