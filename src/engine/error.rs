//! ### English
//! Error types for the sink, the producer surface and render-context loading.
//!
//! ### 中文
//! sink、生产者 surface 以及渲染上下文加载的错误类型。
use thiserror::Error;

/// ### English
/// Returned by `FrameSink` operations. The only fault is use after `release()`.
///
/// ### 中文
/// `FrameSink` 操作返回的错误。唯一的错误是在 `release()` 之后继续调用。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSinkError {
    #[error("frame sink used after release")]
    Released,
}

/// ### English
/// Returned when the producer writes into a `PixelSurface`.
///
/// ### 中文
/// 生产者写入 `PixelSurface` 时返回的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface written after release")]
    Released,

    #[error("invalid frame size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("frame data length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// ### English
/// Returned when GL entry points cannot be loaded on the render thread.
///
/// ### 中文
/// 在渲染线程上无法加载 GL 函数时返回的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderContextError {
    #[error("GL_VERSION is empty (no current context?)")]
    MissingVersion,

    #[error("unsupported GL version `{version}`")]
    Unsupported { version: String },
}
