//! ### English
//! Concrete frame buffers for `FrameSink`: the producer's RGBA staging surface and the GL texture
//! it is committed into.
//!
//! ### 中文
//! `FrameSink` 的具体帧缓冲：生产者的 RGBA 暂存 surface，以及它被 commit 到的 GL 纹理。
mod gl_texture;
mod pixel;

pub use gl_texture::GlTextureSurface;
pub use pixel::{PixelFrame, PixelSurface, RGBA_BYTES_PER_PIXEL, rgba_len};
