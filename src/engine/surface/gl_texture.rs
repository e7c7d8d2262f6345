//! ### English
//! GL texture frame buffer: commits the newest staged frame into an externally owned texture.
//!
//! ### 中文
//! GL 纹理帧缓冲：将最新暂存帧 commit 到外部持有的纹理中。

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dpi::PhysicalSize;
use gleam::gl::{self, Gl};
use tracing::{debug, trace};

use crate::engine::config::SinkConfig;
use crate::engine::frame::FrameSurface;

use super::pixel::{PixelFrame, PixelSurface};

/// ### English
/// The few `GL_TEXTURE_2D` calls a commit makes. Implemented for `dyn Gl`.
///
/// ### 中文
/// commit 用到的少量 `GL_TEXTURE_2D` 调用。为 `dyn Gl` 实现。
pub(crate) trait TextureTarget {
    /// ### English
    /// Binds `texture` to `GL_TEXTURE_2D` (0 unbinds).
    ///
    /// ### 中文
    /// 将 `texture` 绑定到 `GL_TEXTURE_2D`（0 表示解绑）。
    fn bind(&self, texture: gl::GLuint);

    /// ### English
    /// `glTexImage2D` with RGBA8 data, then linear filtering and edge clamping.
    ///
    /// ### 中文
    /// 以 RGBA8 数据调用 `glTexImage2D`，然后设置线性过滤与边缘钳制。
    fn allocate(&self, internal_format: gl::GLint, size: PhysicalSize<u32>, pixels: &[u8]);

    /// ### English
    /// `glTexSubImage2D` over the whole texture.
    ///
    /// ### 中文
    /// 对整张纹理调用 `glTexSubImage2D`。
    fn update(&self, size: PhysicalSize<u32>, pixels: &[u8]);
}

impl TextureTarget for dyn Gl {
    fn bind(&self, texture: gl::GLuint) {
        self.bind_texture(gl::TEXTURE_2D, texture);
    }

    fn allocate(&self, internal_format: gl::GLint, size: PhysicalSize<u32>, pixels: &[u8]) {
        self.tex_image_2d(
            gl::TEXTURE_2D,
            0,
            internal_format,
            size.width as gl::GLsizei,
            size.height as gl::GLsizei,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            Some(pixels),
        );
        for (name, value) in [
            (gl::TEXTURE_MAG_FILTER, gl::LINEAR),
            (gl::TEXTURE_MIN_FILTER, gl::LINEAR),
            (gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE),
            (gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE),
        ] {
            self.tex_parameter_i(gl::TEXTURE_2D, name, value as gl::GLint);
        }
    }

    fn update(&self, size: PhysicalSize<u32>, pixels: &[u8]) {
        self.tex_sub_image_2d(
            gl::TEXTURE_2D,
            0,
            0,
            0,
            size.width as gl::GLsizei,
            size.height as gl::GLsizei,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixels,
        );
    }
}

/// ### English
/// How a frame reaches the texture.
///
/// ### 中文
/// 帧写入纹理的方式。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextureUpload {
    /// ### English
    /// Storage is missing or has another size: `glTexImage2D`.
    ///
    /// ### 中文
    /// 尚无存储或尺寸不同：`glTexImage2D`。
    Allocate,
    /// ### English
    /// Storage already matches: `glTexSubImage2D`.
    ///
    /// ### 中文
    /// 存储尺寸已匹配：`glTexSubImage2D`。
    Update,
}

/// ### English
/// `FrameSurface` backed by a GL texture name the renderer created.
///
/// The producer writes into the shared `PixelSurface` handle; the commit uploads the newest frame
/// with `glTexSubImage2D`, reallocating storage with `glTexImage2D` only when the frame size
/// changes. Rows are uploaded top row first, so samplers flip V.
///
/// The texture is not deleted on release: it belongs to the renderer.
///
/// ### 中文
/// 由渲染器创建的 GL 纹理名所支撑的 `FrameSurface`。
///
/// 生产者写入共享的 `PixelSurface` 句柄；commit 用 `glTexSubImage2D` 上传最新帧，仅在帧尺寸
/// 变化时用 `glTexImage2D` 重新分配存储。行数据按首行在前上传，因此采样时需翻转 V。
///
/// release 时不会删除纹理：纹理归渲染器所有。
pub struct GlTextureSurface {
    texture_id: gl::GLuint,
    internal_format: gl::GLint,
    /// ### English
    /// Currently allocated texture size (0x0 = never allocated). Only the commit writes it.
    ///
    /// ### 中文
    /// 当前已分配的纹理尺寸（0x0 表示尚未分配）。只有 commit 会写入。
    allocated_width: AtomicU32,
    allocated_height: AtomicU32,
    surface: Arc<PixelSurface>,
}

impl GlTextureSurface {
    /// ### English
    /// Binds a new surface to `texture_id` (a `GL_TEXTURE_2D` name).
    ///
    /// ### 中文
    /// 创建绑定到 `texture_id`（`GL_TEXTURE_2D` 纹理名）的新 surface。
    pub fn new(texture_id: u32, config: &SinkConfig) -> Self {
        let internal_format = if config.srgb_texture {
            gl::SRGB8_ALPHA8 as gl::GLint
        } else {
            gl::RGBA8 as gl::GLint
        };

        Self {
            texture_id,
            internal_format,
            allocated_width: AtomicU32::new(0),
            allocated_height: AtomicU32::new(0),
            surface: Arc::new(PixelSurface::new()),
        }
    }

    #[inline]
    pub fn texture_id(&self) -> u32 {
        self.texture_id
    }

    #[inline]
    pub fn internal_format(&self) -> gl::GLint {
        self.internal_format
    }

    pub fn allocated_size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(
            self.allocated_width.load(Ordering::Relaxed),
            self.allocated_height.load(Ordering::Relaxed),
        )
    }

    #[inline]
    fn upload_kind(&self, size: PhysicalSize<u32>) -> TextureUpload {
        if self.allocated_size() == size {
            TextureUpload::Update
        } else {
            TextureUpload::Allocate
        }
    }

    fn upload<T: TextureTarget + ?Sized>(&self, target: &T, frame: &PixelFrame) -> TextureUpload {
        let size = frame.size();
        let kind = self.upload_kind(size);

        target.bind(self.texture_id);
        match kind {
            TextureUpload::Allocate => {
                target.allocate(self.internal_format, size, frame.pixels());
                self.allocated_width.store(size.width, Ordering::Relaxed);
                self.allocated_height.store(size.height, Ordering::Relaxed);
                debug!(
                    texture_id = self.texture_id,
                    width = size.width,
                    height = size.height,
                    "video texture storage allocated"
                );
            }
            TextureUpload::Update => target.update(size, frame.pixels()),
        }
        target.bind(0);
        kind
    }

    /// ### English
    /// Latches the newest staged frame, uploads it into `target` and recycles its buffer.
    ///
    /// Returns `None` when nothing was staged (the producer signalled without writing, or the
    /// frame was already taken by an earlier commit). The texture is then left untouched.
    ///
    /// ### 中文
    /// latch 最新暂存帧，上传到 `target` 并回收其缓冲。
    ///
    /// 没有暂存帧时（生产者只通知未写入，或该帧已被先前的 commit 取走）返回 `None`，
    /// 纹理保持不变。
    pub(crate) fn commit_into<T>(&self, target: &T) -> Option<TextureUpload>
    where
        T: TextureTarget + ?Sized,
    {
        let Some(frame) = self.surface.latch() else {
            trace!(texture_id = self.texture_id, "commit found no staged frame");
            return None;
        };
        let kind = self.upload(target, &frame);
        self.surface.recycle(frame);
        Some(kind)
    }
}

impl FrameSurface for GlTextureSurface {
    type Handle = Arc<PixelSurface>;
    type Context = dyn Gl;

    #[inline]
    fn handle(&self) -> &Arc<PixelSurface> {
        &self.surface
    }

    fn update_tex_image(&self, gl: &Self::Context) {
        self.commit_into(gl);
    }

    fn release(&self) {
        self.surface.close();
    }
}
