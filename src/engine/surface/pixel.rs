//! ### English
//! Producer-side RGBA staging surface (latest frame wins).
//!
//! ### 中文
//! 生产者侧的 RGBA 暂存 surface（只保留最新帧）。

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dpi::PhysicalSize;

use crate::engine::error::SurfaceError;
use crate::engine::lockfree::CoalescedBox;

/// ### English
/// Bytes per RGBA8 pixel.
///
/// ### 中文
/// 每个 RGBA8 像素的字节数。
pub const RGBA_BYTES_PER_PIXEL: usize = 4;

/// ### English
/// Returns the byte length of a tightly packed RGBA8 frame of `size`.
///
/// ### 中文
/// 返回尺寸为 `size` 的紧密排列 RGBA8 帧的字节长度。
pub fn rgba_len(size: PhysicalSize<u32>) -> Result<usize, SurfaceError> {
    let invalid = SurfaceError::InvalidSize {
        width: size.width,
        height: size.height,
    };
    if size.width == 0 || size.height == 0 {
        return Err(invalid);
    }

    (size.width as usize)
        .checked_mul(size.height as usize)
        .and_then(|pixels| pixels.checked_mul(RGBA_BYTES_PER_PIXEL))
        .ok_or(invalid)
}

/// ### English
/// One decoded frame staged for upload.
///
/// ### 中文
/// 一帧等待上传的已解码帧。
pub struct PixelFrame {
    size: PhysicalSize<u32>,
    /// ### English
    /// Tightly packed RGBA8 rows, top row first.
    ///
    /// ### 中文
    /// 紧密排列的 RGBA8 行数据，首行在前。
    pixels: Vec<u8>,
}

impl PixelFrame {
    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// ### English
/// The surface a decoder writes frames into.
///
/// Only the newest unlatched frame is kept: a write that lands before the previous frame was
/// latched replaces it and bumps `replaced_frames()`. Drained frame buffers are recycled so the
/// steady state does not allocate.
///
/// Writes come from producer threads; `latch`/`recycle` are called by the commit on the render
/// thread.
///
/// ### 中文
/// 解码器写入帧的 surface。
///
/// 只保留最新一帧未被 latch 的帧：若在上一帧被 latch 之前写入，会替换它并增加
/// `replaced_frames()`。已消费的帧缓冲会被回收复用，稳态下不再分配。
///
/// 写入来自生产者线程；`latch`/`recycle` 由渲染线程上的 commit 调用。
#[derive(Default)]
pub struct PixelSurface {
    latest: CoalescedBox<PixelFrame>,
    closed: AtomicBool,
    replaced: AtomicU64,
}

impl PixelSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// ### English
    /// Stages one RGBA8 frame.
    ///
    /// #### Parameters
    /// - `size`: Frame size in pixels (both sides non-zero).
    /// - `pixels`: Tightly packed RGBA8 data, exactly `width * height * 4` bytes.
    ///
    /// ### 中文
    /// 暂存一帧 RGBA8 数据。
    ///
    /// #### 参数
    /// - `size`：帧尺寸（像素，宽高均不为 0）。
    /// - `pixels`：紧密排列的 RGBA8 数据，长度必须为 `width * height * 4` 字节。
    pub fn write_rgba(&self, size: PhysicalSize<u32>, pixels: &[u8]) -> Result<(), SurfaceError> {
        if self.is_closed() {
            return Err(SurfaceError::Released);
        }

        let expected = rgba_len(size)?;
        if pixels.len() != expected {
            return Err(SurfaceError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let mut frame = self.latest.take_spare().unwrap_or_else(|| {
            Box::new(PixelFrame {
                size,
                pixels: Vec::with_capacity(expected),
            })
        });
        frame.size = size;
        frame.pixels.clear();
        frame.pixels.extend_from_slice(pixels);

        if let Some(displaced) = self.latest.publish(frame) {
            self.replaced.fetch_add(1, Ordering::Relaxed);
            self.latest.recycle(displaced);
        }
        Ok(())
    }

    /// ### English
    /// Takes the newest staged frame, if any.
    ///
    /// ### 中文
    /// 取走最新暂存的帧（若有）。
    #[inline]
    pub fn latch(&self) -> Option<Box<PixelFrame>> {
        self.latest.take()
    }

    /// ### English
    /// Hands a latched frame back for reuse by the next write.
    ///
    /// ### 中文
    /// 归还已 latch 的帧，供下一次写入复用。
    #[inline]
    pub fn recycle(&self, frame: Box<PixelFrame>) {
        self.latest.recycle(frame);
    }

    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.latest.is_pending()
    }

    /// ### English
    /// Number of frames overwritten before they were latched.
    ///
    /// ### 中文
    /// 在被 latch 之前就被覆盖的帧数量。
    #[inline]
    pub fn replaced_frames(&self) -> u64 {
        self.replaced.load(Ordering::Relaxed)
    }

    /// ### English
    /// Rejects further writes and drops the pending frame. A write already past the closed check
    /// may still land; it is never latched by a released sink and is freed with the surface.
    ///
    /// ### 中文
    /// 拒绝后续写入并丢弃待处理帧。已通过关闭检查的写入仍可能落地；它不会被已释放的 sink
    /// latch，并随 surface 一起释放。
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        drop(self.latest.take());
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(size: PhysicalSize<u32>, value: u8) -> Vec<u8> {
        vec![value; rgba_len(size).unwrap()]
    }

    #[test]
    fn rgba_len_rejects_empty_and_overflowing_sizes() {
        assert_eq!(rgba_len(PhysicalSize::new(2, 3)), Ok(24));
        assert_eq!(
            rgba_len(PhysicalSize::new(0, 3)),
            Err(SurfaceError::InvalidSize {
                width: 0,
                height: 3
            })
        );
        assert!(rgba_len(PhysicalSize::new(u32::MAX, u32::MAX)).is_err());
    }

    #[test]
    fn newest_write_wins() {
        let surface = PixelSurface::new();
        let size = PhysicalSize::new(2, 2);
        surface.write_rgba(size, &solid(size, 1)).unwrap();
        surface.write_rgba(size, &solid(size, 2)).unwrap();
        surface.write_rgba(size, &solid(size, 3)).unwrap();

        assert_eq!(surface.replaced_frames(), 2);
        let frame = surface.latch().unwrap();
        assert_eq!(frame.size(), size);
        assert!(frame.pixels().iter().all(|&b| b == 3));
        assert!(surface.latch().is_none());
    }

    #[test]
    fn recycled_frame_buffer_is_reused() {
        let surface = PixelSurface::new();
        let size = PhysicalSize::new(4, 4);
        surface.write_rgba(size, &solid(size, 9)).unwrap();
        let frame = surface.latch().unwrap();
        let buffer = frame.pixels().as_ptr();
        surface.recycle(frame);

        surface.write_rgba(size, &solid(size, 10)).unwrap();
        let frame = surface.latch().unwrap();
        assert_eq!(frame.pixels().as_ptr(), buffer);
        assert!(frame.pixels().iter().all(|&b| b == 10));
    }

    #[test]
    fn rejects_length_mismatch() {
        let surface = PixelSurface::new();
        assert_eq!(
            surface.write_rgba(PhysicalSize::new(2, 2), &[0; 15]),
            Err(SurfaceError::LengthMismatch {
                expected: 16,
                actual: 15
            })
        );
        assert!(!surface.has_pending_frame());
    }

    #[test]
    fn close_drops_pending_frame_and_rejects_writes() {
        let surface = PixelSurface::new();
        let size = PhysicalSize::new(1, 1);
        surface.write_rgba(size, &solid(size, 5)).unwrap();
        surface.close();

        assert!(surface.is_closed());
        assert!(!surface.has_pending_frame());
        assert_eq!(
            surface.write_rgba(size, &solid(size, 6)),
            Err(SurfaceError::Released)
        );
    }
}
