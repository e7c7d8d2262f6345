//! ### English
//! Cache-line padding helpers for the sink's contended atomics.
//!
//! ### 中文
//! sink 中争用原子变量使用的 cache line 填充工具。

/// ### English
/// The cache line size we pad to (bytes).
///
/// ### 中文
/// 填充所对齐的 cache line 大小（字节）。
pub(crate) const CACHE_LINE_BYTES: usize = 64;

/// ### English
/// Returns the padding bytes that follow `bytes_used` bytes of fields so the next field starts on
/// a fresh cache line.
///
/// ### 中文
/// 返回在已占用 `bytes_used` 字节之后需要补齐的字节数，使下一个字段落在新的 cache line 上。
#[inline]
pub(crate) const fn pad_to_cache_line(bytes_used: usize) -> usize {
    match bytes_used % CACHE_LINE_BYTES {
        0 => 0,
        rem => CACHE_LINE_BYTES - rem,
    }
}

/// ### English
/// Padding after a single field of type `T`.
///
/// ### 中文
/// 单个 `T` 字段之后所需的填充字节数。
#[inline]
pub(crate) const fn pad_after<T>() -> usize {
    pad_to_cache_line(std::mem::size_of::<T>())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU8, AtomicU64};

    use super::*;

    #[test]
    fn pads_to_next_line() {
        assert_eq!(pad_to_cache_line(0), 0);
        assert_eq!(pad_to_cache_line(1), 63);
        assert_eq!(pad_to_cache_line(64), 0);
        assert_eq!(pad_to_cache_line(65), 63);
        assert_eq!(pad_after::<AtomicU8>(), 63);
        assert_eq!(pad_after::<AtomicU64>(), 56);
    }
}
