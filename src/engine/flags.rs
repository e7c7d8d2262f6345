//! ### English
//! Bitflags controlling optional sink behaviors.
//!
//! These are passed through the C ABI as a `u32` bitmask; unknown bits are ignored.
//!
//! ### 中文
//! 控制 sink 可选行为的位标志（bitflags）。
//!
//! 通过 C ABI 以 `u32` 位掩码传入；未知位会被忽略。

/// ### English
/// Fail fast on use after release: debug builds panic instead of only returning
/// `FrameSinkError::Released`. Release builds behave as without the flag.
///
/// ### 中文
/// 释放后使用时快速失败：debug 构建直接 panic，而不仅返回 `FrameSinkError::Released`。
/// release 构建的行为与未设置该标志相同。
pub const VIRO_VIDEO_SINK_FLAG_STRICT_RELEASE: u32 = 1 << 0;

/// ### English
/// Skip notify/commit/coalesce counters (`stats()` then reports zeros).
///
/// ### 中文
/// 跳过 notify/commit/coalesce 计数（此时 `stats()` 全部为 0）。
pub const VIRO_VIDEO_SINK_FLAG_NO_STATS: u32 = 1 << 1;

/// ### English
/// Allocate the video texture as `SRGB8_ALPHA8` instead of `RGBA8`.
///
/// ### 中文
/// 以 `SRGB8_ALPHA8`（而非 `RGBA8`）分配视频纹理。
pub const VIRO_VIDEO_SINK_FLAG_SRGB_TEXTURE: u32 = 1 << 2;
