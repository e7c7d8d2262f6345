/// ### English
/// `viro_video_sink` crate root.
/// Latest-wins video frame handoff between a decoder thread and a GL render thread.
/// The C ABI lives in `ffi`; the Rust API lives under `engine`.
///
/// ### 中文
/// `viro_video_sink` 的 crate 根。
/// 解码线程与 GL 渲染线程之间 latest-wins 的视频帧交接。
/// C ABI 位于 `ffi`；Rust API 位于 `engine` 模块。
pub mod engine;
mod ffi;

pub use engine::*;
