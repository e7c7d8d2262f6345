#[unsafe(no_mangle)]
/// ### English
/// Returns the C ABI version.
///
/// ### 中文
/// 返回 C ABI 版本号。
pub extern "C" fn viro_video_sink_abi_version() -> u32 {
    super::VIRO_VIDEO_SINK_ABI_VERSION
}
