//! ### English
//! Typed sink configuration decoded from the C ABI flag mask.
//!
//! ### 中文
//! 由 C ABI 标志位解码得到的 sink 类型化配置。
use super::flags::{
    VIRO_VIDEO_SINK_FLAG_NO_STATS, VIRO_VIDEO_SINK_FLAG_SRGB_TEXTURE,
    VIRO_VIDEO_SINK_FLAG_STRICT_RELEASE,
};

/// ### English
/// Per-sink options. The default tracks stats, returns errors on use after release and uses a
/// linear `RGBA8` texture.
///
/// ### 中文
/// 每个 sink 的选项。默认开启统计、释放后使用时返回错误、使用线性 `RGBA8` 纹理。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub strict_release: bool,
    pub track_stats: bool,
    pub srgb_texture: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            strict_release: false,
            track_stats: true,
            srgb_texture: false,
        }
    }
}

impl SinkConfig {
    /// ### English
    /// Decodes a `VIRO_VIDEO_SINK_FLAG_*` mask.
    ///
    /// ### 中文
    /// 解码 `VIRO_VIDEO_SINK_FLAG_*` 位掩码。
    pub fn from_flags(flags: u32) -> Self {
        Self {
            strict_release: (flags & VIRO_VIDEO_SINK_FLAG_STRICT_RELEASE) != 0,
            track_stats: (flags & VIRO_VIDEO_SINK_FLAG_NO_STATS) == 0,
            srgb_texture: (flags & VIRO_VIDEO_SINK_FLAG_SRGB_TEXTURE) != 0,
        }
    }

    pub fn to_flags(self) -> u32 {
        let mut flags = 0;
        if self.strict_release {
            flags |= VIRO_VIDEO_SINK_FLAG_STRICT_RELEASE;
        }
        if !self.track_stats {
            flags |= VIRO_VIDEO_SINK_FLAG_NO_STATS;
        }
        if self.srgb_texture {
            flags |= VIRO_VIDEO_SINK_FLAG_SRGB_TEXTURE;
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_flags_match_default() {
        assert_eq!(SinkConfig::from_flags(0), SinkConfig::default());
        assert_eq!(SinkConfig::default().to_flags(), 0);
    }

    #[test]
    fn decodes_each_flag() {
        let config = SinkConfig::from_flags(
            VIRO_VIDEO_SINK_FLAG_STRICT_RELEASE
                | VIRO_VIDEO_SINK_FLAG_NO_STATS
                | VIRO_VIDEO_SINK_FLAG_SRGB_TEXTURE,
        );
        assert!(config.strict_release);
        assert!(!config.track_stats);
        assert!(config.srgb_texture);
    }

    #[test]
    fn ignores_unknown_bits() {
        let flags = VIRO_VIDEO_SINK_FLAG_SRGB_TEXTURE | (1 << 31);
        let config = SinkConfig::from_flags(flags);
        assert_eq!(config.to_flags(), VIRO_VIDEO_SINK_FLAG_SRGB_TEXTURE);
    }
}
