/// ### English
/// Render-thread GL context wrapper.
/// Loads GL entry points through the host's `get_proc_address`, picks the desktop or ES function
/// table from `GL_VERSION`, and hands the `gleam` API to frame commits.
///
/// ### 中文
/// 渲染线程的 GL 上下文封装。
/// 通过宿主的 `get_proc_address` 加载 GL 函数，根据 `GL_VERSION` 选择桌面版或 ES 函数表，
/// 并将 `gleam` API 提供给帧 commit 使用。
use std::ffi::c_void;
use std::rc::Rc;

use gleam::gl::{self, Gl};
use glow::HasContext as _;
use tracing::debug;

use crate::engine::error::RenderContextError;

/// ### English
/// Parsed `GL_VERSION`.
///
/// ### 中文
/// 解析后的 `GL_VERSION`。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub is_gles: bool,
}

impl GlVersion {
    /// ### English
    /// Parses `"4.6.0 NVIDIA ..."` or `"OpenGL ES 3.2 ..."`. Returns `None` when no
    /// `major.minor` token is present.
    ///
    /// ### 中文
    /// 解析 `"4.6.0 NVIDIA ..."` 或 `"OpenGL ES 3.2 ..."`。若找不到 `major.minor` 形式的片段，
    /// 返回 `None`。
    pub fn parse(version: &str) -> Option<Self> {
        let is_gles = version.starts_with("OpenGL ES");
        let token = version
            .split_whitespace()
            .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))?;

        let mut parts = token.split('.');
        let major = parts.next()?.parse::<u32>().ok()?;
        let minor = parts
            .next()
            .and_then(|part| {
                let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
                digits.parse::<u32>().ok()
            })
            .unwrap_or(0);

        Some(Self {
            major,
            minor,
            is_gles,
        })
    }

    /// ### English
    /// sRGB textures are core in GL 2.1+ and GLES 3.0+.
    ///
    /// ### 中文
    /// sRGB 纹理在 GL 2.1+ 与 GLES 3.0+ 中为核心特性。
    pub fn supports_srgb(&self) -> bool {
        if self.is_gles {
            self.major >= 3
        } else {
            self.major >= 3 || (self.major == 2 && self.minor >= 1)
        }
    }

    /// ### English
    /// Minimum for `glTexSubImage2D` uploads of RGBA8: GLES 2.0 / GL 2.0.
    ///
    /// ### 中文
    /// RGBA8 `glTexSubImage2D` 上传的最低要求：GLES 2.0 / GL 2.0。
    fn is_supported(&self) -> bool {
        self.major >= 2
    }
}

/// ### English
/// GL function table for the thread whose context was current at load time. Not `Send`.
///
/// ### 中文
/// 加载时 current 上下文所在线程的 GL 函数表。不可 `Send`。
pub struct RenderContext {
    gl: Rc<dyn Gl>,
    version: GlVersion,
}

impl RenderContext {
    /// ### English
    /// Loads GL for the context current on the calling thread.
    ///
    /// #### Parameters
    /// - `loader`: Resolves a GL symbol name to its address (null if missing).
    ///
    /// ### 中文
    /// 为调用线程上当前 current 的上下文加载 GL。
    ///
    /// #### 参数
    /// - `loader`：将 GL 符号名解析为地址（缺失时返回 null）。
    pub fn load<F>(mut loader: F) -> Result<Self, RenderContextError>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let glow = unsafe { glow::Context::from_loader_function(|name| loader(name)) };
        let version_string = unsafe { glow.get_parameter_string(glow::VERSION) };
        if version_string.trim().is_empty() {
            return Err(RenderContextError::MissingVersion);
        }

        let version = GlVersion::parse(&version_string)
            .filter(GlVersion::is_supported)
            .ok_or_else(|| RenderContextError::Unsupported {
                version: version_string.clone(),
            })?;

        let gl: Rc<dyn Gl> = unsafe {
            if version.is_gles {
                gl::GlesFns::load_with(|name| loader(name))
            } else {
                gl::GlFns::load_with(|name| loader(name))
            }
        };

        debug!(%version_string, ?version, "render context loaded");
        Ok(Self { gl, version })
    }

    /// ### English
    /// Wraps a `gleam` table the host already loaded.
    ///
    /// ### 中文
    /// 封装宿主已加载的 `gleam` 函数表。
    pub fn from_gl(gl: Rc<dyn Gl>, version: GlVersion) -> Self {
        Self { gl, version }
    }

    #[inline]
    pub fn gl(&self) -> &dyn Gl {
        &*self.gl
    }

    #[inline]
    pub fn version(&self) -> GlVersion {
        self.version
    }
}
