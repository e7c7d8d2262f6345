use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::engine::cache::{CACHE_LINE_BYTES, pad_after};
use crate::engine::config::SinkConfig;
use crate::engine::error::FrameSinkError;

use super::surface::FrameSurface;
use super::{SINK_RELEASED, SinkState};

const COUNTERS_PAD_BYTES: usize = CACHE_LINE_BYTES - 3 * std::mem::size_of::<AtomicU64>();

/// ### English
/// Latest-wins handoff between a frame producer and the render thread.
///
/// - `notify_frame_available` may be called from any thread, concurrently, at any rate.
/// - `consume_frame_if_ready` must only be called from the thread owning `S::Context`. Two
///   simultaneous consumers break the contract; debug builds assert on it, release builds do not
///   guard it.
/// - `release` ends the sink. Every later call returns `FrameSinkError::Released`.
///
/// ### 中文
/// 帧生产者与渲染线程之间 latest-wins 的交接。
///
/// - `notify_frame_available` 可在任意线程、并发、以任意频率调用。
/// - `consume_frame_if_ready` 只能在持有 `S::Context` 的线程调用。两个消费者同时调用违反契约；
///   debug 构建会断言，release 构建不做防护。
/// - `release` 结束该 sink，之后的调用都返回 `FrameSinkError::Released`。
pub struct FrameSink<S: FrameSurface> {
    /// ### English
    /// State word (`SINK_*` bits), alone on its cache line.
    ///
    /// ### 中文
    /// 状态字（`SINK_*` 位），独占一个 cache line。
    cell: StateCell,
    /// ### English
    /// Stats counters, kept off the state word's cache line.
    ///
    /// ### 中文
    /// 统计计数器，与状态字分处不同 cache line。
    counters: SinkCounters,
    config: SinkConfig,
    /// ### English
    /// The bound frame buffer (fixed at construction).
    ///
    /// ### 中文
    /// 绑定的帧缓冲（构造时固定）。
    surface: S,
}

#[repr(C, align(64))]
struct StateCell {
    state: AtomicU8,
    _padding: [u8; pad_after::<AtomicU8>()],
}

#[repr(C, align(64))]
struct SinkCounters {
    notified: AtomicU64,
    coalesced: AtomicU64,
    committed: AtomicU64,
    _padding: [u8; COUNTERS_PAD_BYTES],
}

impl<S: FrameSurface> FrameSink<S> {
    /// ### English
    /// Binds a new sink to `surface` with the default config. Starts `Idle`.
    ///
    /// ### 中文
    /// 使用默认配置创建绑定到 `surface` 的 sink，初始状态为 `Idle`。
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, SinkConfig::default())
    }

    pub fn with_config(surface: S, config: SinkConfig) -> Self {
        debug!(?config, "frame sink created");
        Self {
            cell: StateCell {
                state: AtomicU8::new(0),
                _padding: [0; pad_after::<AtomicU8>()],
            },
            counters: SinkCounters {
                notified: AtomicU64::new(0),
                coalesced: AtomicU64::new(0),
                committed: AtomicU64::new(0),
                _padding: [0; COUNTERS_PAD_BYTES],
            },
            config,
            surface,
        }
    }

    /// ### English
    /// Returns the handle the producer writes into. Pure accessor: the handle never changes, so
    /// no synchronization is involved, and it stays readable after release (writes through it are
    /// rejected by the surface itself).
    ///
    /// ### 中文
    /// 返回生产者写入的句柄。纯访问器：句柄不会变化，因此无需同步；release 之后仍可读取
    ///（通过它的写入会被 surface 自身拒绝）。
    #[inline]
    pub fn surface_handle(&self) -> &S::Handle {
        self.surface.handle()
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn config(&self) -> SinkConfig {
        self.config
    }

    /// ### English
    /// Returns the current state (Acquire load; may be stale by the time the caller looks at it).
    ///
    /// ### 中文
    /// 返回当前状态（Acquire 读取；调用方查看时可能已过期）。
    #[inline]
    pub fn state(&self) -> SinkState {
        SinkState::from_bits(self.cell.state.load(Ordering::Acquire))
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.cell.state.load(Ordering::Acquire) & SINK_RELEASED != 0
    }

    /// ### English
    /// Reports a call made after `release()` and returns the error for it.
    ///
    /// ### 中文
    /// 报告 `release()` 之后的调用，并返回对应错误。
    #[cold]
    fn released_usage(&self, operation: &'static str) -> FrameSinkError {
        warn!(operation, "frame sink used after release");
        debug_assert!(
            !self.config.strict_release,
            "frame sink used after release: {operation}"
        );
        FrameSinkError::Released
    }
}

impl<S: FrameSurface> Drop for FrameSink<S> {
    /// ### English
    /// Runs the release steps if the owner never called `release()`.
    ///
    /// ### 中文
    /// 若持有者从未调用 `release()`，则在 drop 时执行释放步骤。
    fn drop(&mut self) {
        let state = self.cell.state.get_mut();
        if *state & SINK_RELEASED == 0 {
            *state = SINK_RELEASED;
            self.surface.release();
            debug!("frame sink released on drop");
        }
    }
}

mod consume;
mod notify;
mod release;
mod stats;

#[cfg(test)]
mod tests;
