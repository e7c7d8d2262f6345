use std::sync::atomic::Ordering;

use crate::engine::frame::SinkStats;
use crate::engine::frame::surface::FrameSurface;

use super::FrameSink;

impl<S: FrameSurface> FrameSink<S> {
    /// ### English
    /// Snapshot of the counters (Relaxed loads; fields may be mutually inconsistent while
    /// producers are running). All zeros when the sink was created with stats disabled.
    ///
    /// ### 中文
    /// 计数器快照（Relaxed 读取；生产者运行时各字段之间可能不一致）。
    /// 若创建时关闭了统计，则全部为 0。
    pub fn stats(&self) -> SinkStats {
        SinkStats {
            notified: self.counters.notified.load(Ordering::Relaxed),
            coalesced: self.counters.coalesced.load(Ordering::Relaxed),
            committed: self.counters.committed.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub(super) fn record_notify(&self, coalesced: bool) {
        if !self.config.track_stats {
            return;
        }
        self.counters.notified.fetch_add(1, Ordering::Relaxed);
        if coalesced {
            self.counters.coalesced.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(super) fn record_commit(&self) {
        if self.config.track_stats {
            self.counters.committed.fetch_add(1, Ordering::Relaxed);
        }
    }
}
