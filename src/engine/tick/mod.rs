//! ### English
//! Render-loop side: per-frame listener dispatch.
//!
//! The render thread owns a `FrameTicker` and calls `tick` once per display refresh; any thread
//! registers listeners through a `FrameListenerRegistry`.
//!
//! ### 中文
//! 渲染循环侧：每帧监听器派发。
//!
//! 渲染线程持有 `FrameTicker`，每次显示刷新调用一次 `tick`；任意线程均可通过
//! `FrameListenerRegistry` 注册监听器。
mod listener;
mod ticker;

pub use listener::{FrameListener, ListenerStatus};
pub use ticker::{FrameListenerRegistry, FrameTicker, ListenerId, TickReport};

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counter {
        calls: AtomicUsize,
        detach_after: usize,
    }

    impl Counter {
        fn new(detach_after: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                detach_after,
            })
        }
    }

    impl FrameListener<u32> for Counter {
        fn on_draw_frame(&self, _context: &u32) -> ListenerStatus {
            let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if calls >= self.detach_after {
                ListenerStatus::Detach
            } else {
                ListenerStatus::Keep
            }
        }
    }

    #[test]
    fn registrations_apply_on_next_tick() {
        let mut ticker = FrameTicker::<u32>::new();
        let registry = ticker.registry();
        let counter = Counter::new(usize::MAX);

        let id = registry.add(counter.clone()).unwrap();
        assert_ne!(id.get(), 0);
        assert!(ticker.is_empty());

        assert_eq!(ticker.tick(&0).dispatched, 1);
        assert_eq!(ticker.len(), 1);

        assert!(registry.remove(id));
        assert_eq!(ticker.tick(&0), TickReport::default());
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn detaching_listeners_are_dropped() {
        let mut ticker = FrameTicker::<u32>::new();
        let registry = ticker.registry();
        let once = Counter::new(1);
        let forever = Counter::new(usize::MAX);
        registry.add(once.clone()).unwrap();
        registry.add(forever.clone()).unwrap();

        assert_eq!(
            ticker.tick(&0),
            TickReport {
                dispatched: 2,
                detached: 1
            }
        );
        assert_eq!(ticker.tick(&0).dispatched, 1);
        assert_eq!(once.calls.load(Ordering::SeqCst), 1);
        assert_eq!(forever.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn registry_reports_dropped_ticker() {
        let ticker = FrameTicker::<u32>::new();
        let registry = ticker.registry();
        drop(ticker);

        assert!(registry.add(Counter::new(1)).is_none());
        assert!(!registry.remove(ListenerId::from_raw(1).unwrap()));
        assert!(ListenerId::from_raw(0).is_none());
    }
}
