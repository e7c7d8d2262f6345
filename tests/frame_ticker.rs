use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use viro_video_sink::{FrameListener, FrameSink, FrameSurface, FrameTicker, TickReport};

/// Render context stand-in: the frame number being drawn.
struct DrawContext {
    frame: u64,
}

#[derive(Default)]
struct LastFrameSurface {
    last_frame: AtomicU64,
}

impl FrameSurface for LastFrameSurface {
    type Handle = ();
    type Context = DrawContext;

    fn handle(&self) -> &() {
        &()
    }

    fn update_tex_image(&self, context: &DrawContext) {
        self.last_frame.store(context.frame, Ordering::SeqCst);
    }

    fn release(&self) {}
}

#[test]
fn sinks_registered_off_thread_commit_on_tick() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut ticker = FrameTicker::<DrawContext>::new();
    let registry = ticker.registry();

    let sinks: Vec<_> = thread::spawn(move || {
        (0..3)
            .map(|_| {
                let sink = Arc::new(FrameSink::new(LastFrameSurface::default()));
                let listener: Arc<dyn FrameListener<DrawContext>> = sink.clone();
                registry.add(listener).unwrap();
                sink
            })
            .collect()
    })
    .join()
    .unwrap();

    assert!(ticker.is_empty());
    sinks[0].notify_frame_available().unwrap();
    sinks[2].notify_frame_available().unwrap();

    let report = ticker.tick(&DrawContext { frame: 1 });
    assert_eq!(
        report,
        TickReport {
            dispatched: 3,
            detached: 0
        }
    );
    assert_eq!(ticker.len(), 3);

    let frames: Vec<_> = sinks
        .iter()
        .map(|sink| sink.surface().last_frame.load(Ordering::SeqCst))
        .collect();
    assert_eq!(frames, [1, 0, 1]);
}

#[test]
fn released_sink_leaves_the_tick() {
    let mut ticker = FrameTicker::<DrawContext>::new();
    let registry = ticker.registry();

    let kept = Arc::new(FrameSink::new(LastFrameSurface::default()));
    let released = Arc::new(FrameSink::new(LastFrameSurface::default()));
    registry.add(kept.clone()).unwrap();
    registry.add(released.clone()).unwrap();

    ticker.tick(&DrawContext { frame: 1 });
    released.release().unwrap();
    kept.notify_frame_available().unwrap();

    let report = ticker.tick(&DrawContext { frame: 2 });
    assert_eq!(report.detached, 1);
    assert_eq!(ticker.len(), 1);
    assert_eq!(kept.surface().last_frame.load(Ordering::SeqCst), 2);

    let report = ticker.tick(&DrawContext { frame: 3 });
    assert_eq!(
        report,
        TickReport {
            dispatched: 1,
            detached: 0
        }
    );
}

#[test]
fn removed_listener_stops_receiving_frames() {
    let mut ticker = FrameTicker::<DrawContext>::new();
    let registry = ticker.registry();

    let sink = Arc::new(FrameSink::new(LastFrameSurface::default()));
    let id = registry.add(sink.clone()).unwrap();
    ticker.tick(&DrawContext { frame: 1 });

    assert!(registry.remove(id));
    sink.notify_frame_available().unwrap();
    ticker.tick(&DrawContext { frame: 2 });

    assert!(ticker.is_empty());
    assert_eq!(sink.surface().last_frame.load(Ordering::SeqCst), 0);
    assert_eq!(sink.consume_frame_if_ready(&DrawContext { frame: 3 }), Ok(true));
}
