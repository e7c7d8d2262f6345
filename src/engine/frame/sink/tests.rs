use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crate::engine::config::SinkConfig;
use crate::engine::error::FrameSinkError;
use crate::engine::frame::{FrameSink, FrameSurface, SinkState, SinkStats};

#[derive(Default)]
struct Probe {
    commits: AtomicUsize,
    releases: AtomicUsize,
}

struct ProbeSurface {
    probe: Arc<Probe>,
    handle: u32,
}

impl ProbeSurface {
    fn new() -> (Self, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        (
            Self {
                probe: probe.clone(),
                handle: 42,
            },
            probe,
        )
    }
}

impl FrameSurface for ProbeSurface {
    type Handle = u32;
    type Context = ();

    fn handle(&self) -> &u32 {
        &self.handle
    }

    fn update_tex_image(&self, _context: &()) {
        self.probe.commits.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.probe.releases.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn idle_consume_commits_nothing() {
    let (surface, probe) = ProbeSurface::new();
    let sink = FrameSink::new(surface);

    assert_eq!(sink.state(), SinkState::Idle);
    assert_eq!(sink.consume_frame_if_ready(&()), Ok(false));
    assert_eq!(sink.state(), SinkState::Idle);
    assert_eq!(probe.commits.load(Ordering::SeqCst), 0);
}

#[test]
fn notify_then_consume_commits_once() {
    let (surface, probe) = ProbeSurface::new();
    let sink = FrameSink::new(surface);

    sink.notify_frame_available().unwrap();
    assert_eq!(sink.state(), SinkState::Ready);
    assert_eq!(sink.consume_frame_if_ready(&()), Ok(true));
    assert_eq!(sink.state(), SinkState::Idle);
    assert_eq!(sink.consume_frame_if_ready(&()), Ok(false));
    assert_eq!(probe.commits.load(Ordering::SeqCst), 1);
}

#[test]
fn burst_coalesces_into_one_commit() {
    let (surface, probe) = ProbeSurface::new();
    let sink = FrameSink::new(surface);

    for _ in 0..3 {
        sink.notify_frame_available().unwrap();
    }
    assert_eq!(sink.consume_frame_if_ready(&()), Ok(true));
    assert_eq!(sink.consume_frame_if_ready(&()), Ok(false));
    assert_eq!(probe.commits.load(Ordering::SeqCst), 1);
    assert_eq!(
        sink.stats(),
        SinkStats {
            notified: 3,
            coalesced: 2,
            committed: 1,
        }
    );
}

#[test]
fn calls_after_release_are_rejected_without_side_effects() {
    let (surface, probe) = ProbeSurface::new();
    let sink = FrameSink::new(surface);

    sink.notify_frame_available().unwrap();
    sink.release().unwrap();
    assert_eq!(sink.state(), SinkState::Released);

    assert_eq!(sink.notify_frame_available(), Err(FrameSinkError::Released));
    assert_eq!(sink.consume_frame_if_ready(&()), Err(FrameSinkError::Released));
    assert_eq!(sink.release(), Err(FrameSinkError::Released));
    assert_eq!(sink.state(), SinkState::Released);

    assert_eq!(probe.commits.load(Ordering::SeqCst), 0);
    assert_eq!(probe.releases.load(Ordering::SeqCst), 1);
    assert_eq!(*sink.surface_handle(), 42);
}

#[test]
fn drop_releases_surface_once() {
    let (surface, probe) = ProbeSurface::new();
    drop(FrameSink::new(surface));
    assert_eq!(probe.releases.load(Ordering::SeqCst), 1);

    let (surface, probe) = ProbeSurface::new();
    let sink = FrameSink::new(surface);
    sink.release().unwrap();
    drop(sink);
    assert_eq!(probe.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn stats_can_be_disabled() {
    let (surface, _probe) = ProbeSurface::new();
    let config = SinkConfig {
        track_stats: false,
        ..SinkConfig::default()
    };
    let sink = FrameSink::with_config(surface, config);

    sink.notify_frame_available().unwrap();
    sink.notify_frame_available().unwrap();
    assert_eq!(sink.consume_frame_if_ready(&()), Ok(true));
    assert_eq!(sink.stats(), SinkStats::default());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "frame sink used after release")]
fn strict_release_fails_fast_in_debug_builds() {
    let (surface, _probe) = ProbeSurface::new();
    let config = SinkConfig {
        strict_release: true,
        ..SinkConfig::default()
    };
    let sink = FrameSink::with_config(surface, config);
    sink.release().unwrap();
    let _ = sink.notify_frame_available();
}

#[test]
fn quiet_release_after_release_is_benign_under_strict_config() {
    let (surface, probe) = ProbeSurface::new();
    let config = SinkConfig {
        strict_release: true,
        ..SinkConfig::default()
    };
    let sink = FrameSink::with_config(surface, config);

    assert!(sink.release_if_live());
    assert!(!sink.release_if_live());
    assert_eq!(sink.state(), SinkState::Released);
    assert_eq!(probe.releases.load(Ordering::SeqCst), 1);
}

struct SlowSurface {
    entered: Arc<AtomicBool>,
    released_during_commit: Arc<AtomicBool>,
    committing: AtomicBool,
}

impl FrameSurface for SlowSurface {
    type Handle = ();
    type Context = ();

    fn handle(&self) -> &() {
        &()
    }

    fn update_tex_image(&self, _context: &()) {
        self.committing.store(true, Ordering::SeqCst);
        self.entered.store(true, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        self.committing.store(false, Ordering::SeqCst);
    }

    fn release(&self) {
        if self.committing.load(Ordering::SeqCst) {
            self.released_during_commit.store(true, Ordering::SeqCst);
        }
    }
}

#[test]
fn release_waits_for_in_flight_commit() {
    let entered = Arc::new(AtomicBool::new(false));
    let released_during_commit = Arc::new(AtomicBool::new(false));
    let sink = Arc::new(FrameSink::new(SlowSurface {
        entered: entered.clone(),
        released_during_commit: released_during_commit.clone(),
        committing: AtomicBool::new(false),
    }));

    sink.notify_frame_available().unwrap();
    let consumer = {
        let sink = sink.clone();
        thread::spawn(move || sink.consume_frame_if_ready(&()))
    };

    while !entered.load(Ordering::SeqCst) {
        thread::yield_now();
    }
    sink.release().unwrap();

    assert_eq!(consumer.join().unwrap(), Ok(true));
    assert!(!released_during_commit.load(Ordering::SeqCst));
    assert_eq!(sink.state(), SinkState::Released);
}

struct PanickingSurface;

impl FrameSurface for PanickingSurface {
    type Handle = ();
    type Context = ();

    fn handle(&self) -> &() {
        &()
    }

    fn update_tex_image(&self, _context: &()) {
        panic!("commit failed");
    }

    fn release(&self) {}
}

#[test]
fn panicking_commit_does_not_wedge_release() {
    let sink = FrameSink::new(PanickingSurface);
    sink.notify_frame_available().unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = sink.consume_frame_if_ready(&());
    }));
    assert!(result.is_err());

    sink.release().unwrap();
    assert_eq!(sink.state(), SinkState::Released);
}
