use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crossbeam_channel as channel;
use tracing::{debug, trace};

use super::listener::{FrameListener, ListenerStatus};

/// ### English
/// Identifies one registered listener. Never 0 (0 is the C ABI's "no listener").
///
/// ### 中文
/// 标识一个已注册的监听器。永不为 0（0 在 C ABI 中表示“无监听器”）。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(NonZeroU32);

impl ListenerId {
    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    #[inline]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// ### English
    /// Takes the next id from `counter`, wrapping from `u32::MAX` back to 1.
    ///
    /// ### 中文
    /// 从 `counter` 取下一个 id；到达 `u32::MAX` 后回绕到 1。
    fn allocate(counter: &AtomicU32) -> Self {
        let mut current = counter.load(Ordering::Relaxed);
        loop {
            let id = NonZeroU32::new(current).unwrap_or(NonZeroU32::MIN);
            let next = id.checked_add(1).unwrap_or(NonZeroU32::MIN);
            match counter.compare_exchange_weak(
                current,
                next.get(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(id),
                Err(actual) => current = actual,
            }
        }
    }
}

/// ### English
/// Registration command sent from any thread to the render thread.
///
/// ### 中文
/// 从任意线程发往渲染线程的注册命令。
enum RegistryCommand<C: ?Sized> {
    Add(ListenerId, Arc<dyn FrameListener<C>>),
    Remove(ListenerId),
}

/// ### English
/// Outcome of one `FrameTicker::tick`.
///
/// ### 中文
/// 一次 `FrameTicker::tick` 的结果。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// ### English
    /// Listeners that received `on_draw_frame`.
    ///
    /// ### 中文
    /// 收到 `on_draw_frame` 的监听器数量。
    pub dispatched: usize,
    /// ### English
    /// Listeners detached because they answered `Detach`.
    ///
    /// ### 中文
    /// 因返回 `Detach` 而被移除的监听器数量。
    pub detached: usize,
}

/// ### English
/// Thread-safe handle used to add/remove listeners of a `FrameTicker`.
///
/// Changes are queued and applied at the start of the next tick, on the render thread.
///
/// ### 中文
/// 用于增删 `FrameTicker` 监听器的线程安全句柄。
///
/// 修改会被排队，并在下一个 tick 开始时于渲染线程上生效。
pub struct FrameListenerRegistry<C: ?Sized> {
    command_tx: channel::Sender<RegistryCommand<C>>,
    next_id: Arc<AtomicU32>,
}

impl<C: ?Sized> Clone for FrameListenerRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl<C: ?Sized> FrameListenerRegistry<C> {
    /// ### English
    /// Queues `listener` for registration. Returns `None` if the ticker is gone.
    ///
    /// ### 中文
    /// 将 `listener` 排队注册。若 ticker 已不存在则返回 `None`。
    pub fn add(&self, listener: Arc<dyn FrameListener<C>>) -> Option<ListenerId> {
        let id = ListenerId::allocate(&self.next_id);
        self.command_tx
            .send(RegistryCommand::Add(id, listener))
            .ok()
            .map(|()| id)
    }

    /// ### English
    /// Queues removal of `id`. Returns `false` if the ticker is gone.
    ///
    /// ### 中文
    /// 将 `id` 的移除排队。若 ticker 已不存在则返回 `false`。
    pub fn remove(&self, id: ListenerId) -> bool {
        self.command_tx.send(RegistryCommand::Remove(id)).is_ok()
    }
}

/// ### English
/// Render-thread dispatcher: calls every registered listener once per tick, in registration
/// order, before the frame is drawn.
///
/// ### 中文
/// 渲染线程上的派发器：每个 tick 按注册顺序调用所有已注册监听器一次，先于帧绘制。
pub struct FrameTicker<C: ?Sized> {
    listeners: Vec<(ListenerId, Arc<dyn FrameListener<C>>)>,
    command_rx: channel::Receiver<RegistryCommand<C>>,
    command_tx: channel::Sender<RegistryCommand<C>>,
    next_id: Arc<AtomicU32>,
}

impl<C: ?Sized> Default for FrameTicker<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> FrameTicker<C> {
    pub fn new() -> Self {
        let (command_tx, command_rx) = channel::unbounded();
        Self {
            listeners: Vec::new(),
            command_rx,
            command_tx,
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }

    pub fn registry(&self) -> FrameListenerRegistry<C> {
        FrameListenerRegistry {
            command_tx: self.command_tx.clone(),
            next_id: self.next_id.clone(),
        }
    }

    /// ### English
    /// Number of listeners attached as of the last tick.
    ///
    /// ### 中文
    /// 截至上一次 tick 已挂载的监听器数量。
    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn apply_pending(&mut self) {
        for command in self.command_rx.try_iter() {
            match command {
                RegistryCommand::Add(id, listener) => {
                    debug!(id = id.get(), "frame listener attached");
                    self.listeners.push((id, listener));
                }
                RegistryCommand::Remove(id) => {
                    let before = self.listeners.len();
                    self.listeners.retain(|(existing, _)| *existing != id);
                    if self.listeners.len() != before {
                        debug!(id = id.get(), "frame listener removed");
                    }
                }
            }
        }
    }

    /// ### English
    /// Applies queued registrations, then dispatches `on_draw_frame` to every listener.
    ///
    /// #### Parameters
    /// - `context`: Render-thread context passed to each listener.
    ///
    /// ### 中文
    /// 先应用排队的注册变更，再向每个监听器派发 `on_draw_frame`。
    ///
    /// #### 参数
    /// - `context`：传给每个监听器的渲染线程上下文。
    pub fn tick(&mut self, context: &C) -> TickReport {
        self.apply_pending();

        let mut report = TickReport::default();
        self.listeners.retain(|(id, listener)| {
            report.dispatched += 1;
            match listener.on_draw_frame(context) {
                ListenerStatus::Keep => true,
                ListenerStatus::Detach => {
                    report.detached += 1;
                    debug!(id = id.get(), "frame listener detached");
                    false
                }
            }
        });
        trace!(?report, "frame tick");
        report
    }
}
