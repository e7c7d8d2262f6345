//! ### English
//! Spin-then-yield backoff used while `release()` waits out an in-flight commit.
//!
//! Spins grow exponentially for the first few steps, then each step yields the time slice.
//!
//! ### 中文
//! `release()` 等待进行中的 commit 结束时使用的“自旋后让出”退避。
//!
//! 前几步自旋次数按指数增长，之后每一步都让出时间片。

use std::thread;

/// ### English
/// Last step that still spins; later steps yield.
///
/// ### 中文
/// 仍然自旋的最后一步；之后的步骤改为让出调度。
const SPIN_STEPS: u32 = 6;

pub(crate) struct Backoff {
    step: u32,
}

impl Backoff {
    #[inline]
    pub(crate) fn new() -> Self {
        Self { step: 0 }
    }

    /// ### English
    /// Waits a little: `2^step` spin hints while `step <= SPIN_STEPS`, a `yield_now()` after.
    ///
    /// ### 中文
    /// 短暂等待：`step <= SPIN_STEPS` 时执行 `2^step` 次自旋提示，之后改为 `yield_now()`。
    #[inline]
    pub(crate) fn snooze(&mut self) {
        if self.step <= SPIN_STEPS {
            for _ in 0..(1u32 << self.step) {
                std::hint::spin_loop();
            }
        } else {
            thread::yield_now();
        }
        self.step = self.step.saturating_add(1);
    }

    /// ### English
    /// Returns whether the spin budget is exhausted.
    ///
    /// ### 中文
    /// 返回自旋预算是否已用完。
    #[inline]
    pub(crate) fn is_yielding(&self) -> bool {
        self.step > SPIN_STEPS
    }
}

#[cfg(test)]
mod tests {
    use super::Backoff;

    #[test]
    fn switches_to_yield_after_spin_budget() {
        let mut backoff = Backoff::new();
        for _ in 0..=super::SPIN_STEPS {
            assert!(!backoff.is_yielding());
            backoff.snooze();
        }
        assert!(backoff.is_yielding());
        backoff.snooze();
        assert!(backoff.is_yielding());
    }
}
