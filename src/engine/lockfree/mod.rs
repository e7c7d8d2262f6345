//! ### English
//! Lock-free building blocks for the frame handoff.
//!
//! ### 中文
//! 帧交接使用的无锁基础组件。
mod backoff;
mod coalesced;

pub(crate) use backoff::Backoff;
pub(crate) use coalesced::CoalescedBox;
