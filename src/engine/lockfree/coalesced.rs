use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

/// ### English
/// Latest-wins slot holding at most one boxed payload, plus one spare node for reuse.
///
/// - `publish` swaps the new node in and hands back the one it displaced (never queued).
/// - `take` empties the slot.
/// - `recycle` / `take_spare` keep one drained node around so steady-state publishing reuses
///   buffers instead of allocating.
///
/// Any number of threads may publish; the slot is always drained by a single consumer.
///
/// ### 中文
/// 只保留最新值（latest-wins）的槽位：最多持有一个 boxed 载荷，另有一个备用节点用于复用。
///
/// - `publish` 原子换入新节点，并返回被替换的旧节点（不会排队）。
/// - `take` 清空槽位。
/// - `recycle` / `take_spare` 保留一个已消费的节点，使稳态发布复用缓冲而非重新分配。
///
/// 任意线程均可 publish；槽位始终由单一消费者 drain。
pub(crate) struct CoalescedBox<T> {
    latest: AtomicPtr<T>,
    spare: AtomicPtr<T>,
}

unsafe impl<T: Send> Send for CoalescedBox<T> {}
unsafe impl<T: Send> Sync for CoalescedBox<T> {}

impl<T> Default for CoalescedBox<T> {
    fn default() -> Self {
        Self {
            latest: AtomicPtr::new(ptr::null_mut()),
            spare: AtomicPtr::new(ptr::null_mut()),
        }
    }
}

#[inline]
fn into_box<T>(raw: *mut T) -> Option<Box<T>> {
    if raw.is_null() {
        None
    } else {
        Some(unsafe { Box::from_raw(raw) })
    }
}

impl<T> CoalescedBox<T> {
    /// ### English
    /// Returns whether a published payload is waiting to be taken.
    ///
    /// ### 中文
    /// 返回是否有已发布、尚未取走的载荷。
    #[inline]
    pub(crate) fn is_pending(&self) -> bool {
        !self.latest.load(Ordering::Acquire).is_null()
    }

    /// ### English
    /// Publishes `node` as the latest payload and returns the payload it displaced, if any.
    ///
    /// ### 中文
    /// 将 `node` 发布为最新载荷，并返回被替换掉的载荷（若有）。
    #[inline]
    pub(crate) fn publish(&self, node: Box<T>) -> Option<Box<T>> {
        into_box(self.latest.swap(Box::into_raw(node), Ordering::AcqRel))
    }

    /// ### English
    /// Takes the latest payload, leaving the slot empty.
    ///
    /// ### 中文
    /// 取走最新载荷，槽位变为空。
    #[inline]
    pub(crate) fn take(&self) -> Option<Box<T>> {
        into_box(self.latest.swap(ptr::null_mut(), Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn take_spare(&self) -> Option<Box<T>> {
        into_box(self.spare.swap(ptr::null_mut(), Ordering::AcqRel))
    }

    /// ### English
    /// Keeps `node` as the spare; an older spare is dropped so at most one node is cached.
    ///
    /// ### 中文
    /// 将 `node` 保留为备用节点；旧的备用节点会被释放，保证最多缓存一个。
    #[inline]
    pub(crate) fn recycle(&self, node: Box<T>) {
        drop(into_box(
            self.spare.swap(Box::into_raw(node), Ordering::AcqRel),
        ));
    }
}

impl<T> Drop for CoalescedBox<T> {
    fn drop(&mut self) {
        drop(into_box(*self.latest.get_mut()));
        drop(into_box(*self.spare.get_mut()));
    }
}

#[cfg(test)]
mod tests {
    use super::CoalescedBox;

    #[test]
    fn publish_displaces_previous_payload() {
        let slot = CoalescedBox::default();
        assert!(!slot.is_pending());
        assert!(slot.publish(Box::new(1)).is_none());
        assert_eq!(slot.publish(Box::new(2)).as_deref(), Some(&1));
        assert!(slot.is_pending());
        assert_eq!(slot.take().as_deref(), Some(&2));
        assert!(slot.take().is_none());
    }

    #[test]
    fn keeps_a_single_spare() {
        let slot = CoalescedBox::<u32>::default();
        slot.recycle(Box::new(7));
        slot.recycle(Box::new(8));
        assert_eq!(slot.take_spare().as_deref(), Some(&8));
        assert!(slot.take_spare().is_none());
    }
}
