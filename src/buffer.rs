use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};

use crate::slot::Slot;

/// Growable slot storage shared by a map and every view derived from it.
///
/// Each `SlotBuffer` is one handle; cloning a handle does not copy the
/// slots, it adds another reference to the same storage. The storage is
/// freed when the last handle is dropped, so a view can never outlive the
/// slots it reads.
///
/// Borrows are taken per operation and released before returning, so two
/// handles on the same storage never hold overlapping borrows as long as
/// callers do not nest `slots()` and `slots_mut()` calls.
#[derive(Debug)]
pub struct SlotBuffer<V> {
  data: Rc<RefCell<Vec<Slot<V>>>>,
}

impl<V> SlotBuffer<V> {
  /// Creates a new, empty buffer with a single handle.
  ///
  /// ```
  /// # use densemap::buffer::SlotBuffer;
  /// #
  /// let buf: SlotBuffer<i32> = SlotBuffer::new();
  /// assert_eq!(buf.len(), 0);
  /// assert_eq!(buf.handle_count(), 1);
  /// ```
  #[inline]
  pub fn new() -> SlotBuffer<V> {
    SlotBuffer {
      data: Rc::new(RefCell::new(Vec::new())),
    }
  }

  /// Creates a buffer holding `len` absent slots.
  pub fn with_len(len: usize) -> SlotBuffer<V> {
    let mut slots = Vec::with_capacity(len);
    slots.resize_with(len, || Slot::Absent);
    SlotBuffer {
      data: Rc::new(RefCell::new(slots)),
    }
  }

  /// Number of addressable slots. Every slot below this is either present
  /// or `Slot::Absent`.
  #[inline]
  pub fn len(&self) -> usize {
    self.data.borrow().len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Extends the storage with absent slots until it holds at least `len`
  /// slots. Never shrinks, since another handle may have grown it further.
  ///
  /// Existing slots are moved by the reallocation, never cloned.
  ///
  /// ```
  /// # use densemap::buffer::SlotBuffer;
  /// #
  /// let buf: SlotBuffer<u8> = SlotBuffer::new();
  /// buf.grow_to(10);
  /// assert_eq!(buf.len(), 10);
  /// buf.grow_to(4);
  /// assert_eq!(buf.len(), 10);
  /// ```
  pub fn grow_to(&self, len: usize) {
    let mut slots = self.data.borrow_mut();
    if slots.len() < len {
      slots.resize_with(len, || Slot::Absent);
    }
  }

  /// Returns `true` if the slot at `index` exists and is not absent.
  #[inline]
  pub fn is_present(&self, index: usize) -> bool {
    self.data.borrow().get(index).map_or(false, |slot| slot.is_present())
  }

  /// Stores `slot` at `index`, returning what was there before.
  ///
  /// # Panics
  ///
  /// Panics if `index` is past the end of the storage. Callers grow the
  /// buffer first.
  pub fn replace(&self, index: usize, slot: Slot<V>) -> Slot<V> {
    let mut slots = self.data.borrow_mut();
    core::mem::replace(&mut slots[index], slot)
  }

  /// Takes the slot at `index`, leaving it absent. Out-of-bounds indices
  /// give `Slot::Absent`.
  pub fn take(&self, index: usize) -> Slot<V> {
    match self.data.borrow_mut().get_mut(index) {
      Some(slot) => slot.take(),
      None => Slot::Absent,
    }
  }

  /// Immutable access to the whole storage for the duration of one call.
  #[inline]
  pub fn slots(&self) -> Ref<'_, Vec<Slot<V>>> {
    self.data.borrow()
  }

  /// Mutable access to the whole storage for the duration of one call.
  #[inline]
  pub fn slots_mut(&self) -> RefMut<'_, Vec<Slot<V>>> {
    self.data.borrow_mut()
  }

  /// Number of handles (maps and views) on this storage.
  #[inline]
  pub fn handle_count(&self) -> usize {
    Rc::strong_count(&self.data)
  }

  /// Returns `true` if both handles point to the same storage.
  #[inline]
  pub fn same_storage(&self, other: &SlotBuffer<V>) -> bool {
    Rc::ptr_eq(&self.data, &other.data)
  }

  /// Index of the first present slot in `[from, to)`.
  pub fn first_present(&self, from: usize, to: usize) -> Option<usize> {
    let slots = self.data.borrow();
    let to = to.min(slots.len());
    if from >= to {
      return None;
    }
    slots[from..to].iter().position(|s| s.is_present()).map(|i| from + i)
  }

  /// Index of the last present slot in `[from, to)`.
  pub fn last_present(&self, from: usize, to: usize) -> Option<usize> {
    let slots = self.data.borrow();
    let to = to.min(slots.len());
    if from >= to {
      return None;
    }
    slots[from..to].iter().rposition(|s| s.is_present()).map(|i| from + i)
  }

  /// Number of present slots in `[from, to)`.
  pub fn count_present(&self, from: usize, to: usize) -> usize {
    let slots = self.data.borrow();
    let to = to.min(slots.len());
    if from >= to {
      return 0;
    }
    slots[from..to].iter().filter(|s| s.is_present()).count()
  }
}

impl<V> Clone for SlotBuffer<V> {
  /// Adds a handle to the same storage.
  fn clone(&self) -> Self {
    SlotBuffer {
      data: Rc::clone(&self.data),
    }
  }
}

impl<V> Default for SlotBuffer<V> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_is_empty() {
    let buf: SlotBuffer<i32> = SlotBuffer::new();
    assert!(buf.is_empty());
    assert_eq!(buf.handle_count(), 1);
  }

  #[test]
  fn test_with_len() {
    let buf: SlotBuffer<i32> = SlotBuffer::with_len(5);
    assert_eq!(buf.len(), 5);
    assert_eq!(buf.count_present(0, 5), 0);
  }

  #[test]
  fn test_clone_shares_storage() {
    let a: SlotBuffer<&str> = SlotBuffer::new();
    a.grow_to(4);
    let b = a.clone();
    assert_eq!(a.handle_count(), 2);
    assert!(a.same_storage(&b));

    b.replace(2, Slot::Value("x"));
    assert!(a.is_present(2));
    assert_eq!(a.slots()[2], Slot::Value("x"));

    b.grow_to(8);
    assert_eq!(a.len(), 8);

    drop(b);
    assert_eq!(a.handle_count(), 1);
  }

  #[test]
  fn test_distinct_buffers() {
    let a: SlotBuffer<i32> = SlotBuffer::new();
    let b: SlotBuffer<i32> = SlotBuffer::new();
    assert!(!a.same_storage(&b));
  }

  #[test]
  fn test_replace_and_take() {
    let buf = SlotBuffer::with_len(3);
    assert_eq!(buf.replace(1, Slot::Value(10)), Slot::Absent);
    assert_eq!(buf.replace(1, Slot::Null), Slot::Value(10));
    assert_eq!(buf.take(1), Slot::Null);
    assert_eq!(buf.take(1), Slot::Absent);
    assert_eq!(buf.take(99), Slot::Absent);
  }

  #[test]
  #[should_panic]
  fn test_replace_past_end_panics() {
    let buf: SlotBuffer<i32> = SlotBuffer::new();
    buf.replace(0, Slot::Null);
  }

  #[test]
  fn test_scans() {
    let buf = SlotBuffer::with_len(10);
    buf.replace(2, Slot::Value(1));
    buf.replace(5, Slot::Null);
    buf.replace(7, Slot::Value(3));

    assert_eq!(buf.first_present(0, 10), Some(2));
    assert_eq!(buf.first_present(3, 10), Some(5));
    assert_eq!(buf.last_present(0, 10), Some(7));
    assert_eq!(buf.last_present(0, 7), Some(5));
    assert_eq!(buf.count_present(0, 10), 3);
    assert_eq!(buf.count_present(3, 7), 1);
    // `to` is exclusive and clamped to the storage
    assert_eq!(buf.count_present(0, 7), 2);
    assert_eq!(buf.count_present(0, 1000), 3);
    assert_eq!(buf.first_present(8, 3), None);
    assert_eq!(buf.last_present(8, 10), None);
  }
}
