//! `IndexedSparseMap`: an ordered map over non-negative integer keys, stored
//! in a dense slot buffer that can be shared with sub-range views.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

#[cfg(not(feature = "no_std_support"))]
use std::collections::HashSet;
#[cfg(feature = "no_std_support")]
use hashbrown::HashSet;

use tracing::{debug, trace, warn};

use crate::buffer::SlotBuffer;
use crate::error::MapError;
use crate::growth::GrowthPolicy;
use crate::key::IntKey;
use crate::slot::Slot;
use crate::source::IntKeyedSource;
use crate::DenseMapConfig;

/// An ordered map of `<usize, V>` backed by a contiguous slot buffer.
///
/// Keys are expected to be mostly contiguous. Lookups and writes are O(1)
/// (amortized for writes that grow the buffer), iteration walks the buffer
/// in ascending key order. A key may map to a value or to an explicit null
/// ([`put_null`](Self::put_null)), and both are distinct from an absent key.
///
/// [`sub_map`](Self::sub_map), [`head_map`](Self::head_map) and
/// [`tail_map`](Self::tail_map) return views that share the buffer: writes
/// through any handle are visible through all others. Each handle keeps its
/// own count and first/last key, computed when the view is built and only
/// updated by writes through that handle.
///
/// # Examples
///
/// ```
/// use densemap::IndexedSparseMap;
///
/// let mut map = IndexedSparseMap::new();
/// map.put(50, "x").unwrap();
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get(50), Ok(Some("x")));
/// assert!(map.get(10).is_err());
/// assert_eq!(map.first_key(), Some(50));
/// assert_eq!(map.last_key(), Some(50));
/// ```
pub struct IndexedSparseMap<V> {
  buffer: SlotBuffer<V>,
  /// Lowest key this handle may address.
  start: usize,
  /// Exclusive upper key bound, `None` when open-ended.
  end: Option<usize>,
  /// Number of present slots this handle knows about.
  present: usize,
  first: Option<usize>,
  last: Option<usize>,
  /// Watermark: keys below it are addressable without growing.
  size: usize,
  growth: GrowthPolicy,
}

impl<V> IndexedSparseMap<V> {
  /// Creates an empty map with the default growth policy.
  ///
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// let map: IndexedSparseMap<String> = IndexedSparseMap::new();
  /// assert!(map.is_empty());
  /// assert_eq!(map.capacity(), 0);
  /// ```
  pub fn new() -> Self {
    Self::with_config(DenseMapConfig::default())
  }

  /// Creates an empty map that grows with `growth`.
  pub fn with_growth(growth: GrowthPolicy) -> Self {
    Self::with_config(DenseMapConfig {
      growth,
      ..DenseMapConfig::default()
    })
  }

  /// Creates an empty map whose first `capacity` keys are addressable
  /// without growing.
  ///
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// let map: IndexedSparseMap<i32> = IndexedSparseMap::with_capacity(10);
  /// assert_eq!(map.capacity(), 10);
  /// assert_eq!(map.size(), 10);
  /// assert!(map.is_empty());
  /// ```
  pub fn with_capacity(capacity: usize) -> Self {
    Self::with_config(DenseMapConfig {
      initial_capacity: capacity,
      ..DenseMapConfig::default()
    })
  }

  pub fn with_config(config: DenseMapConfig) -> Self {
    IndexedSparseMap {
      buffer: SlotBuffer::with_len(config.initial_capacity),
      start: 0,
      end: None,
      present: 0,
      first: None,
      last: None,
      size: config.initial_capacity,
      growth: config.growth,
    }
  }

  // --- Sizes and bounds ---

  /// Number of present keys, explicit nulls included.
  #[inline]
  pub fn len(&self) -> usize {
    self.present
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.present == 0
  }

  /// The watermark: keys below it can be read or written without growing
  /// the buffer.
  #[inline]
  pub fn size(&self) -> usize {
    self.size
  }

  /// Number of slots in the shared buffer.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.buffer.len()
  }

  #[inline]
  pub fn growth(&self) -> GrowthPolicy {
    self.growth
  }

  /// Lowest present key, or `None` when empty.
  #[inline]
  pub fn first_key(&self) -> Option<usize> {
    self.first
  }

  /// Highest present key, or `None` when empty.
  #[inline]
  pub fn last_key(&self) -> Option<usize> {
    self.last
  }

  /// The half-open key window of this handle. A full map has `0..usize::MAX`.
  pub fn key_range(&self) -> core::ops::Range<usize> {
    self.start..self.window_end()
  }

  /// Returns `true` if this handle was built by `sub_map`, `head_map` or
  /// `tail_map`.
  pub fn is_view(&self) -> bool {
    self.start != 0 || self.end.is_some()
  }

  /// Returns `true` if both handles read and write the same slots.
  pub fn shares_buffer_with(&self, other: &IndexedSparseMap<V>) -> bool {
    self.buffer.same_storage(&other.buffer)
  }

  /// Number of maps and views sharing this handle's buffer.
  pub fn handle_count(&self) -> usize {
    self.buffer.handle_count()
  }

  #[inline]
  fn window_end(&self) -> usize {
    self.end.unwrap_or(usize::MAX)
  }

  /// Exclusive upper bound for reads and scans. Other handles may have
  /// written above this handle's watermark, so reads reach the whole
  /// shared buffer.
  #[inline]
  fn limit(&self) -> usize {
    self.buffer.len().max(self.size).min(self.window_end())
  }

  /// This handle's watermark clipped to its window.
  #[inline]
  fn watermark(&self) -> usize {
    self.size.min(self.window_end())
  }

  #[inline]
  fn in_window(&self, index: usize) -> bool {
    index >= self.start && index < self.window_end()
  }

  /// Keys past the watermark are only readable when some handle on the
  /// buffer stored them.
  fn check_read(&self, index: usize) -> Result<usize, MapError> {
    let watermark = self.watermark();
    let readable = index >= self.start
      && index < self.limit()
      && (index < watermark || self.buffer.is_present(index));
    if !readable {
      return Err(MapError::OutOfRange {
        index,
        size: watermark,
      });
    }
    Ok(index)
  }

  fn check_write(&self, index: usize) -> Result<usize, MapError> {
    if !self.in_window(index) {
      return Err(MapError::OutOfRange {
        index,
        size: self.window_end(),
      });
    }
    Ok(index)
  }

  // --- Buffer management ---

  /// Makes `index` addressable, growing the shared buffer per the growth
  /// policy when it lies at or above the watermark.
  fn ensure_capacity(&mut self, index: usize) {
    if index < self.size {
      return;
    }
    let new_size = self.growth.compute(self.size, index);
    trace!(index, old_size = self.size, new_size, "growing slot buffer");
    self.buffer.grow_to(new_size);
    self.size = new_size;
  }

  // --- Core operations ---

  /// Stores `value` at `key`, returning the previous slot.
  ///
  /// # Errors
  ///
  /// [`MapError::InvalidKey`] for a negative key, [`MapError::OutOfRange`]
  /// when a view is asked to write outside its key window. The map is left
  /// untouched on error.
  ///
  /// ```
  /// # use densemap::{IndexedSparseMap, Slot};
  /// let mut map = IndexedSparseMap::new();
  /// assert_eq!(map.put(3, 'a'), Ok(Slot::Absent));
  /// assert_eq!(map.put(3, 'b'), Ok(Slot::Value('a')));
  /// assert_eq!(map.len(), 1);
  /// assert!(map.put(-1, 'c').is_err());
  /// ```
  pub fn put<K: IntKey>(&mut self, key: K, value: V) -> Result<Slot<V>, MapError> {
    self.put_slot(key, Slot::Value(value))
  }

  /// Marks `key` as present with no payload.
  ///
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// let mut map: IndexedSparseMap<u32> = IndexedSparseMap::new();
  /// map.put_null(4).unwrap();
  /// assert!(map.contains_key(4));
  /// assert_eq!(map.get(4), Ok(None));
  /// ```
  pub fn put_null<K: IntKey>(&mut self, key: K) -> Result<Slot<V>, MapError> {
    self.put_slot(key, Slot::Null)
  }

  /// Stores `Some(v)` as a value and `None` as an explicit null.
  pub fn put_option<K: IntKey>(&mut self, key: K, value: Option<V>) -> Result<Slot<V>, MapError> {
    self.put_slot(key, Slot::from_option(value))
  }

  fn put_slot<K: IntKey>(&mut self, key: K, slot: Slot<V>) -> Result<Slot<V>, MapError> {
    let index = self.check_write(key.to_index()?)?;
    Ok(self.store(index, slot))
  }

  /// Writes a present slot at a validated index and updates the bounds.
  fn store(&mut self, index: usize, slot: Slot<V>) -> Slot<V> {
    debug_assert!(slot.is_present());
    self.ensure_capacity(index);
    let prev = self.buffer.replace(index, slot);
    if prev.is_absent() {
      self.present += 1;
    }
    self.first = Some(self.first.map_or(index, |first| first.min(index)));
    self.last = Some(self.last.map_or(index, |last| last.max(index)));
    prev
  }

  /// Returns the value at `key`: `Some(v)` for a value, `None` for an
  /// explicit null.
  ///
  /// # Errors
  ///
  /// * [`MapError::OutOfRange`] if `key` is outside a view's window, or at
  ///   or past the watermark with nothing stored there by any handle.
  /// * [`MapError::NotFound`] if nothing is stored at `key`.
  /// * [`MapError::InvalidKey`] if `key` is negative.
  ///
  /// ```
  /// # use densemap::{IndexedSparseMap, MapError};
  /// let mut map = IndexedSparseMap::new();
  /// map.put(1, "one").unwrap();
  /// assert_eq!(map.get(1), Ok(Some("one")));
  /// assert_eq!(map.get(0), Err(MapError::NotFound(0)));
  /// assert_eq!(map.get(500), Err(MapError::OutOfRange { index: 500, size: 32 }));
  /// ```
  pub fn get<K: IntKey>(&self, key: K) -> Result<Option<V>, MapError>
  where
    V: Clone,
  {
    self.get_with(key, |value| value.cloned())
  }

  /// Like [`get`](Self::get), but lends the value to `f` instead of
  /// cloning it.
  ///
  /// The buffer is borrowed while `f` runs, so `f` must not write through
  /// another handle on the same buffer.
  ///
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// let mut map = IndexedSparseMap::new();
  /// map.put(2, String::from("hello")).unwrap();
  /// assert_eq!(map.get_with(2, |s| s.map(|s| s.len())), Ok(Some(5)));
  /// ```
  pub fn get_with<K: IntKey, R, F>(&self, key: K, f: F) -> Result<R, MapError>
  where
    F: FnOnce(Option<&V>) -> R,
  {
    let index = self.check_read(key.to_index()?)?;
    let slots = self.buffer.slots();
    match slots.get(index) {
      Some(Slot::Value(v)) => Ok(f(Some(v))),
      Some(Slot::Null) => Ok(f(None)),
      _ => Err(MapError::NotFound(index)),
    }
  }

  /// Returns the raw slot at `key`. Never fails: anything that `get` would
  /// reject comes back as `Slot::Absent`.
  pub fn get_slot<K: IntKey>(&self, key: K) -> Slot<V>
  where
    V: Clone,
  {
    let index = match key.to_index() {
      Ok(index) if index >= self.start && index < self.limit() => index,
      _ => return Slot::Absent,
    };
    self
      .buffer
      .slots()
      .get(index)
      .map_or(Slot::Absent, |slot| slot.as_ref().cloned())
  }

  /// Returns `true` if `key` is within range and present. Negative and
  /// out-of-range keys give `false`.
  ///
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// let mut map = IndexedSparseMap::new();
  /// map.put(0, 1.5).unwrap();
  /// assert!(map.contains_key(0));
  /// assert!(!map.contains_key(1));
  /// assert!(!map.contains_key(-1));
  /// assert!(!map.contains_key(10_000));
  /// ```
  pub fn contains_key<K: IntKey>(&self, key: K) -> bool {
    match key.to_index() {
      Ok(index) => index >= self.start && index < self.limit() && self.buffer.is_present(index),
      Err(_) => false,
    }
  }

  /// Returns `true` if some key in range maps to `value`.
  pub fn contains_value(&self, value: &V) -> bool
  where
    V: PartialEq,
  {
    self.scan_window(|slot| matches!(slot, Slot::Value(v) if v == value))
  }

  /// Returns `true` if some key in range maps to an explicit null.
  pub fn contains_null(&self) -> bool {
    self.scan_window(|slot| slot.is_null())
  }

  fn scan_window<F: Fn(&Slot<V>) -> bool>(&self, pred: F) -> bool {
    let slots = self.buffer.slots();
    let end = self.limit().min(slots.len());
    if self.start >= end {
      return false;
    }
    slots[self.start..end].iter().any(pred)
  }

  /// Removes `key`, returning what was stored there.
  ///
  /// Removing an absent or out-of-range key is a no-op that returns
  /// `Slot::Absent`. Removing the highest key rescans backward for the new
  /// highest key, removing the lowest key rescans forward for the new
  /// lowest one; both scans stop at the nearest present slot.
  /// Removing a key this handle never counted, because another handle
  /// stored it, recounts the whole window instead.
  ///
  /// # Errors
  ///
  /// [`MapError::InvalidKey`] if `key` is negative.
  ///
  /// ```
  /// # use densemap::{IndexedSparseMap, Slot};
  /// let mut map = IndexedSparseMap::new();
  /// map.put(5, "a").unwrap();
  /// map.put(2, "b").unwrap();
  /// assert_eq!(map.remove(5), Ok(Slot::Value("a")));
  /// assert_eq!(map.len(), 1);
  /// assert_eq!(map.last_key(), Some(2));
  /// assert!(!map.contains_key(5));
  /// assert_eq!(map.remove(5), Ok(Slot::Absent));
  /// ```
  pub fn remove<K: IntKey>(&mut self, key: K) -> Result<Slot<V>, MapError> {
    let index = key.to_index()?;
    if index < self.start || index >= self.limit() {
      return Ok(Slot::Absent);
    }
    let prev = self.buffer.take(index);
    if prev.is_absent() {
      return Ok(prev);
    }

    if index + 1 == self.size {
      self.size -= 1;
    }

    // A key stored through another handle was never counted here.
    let counted = match (self.first, self.last) {
      (Some(first), Some(last)) => first <= index && index <= last,
      _ => false,
    };
    if !counted || self.present == 0 {
      self.refresh_metadata();
      return Ok(prev);
    }

    self.present -= 1;
    if self.last == Some(index) {
      self.last = self.buffer.last_present(self.start, index);
    }
    if self.first == Some(index) {
      self.first = match self.last {
        Some(last) => self.buffer.first_present(index + 1, last + 1),
        None => None,
      };
    }
    let consistent = match (self.first, self.last) {
      (None, None) => self.present == 0,
      (Some(_), Some(_)) => self.present > 0,
      _ => false,
    };
    if !consistent {
      self.refresh_metadata();
    }
    Ok(prev)
  }

  /// Empties every slot in this handle's window and resets its metadata.
  /// The buffer keeps its length; the watermark drops to the window start.
  ///
  /// Views sharing the buffer see the cleared slots, but keep their own
  /// counts until rebuilt.
  pub fn clear(&mut self) {
    {
      let mut slots = self.buffer.slots_mut();
      let end = self.window_end().min(slots.len());
      if self.start < end {
        for slot in slots[self.start..end].iter_mut() {
          *slot = Slot::Absent;
        }
      }
    }
    self.present = 0;
    self.first = None;
    self.last = None;
    self.size = self.size.min(self.start);
  }

  // --- Iteration ---

  /// Iterates over `(key, value)` pairs in ascending key order. Explicit
  /// nulls come back as `None`.
  ///
  /// The iterator reads the live buffer on every step and can be restarted
  /// by calling `iter` again.
  ///
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// let mut map = IndexedSparseMap::new();
  /// map.put(9, 'z').unwrap();
  /// map.put(1, 'a').unwrap();
  /// map.put_null(4).unwrap();
  /// let items: Vec<_> = map.iter().collect();
  /// assert_eq!(items, vec![(1, Some('a')), (4, None), (9, Some('z'))]);
  /// ```
  pub fn iter(&self) -> Iter<'_, V> {
    Iter {
      map: self,
      front: self.start,
      back: self.limit(),
    }
  }

  /// Iterates over present keys in ascending order.
  pub fn keys(&self) -> Keys<'_, V> {
    Keys {
      buffer: &self.buffer,
      front: self.start,
      back: self.limit(),
    }
  }

  /// Iterates over values in ascending key order. Explicit nulls come back
  /// as `None`.
  pub fn values(&self) -> impl DoubleEndedIterator<Item = Option<V>> + '_
  where
    V: Clone,
  {
    self.iter().map(|(_, value)| value)
  }

  /// Collects present keys into a set.
  pub fn key_set(&self) -> HashSet<usize> {
    self.keys().collect()
  }

  /// Copies the present slots, in key order, into a vector of at least
  /// `min_len` entries. Extra entries are `Slot::Absent`.
  ///
  /// ```
  /// # use densemap::{IndexedSparseMap, Slot};
  /// let mut map = IndexedSparseMap::new();
  /// map.put(7, 70).unwrap();
  /// map.put_null(3).unwrap();
  /// assert_eq!(map.to_array(0), vec![Slot::Null, Slot::Value(70)]);
  /// assert_eq!(map.to_array(3), vec![Slot::Null, Slot::Value(70), Slot::Absent]);
  /// ```
  pub fn to_array(&self, min_len: usize) -> Vec<Slot<V>>
  where
    V: Clone,
  {
    let mut out: Vec<Slot<V>> = self.iter().map(|(_, value)| Slot::from_option(value)).collect();
    if out.len() < min_len {
      out.resize_with(min_len, || Slot::Absent);
    }
    out
  }

  // --- Views ---

  /// A view of keys in `[from, to)` that shares this map's buffer.
  ///
  /// The window is intersected with this handle's own window. Building the
  /// view scans exactly that range to count present keys.
  ///
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// let mut map = IndexedSparseMap::new();
  /// for i in 0..10 {
  ///   map.put(i, i * 10).unwrap();
  /// }
  /// let mut view = map.sub_map(3, 6).unwrap();
  /// assert_eq!(view.len(), 3);
  /// assert_eq!(view.first_key(), Some(3));
  /// assert_eq!(view.last_key(), Some(5));
  ///
  /// view.put(4, 400).unwrap();
  /// assert_eq!(map.get(4), Ok(Some(400)));
  /// ```
  pub fn sub_map<K: IntKey>(&self, from: K, to: K) -> Result<IndexedSparseMap<V>, MapError> {
    Ok(self.view(from.to_index()?, Some(to.to_index()?)))
  }

  /// A view of keys below `to`.
  pub fn head_map<K: IntKey>(&self, to: K) -> Result<IndexedSparseMap<V>, MapError> {
    Ok(self.view(self.start, Some(to.to_index()?)))
  }

  /// A view of keys from `from` upward. The view is open-ended and may grow
  /// the shared buffer.
  pub fn tail_map<K: IntKey>(&self, from: K) -> Result<IndexedSparseMap<V>, MapError> {
    Ok(self.view(from.to_index()?, None))
  }

  fn view(&self, from: usize, to: Option<usize>) -> IndexedSparseMap<V> {
    let start = from.max(self.start);
    let end = match (to, self.end) {
      (Some(to), Some(own)) => Some(to.min(own)),
      (Some(to), None) => Some(to),
      (None, own) => own,
    };
    let window_end = end.unwrap_or(usize::MAX);
    if start >= window_end {
      warn!(start, end = window_end, "building a view over an empty key window");
    }

    let scan_end = window_end.min(self.buffer.len());
    let present = self.buffer.count_present(start, scan_end);
    let first = self.buffer.first_present(start, scan_end);
    let last = self.buffer.last_present(start, scan_end);
    debug!(start, end = window_end, present, "built view");

    IndexedSparseMap {
      buffer: self.buffer.clone(),
      start,
      end,
      present,
      first,
      last,
      size: scan_end,
      growth: self.growth,
    }
  }

  // --- Copies and merges ---

  /// Copies this handle's entries into a new map with a buffer of its own.
  /// The copy is a full map, not a view.
  pub fn shallow_copy(&self) -> IndexedSparseMap<V>
  where
    V: Clone,
  {
    let limit = self.limit();
    let buffer = SlotBuffer::with_len(limit);
    {
      let src = self.buffer.slots();
      let mut dst = buffer.slots_mut();
      let end = limit.min(src.len());
      for index in self.start..end {
        dst[index] = src[index].clone();
      }
    }
    IndexedSparseMap {
      present: buffer.count_present(0, limit),
      first: buffer.first_present(0, limit),
      last: buffer.last_present(0, limit),
      buffer,
      start: 0,
      end: None,
      size: limit,
      growth: self.growth,
    }
  }

  /// Merges every entry of `source` into this map. Entries already present
  /// here are overwritten; keys absent from `source` are left alone.
  ///
  /// When `source` is another `IndexedSparseMap` its occupied range is
  /// copied slot by slot; otherwise each entry goes through `put`.
  ///
  /// # Errors
  ///
  /// [`MapError::OutOfRange`] if `source` has keys outside this handle's
  /// window. Nothing is written in that case.
  ///
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// use std::collections::BTreeMap;
  ///
  /// let mut map = IndexedSparseMap::new();
  /// map.put(0, "zero").unwrap();
  ///
  /// let mut other = BTreeMap::new();
  /// other.insert(4usize, "four");
  /// other.insert(2usize, "two");
  /// map.put_all(&other).unwrap();
  ///
  /// assert_eq!(map.len(), 3);
  /// assert_eq!(map.last_key(), Some(4));
  /// ```
  pub fn put_all<S>(&mut self, source: &S) -> Result<(), MapError>
  where
    V: Clone,
    S: IntKeyedSource<V> + ?Sized,
  {
    let (first, last) = match (source.first_key(), source.last_key()) {
      (Some(first), Some(last)) => (first, last),
      _ => return Ok(()),
    };
    self.check_write(first)?;
    self.check_write(last)?;
    self.ensure_capacity(last);

    match source.as_dense() {
      Some(dense) => self.copy_dense_range(dense, first, last),
      None => {
        for (index, value) in source.entries() {
          self.store(index, Slot::from_option(value));
        }
      }
    }
    Ok(())
  }

  /// Bulk copy of `[first, last]` from another dense map.
  fn copy_dense_range(&mut self, src: &IndexedSparseMap<V>, first: usize, last: usize)
  where
    V: Clone,
  {
    if self.buffer.same_storage(&src.buffer) {
      // Same slots already; only the metadata can be behind.
      self.refresh_metadata();
      return;
    }

    let mut added = 0;
    {
      let from = src.buffer.slots();
      let mut to = self.buffer.slots_mut();
      let end = (last + 1).min(from.len());
      for index in first..end {
        if from[index].is_present() {
          if to[index].is_absent() {
            added += 1;
          }
          to[index] = from[index].clone();
        }
      }
    }
    trace!(first, last, added, "bulk copied dense range");

    self.present += added;
    let copied_first = self.buffer.first_present(first, last + 1);
    let copied_last = self.buffer.last_present(first, last + 1);
    self.first = min_opt(self.first, copied_first);
    self.last = max_opt(self.last, copied_last);
  }

  /// Recounts present keys and bounds over the whole window.
  fn refresh_metadata(&mut self) {
    let limit = self.limit();
    self.present = self.buffer.count_present(self.start, limit);
    self.first = self.buffer.first_present(self.start, limit);
    self.last = self.buffer.last_present(self.start, limit);
    if let Some(last) = self.last {
      self.size = self.size.max(last + 1);
    }
  }
}

fn min_opt(a: Option<usize>, b: Option<usize>) -> Option<usize> {
  match (a, b) {
    (Some(a), Some(b)) => Some(a.min(b)),
    (a, None) => a,
    (None, b) => b,
  }
}

fn max_opt(a: Option<usize>, b: Option<usize>) -> Option<usize> {
  match (a, b) {
    (Some(a), Some(b)) => Some(a.max(b)),
    (a, None) => a,
    (None, b) => b,
  }
}

/// Ascending iterator over `(key, value)` pairs, created by
/// [`IndexedSparseMap::iter`].
pub struct Iter<'a, V> {
  map: &'a IndexedSparseMap<V>,
  front: usize,
  back: usize,
}

impl<'a, V: Clone> Iter<'a, V> {
  fn read(&self, index: usize) -> Option<V> {
    match &self.map.buffer.slots()[index] {
      Slot::Value(v) => Some(v.clone()),
      _ => None,
    }
  }
}

impl<'a, V: Clone> Iterator for Iter<'a, V> {
  type Item = (usize, Option<V>);

  fn next(&mut self) -> Option<Self::Item> {
    let index = self.map.buffer.first_present(self.front, self.back)?;
    self.front = index + 1;
    Some((index, self.read(index)))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, Some(self.back.saturating_sub(self.front)))
  }
}

impl<'a, V: Clone> DoubleEndedIterator for Iter<'a, V> {
  fn next_back(&mut self) -> Option<Self::Item> {
    let index = self.map.buffer.last_present(self.front, self.back)?;
    self.back = index;
    Some((index, self.read(index)))
  }
}

/// Ascending iterator over present keys, created by
/// [`IndexedSparseMap::keys`].
pub struct Keys<'a, V> {
  buffer: &'a SlotBuffer<V>,
  front: usize,
  back: usize,
}

impl<'a, V> Iterator for Keys<'a, V> {
  type Item = usize;

  fn next(&mut self) -> Option<usize> {
    let index = self.buffer.first_present(self.front, self.back)?;
    self.front = index + 1;
    Some(index)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, Some(self.back.saturating_sub(self.front)))
  }
}

impl<'a, V> DoubleEndedIterator for Keys<'a, V> {
  fn next_back(&mut self) -> Option<usize> {
    let index = self.buffer.last_present(self.front, self.back)?;
    self.back = index;
    Some(index)
  }
}

impl<'a, V: Clone> IntoIterator for &'a IndexedSparseMap<V> {
  type Item = (usize, Option<V>);
  type IntoIter = Iter<'a, V>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<V> FromIterator<(usize, V)> for IndexedSparseMap<V> {
  fn from_iter<I: IntoIterator<Item = (usize, V)>>(iter: I) -> Self {
    let mut map = IndexedSparseMap::new();
    for (index, value) in iter {
      map.store(index, Slot::Value(value));
    }
    map
  }
}

impl<V> Extend<(usize, V)> for IndexedSparseMap<V> {
  /// Keys outside a view's window are skipped.
  fn extend<I: IntoIterator<Item = (usize, V)>>(&mut self, iter: I) {
    for (index, value) in iter {
      if self.in_window(index) {
        self.store(index, Slot::Value(value));
      } else {
        warn!(index, "extend skipped a key outside the view window");
      }
    }
  }
}

impl<V: Debug> Debug for IndexedSparseMap<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let slots = self.buffer.slots();
    let end = self.limit().min(slots.len());
    let start = self.start.min(end);
    f.debug_map()
      .entries(
        slots[start..end]
          .iter()
          .enumerate()
          .filter(|(_, slot)| slot.is_present())
          .map(|(offset, slot)| (start + offset, slot.as_ref().value())),
      )
      .finish()
  }
}

impl<V> Default for IndexedSparseMap<V> {
  fn default() -> Self {
    Self::new()
  }
}
