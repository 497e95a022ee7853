//! Sources that [`IndexedSparseMap::put_all`](crate::IndexedSparseMap::put_all)
//! can merge from.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;

#[cfg(not(feature = "no_std_support"))]
use std::collections::HashMap;
#[cfg(feature = "no_std_support")]
use hashbrown::HashMap;

use crate::indexedmap::IndexedSparseMap;

/// A map keyed by non-negative integers that can be merged into an
/// `IndexedSparseMap`.
///
/// `first_key`/`last_key` should be cheap where the source tracks them.
/// Sources backed by the same dense slot layout return themselves from
/// `as_dense`, which lets `put_all` copy the occupied range slot by slot
/// instead of going entry by entry.
pub trait IntKeyedSource<V> {
  fn first_key(&self) -> Option<usize>;

  fn last_key(&self) -> Option<usize>;

  /// Every entry in ascending key order. `None` stands for a stored null.
  fn entries(&self) -> Box<dyn Iterator<Item = (usize, Option<V>)> + '_>;

  fn as_dense(&self) -> Option<&IndexedSparseMap<V>> {
    None
  }
}

impl<V: Clone> IntKeyedSource<V> for IndexedSparseMap<V> {
  fn first_key(&self) -> Option<usize> {
    IndexedSparseMap::first_key(self)
  }

  fn last_key(&self) -> Option<usize> {
    IndexedSparseMap::last_key(self)
  }

  fn entries(&self) -> Box<dyn Iterator<Item = (usize, Option<V>)> + '_> {
    Box::new(self.iter())
  }

  fn as_dense(&self) -> Option<&IndexedSparseMap<V>> {
    Some(self)
  }
}

impl<V: Clone> IntKeyedSource<V> for BTreeMap<usize, V> {
  fn first_key(&self) -> Option<usize> {
    self.keys().next().copied()
  }

  fn last_key(&self) -> Option<usize> {
    self.keys().next_back().copied()
  }

  fn entries(&self) -> Box<dyn Iterator<Item = (usize, Option<V>)> + '_> {
    Box::new(self.iter().map(|(k, v)| (*k, Some(v.clone()))))
  }
}

/// Unordered: both bounds cost a scan of the keys.
impl<V: Clone> IntKeyedSource<V> for HashMap<usize, V> {
  fn first_key(&self) -> Option<usize> {
    self.keys().min().copied()
  }

  fn last_key(&self) -> Option<usize> {
    self.keys().max().copied()
  }

  fn entries(&self) -> Box<dyn Iterator<Item = (usize, Option<V>)> + '_> {
    Box::new(self.iter().map(|(k, v)| (*k, Some(v.clone()))))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Slot;

  #[test]
  fn test_btreemap_bounds() {
    let mut m = BTreeMap::new();
    assert_eq!(IntKeyedSource::<i32>::last_key(&m), None);
    m.insert(9usize, 1);
    m.insert(3usize, 2);
    assert_eq!(IntKeyedSource::first_key(&m), Some(3));
    assert_eq!(IntKeyedSource::last_key(&m), Some(9));
    assert!(m.as_dense().is_none());
    let entries: Vec<_> = m.entries().collect();
    assert_eq!(entries, vec![(3, Some(2)), (9, Some(1))]);
  }

  #[test]
  fn test_hashmap_bounds() {
    let mut m = HashMap::new();
    m.insert(12usize, "a");
    m.insert(4usize, "b");
    m.insert(7usize, "c");
    assert_eq!(IntKeyedSource::first_key(&m), Some(4));
    assert_eq!(IntKeyedSource::last_key(&m), Some(12));
  }

  #[test]
  fn test_dense_source() {
    let mut map = IndexedSparseMap::new();
    map.put(2, 'x').unwrap();
    map.put_null(6).unwrap();
    assert!(map.as_dense().is_some());
    let entries: Vec<_> = IntKeyedSource::entries(&map).collect();
    assert_eq!(entries, vec![(2, Some('x')), (6, None)]);
  }

  #[test]
  fn test_put_all_from_hashmap() {
    let mut map = IndexedSparseMap::new();
    map.put(1, 100).unwrap();
    let mut m = HashMap::new();
    m.insert(1usize, 101);
    m.insert(70usize, 170);
    map.put_all(&m).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(1), Ok(Some(101)));
    assert_eq!(map.get_slot(70), Slot::Value(170));
    assert_eq!(map.last_key(), Some(70));
  }

  #[test]
  fn test_put_all_through_trait_object() {
    let mut m = BTreeMap::new();
    m.insert(5usize, 5u8);
    let source: &dyn IntKeyedSource<u8> = &m;
    let mut map = IndexedSparseMap::new();
    map.put_all(source).unwrap();
    assert_eq!(map.get(5), Ok(Some(5)));
  }
}
