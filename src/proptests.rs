use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_map<V: Clone>(m: &IndexedSparseMap<V>, model: &BTreeMap<usize, Option<V>>) {
  assert_eq!(m.len(), model.len(), "present count must match the model");
  assert_eq!(m.first_key(), model.keys().next().copied(), "first key");
  assert_eq!(m.last_key(), model.keys().next_back().copied(), "last key");
  if let Some(last) = m.last_key() {
    assert!(m.size() > last, "watermark {} must cover key {}", m.size(), last);
    assert!(m.capacity() >= m.size(), "capacity must cover the watermark");
  } else {
    assert!(m.is_empty());
  }

  let keys: Vec<usize> = m.keys().collect();
  let expected: Vec<usize> = model.keys().copied().collect();
  assert_eq!(keys, expected, "iteration must yield exactly the live keys, ascending");
}

#[derive(Clone, Debug)]
enum Op {
  Put(usize, u32),
  PutNull(usize),
  Remove(usize),
  Get(usize),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
  // Mostly dense keys with a few far ones.
  let key = prop_oneof![
    9 => 0usize..64,
    1 => 64usize..2048,
  ];
  let op = prop_oneof![
    40 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
    10 => key.clone().prop_map(Op::PutNull),
    30 => key.clone().prop_map(Op::Remove),
    20 => key.prop_map(Op::Get),
  ];
  prop::collection::vec(op, 0..=500)
}

fn growth_strategy() -> impl Strategy<Value = GrowthPolicy> {
  prop_oneof![
    (0usize..40).prop_map(GrowthPolicy::Constant),
    (0.0f32..3.0).prop_map(GrowthPolicy::Factor),
  ]
}

proptest! {
  #![proptest_config(ProptestConfig {
    cases: 256,
    .. ProptestConfig::default()
  })]

  #[test]
  fn prop_equivalence_with_btreemap(growth in growth_strategy(), ops in ops_strategy()) {
    let mut m: IndexedSparseMap<u32> = IndexedSparseMap::with_growth(growth);
    let mut model: BTreeMap<usize, Option<u32>> = BTreeMap::new();

    for op in ops {
      match op {
        Op::Put(key, value) => {
          let old = m.put(key, value).unwrap();
          let old_model = model.insert(key, Some(value));
          prop_assert_eq!(old.into_option(), old_model);
        }
        Op::PutNull(key) => {
          let old = m.put_null(key).unwrap();
          let old_model = model.insert(key, None);
          prop_assert_eq!(old.into_option(), old_model);
        }
        Op::Remove(key) => {
          let old = m.remove(key).unwrap();
          let old_model = model.remove(&key);
          prop_assert_eq!(old.into_option(), old_model);
        }
        Op::Get(key) => {
          match model.get(&key) {
            Some(expected) => prop_assert_eq!(m.get(key), Ok(*expected)),
            None => {
              prop_assert!(m.get(key).is_err());
              prop_assert!(!m.contains_key(key));
            }
          }
        }
      }
    }
    validate_map(&m, &model);

    let items: Vec<(usize, Option<u32>)> = m.iter().collect();
    let expected: Vec<(usize, Option<u32>)> = model.iter().map(|(k, v)| (*k, *v)).collect();
    prop_assert_eq!(items, expected);
  }

  #[test]
  fn prop_view_matches_source_window(
    ops in ops_strategy(),
    from in 0usize..80,
    len in 0usize..80,
  ) {
    let mut m: IndexedSparseMap<u32> = IndexedSparseMap::new();
    for op in ops {
      match op {
        Op::Put(key, value) => { m.put(key, value).unwrap(); }
        Op::PutNull(key) => { m.put_null(key).unwrap(); }
        Op::Remove(key) => { m.remove(key).unwrap(); }
        Op::Get(_) => {}
      }
    }
    let to = from + len;
    let view = m.sub_map(from, to).unwrap();

    let expected: Vec<usize> = m.keys().filter(|k| *k >= from && *k < to).collect();
    let keys: Vec<usize> = view.keys().collect();
    prop_assert_eq!(&keys, &expected);
    prop_assert_eq!(view.len(), expected.len());
    prop_assert_eq!(view.first_key(), expected.first().copied());
    prop_assert_eq!(view.last_key(), expected.last().copied());
    for k in from..to {
      prop_assert_eq!(view.contains_key(k), m.contains_key(k));
    }
  }

  #[test]
  fn prop_view_writes_visible_through_source(
    source_ops in ops_strategy(),
    view_ops in ops_strategy(),
    from in 0usize..80,
    len in 1usize..120,
  ) {
    let mut m: IndexedSparseMap<u32> = IndexedSparseMap::new();
    for op in source_ops {
      match op {
        Op::Put(key, value) => { m.put(key, value).unwrap(); }
        Op::PutNull(key) => { m.put_null(key).unwrap(); }
        Op::Remove(key) => { m.remove(key).unwrap(); }
        Op::Get(_) => {}
      }
    }
    let to = from + len;
    let mut view = m.sub_map(from, to).unwrap();
    for op in view_ops {
      match op {
        Op::Put(key, value) => { view.put(from + key % len, value).unwrap(); }
        Op::PutNull(key) => { view.put_null(from + key % len).unwrap(); }
        Op::Remove(key) => { view.remove(from + key % len).unwrap(); }
        Op::Get(key) => {
          let k = from + key % len;
          prop_assert_eq!(m.get_slot(k), view.get_slot(k));
        }
      }
    }

    for k in from..to {
      prop_assert_eq!(m.contains_key(k), view.contains_key(k));
      prop_assert_eq!(m.get_slot(k), view.get_slot(k));
      if view.contains_key(k) {
        prop_assert_eq!(m.get(k), view.get(k));
      }
    }
    let source_keys: Vec<usize> = m.keys().filter(|k| *k >= from && *k < to).collect();
    let view_keys: Vec<usize> = view.keys().collect();
    prop_assert_eq!(&source_keys, &view_keys);
    prop_assert_eq!(view.len(), view_keys.len());

    // removing everything through the source leaves consistent metadata
    for k in source_keys {
      prop_assert!(m.remove(k).unwrap().is_present());
      prop_assert_eq!(m.is_empty(), m.first_key().is_none());
      prop_assert_eq!(m.first_key().is_none(), m.last_key().is_none());
    }
    prop_assert_eq!(view.keys().count(), 0);
  }

  #[test]
  fn prop_growth_exceeds_request(
    growth in growth_strategy(),
    capacity in 0usize..10_000,
    requested in 0usize..100_000,
  ) {
    let next = growth.compute(capacity, requested);
    prop_assert!(next > requested);
    prop_assert!(growth.compute(capacity, requested + 1) >= next);
  }
}
