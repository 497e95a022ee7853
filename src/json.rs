//! JSON conversion, available with the `serde_support` feature.
//!
//! A map is written as a JSON object keyed by the decimal index. Explicit
//! nulls are written as `null`; absent keys are not written at all.

use alloc::format;
use alloc::string::{String, ToString};

use serde_json::{Map, Value};

use crate::error::MapError;
use crate::indexedmap::IndexedSparseMap;

impl<V: Clone + Into<Value>> IndexedSparseMap<V> {
  /// ```
  /// # use densemap::IndexedSparseMap;
  /// let mut map = IndexedSparseMap::new();
  /// map.put(0, "a").unwrap();
  /// map.put_null(3).unwrap();
  /// assert_eq!(map.to_json().to_string(), r#"{"0":"a","3":null}"#);
  /// ```
  pub fn to_json(&self) -> Value {
    let mut obj = Map::new();
    for (index, value) in self.iter() {
      obj.insert(index.to_string(), value.map_or(Value::Null, Into::into));
    }
    Value::Object(obj)
  }

  pub fn to_json_string(&self) -> String {
    self.to_json().to_string()
  }
}

/// Highest key `from_json` accepts. Every key is a buffer offset.
pub const MAX_JSON_KEY: usize = 1 << 24;

impl IndexedSparseMap<Value> {
  /// Builds a map from a JSON object whose keys are non-negative integers
  /// no greater than [`MAX_JSON_KEY`]. JSON `null` values become explicit
  /// nulls.
  pub fn from_json(value: &Value) -> Result<IndexedSparseMap<Value>, MapError> {
    Self::from_json_with_max_key(value, MAX_JSON_KEY)
  }

  /// Like [`from_json`](Self::from_json), with a caller-chosen key limit.
  pub fn from_json_with_max_key(
    value: &Value,
    max_key: usize,
  ) -> Result<IndexedSparseMap<Value>, MapError> {
    let obj = match value.as_object() {
      Some(obj) => obj,
      None => return Err(MapError::Json(format!("expected an object, found {}", value))),
    };
    let mut map = IndexedSparseMap::new();
    for (key, v) in obj.iter() {
      let index: i128 = key
        .parse()
        .map_err(|_| MapError::Json(format!("key '{}' is not an integer", key)))?;
      if index > max_key as i128 {
        return Err(MapError::Json(format!("key '{}' is above the limit of {}", key, max_key)));
      }
      match v {
        Value::Null => map.put_null(index)?,
        other => map.put(index, other.clone())?,
      };
    }
    Ok(map)
  }

  pub fn from_json_str(s: &str) -> Result<IndexedSparseMap<Value>, MapError> {
    let value: Value = serde_json::from_str(s).map_err(|e| MapError::Json(e.to_string()))?;
    Self::from_json(&value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_to_json() {
    let mut map = IndexedSparseMap::new();
    map.put(1, 10i64).unwrap();
    map.put(12, 120i64).unwrap();
    map.put_null(4).unwrap();
    assert_eq!(map.to_json(), json!({"1": 10, "4": null, "12": 120}));
  }

  #[test]
  fn test_from_json() {
    let text = r#"{"2": "two", "5": null, "9": [1, 2]}"#;
    let map = IndexedSparseMap::<Value>::from_json_str(text).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(2), Ok(Some(json!("two"))));
    assert_eq!(map.get(5), Ok(None));
    assert_eq!(map.get(9), Ok(Some(json!([1, 2]))));
    assert_eq!(map.first_key(), Some(2));
    assert_eq!(map.last_key(), Some(9));
    assert_eq!(map.to_json(), json!({"2": "two", "5": null, "9": [1, 2]}));
  }

  #[test]
  fn test_from_json_errors() {
    assert!(matches!(IndexedSparseMap::<Value>::from_json(&json!([1, 2])), Err(MapError::Json(_))));
    assert!(matches!(
      IndexedSparseMap::<Value>::from_json(&json!({"x": 1})),
      Err(MapError::Json(_))
    ));
    assert_eq!(
      IndexedSparseMap::<Value>::from_json(&json!({"-3": 1})).unwrap_err(),
      MapError::InvalidKey(-3)
    );
    assert!(matches!(IndexedSparseMap::<Value>::from_json_str("{"), Err(MapError::Json(_))));
  }

  #[test]
  fn test_from_json_rejects_huge_keys() {
    let huge = json!({"0": 1, "9000000000000": 2});
    assert!(matches!(IndexedSparseMap::<Value>::from_json(&huge), Err(MapError::Json(_))));
    let past_i128 = r#"{"999999999999999999999999999999999999999999": 1}"#;
    assert!(matches!(IndexedSparseMap::<Value>::from_json_str(past_i128), Err(MapError::Json(_))));

    let at_limit = json!({"100": "x"});
    let map = IndexedSparseMap::<Value>::from_json_with_max_key(&at_limit, 100).unwrap();
    assert_eq!(map.get(100), Ok(Some(json!("x"))));
    assert!(matches!(
      IndexedSparseMap::<Value>::from_json_with_max_key(&json!({"101": "x"}), 100),
      Err(MapError::Json(_))
    ));
  }
}
