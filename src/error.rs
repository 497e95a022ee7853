#[cfg(feature = "serde_support")]
use alloc::string::String;

/// Errors returned by keyed operations on an [`IndexedSparseMap`](crate::IndexedSparseMap).
///
/// A failed operation never changes the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
  /// The index lies outside the addressed range of the map or view.
  OutOfRange {
    index: usize,
    size: usize,
  },
  /// The index is in range but nothing is stored there.
  NotFound(usize),
  /// A negative key was supplied.
  InvalidKey(i128),
  /// A key too large to address on this platform.
  KeyTooLarge(u128),
  /// JSON input could not be turned into a map.
  #[cfg(feature = "serde_support")]
  Json(String),
}

impl core::fmt::Display for MapError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      MapError::OutOfRange { index, size } => {
        write!(f, "Index out of range: index is {}, but size is {}", index, size)
      }
      MapError::NotFound(index) => write!(f, "No value stored at index {}", index),
      MapError::InvalidKey(key) => write!(f, "Invalid key {}: keys must be non-negative", key),
      MapError::KeyTooLarge(key) => write!(f, "Key {} does not fit in a usize index", key),
      #[cfg(feature = "serde_support")]
      MapError::Json(msg) => write!(f, "Invalid JSON map: {}", msg),
    }
  }
}

#[cfg(not(feature = "no_std_support"))]
impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display() {
    let e = MapError::OutOfRange { index: 9, size: 4 };
    assert_eq!(e.to_string(), "Index out of range: index is 9, but size is 4");
    assert_eq!(MapError::NotFound(3).to_string(), "No value stored at index 3");
    assert_eq!(
      MapError::InvalidKey(-1).to_string(),
      "Invalid key -1: keys must be non-negative"
    );
    assert_eq!(
      MapError::KeyTooLarge(u128::MAX).to_string(),
      format!("Key {} does not fit in a usize index", u128::MAX)
    );
  }
}
