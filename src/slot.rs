/// The content of one buffer position.
///
/// `Null` and `Absent` are different things: `Null` is a key the caller
/// explicitly stored without a payload, `Absent` is a key that was never
/// stored (or was removed).
///
/// ```
/// # use densemap::Slot;
/// #
/// let s: Slot<&str> = Slot::Null;
/// assert!(s.is_present());
/// assert_eq!(s.into_option(), Some(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot<V> {
  /// Nothing stored at this index.
  Absent,
  /// The key is present and maps to a logical null.
  Null,
  /// The key is present and maps to a value.
  Value(V),
}

impl<V> Slot<V> {
  /// Builds a present slot from an optional payload. `None` becomes `Null`.
  #[inline]
  pub fn from_option(value: Option<V>) -> Slot<V> {
    match value {
      Some(v) => Slot::Value(v),
      None => Slot::Null,
    }
  }

  #[inline]
  pub fn is_present(&self) -> bool {
    !matches!(self, Slot::Absent)
  }

  #[inline]
  pub fn is_absent(&self) -> bool {
    matches!(self, Slot::Absent)
  }

  #[inline]
  pub fn is_null(&self) -> bool {
    matches!(self, Slot::Null)
  }

  /// Returns `None` when absent, `Some(None)` for a stored null and
  /// `Some(Some(v))` for a value.
  pub fn into_option(self) -> Option<Option<V>> {
    match self {
      Slot::Absent => None,
      Slot::Null => Some(None),
      Slot::Value(v) => Some(Some(v)),
    }
  }

  /// Returns the payload, if any. Both `Null` and `Absent` give `None`.
  pub fn value(self) -> Option<V> {
    match self {
      Slot::Value(v) => Some(v),
      _ => None,
    }
  }

  pub fn as_ref(&self) -> Slot<&V> {
    match self {
      Slot::Absent => Slot::Absent,
      Slot::Null => Slot::Null,
      Slot::Value(v) => Slot::Value(v),
    }
  }

  /// Takes the content out, leaving `Absent` behind.
  #[inline]
  pub fn take(&mut self) -> Slot<V> {
    core::mem::replace(self, Slot::Absent)
  }
}

impl<V: Clone> Slot<&V> {
  pub fn cloned(self) -> Slot<V> {
    match self {
      Slot::Absent => Slot::Absent,
      Slot::Null => Slot::Null,
      Slot::Value(v) => Slot::Value(v.clone()),
    }
  }
}

impl<V> Default for Slot<V> {
  fn default() -> Self {
    Slot::Absent
  }
}

impl<V> From<Option<V>> for Slot<V> {
  fn from(value: Option<V>) -> Self {
    Slot::from_option(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_presence() {
    assert!(Slot::Value(1).is_present());
    assert!(Slot::<i32>::Null.is_present());
    assert!(Slot::<i32>::Absent.is_absent());
    assert!(!Slot::<i32>::Absent.is_present());
    assert!(Slot::<i32>::Null.is_null());
  }

  #[test]
  fn test_null_is_not_absent() {
    assert_ne!(Slot::<i32>::Null, Slot::Absent);
    assert_eq!(Slot::<i32>::Null.into_option(), Some(None));
    assert_eq!(Slot::<i32>::Absent.into_option(), None);
    assert_eq!(Slot::Value(3).into_option(), Some(Some(3)));
  }

  #[test]
  fn test_take_leaves_absent() {
    let mut s = Slot::Value("x");
    assert_eq!(s.take(), Slot::Value("x"));
    assert_eq!(s, Slot::Absent);
    assert_eq!(s.take(), Slot::Absent);
  }

  #[test]
  fn test_from_option() {
    assert_eq!(Slot::from(Some(5)), Slot::Value(5));
    assert_eq!(Slot::<i32>::from(None), Slot::Null);
  }

  #[test]
  fn test_as_ref_cloned() {
    let s = Slot::Value(String::from("abc"));
    let copy: Slot<String> = s.as_ref().cloned();
    assert_eq!(copy, s);
    assert_eq!(Slot::<String>::Null.as_ref().cloned(), Slot::Null);
  }
}
