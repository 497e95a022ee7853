use crate::error::MapError;

/// An integer that can be used as a map key.
///
/// Unsigned types convert when they fit in a `usize` and fail with
/// [`MapError::KeyTooLarge`] otherwise. Signed types also fail with
/// [`MapError::InvalidKey`] when negative, so `map.put(-1, v)` is rejected
/// before anything is touched.
///
/// ```
/// # use densemap::{IntKey, MapError};
/// #
/// assert_eq!(7i32.to_index(), Ok(7));
/// assert_eq!((-2i64).to_index(), Err(MapError::InvalidKey(-2)));
/// ```
pub trait IntKey: Copy {
  fn to_index(self) -> Result<usize, MapError>;
}

macro_rules! unsigned_key {
  ($($t:ty),*) => {
    $(
      impl IntKey for $t {
        #[inline]
        fn to_index(self) -> Result<usize, MapError> {
          usize::try_from(self).map_err(|_| MapError::KeyTooLarge(self as u128))
        }
      }
    )*
  };
}

macro_rules! signed_key {
  ($($t:ty),*) => {
    $(
      impl IntKey for $t {
        #[inline]
        fn to_index(self) -> Result<usize, MapError> {
          if self < 0 {
            return Err(MapError::InvalidKey(self as i128));
          }
          usize::try_from(self).map_err(|_| MapError::KeyTooLarge(self as u128))
        }
      }
    )*
  };
}

unsigned_key!(u8, u16, u32, u64, u128, usize);
signed_key!(i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unsigned() {
    assert_eq!(0u8.to_index(), Ok(0));
    assert_eq!(50usize.to_index(), Ok(50));
    assert_eq!(65535u16.to_index(), Ok(65535));
  }

  #[test]
  fn test_signed() {
    assert_eq!(0i32.to_index(), Ok(0));
    assert_eq!(12isize.to_index(), Ok(12));
    assert_eq!((-1i8).to_index(), Err(MapError::InvalidKey(-1)));
    assert_eq!(i64::MIN.to_index(), Err(MapError::InvalidKey(i64::MIN as i128)));
    assert_eq!(i128::MIN.to_index(), Err(MapError::InvalidKey(i128::MIN)));
  }

  #[test]
  fn test_too_large() {
    assert_eq!(u128::MAX.to_index(), Err(MapError::KeyTooLarge(u128::MAX)));
    assert_eq!(i128::MAX.to_index(), Err(MapError::KeyTooLarge(i128::MAX as u128)));
    assert_eq!((usize::MAX as u128).to_index(), Ok(usize::MAX));
  }
}
