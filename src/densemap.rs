//! This crate provides an array-backed ordered map over non-negative integer keys.
//!
//! [`IndexedSparseMap`] is meant for keys that are mostly contiguous, such as
//! records indexed by their position, with the occasional gap. Values live in
//! one growable slot buffer, so lookups are a bounds check and an index, and
//! iteration simply walks the buffer in key order.
//!
//! A key can hold a value, hold an explicit null, or be absent; see [`Slot`].
//! The buffer grows according to a [`GrowthPolicy`]. Sub-range views built with
//! `sub_map`, `head_map` and `tail_map` share the buffer with the map they came
//! from instead of copying it.
//!
//! Maps are single-threaded (`!Send`, `!Sync`).
//!
//! ```
//! use densemap::{GrowthPolicy, IndexedSparseMap};
//!
//! let mut records = IndexedSparseMap::with_growth(GrowthPolicy::Factor(0.5));
//! for row in 0..100 {
//!   records.put(row, row * row).unwrap();
//! }
//! records.remove(99).unwrap();
//!
//! let window = records.sub_map(10, 20).unwrap();
//! assert_eq!(window.len(), 10);
//! assert_eq!(records.last_key(), Some(98));
//! ```

#![cfg_attr(all(feature = "no_std_support", not(test)), no_std)]

extern crate alloc;

pub mod buffer;
pub mod error;
pub mod growth;
pub mod indexedmap;
pub mod key;
pub mod slot;
pub mod source;

#[cfg(feature = "serde_support")]
pub mod json;

pub use crate::error::MapError;
pub use crate::growth::GrowthPolicy;
pub use crate::indexedmap::{IndexedSparseMap, Iter, Keys};
pub use crate::key::IntKey;
pub use crate::slot::Slot;
pub use crate::source::IntKeyedSource;

#[cfg(test)]
mod proptests;

/// Construction-time settings for an [`IndexedSparseMap`]. Fixed for the
/// life of the map and inherited by its views.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DenseMapConfig {
  /// How the slot buffer grows when a key past the watermark is written.
  pub growth: GrowthPolicy,
  /// Number of slots allocated up front.
  pub initial_capacity: usize,
}
