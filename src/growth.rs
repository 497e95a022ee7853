//! Capacity growth strategies for the slot buffer.

/// Decides how large the slot buffer becomes when an index past the current
/// watermark is written.
///
/// The amount is carried by the variant, so a policy is fixed once a map is
/// built.
///
/// # Examples
///
/// ```
/// use densemap::GrowthPolicy;
///
/// // One step is enough.
/// assert_eq!(GrowthPolicy::Constant(32).compute(0, 10), 32);
/// // One step is not enough, so growth restarts from the requested index.
/// assert_eq!(GrowthPolicy::Constant(32).compute(0, 50), 82);
/// assert_eq!(GrowthPolicy::Factor(0.5).compute(10, 12), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthPolicy {
  /// Grow by a fixed number of slots.
  Constant(usize),
  /// Grow by a fraction of the current capacity, plus one slot.
  Factor(f32),
}

impl GrowthPolicy {
  /// Default slot increment, matching `GrowthPolicy::default()`.
  pub const DEFAULT_AMOUNT: usize = 32;

  /// Returns a capacity strictly greater than `requested`.
  ///
  /// The result is deterministic and never decreases as `requested` grows
  /// for a fixed `capacity`.
  pub fn compute(&self, capacity: usize, requested: usize) -> usize {
    let grown = self.step(capacity);
    if grown > requested {
      grown
    } else {
      self.step(requested)
    }
  }

  fn step(&self, capacity: usize) -> usize {
    match *self {
      // A zero increment would never reach the requested index.
      GrowthPolicy::Constant(amount) => capacity.saturating_add(amount.max(1)),
      GrowthPolicy::Factor(factor) => {
        // f32::max drops NaN in favour of 0.0
        let factor = factor.max(0.0) as f64;
        let extra = (capacity as f64 * factor) as usize;
        capacity.saturating_add(extra).saturating_add(1)
      }
    }
  }
}

impl Default for GrowthPolicy {
  fn default() -> Self {
    GrowthPolicy::Constant(Self::DEFAULT_AMOUNT)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_constant_single_step() {
    let policy = GrowthPolicy::Constant(32);
    assert_eq!(policy.compute(0, 0), 32);
    assert_eq!(policy.compute(0, 31), 32);
    assert_eq!(policy.compute(32, 40), 64);
  }

  #[test]
  fn test_constant_falls_back_to_requested() {
    let policy = GrowthPolicy::Constant(32);
    // 0 + 32 <= 50, so growth restarts at 50
    assert_eq!(policy.compute(0, 50), 82);
    assert_eq!(policy.compute(10, 1000), 1032);
  }

  #[test]
  fn test_constant_zero_amount_still_grows() {
    let policy = GrowthPolicy::Constant(0);
    assert_eq!(policy.compute(0, 0), 1);
    assert_eq!(policy.compute(5, 9), 10);
  }

  #[test]
  fn test_factor() {
    let policy = GrowthPolicy::Factor(1.0);
    assert_eq!(policy.compute(0, 0), 1);
    assert_eq!(policy.compute(8, 10), 17);
    // 8 + 8 + 1 = 17 <= 40, so 40 + 40 + 1
    assert_eq!(policy.compute(8, 40), 81);
  }

  #[test]
  fn test_factor_rejects_negative_and_nan() {
    assert_eq!(GrowthPolicy::Factor(-3.0).compute(10, 10), 11);
    assert_eq!(GrowthPolicy::Factor(f32::NAN).compute(10, 10), 11);
  }

  #[test]
  fn test_result_exceeds_request_and_is_monotonic() {
    let policies = [
      GrowthPolicy::Constant(1),
      GrowthPolicy::Constant(7),
      GrowthPolicy::Factor(0.25),
      GrowthPolicy::Factor(2.0),
    ];
    for policy in policies.iter() {
      for capacity in [0usize, 1, 16, 100].iter() {
        let mut previous = 0;
        for requested in 0..300 {
          let next = policy.compute(*capacity, requested);
          assert!(next > requested, "{:?} cap {} req {}", policy, capacity, requested);
          assert!(next >= previous, "{:?} not monotonic at {}", policy, requested);
          previous = next;
        }
      }
    }
  }

  #[test]
  fn test_default() {
    assert_eq!(GrowthPolicy::default(), GrowthPolicy::Constant(32));
  }
}
