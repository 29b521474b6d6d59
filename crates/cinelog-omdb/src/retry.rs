//! Backoff schedule for retried lookups.

use std::time::Duration;

/// Longest wait between two attempts.
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff: `base * 2^attempt`, capped at [`MAX_DELAY`].
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
  let factor = 2u32.saturating_pow(attempt);
  base.saturating_mul(factor).min(MAX_DELAY)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn doubles_each_attempt() {
    let base = Duration::from_millis(500);
    assert_eq!(backoff_delay(0, base), Duration::from_millis(500));
    assert_eq!(backoff_delay(1, base), Duration::from_secs(1));
    assert_eq!(backoff_delay(3, base), Duration::from_secs(4));
  }

  #[test]
  fn is_capped() {
    assert_eq!(backoff_delay(20, Duration::from_secs(1)), MAX_DELAY);
    assert_eq!(backoff_delay(u32::MAX, Duration::from_secs(1)), MAX_DELAY);
  }
}
