//! Verifier configuration with sane defaults.

use chrono::Duration;

/// Default replay window, matching the payment processor's own libraries.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Largest accepted replay window (one day).
pub const MAX_TOLERANCE_SECS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct VerifierConfig {
  /// Max allowed distance between the signed timestamp and the verifier's clock.
  pub tolerance: Duration,
}

impl VerifierConfig {
  /// `None` unless `0 < secs <= MAX_TOLERANCE_SECS`.
  pub fn with_tolerance_secs(secs: i64) -> Option<Self> {
    if secs <= 0 || secs > MAX_TOLERANCE_SECS {
      return None;
    }
    Duration::try_seconds(secs).map(|tolerance| Self { tolerance })
  }
}

impl Default for VerifierConfig {
  fn default() -> Self {
    Self {
      tolerance: Duration::seconds(DEFAULT_TOLERANCE_SECS),
    }
  }
}
