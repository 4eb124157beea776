//! RICE score: (reach × impact × confidence%) / effort.

use crate::error::SkipReason;

/// The four scoring inputs of one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
  /// Estimated users affected.
  pub reach: f64,
  /// Expected magnitude, conventionally 0.25 / 0.5 / 1 / 2 / 3.
  pub impact: f64,
  /// Percentage, 0..=100.
  pub confidence: f64,
  /// Person-time units; must be > 0.
  pub effort: f64,
}

/// Compute the rounded RICE score, or the reason the feature cannot be scored.
pub fn compute_rice_score(m: &Metrics) -> Result<f64, SkipReason> {
  let fields = [
    ("reach", m.reach),
    ("impact", m.impact),
    ("confidence", m.confidence),
    ("effort", m.effort),
  ];
  for (name, value) in fields {
    if value.is_nan() {
      return Err(SkipReason::NotNumeric(name));
    }
    if value < 0.0 {
      return Err(SkipReason::Negative(name));
    }
  }
  if m.confidence > 100.0 {
    return Err(SkipReason::ConfidenceOutOfRange);
  }
  if m.effort == 0.0 {
    return Err(SkipReason::ZeroEffort);
  }

  let confidence_fraction = m.confidence / 100.0;
  let raw = (m.reach * m.impact * confidence_fraction) / m.effort;
  if !raw.is_finite() {
    return Err(SkipReason::NonFinite);
  }
  // abs() only clears a negative zero from a "-0" input.
  Ok(round_cents(raw).abs())
}

/// Round to 2 decimal places, half away from zero.
///
/// Whole numbers come back unchanged, so large finite values never overflow
/// in the `x * 100` step.
pub fn round_cents(x: f64) -> f64 {
  if x.fract() == 0.0 {
    return x;
  }
  (x * 100.0).round() / 100.0
}
