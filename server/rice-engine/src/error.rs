//! Structured error types for the RICE engine.

use thiserror::Error;

use crate::types::ErrorOutput;

/// Machine code reported for every batch-level failure.
pub const CALCULATION_FAILED: &str = "RICE_CALCULATION_FAILED";

/// Batch-level failure: the whole call is rejected.
#[derive(Debug, Error)]
pub enum RiceError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl RiceError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn code(&self) -> &'static str {
    CALCULATION_FAILED
  }

  pub fn field(&self) -> Option<&str> {
    match self {
      Self::Validation { field, .. } => Some(field),
      Self::Json(_) => None,
    }
  }

  /// Wire form of this error.
  pub fn to_output(&self) -> ErrorOutput {
    let out = ErrorOutput::new(self.code(), self.to_string());
    match self.field() {
      Some(field) => out.with_field(field),
      None => out,
    }
  }
}

/// Why a single feature was not scored. Recorded inline; the batch continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
  #[error("missing {0}")]
  Missing(&'static str),

  #[error("{0} must be a number")]
  NotNumeric(&'static str),

  #[error("{0} must not be negative")]
  Negative(&'static str),

  #[error("confidence must be within 0..=100")]
  ConfidenceOutOfRange,

  #[error("effort must be greater than zero")]
  ZeroEffort,

  #[error("score is not a finite number")]
  NonFinite,
}
