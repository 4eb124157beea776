//! Input/output types for the RICE engine (JSON contract with the product API and SPA).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Input: one JSON object `{"features": [...]}`.
///
/// `features` is kept as a raw value so a wrong shape surfaces as a
/// field-level validation error instead of a serde message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Input {
  #[serde(default)]
  pub features: Option<Value>,
}

/// One ranked feature. Every key of the input object passes through untouched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFeature {
  #[serde(flatten)]
  pub fields: Map<String, Value>,
  pub rice_score: f64,
  pub priority_rank: usize,
  /// Present only when the score computation was skipped.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl ScoredFeature {
  pub fn id(&self) -> Option<&Value> {
    self.fields.get("id")
  }

  pub fn is_valid(&self) -> bool {
    self.error.is_none()
  }
}

/// Output: `{"data": [...]}` in rank order.
#[derive(Debug, Clone, Serialize)]
pub struct Output {
  pub data: Vec<ScoredFeature>,
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Structured error output for a rejected batch.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
  pub code: &'static str,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(code: &'static str, message: impl Into<String>) -> Self {
    Self {
      error: ErrorBody {
        code,
        message: message.into(),
        field: None,
      },
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.error.field = Some(field.into());
    self
  }
}
