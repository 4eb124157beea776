//! Structured error types for webhook verification.

use thiserror::Error;

/// Terminal, request-level rejection. Variants never say which candidate
/// signature came closest.
#[derive(Debug, Error)]
pub enum WebhookError {
  #[error("malformed signature header: {0}")]
  MalformedSignatureHeader(String),

  #[error("no signature matches the expected digest")]
  InvalidSignature,

  #[error("signature timestamp is {skew_secs}s away from now (tolerance {tolerance_secs}s)")]
  StaleSignature { skew_secs: u64, tolerance_secs: i64 },

  #[error("invalid event payload: {0}")]
  InvalidPayload(#[from] serde_json::Error),
}

impl WebhookError {
  pub fn malformed(msg: impl Into<String>) -> Self {
    Self::MalformedSignatureHeader(msg.into())
  }

  /// Machine-readable code for the wire.
  pub fn code(&self) -> &'static str {
    match self {
      Self::MalformedSignatureHeader(_) => "MALFORMED_SIGNATURE_HEADER",
      Self::InvalidSignature => "INVALID_SIGNATURE",
      Self::StaleSignature { .. } => "STALE_SIGNATURE",
      Self::InvalidPayload(_) => "INVALID_PAYLOAD",
    }
  }
}
