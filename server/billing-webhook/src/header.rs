//! Parse the `t=<seconds>,v1=<hex>,...` signature header.

use crate::error::WebhookError;
use crate::types::SignatureHeader;

/// Scheme of the signatures we verify; `v0` and others are ignored.
pub const SIGNATURE_SCHEME: &str = "v1";

/// Parse a signature header.
///
/// - Parts are comma-separated `key=value` pairs; whitespace around parts is trimmed.
/// - The first `t` wins and must be plain decimal digits.
/// - Every `v1` value is collected (several are sent during secret rotation).
pub fn parse(header: &str) -> Result<SignatureHeader, WebhookError> {
  let mut timestamp: Option<&str> = None;
  let mut candidates = Vec::new();

  for part in header.split(',') {
    let Some((key, value)) = part.trim().split_once('=') else {
      continue;
    };
    match key {
      "t" if timestamp.is_none() => timestamp = Some(value),
      SIGNATURE_SCHEME => candidates.push(value.to_string()),
      _ => {}
    }
  }

  let timestamp = timestamp.ok_or_else(|| WebhookError::malformed("missing t= timestamp"))?;
  if candidates.is_empty() {
    return Err(WebhookError::malformed("no v1= signatures"));
  }
  if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
    return Err(WebhookError::malformed("t= must be unix seconds"));
  }
  let issued_at: i64 = timestamp
    .parse()
    .map_err(|_| WebhookError::malformed("t= out of range"))?;

  Ok(SignatureHeader {
    timestamp: timestamp.to_string(),
    issued_at,
    candidates,
  })
}
