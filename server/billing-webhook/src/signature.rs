//! HMAC-SHA256 webhook signatures: compute, and verify with a replay window.
//!
//! Checks run in a fixed order: header shape, signature, freshness, and only
//! then the body is deserialized. Untrusted bytes are never parsed before
//! both the signature and the timestamp are accepted.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};

use crate::config::VerifierConfig;
use crate::error::WebhookError;
use crate::header;
use crate::types::{Event, SignatureHeader};

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of `"<timestamp>.<body>"` keyed by `secret`.
pub fn compute_signature(secret: &str, timestamp: &str, body: &[u8]) -> String {
  let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
    .unwrap_or_else(|_| unreachable!("hmac accepts any key length"));
  mac.update(timestamp.as_bytes());
  mac.update(b".");
  mac.update(body);
  hex::encode(mac.finalize().into_bytes())
}

/// Header the processor would send for `body` signed at `timestamp` (unix seconds).
pub fn signature_header(secret: &str, timestamp: i64, body: &[u8]) -> String {
  let t = timestamp.to_string();
  format!("t={},v1={}", t, compute_signature(secret, &t, body))
}

/// Verifies inbound webhook requests against one shared secret.
#[derive(Clone)]
pub struct Verifier {
  secret: String,
  config: VerifierConfig,
}

impl std::fmt::Debug for Verifier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Verifier")
      .field("secret", &"<redacted>")
      .field("config", &self.config)
      .finish()
  }
}

impl Verifier {
  pub fn new(secret: impl Into<String>, config: VerifierConfig) -> Self {
    Self {
      secret: secret.into(),
      config,
    }
  }

  pub fn with_defaults(secret: impl Into<String>) -> Self {
    Self::new(secret, VerifierConfig::default())
  }

  /// Authenticate `raw_body` and return the parsed event.
  pub fn verify(
    &self,
    raw_body: &[u8],
    signature_header: &str,
    now: DateTime<Utc>,
  ) -> Result<Event, WebhookError> {
    let header = header::parse(signature_header)?;
    self.check_signature(&header, raw_body)?;
    self.check_freshness(&header, now)?;
    Ok(serde_json::from_slice(raw_body)?)
  }

  fn check_signature(&self, header: &SignatureHeader, raw_body: &[u8]) -> Result<(), WebhookError> {
    let expected = compute_signature(&self.secret, &header.timestamp, raw_body);

    // Compare against every candidate without short-circuiting.
    let mut found = Choice::from(0u8);
    for candidate in &header.candidates {
      found |= candidate.as_bytes().ct_eq(expected.as_bytes());
    }
    if bool::from(found) {
      Ok(())
    } else {
      Err(WebhookError::InvalidSignature)
    }
  }

  fn check_freshness(&self, header: &SignatureHeader, now: DateTime<Utc>) -> Result<(), WebhookError> {
    let signed_ms = header.issued_at.saturating_mul(1000);
    let skew_ms = now.timestamp_millis().abs_diff(signed_ms);
    let tolerance_ms = self.config.tolerance.num_milliseconds().max(0) as u64;
    if skew_ms > tolerance_ms {
      return Err(WebhookError::StaleSignature {
        skew_secs: skew_ms / 1000,
        tolerance_secs: self.config.tolerance.num_seconds(),
      });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  const SECRET: &str = "whsec_test";
  const T: i64 = 1_700_000_000;
  const BODY: &[u8] = br#"{"id":"evt_1","type":"ping","data":{"object":{}}}"#;

  fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
  }

  #[test]
  fn signature_is_lowercase_hex_sha256() {
    let sig = compute_signature(SECRET, "1", b"{}");
    assert_eq!(sig.len(), 64);
    assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
  }

  #[test]
  fn signature_matches_known_vector() {
    assert_eq!(
      compute_signature(SECRET, "1700000000", BODY),
      "858ad57115edb84638ea2d551add4618de2030cad3245172e7bc3e8c846c0a61"
    );
  }

  #[test]
  fn valid_signature_within_window_is_accepted() {
    let verifier = Verifier::with_defaults(SECRET);
    let header = signature_header(SECRET, T, BODY);
    let event = verifier.verify(BODY, &header, at(T + 120)).unwrap();
    assert_eq!(event.id, "evt_1");
    assert_eq!(event.event_type, "ping");
  }

  #[test]
  fn window_edge_is_inclusive() {
    let verifier = Verifier::with_defaults(SECRET);
    let header = signature_header(SECRET, T, BODY);
    assert!(verifier.verify(BODY, &header, at(T + 300)).is_ok());
    assert!(verifier.verify(BODY, &header, at(T - 300)).is_ok());
  }

  #[test]
  fn stale_after_window() {
    let verifier = Verifier::with_defaults(SECRET);
    let header = signature_header(SECRET, T, BODY);
    let err = verifier.verify(BODY, &header, at(T + 301)).unwrap_err();
    assert!(matches!(err, WebhookError::StaleSignature { skew_secs: 301, .. }));
    let err = verifier.verify(BODY, &header, at(T - 301)).unwrap_err();
    assert_eq!(err.code(), "STALE_SIGNATURE");
  }

  #[test]
  fn sub_second_skew_past_window_is_stale() {
    let verifier = Verifier::with_defaults(SECRET);
    let header = signature_header(SECRET, T, BODY);
    let now = Utc.timestamp_millis_opt((T + 300) * 1000 + 1).unwrap();
    assert_eq!(verifier.verify(BODY, &header, now).unwrap_err().code(), "STALE_SIGNATURE");
  }

  #[test]
  fn flipped_hex_character_is_rejected() {
    let verifier = Verifier::with_defaults(SECRET);
    let sig = compute_signature(SECRET, &T.to_string(), BODY);
    for i in 0..sig.len() {
      let mut bytes = sig.clone().into_bytes();
      bytes[i] = if bytes[i] == b'0' { b'1' } else { b'0' };
      let tampered = String::from_utf8(bytes).unwrap();
      let header = format!("t={},v1={}", T, tampered);
      let err = verifier.verify(BODY, &header, at(T)).unwrap_err();
      assert!(matches!(err, WebhookError::InvalidSignature), "position {}", i);
    }
  }

  #[test]
  fn uppercase_hex_does_not_match() {
    let verifier = Verifier::with_defaults(SECRET);
    let sig = compute_signature(SECRET, &T.to_string(), BODY).to_uppercase();
    let header = format!("t={},v1={}", T, sig);
    assert!(matches!(verifier.verify(BODY, &header, at(T)), Err(WebhookError::InvalidSignature)));
  }

  #[test]
  fn any_matching_candidate_is_enough() {
    let verifier = Verifier::with_defaults(SECRET);
    let good = compute_signature(SECRET, &T.to_string(), BODY);
    let old = compute_signature("whsec_previous", &T.to_string(), BODY);
    let header = format!("t={},v1={},v1={}", T, old, good);
    assert!(verifier.verify(BODY, &header, at(T)).is_ok());
  }

  #[test]
  fn wrong_secret_is_rejected() {
    let verifier = Verifier::with_defaults("whsec_other");
    let header = signature_header(SECRET, T, BODY);
    assert_eq!(verifier.verify(BODY, &header, at(T)).unwrap_err().code(), "INVALID_SIGNATURE");
  }

  #[test]
  fn modified_body_is_rejected() {
    let verifier = Verifier::with_defaults(SECRET);
    let header = signature_header(SECRET, T, BODY);
    let tampered = br#"{"id":"evt_1","type":"ping","data":{"object":{"x":1}}}"#;
    assert_eq!(verifier.verify(tampered, &header, at(T)).unwrap_err().code(), "INVALID_SIGNATURE");
  }

  #[test]
  fn bad_signature_wins_over_stale() {
    let verifier = Verifier::with_defaults(SECRET);
    let header = format!("t={},v1={}", T, "0".repeat(64));
    let err = verifier.verify(BODY, &header, at(T + 10_000)).unwrap_err();
    assert!(matches!(err, WebhookError::InvalidSignature));
  }

  #[test]
  fn timestamp_text_is_signed_as_sent() {
    let verifier = Verifier::with_defaults(SECRET);
    let sig = compute_signature(SECRET, "01700000000", BODY);
    let header = format!("t=01700000000,v1={}", sig);
    assert!(verifier.verify(BODY, &header, at(T)).is_ok());
  }

  #[test]
  fn body_is_parsed_only_after_verification() {
    let verifier = Verifier::with_defaults(SECRET);
    let body = b"not json";
    let header = format!("t={},v1={}", T, "a".repeat(64));
    assert!(matches!(verifier.verify(body, &header, at(T)), Err(WebhookError::InvalidSignature)));

    let header = signature_header(SECRET, T, body);
    assert!(matches!(verifier.verify(body, &header, at(T)), Err(WebhookError::InvalidPayload(_))));
  }

  #[test]
  fn custom_tolerance_is_honored() {
    let verifier = Verifier::new(SECRET, VerifierConfig::with_tolerance_secs(10).unwrap());
    let header = signature_header(SECRET, T, BODY);
    assert!(verifier.verify(BODY, &header, at(T + 10)).is_ok());
    assert_eq!(verifier.verify(BODY, &header, at(T + 11)).unwrap_err().code(), "STALE_SIGNATURE");
  }

  #[test]
  fn debug_redacts_secret() {
    let verifier = Verifier::with_defaults(SECRET);
    assert!(!format!("{:?}", verifier).contains(SECRET));
  }
}
