//! Binary entrypoint: verify one webhook delivery.
//!
//! Usage:
//!   billing-webhook <signature-header> < body
//!
//! The secret comes from `STRIPE_WEBHOOK_SECRET`; `WEBHOOK_TOLERANCE_SECS`
//! overrides the replay window. Writes a `DispatchOutput` JSON object on
//! success, or `{"error": {...}}` with exit code 1 on rejection.

use billing_webhook::types::ErrorOutput;
use billing_webhook::config::MAX_TOLERANCE_SECS;
use billing_webhook::{dispatch, Verifier, VerifierConfig};
use std::io::{self, Read, Write};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
    .with_target(false)
    .init();

  let args: Vec<String> = std::env::args().skip(1).collect();
  if args.len() != 1 {
    eprintln!("Usage: billing-webhook <signature-header> < body");
    process::exit(2);
  }

  if let Err(e) = run_binary(&args[0]) {
    tracing::error!("billing-webhook error: {}", e);
    process::exit(1);
  }
}

fn run_binary(signature: &str) -> Result<(), Box<dyn std::error::Error>> {
  let secret = std::env::var("STRIPE_WEBHOOK_SECRET")
    .map_err(|_| "STRIPE_WEBHOOK_SECRET must be set")?;
  let config = verifier_config(std::env::var("WEBHOOK_TOLERANCE_SECS").ok().as_deref())?;
  let verifier = Verifier::new(secret, config);

  let mut body = Vec::new();
  io::stdin().lock().read_to_end(&mut body)?;

  let mut stdout = io::stdout().lock();
  match dispatch(&verifier, &body, signature, chrono::Utc::now()) {
    Ok(out) => {
      tracing::info!(event_id = %out.event_id, event_type = %out.event_type, "verified webhook");
      serde_json::to_writer(&mut stdout, &out)?;
      stdout.flush()?;
      Ok(())
    }
    Err(e) => {
      serde_json::to_writer(&mut stdout, &ErrorOutput::new(e.code(), e.to_string()))?;
      stdout.flush()?;
      Err(e.into())
    }
  }
}

fn verifier_config(tolerance: Option<&str>) -> Result<VerifierConfig, String> {
  let Some(raw) = tolerance else {
    return Ok(VerifierConfig::default());
  };
  raw
    .trim()
    .parse::<i64>()
    .ok()
    .and_then(VerifierConfig::with_tolerance_secs)
    .ok_or_else(|| {
      format!(
        "WEBHOOK_TOLERANCE_SECS must be between 1 and {} seconds, got {:?}",
        MAX_TOLERANCE_SECS, raw
      )
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_tolerance_uses_default() {
    assert_eq!(verifier_config(None).unwrap().tolerance.num_seconds(), 300);
  }

  #[test]
  fn tolerance_override_is_read() {
    assert_eq!(verifier_config(Some("60")).unwrap().tolerance.num_seconds(), 60);
  }

  #[test]
  fn out_of_range_tolerance_is_rejected() {
    assert!(verifier_config(Some("0")).is_err());
    assert!(verifier_config(Some("-30")).is_err());
    assert!(verifier_config(Some("9223372036854775807")).is_err());
    assert!(verifier_config(Some("soon")).is_err());
  }
}
