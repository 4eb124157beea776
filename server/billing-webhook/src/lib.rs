//! ProductAI Billing Webhook: signature verification and subscription dispatch.
//!
//! Authenticates payment-processor webhooks (HMAC-SHA256 over `"<t>.<body>"`,
//! constant-time comparison, replay window), then maps the verified event to
//! the subscription change it implies for a user profile.
//!
//! No DB, no network; pure computation. Callers own the clock and persistence.

pub mod config;
pub mod error;
pub mod header;
pub mod signature;
pub mod subscription;
pub mod types;

use chrono::{DateTime, Utc};

pub use config::VerifierConfig;
pub use error::WebhookError;
pub use signature::{compute_signature, signature_header, Verifier};
pub use subscription::subscription_change;
pub use types::{DispatchOutput, Event, SubscriptionChange, SubscriptionStatus, SubscriptionTier};

/// Name of the HTTP header carrying the signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Verify one delivery and decide what it means for the subscriber.
pub fn dispatch(
  verifier: &Verifier,
  raw_body: &[u8],
  signature_header: &str,
  now: DateTime<Utc>,
) -> Result<DispatchOutput, WebhookError> {
  let event = verifier.verify(raw_body, signature_header, now)?;
  let change = subscription_change(&event, now);
  Ok(DispatchOutput {
    event_id: event.id,
    event_type: event.event_type,
    change,
  })
}
