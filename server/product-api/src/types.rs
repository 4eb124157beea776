//! Request/response types for the product API.

use serde::Serialize;

/// Acknowledgement for an accepted webhook delivery.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
  pub received: bool,
}

impl WebhookAck {
  pub fn received() -> Self {
    Self { received: true }
  }
}
