//! Core types for webhook verification (header model, event envelope, subscription changes).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Signature header
// ---------------------------------------------------------------------------

/// Parsed `t=...,v1=...` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
  /// Timestamp text exactly as sent; this is what was signed.
  pub timestamp: String,
  /// `timestamp` as unix seconds.
  pub issued_at: i64,
  /// Every `v1` value, in header order.
  pub candidates: Vec<String>,
}

// ---------------------------------------------------------------------------
// Event envelope (only built from a verified body)
// ---------------------------------------------------------------------------

/// Processor event envelope. Unknown fields are silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  #[serde(default)]
  pub id: String,
  #[serde(rename = "type")]
  pub event_type: String,
  #[serde(default)]
  pub created: Option<i64>,
  #[serde(default)]
  pub livemode: bool,
  pub data: EventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
  pub object: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Subscription model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
  Free,
  Pro,
  Enterprise,
}

impl SubscriptionTier {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "free" => Some(Self::Free),
      "pro" => Some(Self::Pro),
      "enterprise" => Some(Self::Enterprise),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Free => "free",
      Self::Pro => "pro",
      Self::Enterprise => "enterprise",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
  Active,
  Canceled,
  Expired,
}

impl SubscriptionStatus {
  /// Processor subscription status -> profile status.
  pub fn from_processor(s: &str) -> Self {
    match s {
      "active" => Self::Active,
      "canceled" => Self::Canceled,
      _ => Self::Expired,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Active => "active",
      Self::Canceled => "canceled",
      Self::Expired => "expired",
    }
  }
}

/// What a verified event means for a user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SubscriptionChange {
  /// Checkout finished: set tier, mark active, clear the end date.
  Activate { user_id: Uuid, tier: SubscriptionTier },
  /// Subscription changed state or rolled over to a new period.
  Update {
    user_id: Uuid,
    status: SubscriptionStatus,
    period_end: Option<DateTime<Utc>>,
  },
  /// Subscription ended: back to free.
  Cancel { user_id: Uuid, ended_at: DateTime<Utc> },
  /// The user is only reachable through a processor lookup of the subscription.
  PaymentFailed { subscription_id: String },
  /// Nothing to apply.
  Ignored { event_type: String, reason: String },
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Result of one verified delivery.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutput {
  pub event_id: String,
  pub event_type: String,
  pub change: SubscriptionChange,
}

/// Structured error output for a rejected delivery.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
  pub code: &'static str,
  pub message: String,
}

impl ErrorOutput {
  pub fn new(code: &'static str, message: impl Into<String>) -> Self {
    Self {
      error: ErrorBody {
        code,
        message: message.into(),
      },
    }
  }
}
