//! Map verified billing events to subscription changes on a user profile.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::types::{Event, SubscriptionChange, SubscriptionStatus, SubscriptionTier};

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const SUBSCRIPTION_UPDATED: &str = "customer.subscription.updated";
pub const SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";
pub const PAYMENT_FAILED: &str = "invoice.payment_failed";

/// Decide what `event` means for the profile it belongs to.
///
/// Never fails: events we cannot act on come back as `Ignored` with a reason.
pub fn subscription_change(event: &Event, now: DateTime<Utc>) -> SubscriptionChange {
  let object = &event.data.object;
  let result = match event.event_type.as_str() {
    CHECKOUT_COMPLETED => checkout_completed(object),
    SUBSCRIPTION_UPDATED => subscription_updated(object),
    SUBSCRIPTION_DELETED => {
      user_id(object, &["metadata", "user_id"]).map(|user_id| SubscriptionChange::Cancel {
        user_id,
        ended_at: now,
      })
    }
    PAYMENT_FAILED => str_at(object, &["subscription"])
      .map(|id| SubscriptionChange::PaymentFailed {
        subscription_id: id.to_string(),
      })
      .ok_or_else(|| "invoice has no subscription".to_string()),
    _ => Err("unhandled event type".to_string()),
  };

  result.unwrap_or_else(|reason| SubscriptionChange::Ignored {
    event_type: event.event_type.clone(),
    reason,
  })
}

fn checkout_completed(session: &Value) -> Result<SubscriptionChange, String> {
  let user_id = user_id(session, &["metadata", "user_id"])
    .or_else(|_| user_id(session, &["client_reference_id"]))?;
  if str_at(session, &["subscription"]).is_none() {
    return Err("checkout session has no subscription".to_string());
  }
  let tier = match str_at(session, &["metadata", "tier"]) {
    Some(raw) => SubscriptionTier::from_str_loose(raw).ok_or_else(|| format!("unknown tier {:?}", raw))?,
    None => SubscriptionTier::Pro,
  };
  Ok(SubscriptionChange::Activate { user_id, tier })
}

fn subscription_updated(subscription: &Value) -> Result<SubscriptionChange, String> {
  let user_id = user_id(subscription, &["metadata", "user_id"])?;
  let status = SubscriptionStatus::from_processor(str_at(subscription, &["status"]).unwrap_or_default());
  let period_end = subscription
    .get("current_period_end")
    .and_then(Value::as_i64)
    .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
  Ok(SubscriptionChange::Update {
    user_id,
    status,
    period_end,
  })
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
  path
    .iter()
    .try_fold(value, |v, key| v.get(*key))
    .and_then(Value::as_str)
    .filter(|s| !s.is_empty())
}

fn user_id(value: &Value, path: &[&str]) -> Result<Uuid, String> {
  let raw = str_at(value, path).ok_or_else(|| format!("missing {}", path.join(".")))?;
  Uuid::parse_str(raw).map_err(|e| format!("{} is not a uuid: {}", path.join("."), e))
}
