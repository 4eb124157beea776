//! HTTP handlers for the product API.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use billing_webhook::{SubscriptionChange, WebhookError, SIGNATURE_HEADER};
use chrono::Utc;
use rice_engine::{Input, Output};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store;
use crate::types::WebhookAck;

pub async fn health() -> &'static str {
  "ok"
}

/// Rank a feature batch.
pub async fn rice(payload: Result<Json<Input>, JsonRejection>) -> Result<Json<Output>, ApiError> {
  let Json(input) = payload?;
  let out = rice_engine::run(&input)?;
  let skipped = out.data.iter().filter(|f| !f.is_valid()).count();
  tracing::debug!(features = out.data.len(), skipped, "ranked batch");
  Ok(Json(out))
}

/// Verify a billing webhook and apply the subscription change it carries.
///
/// The body is taken as raw bytes: the signature covers them exactly.
pub async fn stripe_webhook(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
  let verifier = state.verifier.as_ref().ok_or(ApiError::WebhookNotConfigured)?;
  let signature = headers
    .get(SIGNATURE_HEADER)
    .ok_or_else(|| WebhookError::malformed(format!("missing {} header", SIGNATURE_HEADER)))?
    .to_str()
    .map_err(|_| WebhookError::malformed(format!("{} header is not visible ASCII", SIGNATURE_HEADER)))?;

  let out = billing_webhook::dispatch(verifier, &body, signature, Utc::now())?;
  tracing::info!(event_id = %out.event_id, event_type = %out.event_type, "processing webhook event");

  match &out.change {
    SubscriptionChange::Ignored { reason, .. } => {
      tracing::info!(event_type = %out.event_type, %reason, "webhook event ignored");
    }
    SubscriptionChange::PaymentFailed { subscription_id } => {
      tracing::warn!(%subscription_id, "payment failed; profile lookup needs the billing API");
    }
    change => match &state.pool {
      Some(pool) => {
        let rows = store::apply_change(pool, change).await?;
        if rows == 0 {
          tracing::warn!(?change, "no profile matched subscription change");
        } else {
          tracing::info!(?change, "subscription change applied");
        }
      }
      None => tracing::info!(?change, "no database configured; subscription change not persisted"),
    },
  }

  Ok(Json(WebhookAck::received()))
}
