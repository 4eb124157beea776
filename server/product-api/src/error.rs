//! API errors and their HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use billing_webhook::WebhookError;
use rice_engine::RiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Rice(#[from] RiceError),

  #[error(transparent)]
  Webhook(#[from] WebhookError),

  #[error("invalid request body: {0}")]
  Body(#[from] JsonRejection),

  #[error("webhook secret is not configured")]
  WebhookNotConfigured,

  #[error("database: {0}")]
  Store(#[from] sqlx_core::Error),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Rice(_) | Self::Webhook(_) | Self::Body(_) => StatusCode::BAD_REQUEST,
      Self::WebhookNotConfigured | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::Rice(e) => e.code(),
      Self::Webhook(e) => e.code(),
      Self::Body(_) => "INVALID_REQUEST_BODY",
      Self::WebhookNotConfigured => "WEBHOOK_NOT_CONFIGURED",
      Self::Store(_) => "STORE_FAILED",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      // Database errors stay in the logs.
      Self::Store(_) => "failed to apply subscription change".to_string(),
      _ => self.to_string(),
    };
    if status.is_server_error() {
      tracing::error!(code = self.code(), "{}", self);
    } else {
      tracing::warn!(code = self.code(), "{}", self);
    }

    let mut body = serde_json::json!({
      "error": { "code": self.code(), "message": message }
    });
    if let Self::Rice(e) = &self {
      if let Some(field) = e.field() {
        body["error"]["field"] = field.into();
      }
    }
    (status, Json(body)).into_response()
  }
}
