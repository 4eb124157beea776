//! ProductAI Product API
//!
//! HTTP service exposing the RICE engine and the billing webhook verifier.
//! Bind to 127.0.0.1 by default (internal only, behind the edge proxy).

pub mod config;
pub mod error;
mod handlers;
mod state;
mod store;
mod types;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use handlers::{health, rice, stripe_webhook};
pub use state::AppState;
pub use store::apply_change;

/// All routes with their layers.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/rice", post(rice))
    .route("/webhooks/stripe", post(stripe_webhook))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
