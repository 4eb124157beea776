//! Shared state for the HTTP handlers.

use billing_webhook::Verifier;
use sqlx_postgres::PgPool;

pub struct AppState {
  /// Profiles database; `None` runs the service without persistence.
  pub pool: Option<PgPool>,
  /// `None` when no webhook secret is configured.
  pub verifier: Option<Verifier>,
}
