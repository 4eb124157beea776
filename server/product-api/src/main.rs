//! Binary entrypoint for the product API.

use std::sync::Arc;

use product_api::{AppState, Config};
use sqlx_postgres::PgPool;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
    .with_target(false)
    .init();

  let config = Config::from_env()?;
  tracing::debug!(?config, "loaded configuration");

  let pool = match &config.database_url {
    Some(url) => Some(PgPool::connect(url).await?),
    None => {
      tracing::warn!("DATABASE_URL not set; subscription changes will only be logged");
      None
    }
  };
  let verifier = config.verifier();
  if verifier.is_none() {
    tracing::warn!("STRIPE_WEBHOOK_SECRET not set; /webhooks/stripe will reject deliveries");
  }

  let state = Arc::new(AppState { pool, verifier });
  let app = product_api::router(state);

  let addr = config.socket_addr();
  tracing::info!("product-api listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
