//! Service configuration, read once from the environment at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use billing_webhook::config::DEFAULT_TOLERANCE_SECS;
use billing_webhook::{Verifier, VerifierConfig};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5005;

const TOLERANCE_RANGE: &str = "between 1 and 86400 seconds";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{name} must be {expected}, got {value:?}")]
  Invalid {
    name: &'static str,
    expected: &'static str,
    value: String,
  },
}

#[derive(Clone)]
pub struct Config {
  pub bind_addr: IpAddr,
  pub port: u16,
  /// Unset: subscription changes are logged, not persisted.
  pub database_url: Option<String>,
  /// Unset: the webhook route answers 500.
  pub webhook_secret: Option<String>,
  pub webhook_tolerance_secs: i64,
}

impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("bind_addr", &self.bind_addr)
      .field("port", &self.port)
      .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
      .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "<set>"))
      .field("webhook_tolerance_secs", &self.webhook_tolerance_secs)
      .finish()
  }
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from any key lookup; empty values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let bind_addr = match get("BIND_ADDR") {
      Some(raw) => parse(&raw, "BIND_ADDR", "an IP address")?,
      None => IpAddr::V4(Ipv4Addr::LOCALHOST),
    };
    let port = match get("PORT") {
      Some(raw) => parse(&raw, "PORT", "a valid u16")?,
      None => DEFAULT_PORT,
    };
    let webhook_tolerance_secs = match get("WEBHOOK_TOLERANCE_SECS") {
      Some(raw) => {
        let secs: i64 = parse(&raw, "WEBHOOK_TOLERANCE_SECS", TOLERANCE_RANGE)?;
        if VerifierConfig::with_tolerance_secs(secs).is_none() {
          return Err(ConfigError::Invalid {
            name: "WEBHOOK_TOLERANCE_SECS",
            expected: TOLERANCE_RANGE,
            value: raw,
          });
        }
        secs
      }
      None => DEFAULT_TOLERANCE_SECS,
    };

    Ok(Self {
      bind_addr,
      port,
      database_url: get("DATABASE_URL"),
      webhook_secret: get("STRIPE_WEBHOOK_SECRET"),
      webhook_tolerance_secs,
    })
  }

  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.bind_addr, self.port)
  }

  /// `None` when no secret is set, or when the tolerance was changed after
  /// `from_lookup` to a value outside `1..=MAX_TOLERANCE_SECS`.
  pub fn verifier(&self) -> Option<Verifier> {
    let secret = self.webhook_secret.as_ref()?;
    let config = VerifierConfig::with_tolerance_secs(self.webhook_tolerance_secs)?;
    Some(Verifier::new(secret.clone(), config))
  }
}

fn parse<T: std::str::FromStr>(
  raw: &str,
  name: &'static str,
  expected: &'static str,
) -> Result<T, ConfigError> {
  raw.trim().parse().map_err(|_| ConfigError::Invalid {
    name,
    expected,
    value: raw.to_string(),
  })
}
