//! Binary entrypoint: read one JSON object from stdin, write one to stdout.
//!
//! Output is `{"data": [...]}` on success, or `{"error": {...}}` with exit code 1
//! when the batch is rejected. Logs go to stderr.

use rice_engine::{run, Input};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
    .with_target(false)
    .init();

  if let Err(e) = run_binary() {
    tracing::error!("rice-engine error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let input: Input = serde_json::from_str(&raw)?;

  let mut stdout = io::stdout().lock();
  match run(&input) {
    Ok(out) => {
      tracing::debug!(features = out.data.len(), "ranked batch");
      serde_json::to_writer(&mut stdout, &out)?;
      stdout.flush()?;
      Ok(())
    }
    Err(e) => {
      serde_json::to_writer(&mut stdout, &e.to_output())?;
      stdout.flush()?;
      Err(e.into())
    }
  }
}
