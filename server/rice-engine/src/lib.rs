//! ProductAI RICE Engine: deterministic feature prioritization; no AI, no DB, no network.
//! Used by the binary for stdin/stdout and by the product API as a library.

pub mod error;
pub mod normalize;
pub mod ranking;
pub mod score;
pub mod types;

use serde_json::Value;

pub use error::{RiceError, SkipReason};
pub use score::{compute_rice_score, Metrics};
pub use types::{Input, Output, ScoredFeature};

/// Run the engine on a parsed request body and return the ranked batch (no I/O).
pub fn run(input: &Input) -> Result<Output, RiceError> {
  let features = match &input.features {
    Some(Value::Array(items)) => items,
    Some(_) => return Err(RiceError::validation("features", "must be an array")),
    None => return Err(RiceError::validation("features", "is required")),
  };
  Ok(Output {
    data: rank(features)?,
  })
}

/// Score and rank a batch of feature objects.
///
/// Fails only when the batch itself is malformed; individual features that
/// cannot be scored come back with `rice_score == 0` and an `error`.
pub fn rank(features: &[Value]) -> Result<Vec<ScoredFeature>, RiceError> {
  let records = normalize::normalize_batch(features)?;
  Ok(ranking::rank_records(records))
}
