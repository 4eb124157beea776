//! Validate the batch shape and pull scoring inputs out of each feature object.

use serde_json::{Map, Value};

use crate::error::{RiceError, SkipReason};
use crate::score::Metrics;

/// Scoring inputs, in the order they are checked.
pub const METRIC_FIELDS: [&str; 4] = ["reach", "impact", "confidence", "effort"];

/// Keys the engine writes; stale copies on the input are dropped.
const OUTPUT_FIELDS: [&str; 3] = ["riceScore", "priorityRank", "error"];

/// One feature after shape validation.
#[derive(Debug, Clone)]
pub struct FeatureRecord {
  /// The input object, minus any previous engine output.
  pub fields: Map<String, Value>,
  pub metrics: Result<Metrics, SkipReason>,
}

/// Validate every element. A shape error anywhere rejects the whole batch.
pub fn normalize_batch(features: &[Value]) -> Result<Vec<FeatureRecord>, RiceError> {
  features
    .iter()
    .enumerate()
    .map(|(index, raw)| normalize_feature(index, raw))
    .collect()
}

fn normalize_feature(index: usize, raw: &Value) -> Result<FeatureRecord, RiceError> {
  let field = format!("features[{}]", index);
  let obj = raw
    .as_object()
    .ok_or_else(|| RiceError::validation(&field, "must be an object"))?;

  let is_missing = |name: &str| obj.get(name).map_or(true, Value::is_null);
  if METRIC_FIELDS.iter().all(|name| is_missing(name)) {
    return Err(RiceError::validation(
      &field,
      "must carry at least one of reach, impact, confidence, effort",
    ));
  }

  let mut fields = obj.clone();
  for key in OUTPUT_FIELDS {
    fields.remove(key);
  }

  Ok(FeatureRecord {
    fields,
    metrics: read_metrics(obj),
  })
}

fn read_metrics(obj: &Map<String, Value>) -> Result<Metrics, SkipReason> {
  Ok(Metrics {
    reach: read_metric(obj, "reach")?,
    impact: read_metric(obj, "impact")?,
    confidence: read_metric(obj, "confidence")?,
    effort: read_metric(obj, "effort")?,
  })
}

/// Absent and `null` are both "missing".
fn read_metric(obj: &Map<String, Value>, name: &'static str) -> Result<f64, SkipReason> {
  match obj.get(name) {
    None | Some(Value::Null) => Err(SkipReason::Missing(name)),
    Some(v) => v.as_f64().ok_or(SkipReason::NotNumeric(name)),
  }
}
