//! Stable descending sort by score, then positional rank.

use std::cmp::Ordering;

use crate::normalize::FeatureRecord;
use crate::score::compute_rice_score;
use crate::types::ScoredFeature;

/// Score every record and assign `priority_rank` 1..=N.
///
/// Skipped features score 0 and sort with the lowest; equal scores keep
/// their input order, and ranks are never shared.
pub fn rank_records(records: Vec<FeatureRecord>) -> Vec<ScoredFeature> {
  let mut scored: Vec<ScoredFeature> = records
    .into_iter()
    .map(|record| {
      let (rice_score, error) = match record.metrics.and_then(|m| compute_rice_score(&m)) {
        Ok(score) => (score, None),
        Err(reason) => (0.0, Some(reason.to_string())),
      };
      ScoredFeature {
        fields: record.fields,
        rice_score,
        priority_rank: 0,
        error,
      }
    })
    .collect();

  // Vec::sort_by is stable.
  scored.sort_by(|a, b| {
    b.rice_score
      .partial_cmp(&a.rice_score)
      .unwrap_or(Ordering::Equal)
  });

  for (index, feature) in scored.iter_mut().enumerate() {
    feature.priority_rank = index + 1;
  }
  scored
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::SkipReason;
  use crate::score::Metrics;
  use serde_json::{json, Map};

  fn record(id: u64, metrics: Result<Metrics, SkipReason>) -> FeatureRecord {
    let mut fields = Map::new();
    fields.insert("id".into(), json!(id));
    FeatureRecord { fields, metrics }
  }

  fn ok(reach: f64, effort: f64) -> Result<Metrics, SkipReason> {
    Ok(Metrics {
      reach,
      impact: 1.0,
      confidence: 100.0,
      effort,
    })
  }

  fn ids(scored: &[ScoredFeature]) -> Vec<u64> {
    scored
      .iter()
      .map(|f| f.id().and_then(|v| v.as_u64()).unwrap())
      .collect()
  }

  #[test]
  fn sorts_descending_by_score() {
    let out = rank_records(vec![record(1, ok(10.0, 1.0)), record(2, ok(30.0, 1.0)), record(3, ok(20.0, 1.0))]);
    assert_eq!(ids(&out), vec![2, 3, 1]);
    assert_eq!(out.iter().map(|f| f.priority_rank).collect::<Vec<_>>(), vec![1, 2, 3]);
  }

  #[test]
  fn ties_keep_input_order_and_distinct_ranks() {
    let out = rank_records(vec![record(1, ok(10.0, 1.0)), record(2, ok(20.0, 2.0)), record(3, ok(5.0, 0.5))]);
    assert_eq!(ids(&out), vec![1, 2, 3]);
    assert_eq!(out.iter().map(|f| f.priority_rank).collect::<Vec<_>>(), vec![1, 2, 3]);
  }

  #[test]
  fn skipped_records_score_zero_and_sort_last() {
    let out = rank_records(vec![
      record(1, Err(SkipReason::Missing("reach"))),
      record(2, ok(10.0, 0.0)),
      record(3, ok(1.0, 1.0)),
    ]);
    assert_eq!(ids(&out), vec![3, 1, 2]);
    assert_eq!(out[1].rice_score, 0.0);
    assert_eq!(out[1].error.as_deref(), Some("missing reach"));
    assert_eq!(out[2].error.as_deref(), Some("effort must be greater than zero"));
    assert_eq!(out[2].priority_rank, 3);
  }

  #[test]
  fn valid_zero_score_ties_with_skipped_by_input_order() {
    let out = rank_records(vec![record(1, Err(SkipReason::ZeroEffort)), record(2, ok(0.0, 1.0))]);
    assert_eq!(ids(&out), vec![1, 2]);
    assert!(out[1].is_valid());
  }

  #[test]
  fn empty_batch_ranks_nothing() {
    assert!(rank_records(Vec::new()).is_empty());
  }
}
