//! Pairing of batched count results with the queries that produced them.
//!
//! The count endpoint answers a batch of descriptors with a flat list of
//! results in submission order. [`pair_keyed`] checks that the list has
//! exactly one result per submitted key; a mismatch is reported as
//! [`DashboardError::ResultMismatch`] instead of producing misaligned counts.
//! Once paired, counts are attributed to saved searches and templates by key,
//! never by position.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::query::{DashboardMetric, SearchQueryKey};
use crate::types::{CountResult, SavedQuery, SuggestedQueryTemplate};

/// A saved search together with its current result count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearchCount {
    /// The saved search.
    #[serde(flatten)]
    pub query: SavedQuery,
    /// Number of matching resources.
    pub count: u64,
}

/// A suggested template together with its current result count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedSearchCount {
    /// The template.
    #[serde(flatten)]
    pub template: SuggestedQueryTemplate,
    /// Number of matching resources.
    pub count: u64,
}

fn ensure_len(expected: usize, results: &[CountResult]) -> DashboardResult<()> {
    if results.len() == expected {
        Ok(())
    } else {
        Err(DashboardError::ResultMismatch {
            expected,
            actual: results.len(),
        })
    }
}

/// Pair each key with the result at the same position.
///
/// # Errors
///
/// Returns [`DashboardError::ResultMismatch`] if the lengths differ.
pub fn pair_keyed<K: Clone>(keys: &[K], results: &[CountResult]) -> DashboardResult<Vec<(K, u64)>> {
    ensure_len(keys.len(), results)?;
    Ok(keys
        .iter()
        .cloned()
        .zip(results.iter().map(|r| r.count))
        .collect())
}

/// Attribute keyed counts to the saved searches and suggested templates.
///
/// Each saved search is looked up by [`SearchQueryKey::Saved`] and each
/// template by [`SearchQueryKey::Suggested`]; the order of `counts` does not
/// matter.
///
/// # Errors
///
/// Returns [`DashboardError::Internal`] if a saved search or template has no
/// count under its key.
pub fn split_user_counts(
    counts: &[(SearchQueryKey, u64)],
    saved: &[SavedQuery],
    suggested: &[SuggestedQueryTemplate],
) -> DashboardResult<(Vec<SavedSearchCount>, Vec<SuggestedSearchCount>)> {
    let by_key: BTreeMap<&SearchQueryKey, u64> = counts.iter().map(|(key, count)| (key, *count)).collect();
    let lookup = |key: SearchQueryKey| {
        by_key
            .get(&key)
            .copied()
            .ok_or_else(|| DashboardError::Internal(format!("no count returned for {key:?}")))
    };

    let saved = saved
        .iter()
        .map(|query| {
            Ok(SavedSearchCount {
                query: query.clone(),
                count: lookup(SearchQueryKey::Saved(query.id.clone()))?,
            })
        })
        .collect::<DashboardResult<Vec<_>>>()?;
    let suggested = suggested
        .iter()
        .map(|template| {
            Ok(SuggestedSearchCount {
                template: template.clone(),
                count: lookup(SearchQueryKey::Suggested(template.id.clone()))?,
            })
        })
        .collect::<DashboardResult<Vec<_>>>()?;

    Ok((saved, suggested))
}

/// Pair a result list with saved searches followed by suggested templates.
///
/// The results are expected in the order [`build_user_queries`] submits them:
/// saved searches first, then templates.
///
/// [`build_user_queries`]: crate::query::build_user_queries
///
/// # Errors
///
/// Returns [`DashboardError::ResultMismatch`] unless
/// `results.len() == saved.len() + suggested.len()`.
pub fn pair_saved_and_suggested(
    results: &[CountResult],
    saved: &[SavedQuery],
    suggested: &[SuggestedQueryTemplate],
) -> DashboardResult<(Vec<SavedSearchCount>, Vec<SuggestedSearchCount>)> {
    let keys: Vec<SearchQueryKey> = saved
        .iter()
        .map(|q| SearchQueryKey::Saved(q.id.clone()))
        .chain(suggested.iter().map(|t| SearchQueryKey::Suggested(t.id.clone())))
        .collect();

    let counts = pair_keyed(&keys, results)?;
    split_user_counts(&counts, saved, suggested)
}

/// Counts for the fixed overview metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    counts: BTreeMap<DashboardMetric, u64>,
}

impl DashboardCounts {
    /// Build from the metrics that were submitted and the results returned for them.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::ResultMismatch`] if the lengths differ.
    pub fn from_results(metrics: &[DashboardMetric], results: &[CountResult]) -> DashboardResult<Self> {
        let counts = pair_keyed(metrics, results)?.into_iter().collect();
        Ok(Self { counts })
    }

    /// Count for a metric; zero when the metric was not queried.
    #[must_use]
    pub fn get(&self, metric: DashboardMetric) -> u64 {
        self.counts.get(&metric).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(id: &str) -> SavedQuery {
        SavedQuery {
            id: id.into(),
            name: format!("saved {id}"),
            description: String::new(),
            search_text: format!("name:{id}"),
        }
    }

    fn template(id: &str) -> SuggestedQueryTemplate {
        SuggestedQueryTemplate {
            id: id.into(),
            name: format!("template {id}"),
            description: String::new(),
            search_text: "kind:pod".into(),
        }
    }

    fn results(counts: &[u64]) -> Vec<CountResult> {
        counts.iter().copied().map(CountResult::new).collect()
    }

    #[test]
    fn test_pair_saved_and_suggested() {
        let saved_queries = vec![saved("q1"), saved("q2")];
        let templates = vec![template("t1"), template("t2"), template("t3")];

        let (saved_counts, suggested_counts) =
            pair_saved_and_suggested(&results(&[10, 20, 30, 40, 50]), &saved_queries, &templates)
                .unwrap();

        assert_eq!(saved_counts.len(), 2);
        assert_eq!(saved_counts[0].query, saved_queries[0]);
        assert_eq!(saved_counts[0].count, 10);
        assert_eq!(saved_counts[1].count, 20);

        let counts: Vec<_> = suggested_counts.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![30, 40, 50]);
        assert_eq!(suggested_counts[2].template.id, "t3");
    }

    #[test]
    fn test_pair_rejects_too_few_results() {
        let err = pair_saved_and_suggested(&results(&[1, 2]), &[saved("a")], &[template("b"), template("c")])
            .unwrap_err();

        assert!(matches!(
            err,
            DashboardError::ResultMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_pair_rejects_too_many_results() {
        let result = pair_saved_and_suggested(&results(&[1, 2, 3]), &[saved("a")], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pair_empty() {
        let (saved_counts, suggested_counts) = pair_saved_and_suggested(&[], &[], &[]).unwrap();
        assert!(saved_counts.is_empty());
        assert!(suggested_counts.is_empty());
    }

    #[test]
    fn test_split_follows_keys_not_positions() {
        let saved_queries = vec![saved("q1"), saved("q2")];
        let templates = vec![template("q1")];
        // Deliberately out of submission order, with a template sharing a saved id.
        let counts = vec![
            (SearchQueryKey::Suggested("q1".into()), 300),
            (SearchQueryKey::Saved("q2".into()), 20),
            (SearchQueryKey::Saved("q1".into()), 10),
        ];

        let (saved_counts, suggested_counts) =
            split_user_counts(&counts, &saved_queries, &templates).unwrap();

        let saved_pairs: Vec<_> = saved_counts
            .iter()
            .map(|s| (s.query.id.as_str(), s.count))
            .collect();
        assert_eq!(saved_pairs, vec![("q1", 10), ("q2", 20)]);
        assert_eq!(suggested_counts[0].template.id, "q1");
        assert_eq!(suggested_counts[0].count, 300);
    }

    #[test]
    fn test_split_missing_key_is_error() {
        let counts = vec![(SearchQueryKey::Saved("other".into()), 1)];

        let result = split_user_counts(&counts, &[saved("q1")], &[]);

        assert!(matches!(result, Err(DashboardError::Internal(_))));
    }

    #[test]
    fn test_paired_record_serializes_flat() {
        let record = SavedSearchCount {
            query: saved("q1"),
            count: 7,
        };

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "q1");
        assert_eq!(json["search_text"], "name:q1");
        assert_eq!(json["count"], 7);
    }

    #[test]
    fn test_dashboard_counts_from_results() {
        let counts = DashboardCounts::from_results(
            &[DashboardMetric::Nodes, DashboardMetric::Pods],
            &results(&[3, 40]),
        )
        .unwrap();

        assert_eq!(counts.get(DashboardMetric::Nodes), 3);
        assert_eq!(counts.get(DashboardMetric::Pods), 40);
        assert_eq!(counts.get(DashboardMetric::PodsFailed), 0);
    }

    #[test]
    fn test_dashboard_counts_length_checked() {
        let result = DashboardCounts::from_results(&DashboardMetric::ALL, &results(&[1, 2, 3]));
        assert!(matches!(
            result,
            Err(DashboardError::ResultMismatch {
                expected: 7,
                actual: 3
            })
        ));
    }
}
