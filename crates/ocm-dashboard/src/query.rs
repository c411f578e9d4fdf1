//! Search query descriptors.
//!
//! A [`QueryDescriptor`] is the structured form of a search (`keywords` plus
//! `property:values` filters) submitted to the batched count endpoint. Every
//! descriptor travels with a key naming what it counts, so a result list can be
//! matched back to its queries without relying on bare array positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{SavedQuery, SuggestedQueryTemplate};

/// Comparison operators that are incomplete on their own as a filter value.
const BARE_OPERATORS: &[&str] = &["=", "!", "!=", "<", ">", "<=", ">="];

/// A `property:values` filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Property name, e.g. `kind`.
    pub property: String,
    /// Accepted values; a resource matches if any value matches.
    pub values: Vec<String>,
}

impl QueryFilter {
    /// Create a filter.
    #[must_use]
    pub fn new<I, S>(property: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            property: property.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Structured search submitted to the count endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Free-text keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Property filters.
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
}

impl QueryDescriptor {
    /// Create an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn with_filter<I, S>(mut self, property: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(QueryFilter::new(property, values));
        self
    }

    /// Whether the descriptor has neither keywords nor filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.filters.is_empty()
    }

    /// Render the descriptor back into search text.
    #[must_use]
    pub fn to_search_text(&self) -> String {
        self.keywords
            .iter()
            .cloned()
            .chain(
                self.filters
                    .iter()
                    .map(|f| format!("{}:{}", f.property, f.values.join(","))),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_search_text())
    }
}

/// Parse search text into a [`QueryDescriptor`].
///
/// Tokens are separated by whitespace. A token containing `:` is a filter
/// (`property:value1,value2`), anything else is a keyword. Filters without a
/// property, without values, or whose only value is a bare comparison operator
/// are incomplete and dropped. Repeated properties are merged.
#[must_use]
pub fn parse_search_text(text: &str) -> QueryDescriptor {
    let mut descriptor = QueryDescriptor::new();

    for token in text.split_whitespace() {
        let Some((property, raw_values)) = token.split_once(':') else {
            descriptor.keywords.push(token.to_string());
            continue;
        };

        let values: Vec<&str> = raw_values.split(',').filter(|v| !v.is_empty()).collect();
        let incomplete = property.is_empty()
            || values.is_empty()
            || (values.len() == 1 && BARE_OPERATORS.contains(&values[0]));
        if incomplete {
            continue;
        }

        let index = match descriptor.filters.iter().position(|f| f.property == property) {
            Some(index) => index,
            None => {
                descriptor.filters.push(QueryFilter::new(property, Vec::<String>::new()));
                descriptor.filters.len() - 1
            }
        };
        let filter = &mut descriptor.filters[index];
        for value in values {
            if !filter.values.iter().any(|v| v == value) {
                filter.values.push(value.to_string());
            }
        }
    }

    descriptor
}

/// Fixed metrics counted for the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardMetric {
    /// All nodes.
    Nodes,
    /// All pods.
    Pods,
    /// Pods running or completed.
    PodsRunning,
    /// Pods not yet running.
    PodsPending,
    /// Pods in a failed state.
    PodsFailed,
    /// Compliant policies.
    PoliciesCompliant,
    /// Non-compliant policies.
    PoliciesNonCompliant,
}

impl DashboardMetric {
    /// Every metric, in submission order.
    pub const ALL: [Self; 7] = [
        Self::Nodes,
        Self::Pods,
        Self::PodsRunning,
        Self::PodsPending,
        Self::PodsFailed,
        Self::PoliciesCompliant,
        Self::PoliciesNonCompliant,
    ];

    /// The query counting this metric.
    #[must_use]
    pub fn descriptor(&self) -> QueryDescriptor {
        const POLICY_GROUP: &str = "policy.open-cluster-management.io";

        let pods = QueryDescriptor::new().with_filter("kind", ["pod"]);
        let policies = QueryDescriptor::new()
            .with_filter("apigroup", [POLICY_GROUP])
            .with_filter("kind", ["policy"]);

        match self {
            Self::Nodes => QueryDescriptor::new().with_filter("kind", ["node"]),
            Self::Pods => pods,
            Self::PodsRunning => pods.with_filter("status", ["Running", "Completed"]),
            Self::PodsPending => pods.with_filter(
                "status",
                ["Pending", "ContainerCreating", "Waiting", "Terminating"],
            ),
            Self::PodsFailed => pods.with_filter(
                "status",
                [
                    "Failed",
                    "CrashLoopBackOff",
                    "ImagePullBackOff",
                    "Terminated",
                    "OOMKilled",
                    "Unknown",
                ],
            ),
            Self::PoliciesCompliant => policies.with_filter("compliant", ["Compliant"]),
            Self::PoliciesNonCompliant => policies.with_filter("compliant", ["NonCompliant"]),
        }
    }
}

impl fmt::Display for DashboardMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Nodes => "nodes",
            Self::Pods => "pods",
            Self::PodsRunning => "pods_running",
            Self::PodsPending => "pods_pending",
            Self::PodsFailed => "pods_failed",
            Self::PoliciesCompliant => "policies_compliant",
            Self::PoliciesNonCompliant => "policies_non_compliant",
        };
        write!(f, "{s}")
    }
}

/// Identifies a user-facing search in a batched count request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "source", content = "id", rename_all = "snake_case")]
pub enum SearchQueryKey {
    /// A saved search, by id.
    Saved(String),
    /// A suggested template, by id.
    Suggested(String),
}

/// Build the fixed overview queries, keyed by metric.
#[must_use]
pub fn build_dashboard_queries() -> Vec<(DashboardMetric, QueryDescriptor)> {
    DashboardMetric::ALL
        .iter()
        .map(|metric| (*metric, metric.descriptor()))
        .collect()
}

/// Build the count queries for saved searches followed by suggested templates.
#[must_use]
pub fn build_user_queries(
    saved: &[SavedQuery],
    suggested: &[SuggestedQueryTemplate],
) -> Vec<(SearchQueryKey, QueryDescriptor)> {
    let saved = saved
        .iter()
        .map(|q| (SearchQueryKey::Saved(q.id.clone()), parse_search_text(&q.search_text)));
    let suggested = suggested.iter().map(|t| {
        (
            SearchQueryKey::Suggested(t.id.clone()),
            parse_search_text(&t.search_text),
        )
    });
    saved.chain(suggested).collect()
}

/// The keys of a keyed query list, in submission order.
#[must_use]
pub fn keys<K: Clone>(queries: &[(K, QueryDescriptor)]) -> Vec<K> {
    queries.iter().map(|(k, _)| k.clone()).collect()
}

/// Strip the keys from a keyed query list, preserving order.
#[must_use]
pub fn descriptors<K>(queries: &[(K, QueryDescriptor)]) -> Vec<QueryDescriptor> {
    queries.iter().map(|(_, d)| d.clone()).collect()
}
