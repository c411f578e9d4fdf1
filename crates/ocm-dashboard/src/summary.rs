//! Cluster summary reduction.
//!
//! Folds the cluster list of an overview query into the tallies shown on the
//! overview page: clusters per provider, distinct distributions and regions,
//! and ready/offline counts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::provider::Provider;
use crate::types::ClusterRecord;

/// Number of clusters hosted by one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderTally {
    /// Provider the clusters run on.
    pub provider: Provider,
    /// Number of clusters.
    pub cluster_count: usize,
}

/// Aggregate view of a set of clusters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Distinct Kubernetes distributions (`vendor` label).
    ///
    /// A missing or empty label is recorded as `None`, so unlabeled clusters
    /// occupy one slot of their own and never merge with a real label value.
    pub distinct_platform_types: BTreeSet<Option<String>>,
    /// Distinct regions (`region` label), with `None` for unlabeled clusters.
    pub distinct_regions: BTreeSet<Option<String>>,
    /// Clusters reporting the ready status.
    pub ready_count: usize,
    /// Clusters reporting any other status.
    pub offline_count: usize,
    /// Provider tallies in first-seen order.
    pub providers: Vec<ProviderTally>,
}

impl ClusterSummary {
    /// Add one cluster to the summary.
    pub fn add(&mut self, cluster: &ClusterRecord) {
        self.add_provider(Provider::from_optional_label(cluster.cloud()), 1);

        self.distinct_platform_types.insert(label_value(cluster.vendor()));
        self.distinct_regions.insert(label_value(cluster.region()));

        if cluster.is_ready() {
            self.ready_count += 1;
        } else {
            self.offline_count += 1;
        }
    }

    /// Combine another summary into this one.
    ///
    /// Providers already present keep their position; new ones are appended in
    /// the order they appear in `other`.
    pub fn merge(&mut self, other: &Self) {
        for tally in &other.providers {
            self.add_provider(tally.provider, tally.cluster_count);
        }
        self.distinct_platform_types
            .extend(other.distinct_platform_types.iter().cloned());
        self.distinct_regions
            .extend(other.distinct_regions.iter().cloned());
        self.ready_count += other.ready_count;
        self.offline_count += other.offline_count;
    }

    /// Total number of clusters processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.ready_count + self.offline_count
    }

    /// Cluster count for a provider, zero when absent.
    #[must_use]
    pub fn provider_count(&self, provider: Provider) -> usize {
        self.providers
            .iter()
            .find(|t| t.provider == provider)
            .map_or(0, |t| t.cluster_count)
    }

    fn add_provider(&mut self, provider: Provider, count: usize) {
        match self.providers.iter_mut().find(|t| t.provider == provider) {
            Some(tally) => tally.cluster_count += count,
            None => self.providers.push(ProviderTally {
                provider,
                cluster_count: count,
            }),
        }
    }
}

fn label_value(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Reduce a list of clusters into a [`ClusterSummary`].
#[must_use]
pub fn reduce(clusters: &[ClusterRecord]) -> ClusterSummary {
    clusters.iter().fold(ClusterSummary::default(), |mut summary, cluster| {
        summary.add(cluster);
        summary
    })
}
