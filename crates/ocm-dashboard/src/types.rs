//! Records returned by the console and search GraphQL endpoints.
//!
//! These are read-only snapshots: they are deserialized from a query result,
//! reduced into view-models, and dropped on the next fetch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label carrying the infrastructure provider of a managed cluster.
pub const CLOUD_LABEL: &str = "cloud";

/// Label carrying the Kubernetes distribution of a managed cluster.
pub const VENDOR_LABEL: &str = "vendor";

/// Label carrying the region of a managed cluster.
pub const REGION_LABEL: &str = "region";

/// Cluster status reported for clusters that are ready.
pub const READY_STATUS: &str = "ok";

/// Kubernetes object metadata as exposed by the console API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// Object name.
    #[serde(default)]
    pub name: Option<String>,
    /// Object namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Object labels.
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
}

/// A managed cluster as returned by the overview query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    /// Cluster metadata.
    #[serde(default)]
    pub metadata: ResourceMetadata,
    /// Cluster status, `"ok"` when ready.
    #[serde(default)]
    pub status: Option<String>,
}

impl ClusterRecord {
    /// Create a cluster record with the given name and no labels.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: ResourceMetadata {
                name: Some(name.into()),
                ..ResourceMetadata::default()
            },
            status: None,
        }
    }

    /// Set a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Look up a label value.
    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(key))
            .map(String::as_str)
    }

    /// The provider label.
    #[must_use]
    pub fn cloud(&self) -> Option<&str> {
        self.label(CLOUD_LABEL)
    }

    /// The distribution label.
    #[must_use]
    pub fn vendor(&self) -> Option<&str> {
        self.label(VENDOR_LABEL)
    }

    /// The region label.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.label(REGION_LABEL)
    }

    /// Whether the cluster reports the ready status.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status.as_deref() == Some(READY_STATUS)
    }
}

/// An application as returned by the overview query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Application metadata.
    #[serde(default)]
    pub metadata: ResourceMetadata,
}

/// Result of the console overview query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewData {
    /// Managed clusters.
    #[serde(default)]
    pub clusters: Vec<ClusterRecord>,
    /// Applications deployed across the fleet.
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
}

/// A single count returned by the batched search count query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    /// Number of resources matching the query.
    #[serde(default)]
    pub count: u64,
}

impl CountResult {
    /// Create a count result.
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self { count }
    }
}

/// A user-owned saved search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    /// Identifier of the saved search, scoped to its owner.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Search text in the `property:value` query language.
    ///
    /// Read from the GraphQL `searchText` field; written as `search_text`
    /// like every other view-model field.
    #[serde(default, alias = "searchText")]
    pub search_text: String,
}

/// A static search template offered to every user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedQueryTemplate {
    /// Stable template identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Search text in the `property:value` query language.
    #[serde(default, alias = "searchText")]
    pub search_text: String,
}
