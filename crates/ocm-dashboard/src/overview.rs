//! Overview page view-model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::DashboardCounts;
use crate::query::DashboardMetric;
use crate::summary::{reduce, ProviderTally};
use crate::types::OverviewData;

/// Link to the search page with the given search text.
#[must_use]
pub fn search_href(search_text: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(search_text.as_bytes()).collect();
    format!(r#"/search?filters={{"textsearch":"{encoded}"}}"#)
}

/// One entry of the summary list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    /// Label shown next to the count.
    pub description: String,
    /// The count.
    pub count: u64,
    /// Whether the entry is highlighted.
    pub is_primary: bool,
    /// Click-through link, if the entry is searchable.
    pub href: Option<String>,
}

impl SummaryItem {
    fn new(description: &str, count: u64, search_text: Option<&str>) -> Self {
        Self {
            description: description.to_string(),
            count,
            is_primary: false,
            href: search_text.map(search_href),
        }
    }

    fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// One slice of a donut chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDatum {
    /// Slice label.
    pub key: String,
    /// Slice value.
    pub value: u64,
    /// Rendered in the primary color.
    pub is_primary: bool,
    /// Rendered in the danger color.
    pub is_danger: bool,
}

impl ChartDatum {
    fn new(key: &str, value: u64) -> Self {
        Self {
            key: key.to_string(),
            value,
            is_primary: false,
            is_danger: false,
        }
    }

    fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    fn danger(mut self) -> Self {
        self.is_danger = true;
        self
    }
}

/// Everything the overview page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewModel {
    /// Clusters per provider, in first-seen order.
    pub providers: Vec<ProviderTally>,
    /// Summary list entries.
    pub summary: Vec<SummaryItem>,
    /// Pod status chart.
    pub pod_chart: Vec<ChartDatum>,
    /// Policy compliance chart.
    pub compliance_chart: Vec<ChartDatum>,
    /// Cluster status chart.
    pub cluster_chart: Vec<ChartDatum>,
    /// When the model was composed.
    pub generated_at: DateTime<Utc>,
}

impl OverviewModel {
    /// Compose the overview from the overview query and the metric counts.
    #[must_use]
    pub fn compose(data: &OverviewData, counts: &DashboardCounts) -> Self {
        let clusters = reduce(&data.clusters);

        let summary = vec![
            SummaryItem::new(
                "Applications",
                data.applications.len() as u64,
                Some("kind:application"),
            )
            .primary(),
            SummaryItem::new("Clusters", data.clusters.len() as u64, Some("kind:cluster")),
            SummaryItem::new(
                "Kubernetes type",
                clusters.distinct_platform_types.len() as u64,
                None,
            ),
            SummaryItem::new("Region", clusters.distinct_regions.len() as u64, None),
            SummaryItem::new("Nodes", counts.get(DashboardMetric::Nodes), Some("kind:node")),
            SummaryItem::new("Pods", counts.get(DashboardMetric::Pods), Some("kind:pod")),
        ];

        let pod_chart = vec![
            ChartDatum::new("Running", counts.get(DashboardMetric::PodsRunning)).primary(),
            ChartDatum::new("Pending", counts.get(DashboardMetric::PodsPending)),
            ChartDatum::new("Failed", counts.get(DashboardMetric::PodsFailed)).danger(),
        ];

        let compliance_chart = vec![
            ChartDatum::new("Compliant", counts.get(DashboardMetric::PoliciesCompliant)).primary(),
            ChartDatum::new(
                "Non-compliant",
                counts.get(DashboardMetric::PoliciesNonCompliant),
            )
            .danger(),
        ];

        let cluster_chart = vec![
            ChartDatum::new("Ready", clusters.ready_count as u64).primary(),
            ChartDatum::new("Offline", clusters.offline_count as u64).danger(),
        ];

        Self {
            providers: clusters.providers,
            summary,
            pod_chart,
            compliance_chart,
            cluster_chart,
            generated_at: Utc::now(),
        }
    }

    /// Find a summary entry by description.
    #[must_use]
    pub fn summary_item(&self, description: &str) -> Option<&SummaryItem> {
        self.summary.iter().find(|item| item.description == description)
    }
}
