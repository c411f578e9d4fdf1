//! Shared state for the dashboard server.
//!
//! The state holds no cached results: every page model is composed from the
//! responses of the fetches issued for that request.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::aggregate::{pair_keyed, split_user_counts, DashboardCounts};
use crate::client::ConsoleApi;
use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use crate::overview::OverviewModel;
use crate::query::{build_dashboard_queries, build_user_queries, descriptors, keys};
use crate::searches::SavedSearchesModel;

/// Shared state for the dashboard server.
#[derive(Debug)]
pub struct DashboardState<C> {
    /// Dashboard configuration.
    config: Arc<DashboardConfig>,
    /// Backend client.
    client: C,
    /// Server start time.
    start_time: Instant,
}

impl<C: ConsoleApi> DashboardState<C> {
    /// Create a new dashboard state.
    pub fn new(config: DashboardConfig, client: C) -> Self {
        Self {
            config: Arc::new(config),
            client,
            start_time: Instant::now(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Get the backend client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get server uptime in seconds.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Compose the overview page.
    ///
    /// The overview and the metric counts are fetched concurrently; the model
    /// is composed once both have resolved.
    pub async fn overview(&self) -> DashboardResult<OverviewModel> {
        let queries = build_dashboard_queries();
        let metrics = keys(&queries);
        let batch = descriptors(&queries);

        let (data, results) = tokio::try_join!(
            self.client.get_overview(),
            self.client.search_result_counts(&batch)
        )?;

        let counts = DashboardCounts::from_results(&metrics, &results)?;
        debug!(clusters = data.clusters.len(), "Composing overview");

        Ok(OverviewModel::compose(&data, &counts))
    }

    /// Compose the saved search page.
    ///
    /// A failure to list saved searches degrades to showing only the
    /// suggested templates; a failure to count them is returned.
    pub async fn saved_searches(&self) -> DashboardResult<SavedSearchesModel> {
        let saved = match self.client.saved_searches().await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, "Failed to list saved searches");
                Vec::new()
            }
        };
        let templates = &self.config.suggested_templates;

        let queries = build_user_queries(&saved, templates);
        if queries.is_empty() {
            return Ok(SavedSearchesModel::default());
        }

        let results = self.client.search_result_counts(&descriptors(&queries)).await?;
        let counts = pair_keyed(&keys(&queries), &results)?;
        let (saved_counts, suggested_counts) = split_user_counts(&counts, &saved, templates)?;

        debug!(
            saved = saved_counts.len(),
            suggested = suggested_counts.len(),
            "Composing saved searches"
        );
        Ok(SavedSearchesModel::compose(saved_counts, suggested_counts))
    }
}
