//! # ocm-dashboard
//!
//! Multicluster overview and search aggregation for the Open Cluster
//! Management console.
//!
//! This crate turns raw GraphQL results into the view-models the console
//! renders, and serves them over a small axum API.
//!
//! ## Features
//!
//! - **Cluster summary**: clusters per provider, distinct distributions and
//!   regions, ready/offline tallies ([`summary`])
//! - **Keyed count queries**: fixed overview metrics and user searches are
//!   submitted as one batch and paired back by key, with a length check
//!   ([`query`], [`aggregate`])
//! - **Page models**: overview summary/charts and saved search cards
//!   ([`overview`], [`searches`])
//! - **REST API**: JSON endpoints plus page routing with legacy redirects
//!
//! ## Example
//!
//! ```rust,no_run
//! use ocm_dashboard::{DashboardConfig, DashboardServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ocm_dashboard::DashboardError> {
//!     let config = DashboardConfig::from_file("/etc/ocm-console/config.toml")?;
//!     let addr = config.bind_addr;
//!     let server = DashboardServer::from_config(config)?;
//!     server.serve(addr).await
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/health` | GET | Liveness and uptime |
//! | `/api/overview` | GET | Overview page model |
//! | `/api/searches` | GET | Saved searches and suggested templates with counts |
//! | `/api/search/parse?q=` | GET | Parse search text into a query descriptor |
//! | `/overview`, `/search` | GET | Page models by page path |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod overview;
pub mod provider;
pub mod query;
pub mod routes;
pub mod searches;
pub mod server;
pub mod state;
pub mod summary;
pub mod types;

// Re-export main types
pub use aggregate::{
    pair_keyed, pair_saved_and_suggested, split_user_counts, DashboardCounts, SavedSearchCount,
    SuggestedSearchCount,
};
pub use client::{ConsoleApi, GraphqlClient};
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use overview::OverviewModel;
pub use provider::Provider;
pub use query::{
    build_dashboard_queries, build_user_queries, parse_search_text, DashboardMetric,
    QueryDescriptor, QueryFilter, SearchQueryKey,
};
pub use searches::SavedSearchesModel;
pub use server::DashboardServer;
pub use state::DashboardState;
pub use summary::{reduce, ClusterSummary, ProviderTally};
pub use types::{
    ClusterRecord, CountResult, OverviewData, SavedQuery, SuggestedQueryTemplate,
};
