//! Route configuration for the dashboard API.
//!
//! JSON endpoints live under `/api`; unknown API paths answer 404. Every
//! other GET path is resolved as a page path by [`resolve_path`]: `/overview`
//! and `/search` serve their page models, legacy `/multicloud/*` paths
//! redirect when enabled, and anything else redirects to `/search`.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::client::ConsoleApi;
use crate::config::DashboardConfig;
use crate::handlers::{
    api_not_found, get_overview, get_searches, health_check, page, parse_search,
};
use crate::state::DashboardState;

/// A page path after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute {
    /// The overview page.
    Overview,
    /// The search page.
    Search,
    /// Redirect to another path.
    Redirect(String),
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Resolve a request path to a page.
///
/// `query` is the raw query string, carried over when a legacy search path
/// is redirected.
#[must_use]
pub fn resolve_path(path: &str, query: Option<&str>, enable_redirect: bool) -> PageRoute {
    if matches_prefix(path, "/overview") {
        return PageRoute::Overview;
    }
    if path == "/search" {
        return PageRoute::Search;
    }

    if enable_redirect {
        if matches_prefix(path, "/multicloud/overview") {
            return PageRoute::Redirect("/overview".to_string());
        }
        if matches_prefix(path, "/multicloud/search") {
            let target = match query {
                Some(q) if !q.is_empty() => format!("/search?{q}"),
                _ => "/search".to_string(),
            };
            return PageRoute::Redirect(target);
        }
    }

    PageRoute::Redirect("/search".to_string())
}

/// Create the dashboard router.
pub fn create_router<C>(state: Arc<DashboardState<C>>) -> Router
where
    C: ConsoleApi + 'static,
{
    let cors = build_cors_layer(state.config());

    let api_routes = Router::new()
        .route("/health", get(health_check::<C>))
        .route("/overview", get(get_overview::<C>))
        .route("/searches", get(get_searches::<C>))
        .route("/search/parse", get(parse_search))
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api_routes)
        .fallback(page::<C>)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &DashboardConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
