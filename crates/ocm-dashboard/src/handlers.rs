//! HTTP request handlers for the dashboard API.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::client::ConsoleApi;
use crate::error::{DashboardError, DashboardResult};
use crate::overview::OverviewModel;
use crate::query::{parse_search_text, QueryDescriptor};
use crate::routes::{resolve_path, PageRoute};
use crate::searches::SavedSearchesModel;
use crate::state::DashboardState;

/// Query parameters for search text parsing.
#[derive(Debug, Deserialize)]
pub struct ParseQuery {
    /// Search text to parse.
    pub q: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status message.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
}

/// Handle GET /api/health - health check endpoint.
pub async fn health_check<C: ConsoleApi>(
    State(state): State<Arc<DashboardState<C>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Handle GET /api/overview - overview page model.
pub async fn get_overview<C: ConsoleApi>(
    State(state): State<Arc<DashboardState<C>>>,
) -> DashboardResult<Json<OverviewModel>> {
    state.overview().await.map(Json)
}

/// Handle GET /api/searches - saved searches and suggested templates with counts.
pub async fn get_searches<C: ConsoleApi>(
    State(state): State<Arc<DashboardState<C>>>,
) -> DashboardResult<Json<SavedSearchesModel>> {
    state.saved_searches().await.map(Json)
}

/// Handle GET /api/search/parse?q=... - parse search text into a descriptor.
pub async fn parse_search(Query(query): Query<ParseQuery>) -> DashboardResult<Json<QueryDescriptor>> {
    let text = query
        .q
        .ok_or_else(|| DashboardError::InvalidRequest("missing query parameter 'q'".to_string()))?;

    Ok(Json(parse_search_text(&text)))
}

/// Handle unknown paths under `/api`.
pub async fn api_not_found(uri: Uri) -> DashboardError {
    DashboardError::NotFound(uri.path().to_string())
}

/// Handle every non-API path by resolving it as a page.
///
/// Only GET (and HEAD) requests are resolved; anything else is rejected
/// before any upstream fetch is issued.
pub async fn page<C: ConsoleApi>(
    State(state): State<Arc<DashboardState<C>>>,
    method: Method,
    uri: Uri,
) -> DashboardResult<Response> {
    if method != Method::GET && method != Method::HEAD {
        return Err(DashboardError::MethodNotAllowed(method.to_string()));
    }

    let route = resolve_path(uri.path(), uri.query(), state.config().enable_redirect);

    match route {
        PageRoute::Overview => Ok(Json(state.overview().await?).into_response()),
        PageRoute::Search => Ok(Json(state.saved_searches().await?).into_response()),
        PageRoute::Redirect(target) => Ok(Redirect::temporary(&target).into_response()),
    }
}
