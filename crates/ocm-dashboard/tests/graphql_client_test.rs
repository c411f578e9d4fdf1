//! Integration tests for the GraphQL client against a local fake backend.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use ocm_dashboard::{
    ConsoleApi, DashboardConfig, DashboardError, DashboardMetric, DashboardState, GraphqlClient,
    Provider, QueryDescriptor,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

// ==================== Fake Backend ====================

#[derive(Clone, Copy)]
enum Behavior {
    Healthy,
    GraphQlError,
    ShortCounts,
    ServerError,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer test-token")
}

async fn console(State(behavior): State<Behavior>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if matches!(behavior, Behavior::ServerError) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    assert_eq!(body["operationName"], "getOverview");

    Json(json!({
        "data": {
            "overview": {
                "clusters": [
                    {"metadata": {"name": "east", "labels": {"cloud": "Amazon", "vendor": "OpenShift", "region": "us-east-1"}}, "status": "ok"},
                    {"metadata": {"name": "onprem", "labels": {"cloud": "VMware", "vendor": "OpenShift", "region": "dc1"}}, "status": "offline"},
                    {"metadata": {"name": "edge", "labels": null}, "status": null}
                ],
                "applications": [{"metadata": {"name": "app"}}]
            }
        }
    }))
    .into_response()
}

async fn search(State(behavior): State<Behavior>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match body["operationName"].as_str() {
        Some("savedSearches") => Json(json!({
            "data": {
                "items": [
                    {"id": "1", "name": "Default pods", "description": "", "searchText": "kind:pod namespace:default"},
                    null
                ]
            }
        }))
        .into_response(),
        Some("searchResultCount") => {
            if matches!(behavior, Behavior::GraphQlError) {
                return Json(json!({"data": null, "errors": [{"message": "search unavailable"}]}))
                    .into_response();
            }
            let inputs = body["variables"]["input"].as_array().cloned().unwrap_or_default();
            let mut results: Vec<Value> = (0..inputs.len())
                .map(|i| json!({"count": (i as u64 + 1) * 10}))
                .collect();
            if matches!(behavior, Behavior::ShortCounts) {
                results.pop();
            }
            Json(json!({"data": {"searchResult": results}})).into_response()
        }
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn spawn_backend(behavior: Behavior) -> SocketAddr {
    let app = Router::new()
        .route("/console", post(console))
        .route("/search", post(search))
        .with_state(behavior);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fake backend");
    let addr = listener.local_addr().expect("fake backend has no address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn config_for(addr: SocketAddr) -> DashboardConfig {
    DashboardConfig::new(format!("http://{addr}/console"), format!("http://{addr}/search"))
        .with_token("test-token")
}

// ==================== Client Tests ====================

#[tokio::test]
async fn test_get_overview() {
    let addr = spawn_backend(Behavior::Healthy).await;
    let client = GraphqlClient::new(&config_for(addr)).unwrap();

    let overview = client.get_overview().await.unwrap();

    assert_eq!(overview.clusters.len(), 3);
    assert_eq!(overview.applications.len(), 1);
    assert_eq!(overview.clusters[0].cloud(), Some("Amazon"));
    assert_eq!(overview.clusters[2].cloud(), None);
}

#[tokio::test]
async fn test_search_result_counts_in_order() {
    let addr = spawn_backend(Behavior::Healthy).await;
    let client = GraphqlClient::new(&config_for(addr)).unwrap();
    let queries = vec![
        QueryDescriptor::new().with_filter("kind", ["node"]),
        QueryDescriptor::new().with_filter("kind", ["pod"]),
    ];

    let results = client.search_result_counts(&queries).await.unwrap();

    let counts: Vec<_> = results.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![10, 20]);
}

#[tokio::test]
async fn test_saved_searches_skip_null_items() {
    let addr = spawn_backend(Behavior::Healthy).await;
    let client = GraphqlClient::new(&config_for(addr)).unwrap();

    let saved = client.saved_searches().await.unwrap();

    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].search_text, "kind:pod namespace:default");
}

#[tokio::test]
async fn test_missing_token_is_fetch_error() {
    let addr = spawn_backend(Behavior::Healthy).await;
    let config = DashboardConfig::new(format!("http://{addr}/console"), format!("http://{addr}/search"));
    let client = GraphqlClient::new(&config).unwrap();

    let err = client.get_overview().await.unwrap_err();

    match err {
        DashboardError::Fetch { message, .. } => assert!(message.contains("401")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_graphql_errors_surface() {
    let addr = spawn_backend(Behavior::GraphQlError).await;
    let client = GraphqlClient::new(&config_for(addr)).unwrap();

    let err = client
        .search_result_counts(&[QueryDescriptor::new()])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("search unavailable"));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = GraphqlClient::new(&config_for(addr)).unwrap();

    let result = client.get_overview().await;

    assert!(matches!(result, Err(DashboardError::Fetch { .. })));
}

// ==================== Page Composition Tests ====================

#[tokio::test]
async fn test_overview_page_end_to_end() {
    let addr = spawn_backend(Behavior::Healthy).await;
    let config = config_for(addr);
    let client = GraphqlClient::new(&config).unwrap();
    let state = DashboardState::new(config, client);

    let model = state.overview().await.unwrap();

    // The fake backend counts the n-th query as n * 10.
    let position = DashboardMetric::ALL
        .iter()
        .position(|m| *m == DashboardMetric::PodsFailed)
        .unwrap() as u64;
    assert_eq!(model.pod_chart[2].value, (position + 1) * 10);
    assert_eq!(model.summary_item("Nodes").unwrap().count, 10);
    assert_eq!(model.summary_item("Kubernetes type").unwrap().count, 2);

    let providers: Vec<_> = model.providers.iter().map(|t| t.provider).collect();
    assert_eq!(providers, vec![Provider::Aws, Provider::Vmware, Provider::Other]);
    assert_eq!(model.cluster_chart[0].value, 1);
    assert_eq!(model.cluster_chart[1].value, 2);
}

#[tokio::test]
async fn test_saved_searches_page_end_to_end() {
    let addr = spawn_backend(Behavior::Healthy).await;
    let config = config_for(addr);
    let client = GraphqlClient::new(&config).unwrap();
    let state = DashboardState::new(config, client);

    let model = state.saved_searches().await.unwrap();

    assert_eq!(model.saved.len(), 1);
    assert_eq!(model.saved[0].count, 10);
    let counts: Vec<_> = model.suggested.iter().map(|c| c.count).collect();
    assert_eq!(counts, vec![20, 30, 40]);
}

#[tokio::test]
async fn test_short_count_batch_is_rejected() {
    let addr = spawn_backend(Behavior::ShortCounts).await;
    let config = config_for(addr);
    let client = GraphqlClient::new(&config).unwrap();
    let state = DashboardState::new(config, client);

    assert!(matches!(
        state.overview().await,
        Err(DashboardError::ResultMismatch { expected: 7, actual: 6 })
    ));
    assert!(matches!(
        state.saved_searches().await,
        Err(DashboardError::ResultMismatch { expected: 4, actual: 3 })
    ));
}

#[tokio::test]
async fn test_console_failure_fails_overview() {
    let addr = spawn_backend(Behavior::ServerError).await;
    let config = config_for(addr);
    let client = GraphqlClient::new(&config).unwrap();
    let state = DashboardState::new(config, client);

    assert!(matches!(state.overview().await, Err(DashboardError::Fetch { .. })));
}
