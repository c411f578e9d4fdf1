//! GraphQL client for the console and search endpoints.
//!
//! The [`ConsoleApi`] trait is the seam between the aggregation code and the
//! network; [`GraphqlClient`] implements it over HTTP with `reqwest`.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::query::QueryDescriptor;
use crate::types::{CountResult, OverviewData, SavedQuery};

/// Overview query sent to the console endpoint.
pub const OVERVIEW_QUERY: &str = "query getOverview { overview { clusters { metadata { name namespace labels } status } applications { metadata { name namespace } } } }";

/// Batched count query sent to the search endpoint.
pub const SEARCH_RESULT_COUNT_QUERY: &str = "query searchResultCount($input: [SearchInput]) { searchResult: search(input: $input) { count } }";

/// Saved searches query sent to the search endpoint.
pub const SAVED_SEARCHES_QUERY: &str =
    "query savedSearches { items: savedSearches { id name description searchText } }";

/// Operations the dashboard needs from the console and search backends.
pub trait ConsoleApi: Send + Sync {
    /// Fetch the clusters and applications overview.
    fn get_overview(&self) -> impl Future<Output = DashboardResult<OverviewData>> + Send;

    /// Count the resources matching each descriptor.
    ///
    /// Results are returned in submission order, one per descriptor.
    fn search_result_counts(
        &self,
        queries: &[QueryDescriptor],
    ) -> impl Future<Output = DashboardResult<Vec<CountResult>>> + Send;

    /// Fetch the current user's saved searches.
    fn saved_searches(&self) -> impl Future<Output = DashboardResult<Vec<SavedQuery>>> + Send;
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    overview: Option<OverviewData>,
}

#[derive(Debug, Deserialize)]
struct SearchResultResponse {
    #[serde(rename = "searchResult")]
    search_result: Option<Vec<Option<CountResult>>>,
}

#[derive(Debug, Deserialize)]
struct SavedSearchesResponse {
    items: Option<Vec<Option<SavedQuery>>>,
}

#[derive(Debug, Serialize)]
struct SearchInputVariables<'a> {
    input: &'a [QueryDescriptor],
}

/// Unwrap a GraphQL response envelope.
fn into_data<T>(endpoint: &str, response: GraphQlResponse<T>) -> DashboardResult<T> {
    if !response.errors.is_empty() {
        return Err(DashboardError::GraphQl {
            endpoint: endpoint.to_string(),
            messages: response.errors.into_iter().map(|e| e.message).collect(),
        });
    }
    response
        .data
        .ok_or_else(|| DashboardError::MissingData(endpoint.to_string()))
}

/// HTTP client speaking GraphQL to the console and search endpoints.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    console_url: String,
    search_url: String,
    token: Option<String>,
}

impl GraphqlClient {
    /// Create a client from the dashboard configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DashboardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            console_url: config.console_url.clone(),
            search_url: config.search_url.clone(),
            token: config.token.clone(),
        })
    }

    /// The console endpoint.
    #[must_use]
    pub fn console_url(&self) -> &str {
        &self.console_url
    }

    /// The search endpoint.
    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    async fn execute<V, T>(
        &self,
        endpoint: &str,
        operation_name: &str,
        query: &str,
        variables: V,
    ) -> DashboardResult<T>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let fetch_err = |message: String| DashboardError::Fetch {
            endpoint: endpoint.to_string(),
            message,
        };

        debug!(endpoint = %endpoint, operation = %operation_name, "Sending GraphQL request");

        let mut request = self.http.post(endpoint).json(&GraphQlRequest {
            query,
            operation_name,
            variables,
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %endpoint, status = %status, "GraphQL request rejected");
            return Err(fetch_err(format!("unexpected status {status}")));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| fetch_err(format!("invalid response body: {e}")))?;

        into_data(endpoint, body)
    }
}

impl ConsoleApi for GraphqlClient {
    async fn get_overview(&self) -> DashboardResult<OverviewData> {
        let data: OverviewResponse = self
            .execute(&self.console_url, "getOverview", OVERVIEW_QUERY, serde_json::json!({}))
            .await?;
        let overview = data.overview.unwrap_or_default();

        debug!(
            clusters = overview.clusters.len(),
            applications = overview.applications.len(),
            "Fetched overview"
        );
        Ok(overview)
    }

    async fn search_result_counts(
        &self,
        queries: &[QueryDescriptor],
    ) -> DashboardResult<Vec<CountResult>> {
        let data: SearchResultResponse = self
            .execute(
                &self.search_url,
                "searchResultCount",
                SEARCH_RESULT_COUNT_QUERY,
                SearchInputVariables { input: queries },
            )
            .await?;

        let results = data
            .search_result
            .ok_or_else(|| DashboardError::MissingData(self.search_url.clone()))?;

        // A null entry still occupies its position in the batch.
        Ok(results.into_iter().map(Option::unwrap_or_default).collect())
    }

    async fn saved_searches(&self) -> DashboardResult<Vec<SavedQuery>> {
        let data: SavedSearchesResponse = self
            .execute(
                &self.search_url,
                "savedSearches",
                SAVED_SEARCHES_QUERY,
                serde_json::json!({}),
            )
            .await?;

        Ok(data.items.unwrap_or_default().into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: DeserializeOwned>(json: &str) -> GraphQlResponse<T> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_into_data_success() {
        let response: GraphQlResponse<SearchResultResponse> =
            parse(r#"{"data": {"searchResult": [{"count": 3}, null, {"count": 9}]}}"#);

        let data = into_data("search", response).unwrap();
        let results = data.search_result.unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[1].is_none());
    }

    #[test]
    fn test_into_data_graphql_errors() {
        let response: GraphQlResponse<SearchResultResponse> =
            parse(r#"{"data": null, "errors": [{"message": "unauthorized"}]}"#);

        let err = into_data("search", response).unwrap_err();

        match err {
            DashboardError::GraphQl { messages, .. } => assert_eq!(messages, vec!["unauthorized"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_into_data_missing_data() {
        let response: GraphQlResponse<OverviewResponse> = parse("{}");

        let err = into_data("console", response).unwrap_err();

        assert!(matches!(err, DashboardError::MissingData(_)));
    }

    #[test]
    fn test_request_body_shape() {
        let queries = vec![QueryDescriptor::new().with_filter("kind", ["pod"])];
        let request = GraphQlRequest {
            query: SEARCH_RESULT_COUNT_QUERY,
            operation_name: "searchResultCount",
            variables: SearchInputVariables { input: &queries },
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["operationName"], "searchResultCount");
        assert_eq!(json["variables"]["input"][0]["filters"][0]["property"], "kind");
    }

    #[test]
    fn test_client_from_config() {
        let config = DashboardConfig::new("http://console/graphql", "http://search/graphql");
        let client = GraphqlClient::new(&config).unwrap();

        assert_eq!(client.console_url(), "http://console/graphql");
        assert_eq!(client.search_url(), "http://search/graphql");
    }
}
