//! Octocrab client wrapper bound to a GraphQL endpoint.
//!
//! `OctocrabClient` wraps an `Octocrab` instance together with the GraphQL URL to
//! post to. The URL is used verbatim so that GitHub Enterprise installations
//! (`https://<host>/api/graphql`) work the same way as github.com.

use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::Value;

use crate::config::FetchConfig;

use super::error::{GitHubApiError, GraphQlError};
use super::transport::GraphQlTransport;

/// A GitHub GraphQL client.
#[derive(Clone)]
pub struct OctocrabClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// Absolute URL of the GraphQL endpoint.
    graphql_url: String,
}

impl OctocrabClient {
    /// Creates a new client posting to the given GraphQL URL.
    pub fn new(client: Octocrab, graphql_url: impl Into<String>) -> Self {
        Self {
            client,
            graphql_url: graphql_url.into(),
        }
    }

    /// Creates a client from a GitHub token.
    pub fn from_token(
        token: impl Into<String>,
        graphql_url: impl Into<String>,
    ) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client, graphql_url))
    }

    /// Creates a client from the access token and endpoint of a fetch configuration.
    pub fn from_config(config: &FetchConfig) -> Result<Self, octocrab::Error> {
        Self::from_token(
            config.access_token.clone(),
            config.github_api_base_url_v4.clone(),
        )
    }

    /// Returns the GraphQL endpoint this client posts to.
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("graphql_url", &self.graphql_url)
            .finish_non_exhaustive()
    }
}

/// Raw GraphQL response body.
#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

impl GraphQlEnvelope {
    /// Splits the envelope into data or a `GraphQl` error.
    fn into_data(self) -> Result<Value, GitHubApiError> {
        let data = self.data.filter(|data| !data.is_null());
        match self.errors {
            Some(errors) if !errors.is_empty() => Err(GitHubApiError::graphql(errors, data)),
            _ => data.ok_or_else(GitHubApiError::missing_data),
        }
    }
}

impl GraphQlTransport for OctocrabClient {
    async fn request(&self, query: &str, variables: &Value) -> Result<Value, GitHubApiError> {
        let payload = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        tracing::debug!(url = %self.graphql_url, "Sending GraphQL request");

        let envelope: GraphQlEnvelope = self
            .client
            .post(self.graphql_url.as_str(), Some(&payload))
            .await
            .map_err(GitHubApiError::from_octocrab)?;

        envelope.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubErrorKind;
    use serde_json::json;

    fn envelope(body: Value) -> GraphQlEnvelope {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn data_only_response() {
        let data = envelope(json!({ "data": { "search": { "nodes": [] } } }))
            .into_data()
            .unwrap();
        assert_eq!(data, json!({ "search": { "nodes": [] } }));
    }

    #[test]
    fn errors_keep_partial_data() {
        let err = envelope(json!({
            "data": { "search": { "nodes": [{ "mergeCommit": null }] } },
            "errors": [{ "message": "boom", "path": ["search"] }]
        }))
        .into_data()
        .unwrap_err();

        assert_eq!(err.kind, GitHubErrorKind::GraphQl);
        assert_eq!(err.errors.len(), 1);
        assert_eq!(
            err.data,
            Some(json!({ "search": { "nodes": [{ "mergeCommit": null }] } }))
        );
    }

    #[test]
    fn errors_with_null_data() {
        let err = envelope(json!({ "data": null, "errors": [{ "message": "boom" }] }))
            .into_data()
            .unwrap_err();
        assert_eq!(err.kind, GitHubErrorKind::GraphQl);
        assert_eq!(err.data, None);
    }

    #[test]
    fn empty_errors_array_is_ignored() {
        let data = envelope(json!({ "data": { "viewer": {} }, "errors": [] }))
            .into_data()
            .unwrap();
        assert_eq!(data, json!({ "viewer": {} }));
    }

    #[test]
    fn empty_response_is_missing_data() {
        let err = envelope(json!({})).into_data().unwrap_err();
        assert_eq!(err.kind, GitHubErrorKind::MissingData);
    }

    #[tokio::test]
    async fn debug_hides_credentials() {
        let client =
            OctocrabClient::from_token("ghp_secret", "https://ghe.example.com/api/graphql")
                .unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("https://ghe.example.com/api/graphql"));
        assert!(!rendered.contains("ghp_secret"));
        assert_eq!(client.graphql_url(), "https://ghe.example.com/api/graphql");
    }
}
