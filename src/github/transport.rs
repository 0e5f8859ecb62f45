//! GraphQL transport trait.
//!
//! The search logic only needs "send this query with these variables and give me
//! the `data` object back". Keeping that behind a trait enables:
//! - Mock transports for testing
//! - Pointing the same logic at GitHub Enterprise or a recording proxy

use std::future::Future;

use serde_json::Value;

use super::error::GitHubApiError;

/// Executes GraphQL queries against a GitHub GraphQL endpoint.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct CannedTransport {
///     data: serde_json::Value,
/// }
///
/// impl GraphQlTransport for CannedTransport {
///     async fn request(&self, _query: &str, _variables: &Value) -> Result<Value, GitHubApiError> {
///         Ok(self.data.clone())
///     }
/// }
/// ```
pub trait GraphQlTransport {
    /// Sends one GraphQL request and returns the response's `data` object.
    ///
    /// A response that carries GraphQL `errors` fails with a `GraphQl` error that
    /// keeps any partial data.
    fn request(
        &self,
        query: &str,
        variables: &Value,
    ) -> impl Future<Output = Result<Value, GitHubApiError>> + Send;
}
