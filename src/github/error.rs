//! GitHub API error types.
//!
//! A GraphQL call can fail in two different places:
//!
//! - **Http**: the HTTP exchange itself failed (network, authentication, 5xx).
//! - **GraphQl**: GitHub answered, but the response carries an `errors` array.
//!   GitHub may still return partial `data` next to the errors, which we keep.
//!
//! Special case:
//! - **Missing config file**: when the only errors are `NOT_FOUND` errors from
//!   the `remoteConfigHistory` selection, the repository simply has no
//!   `.backportrc.json`. Callers can recover the partial data with
//!   [`GitHubApiError::recover_missing_config_file`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// GraphQL field alias under which the remote config file history is selected.
pub const REMOTE_CONFIG_HISTORY_FIELD: &str = "remoteConfigHistory";

/// GraphQL error type GitHub reports for a file that does not exist.
pub const NOT_FOUND_ERROR_TYPE: &str = "NOT_FOUND";

/// One element of a GraphQL error `path`: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(u64),
}

/// An entry of the `errors` array of a GraphQL response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,

    /// GitHub's error classification, e.g. `NOT_FOUND`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Location of the failing field in the response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl GraphQlError {
    /// Returns true if the error path passes through the named field.
    pub fn touches_field(&self, field: &str) -> bool {
        self.path
            .iter()
            .any(|segment| matches!(segment, PathSegment::Key(key) if key == field))
    }

    /// Returns true if GitHub could not find the remote config file.
    pub fn is_missing_config_file(&self) -> bool {
        self.error_type.as_deref() == Some(NOT_FOUND_ERROR_TYPE)
            && self.touches_field(REMOTE_CONFIG_HISTORY_FIELD)
    }
}

/// The kind of GitHub API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubErrorKind {
    /// The HTTP request failed or returned a non-success status.
    Http,

    /// GitHub returned a GraphQL `errors` array.
    GraphQl,

    /// The response had neither `data` nor `errors`.
    MissingData,
}

/// A GitHub API error.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    pub kind: GitHubErrorKind,

    /// The HTTP status code, if available.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// GraphQL errors reported by GitHub. Empty unless `kind` is `GraphQl`.
    pub errors: Vec<GraphQlError>,

    /// Partial data returned alongside GraphQL errors.
    pub data: Option<Value>,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Wraps a transport-level octocrab error.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let status_code = Self::extract_status_code(&err);
        let mut message = err.to_string();
        if status_code == Some(401) {
            message.push_str(" (check that the access token is valid)");
        }

        Self {
            kind: GitHubErrorKind::Http,
            status_code,
            message,
            errors: Vec::new(),
            data: None,
            source: Some(err),
        }
    }

    /// Creates an error from the `errors` array of a GraphQL response.
    ///
    /// `data` is the partial result GitHub sent alongside the errors, if any.
    pub fn graphql(errors: Vec<GraphQlError>, data: Option<Value>) -> Self {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            kind: GitHubErrorKind::GraphQl,
            status_code: None,
            message,
            errors,
            data,
            source: None,
        }
    }

    /// Creates an error for a response that carried no data at all.
    pub fn missing_data() -> Self {
        Self {
            kind: GitHubErrorKind::MissingData,
            status_code: None,
            message: "GraphQL response contained neither data nor errors".to_string(),
            errors: Vec::new(),
            data: None,
            source: None,
        }
    }

    /// Returns true if this error only reports a missing `.backportrc.json`.
    ///
    /// Every GraphQL error must be a `NOT_FOUND` under the remote config
    /// selection. A single other error makes the whole failure genuine.
    pub fn is_missing_config_file(&self) -> bool {
        self.kind == GitHubErrorKind::GraphQl
            && !self.errors.is_empty()
            && self.errors.iter().all(GraphQlError::is_missing_config_file)
    }

    /// Recovers from a missing config file error.
    ///
    /// Returns the partial data (`None` if GitHub sent none) when the error is a
    /// missing config file condition, and gives the error back unchanged otherwise.
    pub fn recover_missing_config_file(self) -> Result<Option<Value>, Self> {
        if self.is_missing_config_file() {
            tracing::warn!(
                errors = self.errors.len(),
                "No remote config file found, continuing with partial response"
            );
            Ok(self.data.filter(|data| !data.is_null()))
        } else {
            Err(self)
        }
    }

    /// Extracts the HTTP status code from an octocrab error, if present.
    ///
    /// Only `octocrab::Error::GitHub` carries a status code; for other variants
    /// this falls back to inspecting the rendered message.
    fn extract_status_code(err: &octocrab::Error) -> Option<u16> {
        if let octocrab::Error::GitHub { source, .. } = err {
            return Some(source.status_code.as_u16());
        }

        status_code_from_message(&err.to_string())
    }
}

/// Finds a `status: <code>` marker, or a well-known code, in an error message.
fn status_code_from_message(err_str: &str) -> Option<u16> {
    if let Some(idx) = err_str.find("status: ") {
        let rest = &err_str[idx + 8..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if let Ok(code) = rest[..end].parse() {
            return Some(code);
        }
    }

    [401, 403, 404, 502, 503]
        .into_iter()
        .find(|code| err_str.contains(&code.to_string()))
}
