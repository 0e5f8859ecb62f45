//! Response types of the merged pull request search.
//!
//! These mirror the selection set of `PULL_REQUEST_BY_SEARCH_QUERY`. Everything
//! below `search.nodes` tolerates missing or null fields, since GitHub nulls out
//! selections it could not resolve when it returns partial data.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::Sha;

/// The `data` object of the search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    pub search: SearchConnection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchConnection {
    #[serde(default)]
    pub nodes: Vec<PullRequestNode>,
}

/// A search hit. Hits that are not pull requests deserialize as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    #[serde(default)]
    pub merge_commit: Option<RawSourceCommit>,
}

/// A GraphQL connection selected through `nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

/// A merge commit as selected by `SourceCommitFragment`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceCommit {
    pub oid: Sha,
    pub message: String,
    pub committed_date: DateTime<Utc>,
    #[serde(default)]
    pub author: Option<RawGitActor>,
    #[serde(default)]
    pub associated_pull_requests: Option<Connection<RawPullRequest>>,
    #[serde(default)]
    pub remote_config_history: Option<RawRemoteConfigHistory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawGitActor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub labels: Option<Connection<RawLabel>>,
    #[serde(default)]
    pub merge_commit: Option<RawObjectId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawLabel {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawObjectId {
    pub oid: Sha,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRemoteConfigHistory {
    #[serde(default)]
    pub edges: Vec<RawRemoteConfigEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRemoteConfigEdge {
    #[serde(default)]
    pub remote_config: Option<RawRemoteConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRemoteConfig {
    pub committed_date: DateTime<Utc>,
    #[serde(default)]
    pub file: Option<RawTreeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTreeEntry {
    #[serde(default)]
    pub object: Option<RawBlob>,
}

/// A blob; `text` is null for binary content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawBlob {
    #[serde(default)]
    pub text: Option<String>,
}
