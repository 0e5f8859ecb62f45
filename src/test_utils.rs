//! Shared test utilities: a mock transport, response fixtures and arbitrary
//! generators for property-based testing.

use std::sync::Mutex;

use proptest::prelude::*;
use serde_json::{Value, json};

use crate::github::{GitHubApiError, GraphQlTransport};
use crate::types::RepoId;

/// A transport that records every request and replays one canned result.
///
/// Requests after the first get a `MissingData` error.
pub struct MockTransport {
    response: Mutex<Option<Result<Value, GitHubApiError>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn returning(data: Value) -> Self {
        Self::with_response(Ok(data))
    }

    pub fn failing(error: GitHubApiError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<Value, GitHubApiError>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the `(query, variables)` pairs received so far.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

impl GraphQlTransport for MockTransport {
    async fn request(&self, query: &str, variables: &Value) -> Result<Value, GitHubApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((query.to_string(), variables.clone()));

        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(GitHubApiError::missing_data()))
    }
}

/// A merge commit as GitHub returns it for `SourceCommitFragment`.
///
/// The associated pull request `number` was merged as `sha`, carries the labels
/// `v8.1.0` and `bug`, and the commit has a remote config.
pub fn raw_commit_json(sha: &str, number: u64) -> Value {
    json!({
        "oid": sha,
        "message": format!("Fix the flux capacitor (#{})\n\nIt was fluxing too much.", number),
        "committedDate": "2024-03-01T12:00:00Z",
        "author": { "name": "Mona Lisa", "email": "mona@example.com" },
        "associatedPullRequests": {
            "nodes": [{
                "number": number,
                "title": "Fix the flux capacitor",
                "url": format!("https://github.com/elastic/kibana/pull/{}", number),
                "labels": { "nodes": [{ "name": "v8.1.0" }, { "name": "bug" }] },
                "mergeCommit": { "oid": sha }
            }]
        },
        "remoteConfigHistory": {
            "edges": [{
                "remoteConfig": {
                    "committedDate": "2024-01-15T08:30:00Z",
                    "file": { "object": { "text": "{\"upstream\":\"elastic/kibana\"}" } }
                }
            }]
        }
    })
}

pub fn arb_login() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9-]{0,38}".prop_map(String::from)
}

pub fn arb_repo_id() -> impl Strategy<Value = RepoId> {
    (arb_login(), "[a-zA-Z][a-zA-Z0-9_.-]{0,49}")
        .prop_map(|(owner, repo)| RepoId::new(owner, repo))
}

pub fn arb_branch_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9/.-]{0,50}".prop_map(String::from)
}

/// Free-text filters. Never contains an `author:` qualifier.
pub fn arb_pr_filter() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "label:[a-z0-9.-]{1,20}".prop_map(String::from),
        "[a-z]{1,10}( [a-z]{1,10}){0,3}".prop_map(String::from),
    ]
}
