//! GraphQL search query for merged pull requests.
//!
//! GitHub's search syntax does the filtering: the query string restricts results to
//! merged pull requests of one repository, merged into one branch, optionally by
//! one author, plus whatever free-text filter the user supplied.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::DEFAULT_MAX_NUMBER;
use crate::types::RepoId;

/// Search merged pull requests and select each one's merge commit.
///
/// Variables: `query` (GitHub search string) and `maxNumber` (page size).
pub const PULL_REQUEST_BY_SEARCH_QUERY: &str = r#"
query PullRequestBySearchQuery($query: String!, $maxNumber: Int!) {
    search(query: $query, type: ISSUE, first: $maxNumber) {
        nodes {
            ... on PullRequest {
                mergeCommit {
                    ...SourceCommitFragment
                }
            }
        }
    }
}

fragment SourceCommitFragment on Commit {
    oid
    message
    committedDate
    author {
        name
        email
    }
    associatedPullRequests(first: 1) {
        nodes {
            number
            title
            url
            labels(first: 50) {
                nodes {
                    name
                }
            }
            mergeCommit {
                oid
            }
        }
    }
    remoteConfigHistory: history(first: 1, path: ".backportrc.json") {
        edges {
            remoteConfig: node {
                committedDate
                file(path: ".backportrc.json") {
                    object {
                        ... on Blob {
                            text
                        }
                    }
                }
            }
        }
    }
}
"#;

/// Parameters of one merged pull request search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub repo: RepoId,
    /// Base branch the pull requests were merged into.
    pub source_branch: String,
    /// Only pull requests opened by this login. Empty means "any author".
    pub author: Option<String>,
    /// Free-text GitHub search qualifiers, e.g. `label:bug`.
    pub pr_filter: String,
    pub max_number: u32,
}

impl SearchOptions {
    /// Creates options for any author, no filter and the default page size.
    pub fn new(repo: RepoId, source_branch: impl Into<String>) -> Self {
        Self {
            repo,
            source_branch: source_branch.into(),
            author: None,
            pr_filter: String::new(),
            max_number: DEFAULT_MAX_NUMBER,
        }
    }

    /// Returns the author filter, treating an empty login as absent.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().filter(|author| !author.is_empty())
    }

    /// Builds the GitHub search string.
    ///
    /// The filter is always followed by a space, even when empty, so the branch
    /// qualifier can never merge into user-supplied text.
    pub fn search_query(&self) -> String {
        let author_filter = self
            .author()
            .map(|author| format!(" author:{}", author))
            .unwrap_or_default();

        format!(
            "type:pr is:merged sort:updated-desc repo:{}{} {} base:{}",
            self.repo, author_filter, self.pr_filter, self.source_branch
        )
    }

    /// Returns the GraphQL variables for [`PULL_REQUEST_BY_SEARCH_QUERY`].
    pub fn variables(&self) -> Value {
        json!({
            "query": self.search_query(),
            "maxNumber": self.max_number,
        })
    }
}
