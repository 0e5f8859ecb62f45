//! Search error types.
//!
//! The two "no match" variants are handled errors: their message is meant for the
//! user as-is and tells them how to widen the search. Everything else is a genuine
//! failure.

use thiserror::Error;

use crate::config::ConfigError;
use crate::github::GitHubApiError;

use super::query::SearchOptions;

/// Errors that can occur when searching merged pull requests.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Nothing matched while filtering by author.
    #[error(
        "There are no commits by \"{author}\" matching the filter \"{pr_filter}\". Try with `--all` for commits by all users or `--author=<username>` for commits from a specific user"
    )]
    NoCommitsByAuthor { author: String, pr_filter: String },

    /// Nothing matched at all.
    #[error("There are no pull requests matching the filter \"{pr_filter}\"")]
    NoMatchingPullRequests { pr_filter: String },

    /// The configuration was rejected before any request was made.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The GitHub API call failed.
    #[error(transparent)]
    Api(#[from] GitHubApiError),

    /// The response did not have the expected shape.
    #[error("failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// Builds the empty-result error for the given search.
    pub fn no_matches(options: &SearchOptions) -> Self {
        match options.author() {
            Some(author) => SearchError::NoCommitsByAuthor {
                author: author.to_string(),
                pr_filter: options.pr_filter.clone(),
            },
            None => SearchError::NoMatchingPullRequests {
                pr_filter: options.pr_filter.clone(),
            },
        }
    }

    /// Returns true if the message should be shown to the user verbatim.
    pub fn is_handled(&self) -> bool {
        matches!(
            self,
            SearchError::NoCommitsByAuthor { .. } | SearchError::NoMatchingPullRequests { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RepoId;

    fn options(author: Option<&str>) -> SearchOptions {
        let mut options = SearchOptions::new(RepoId::new("elastic", "kibana"), "main");
        options.author = author.map(str::to_string);
        options.pr_filter = "label:v8.1.0".to_string();
        options
    }

    #[test]
    fn message_with_author() {
        let err = SearchError::no_matches(&options(Some("sqren")));
        assert_eq!(
            err.to_string(),
            "There are no commits by \"sqren\" matching the filter \"label:v8.1.0\". \
             Try with `--all` for commits by all users or `--author=<username>` for commits \
             from a specific user"
        );
        assert!(err.is_handled());
    }

    #[test]
    fn message_without_author() {
        let err = SearchError::no_matches(&options(None));
        assert_eq!(
            err.to_string(),
            "There are no pull requests matching the filter \"label:v8.1.0\""
        );
        assert!(err.is_handled());
    }

    #[test]
    fn empty_author_uses_generic_message() {
        let err = SearchError::no_matches(&options(Some("")));
        assert!(matches!(err, SearchError::NoMatchingPullRequests { .. }));
    }

    #[test]
    fn api_errors_are_not_handled() {
        let err = SearchError::from(GitHubApiError::missing_data());
        assert!(!err.is_handled());
        assert_eq!(
            err.to_string(),
            "GitHub API error: GraphQL response contained neither data nor errors"
        );
    }
}
