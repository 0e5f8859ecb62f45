//! Configuration for a merged pull request search.
//!
//! `FetchConfig` is the inbound configuration object: where to search, what to
//! filter on, and how to reach GitHub. It is validated once, before any request
//! is made, and then narrowed to the `SearchOptions` the query builder needs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::SearchOptions;
use crate::types::RepoId;

/// GraphQL endpoint of github.com.
pub const DEFAULT_GITHUB_API_BASE_URL_V4: &str = "https://api.github.com/graphql";

/// Number of pull requests requested when no maximum is configured.
pub const DEFAULT_MAX_NUMBER: u32 = 10;

/// Upper bound GitHub accepts for `first` on a search connection.
pub const MAX_SEARCH_PAGE_SIZE: u32 = 100;

/// Branch searched when none is configured.
pub const DEFAULT_SOURCE_BRANCH: &str = "main";

/// Errors found while validating a `FetchConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("an access token is required (set GITHUB_TOKEN or pass --access-token)")]
    MissingAccessToken,

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("max number must be between 1 and 100, got {0}")]
    InvalidMaxNumber(u32),

    #[error("GitHub API URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
}

/// Everything needed to search for merged pull requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub access_token: String,
    #[serde(default = "default_api_url")]
    pub github_api_base_url_v4: String,
    pub repo: RepoId,
    #[serde(default = "default_source_branch")]
    pub source_branch: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub pr_filter: String,
    #[serde(default = "default_max_number")]
    pub max_number: u32,
}

fn default_api_url() -> String {
    DEFAULT_GITHUB_API_BASE_URL_V4.to_string()
}

fn default_source_branch() -> String {
    DEFAULT_SOURCE_BRANCH.to_string()
}

fn default_max_number() -> u32 {
    DEFAULT_MAX_NUMBER
}

impl FetchConfig {
    /// Creates a configuration with defaults for everything but the token and repository.
    pub fn new(access_token: impl Into<String>, repo: RepoId) -> Self {
        Self {
            access_token: access_token.into(),
            github_api_base_url_v4: default_api_url(),
            repo,
            source_branch: default_source_branch(),
            author: None,
            pr_filter: String::new(),
            max_number: DEFAULT_MAX_NUMBER,
        }
    }

    pub fn with_source_branch(mut self, branch: impl Into<String>) -> Self {
        self.source_branch = branch.into();
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_pr_filter(mut self, filter: impl Into<String>) -> Self {
        self.pr_filter = filter.into();
        self
    }

    pub fn with_max_number(mut self, max_number: u32) -> Self {
        self.max_number = max_number;
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_base_url_v4 = url.into();
        self
    }

    /// Checks the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::MissingAccessToken);
        }
        if self.repo.owner.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "repository owner",
            });
        }
        if self.repo.repo.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "repository name",
            });
        }
        if self.source_branch.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "source branch",
            });
        }
        if !(1..=MAX_SEARCH_PAGE_SIZE).contains(&self.max_number) {
            return Err(ConfigError::InvalidMaxNumber(self.max_number));
        }
        let url = &self.github_api_base_url_v4;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidApiUrl(url.clone()));
        }
        Ok(())
    }

    /// Returns the query parameters for this configuration.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            repo: self.repo.clone(),
            source_branch: self.source_branch.clone(),
            author: self.author.clone(),
            pr_filter: self.pr_filter.clone(),
            max_number: self.max_number,
        }
    }
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("access_token", &"<redacted>")
            .field("github_api_base_url_v4", &self.github_api_base_url_v4)
            .field("repo", &self.repo)
            .field("source_branch", &self.source_branch)
            .field("author", &self.author)
            .field("pr_filter", &self.pr_filter)
            .field("max_number", &self.max_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> FetchConfig {
        FetchConfig::new("ghp_token", RepoId::new("elastic", "kibana"))
    }

    #[test]
    fn defaults() {
        let config = config();
        assert_eq!(config.max_number, 10);
        assert_eq!(config.source_branch, "main");
        assert_eq!(config.github_api_base_url_v4, "https://api.github.com/graphql");
        assert_eq!(config.author, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserialize_fills_defaults() {
        let config: FetchConfig = serde_json::from_value(serde_json::json!({
            "access_token": "ghp_token",
            "repo": { "owner": "elastic", "repo": "kibana" }
        }))
        .unwrap();
        assert_eq!(config, self::config());
    }

    #[test]
    fn rejects_blank_token() {
        let config = FetchConfig::new("  ", RepoId::new("elastic", "kibana"));
        assert_eq!(config.validate(), Err(ConfigError::MissingAccessToken));
    }

    #[test]
    fn rejects_empty_fields() {
        let config = FetchConfig::new("t", RepoId::new("", "kibana"));
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyField {
                field: "repository owner"
            })
        );

        let config = self::config().with_source_branch("");
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyField {
                field: "source branch"
            })
        );
    }

    #[test]
    fn rejects_bad_api_url() {
        let config = self::config().with_api_url("api.github.com/graphql");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidApiUrl(_))
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("ghp_token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn search_options_carry_filters() {
        let options = config()
            .with_author(Some("sqren".to_string()))
            .with_pr_filter("label:bug")
            .with_source_branch("8.x")
            .with_max_number(25)
            .search_options();

        assert_eq!(options.repo, RepoId::new("elastic", "kibana"));
        assert_eq!(options.author.as_deref(), Some("sqren"));
        assert_eq!(options.pr_filter, "label:bug");
        assert_eq!(options.source_branch, "8.x");
        assert_eq!(options.max_number, 25);
    }

    proptest! {
        #[test]
        fn max_number_bounds(n in 0u32..1000) {
            let valid = config().with_max_number(n).validate().is_ok();
            prop_assert_eq!(valid, (1..=100).contains(&n));
        }
    }
}
