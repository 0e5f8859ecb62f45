//! The commit representation handed to the rest of the backport workflow.
//!
//! A `Commit` is built from the merge commit of a pull request. It always has a
//! source commit; the source pull request and remote config are only present when
//! GitHub could resolve them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{PrNumber, Sha};

/// The author of a commit, as recorded in git.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// The commit that would be cherry-picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCommit {
    pub sha: Sha,
    /// The full commit message, including the body.
    pub message: String,
    pub committed_date: DateTime<Utc>,
}

/// The pull request that introduced the source commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePullRequest {
    pub number: PrNumber,
    pub title: String,
    pub url: String,
    pub labels: Vec<String>,
    /// Always equal to the source commit SHA.
    pub merge_commit_sha: Sha,
}

/// The `.backportrc.json` stored in the repository at the source commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub committed_date: DateTime<Utc>,
    /// Raw file contents; interpreting them is up to the caller.
    pub text: String,
}

/// A merged commit eligible for backporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub author: CommitAuthor,
    pub source_commit: SourceCommit,
    /// The branch the pull request was merged into.
    pub source_branch: String,
    pub source_pull_request: Option<SourcePullRequest>,
    pub remote_config: Option<RemoteConfig>,
}

impl Commit {
    /// Returns the first line of the commit message.
    pub fn first_line(&self) -> &str {
        self.source_commit
            .message
            .lines()
            .next()
            .unwrap_or_default()
    }

    /// Returns the number of the source pull request, if known.
    pub fn pull_number(&self) -> Option<PrNumber> {
        self.source_pull_request.as_ref().map(|pr| pr.number)
    }
}
