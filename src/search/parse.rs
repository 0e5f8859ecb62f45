//! Turning raw merge commits into `Commit`s.

use crate::types::{
    Commit, CommitAuthor, PrNumber, RemoteConfig, Sha, SourceCommit, SourcePullRequest,
};

use super::response::{RawPullRequest, RawRemoteConfigHistory, RawSourceCommit};

/// Converts a raw merge commit into the commit model.
///
/// Parsing cannot fail: anything GitHub could not resolve ends up as `None` on
/// the resulting `Commit`.
pub trait SourceCommitParser {
    fn parse(&self, raw: RawSourceCommit) -> Commit;
}

impl<F> SourceCommitParser for F
where
    F: Fn(RawSourceCommit) -> Commit,
{
    fn parse(&self, raw: RawSourceCommit) -> Commit {
        self(raw)
    }
}

/// The parser used for searches against a single source branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultCommitParser {
    source_branch: String,
}

impl DefaultCommitParser {
    pub fn new(source_branch: impl Into<String>) -> Self {
        Self {
            source_branch: source_branch.into(),
        }
    }
}

impl SourceCommitParser for DefaultCommitParser {
    fn parse(&self, raw: RawSourceCommit) -> Commit {
        let source_pull_request = raw
            .associated_pull_requests
            .and_then(|prs| prs.nodes.into_iter().next())
            .and_then(|pr| source_pull_request(pr, &raw.oid));

        let remote_config = raw.remote_config_history.and_then(latest_remote_config);

        let author = raw
            .author
            .map(|a| CommitAuthor {
                name: a.name,
                email: a.email,
            })
            .unwrap_or(CommitAuthor {
                name: None,
                email: None,
            });

        Commit {
            author,
            source_commit: SourceCommit {
                sha: raw.oid,
                message: raw.message,
                committed_date: raw.committed_date,
            },
            source_branch: self.source_branch.clone(),
            source_pull_request,
            remote_config,
        }
    }
}

/// Keeps the associated pull request only if it was merged as `sha`.
///
/// A commit cherry-picked onto another branch is associated with the pull request
/// that introduced it, but that pull request's merge commit is a different one.
fn source_pull_request(pr: RawPullRequest, sha: &Sha) -> Option<SourcePullRequest> {
    let merge_commit_sha = pr.merge_commit?.oid;
    if &merge_commit_sha != sha {
        tracing::debug!(
            pr = pr.number,
            commit = sha.short(),
            "Associated pull request was merged as a different commit"
        );
        return None;
    }

    let labels = pr
        .labels
        .map(|labels| labels.nodes.into_iter().map(|l| l.name).collect())
        .unwrap_or_default();

    Some(SourcePullRequest {
        number: PrNumber(pr.number),
        title: pr.title,
        url: pr.url,
        labels,
        merge_commit_sha,
    })
}

fn latest_remote_config(history: RawRemoteConfigHistory) -> Option<RemoteConfig> {
    let remote_config = history.edges.into_iter().next()?.remote_config?;
    let text = remote_config.file?.object?.text?;

    Some(RemoteConfig {
        committed_date: remote_config.committed_date,
        text,
    })
}
