//! Core domain types for backport search.
//!
//! Identifiers are newtypes so that owners, SHAs and pull request numbers cannot be
//! mixed up; `Commit` is the result model produced from merged pull requests.

pub mod commit;
pub mod ids;

pub use commit::{Commit, CommitAuthor, RemoteConfig, SourceCommit, SourcePullRequest};
pub use ids::{InvalidRepoId, PrNumber, RepoId, Sha};
