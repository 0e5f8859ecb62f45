//! GitHub GraphQL client.
//!
//! This module provides the transport used by the search: a `GraphQlTransport`
//! trait and its octocrab-backed implementation.
//!
//! Key features:
//! - Posts to a configurable GraphQL URL (github.com or GitHub Enterprise)
//! - Keeps partial data returned next to GraphQL errors
//! - Recognises a missing `.backportrc.json` so callers can recover from it

mod client;
mod error;
mod transport;

pub use client::OctocrabClient;
pub use error::{
    GitHubApiError, GitHubErrorKind, GraphQlError, NOT_FOUND_ERROR_TYPE, PathSegment,
    REMOTE_CONFIG_HISTORY_FIELD,
};
pub use transport::GraphQlTransport;
