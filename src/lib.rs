//! Backport Search - find merged pull requests on GitHub and turn their merge
//! commits into backport candidates.
//!
//! This library provides the search query builder, the GraphQL transport and the
//! commit model used by the `backport-search` binary.

pub mod config;
pub mod github;
pub mod search;
pub mod types;

#[cfg(test)]
mod test_utils;
