//! Searching GitHub for merged pull requests.
//!
//! Builds the search query, runs it through a `GraphQlTransport`, and turns each
//! pull request's merge commit into a `Commit`. An empty result is a handled error
//! whose message suggests how to widen the search.

mod error;
mod fetch;
mod parse;
mod query;
pub mod response;

pub use error::SearchError;
pub use fetch::{fetch_pull_requests_by_search_query, search_merged_pull_requests};
pub use parse::{DefaultCommitParser, SourceCommitParser};
pub use query::{PULL_REQUEST_BY_SEARCH_QUERY, SearchOptions};
pub use response::{RawSourceCommit, SearchResponse};
