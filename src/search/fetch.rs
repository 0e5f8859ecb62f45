//! Fetching merged pull requests by search query.
//!
//! One call, one request:
//!
//! 1. Build the search string from the options
//! 2. Send `PULL_REQUEST_BY_SEARCH_QUERY` through the transport
//! 3. Recover if the only problem was a missing `.backportrc.json`
//! 4. Parse each merge commit, in search order
//! 5. Fail with a handled error if nothing matched

use serde_json::Value;

use crate::config::FetchConfig;
use crate::github::{GitHubApiError, GraphQlTransport, OctocrabClient};
use crate::types::Commit;

use super::error::SearchError;
use super::parse::{DefaultCommitParser, SourceCommitParser};
use super::query::{PULL_REQUEST_BY_SEARCH_QUERY, SearchOptions};
use super::response::SearchResponse;

/// Fetches the merge commits of merged pull requests matching `options`.
///
/// Search results without a merge commit are skipped, so the result can be
/// shorter than the number of nodes GitHub returned.
///
/// # Errors
///
/// - `NoCommitsByAuthor` / `NoMatchingPullRequests` when the search is empty
/// - `Api` when the request fails for any reason other than a missing config file
/// - `Decode` when the response does not match the query's selection set
pub async fn fetch_pull_requests_by_search_query<T, P>(
    transport: &T,
    parser: &P,
    options: &SearchOptions,
) -> Result<Vec<Commit>, SearchError>
where
    T: GraphQlTransport,
    P: SourceCommitParser,
{
    tracing::debug!(
        query = %options.search_query(),
        max_number = options.max_number,
        "Searching merged pull requests"
    );

    let variables = options.variables();

    let data = match transport
        .request(PULL_REQUEST_BY_SEARCH_QUERY, &variables)
        .await
    {
        Ok(data) => Some(data),
        Err(err) => err.recover_missing_config_file()?,
    };

    let response = decode_response(data)?;
    let commits = map_nodes(response, parser);

    if commits.is_empty() {
        return Err(SearchError::no_matches(options));
    }

    tracing::info!(
        repo = %options.repo,
        branch = %options.source_branch,
        count = commits.len(),
        "Found merged pull requests"
    );
    Ok(commits)
}

/// Validates `config`, connects to GitHub and runs the search with the default parser.
pub async fn search_merged_pull_requests(
    config: &FetchConfig,
) -> Result<Vec<Commit>, SearchError> {
    config.validate()?;

    let client = OctocrabClient::from_config(config).map_err(GitHubApiError::from_octocrab)?;
    let parser = DefaultCommitParser::new(config.source_branch.clone());

    fetch_pull_requests_by_search_query(&client, &parser, &config.search_options()).await
}

/// Decodes the `data` object; absent data means an empty search.
fn decode_response(data: Option<Value>) -> Result<SearchResponse, SearchError> {
    match data {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => Ok(SearchResponse::default()),
    }
}

fn map_nodes<P: SourceCommitParser>(response: SearchResponse, parser: &P) -> Vec<Commit> {
    response
        .search
        .nodes
        .into_iter()
        .enumerate()
        .filter_map(|(index, node)| match node.merge_commit {
            Some(raw) => Some(parser.parse(raw)),
            None => {
                tracing::warn!(index, "Search result has no merge commit, skipping");
                None
            }
        })
        .collect()
}
