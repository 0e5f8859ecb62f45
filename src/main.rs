//! Backport Search - list merged pull requests that could be backported.
//!
//! # Usage
//! ```bash
//! backport-search --repo elastic/kibana --author sqren      # PRs by one author
//! backport-search --repo elastic/kibana --all -f label:bug  # PRs by anyone
//! backport-search --repo elastic/kibana --all --json        # machine-readable
//! ```

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backport_search::config::{
    DEFAULT_GITHUB_API_BASE_URL_V4, DEFAULT_MAX_NUMBER, DEFAULT_SOURCE_BRANCH, FetchConfig,
};
use backport_search::search::{SearchError, search_merged_pull_requests};
use backport_search::types::{Commit, RepoId};

/// Find merged pull requests whose merge commits can be backported
#[derive(Parser, Debug)]
#[command(name = "backport-search")]
#[command(about = "List merged pull requests matching a GitHub search filter", long_about = None)]
struct Cli {
    /// Repository to search, as owner/repo
    #[arg(short, long)]
    repo: RepoId,

    /// Branch the pull requests were merged into
    #[arg(short, long, default_value = DEFAULT_SOURCE_BRANCH)]
    branch: String,

    /// Only show pull requests by this GitHub user
    #[arg(short, long, conflicts_with = "all")]
    author: Option<String>,

    /// Show pull requests by all users
    #[arg(long)]
    all: bool,

    /// Extra GitHub search qualifiers, e.g. "label:v8.1.0"
    #[arg(short = 'f', long, default_value = "")]
    pr_filter: String,

    /// Maximum number of pull requests to list
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_NUMBER)]
    max_number: u32,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    access_token: String,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "GITHUB_API_BASE_URL_V4", default_value = DEFAULT_GITHUB_API_BASE_URL_V4)]
    github_api_base_url_v4: String,

    /// Print commits as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        let author = if self.all { None } else { self.author.clone() };

        FetchConfig::new(self.access_token.clone(), self.repo.clone())
            .with_source_branch(self.branch.clone())
            .with_author(author)
            .with_pr_filter(self.pr_filter.clone())
            .with_max_number(self.max_number)
            .with_api_url(self.github_api_base_url_v4.clone())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backport_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<SearchError>() {
                Some(search_err) if search_err.is_handled() => eprintln!("{}", search_err),
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.fetch_config();
    tracing::debug!(?config, "Resolved configuration");

    let commits = search_merged_pull_requests(&config).await?;

    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&commits).context("failed to serialise commits")?;
        println!("{}", rendered);
    } else {
        for commit in &commits {
            println!("{}", format_commit(commit));
        }
    }

    Ok(())
}

fn format_commit(commit: &Commit) -> String {
    let pr = commit
        .pull_number()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{} {:>7} {}",
        commit.source_commit.sha.short(),
        pr,
        commit.first_line()
    )
}
