//! Command line arguments.

use clap::Parser;

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;

/// Fork Purger: delete every forked repository a GitHub user owns
///
/// Without `--delete` the tool only prints the forks it would delete.
#[derive(Parser)]
#[command(name = "fork-purger", version)]
#[command(about = "Delete all forked repositories of a GitHub user", long_about = None)]
pub struct Cli {
    /// GitHub user whose forks are purged
    #[arg(short, long, env = "GITHUB_USERNAME")]
    pub username: String,

    /// Personal access token with the delete_repo scope
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Delete the forks instead of only listing them
    #[arg(long)]
    pub delete: bool,

    /// Verbose logging and full error chains
    #[arg(long)]
    pub debug: bool,

    /// Number of concurrent delete workers
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Capacity of the queue between the listing and the workers
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Repositories requested per listing page (at most 100)
    #[arg(long)]
    pub page_size: Option<u8>,

    /// Base URL of the GitHub REST API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to the configuration file (defaults to ./fork-purger.toml)
    #[arg(long)]
    pub config: Option<String>,
}
