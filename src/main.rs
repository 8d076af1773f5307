//! Terminal front end for browsing a GitHub repository's commits.
//!
//! # Usage
//! ```bash
//! gitmycommits log                               # Commits of the configured repository
//! gitmycommits log -a rust-lang -r cargo         # One-off override
//! gitmycommits show 4d2f5c1                      # Files changed by one commit
//! gitmycommits settings show                     # Print the configured repository
//! gitmycommits settings set -a tokio-rs -r tokio # Persist and re-fetch
//! ```
//!
//! # Configuration
//! Config resolution order:
//! 1. `--config PATH`
//! 2. `$XDG_CONFIG_HOME/gitmycommits/config.yml`
//! 3. `~/.config/gitmycommits/config.yml`
//!
//! Logging goes to stderr. `RUST_LOG` overrides the default filter.
//!
//! CHANGELOG (recent first, max 5 entries)
//! 10/16/2026 - log/show/settings commands over the fetcher state

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use gitmycommits::api::request;
use gitmycommits::{
    CommitDetail, CommitDetailFetcher, CommitFiles, CommitList, CommitListFetcher, CommitSummary,
    CommitsClient, Config, Endpoint, FetchState, RepoSettings, RepositoryCoordinates,
};

#[derive(Parser)]
#[command(name = "gitmycommits")]
#[command(about = "Browse a GitHub repository's commit history")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/gitmycommits/config.yml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the repository's commits
    Log {
        #[command(flatten)]
        repo: RepoArgs,

        /// Print the commits as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the files changed by a commit
    Show {
        /// Commit sha (full or abbreviated)
        sha: String,

        #[command(flatten)]
        repo: RepoArgs,

        /// Print the files as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change the configured repository
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the configured repository
    Show,

    /// Save a new account and/or repository, then list its commits
    Set {
        #[command(flatten)]
        repo: RepoArgs,
    },
}

#[derive(Args)]
struct RepoArgs {
    /// Account that owns the repository
    #[arg(short, long)]
    account: Option<String>,

    /// Repository name
    #[arg(short, long)]
    repository: Option<String>,
}

impl RepoArgs {
    /// Configured coordinates with any command-line overrides applied.
    fn resolve(self, config: &Config) -> RepositoryCoordinates {
        RepositoryCoordinates::new(
            self.account.unwrap_or_else(|| config.account.clone()),
            self.repository.unwrap_or_else(|| config.repository.clone()),
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load(&path)?;
    let runtime = Runtime::new().context("Failed to start async runtime")?;

    match cli.command {
        Commands::Log { repo, json } => runtime.block_on(cmd_log(&config, repo, json)),
        Commands::Show { sha, repo, json } => runtime.block_on(cmd_show(&config, repo, sha, json)),
        Commands::Settings { action } => match action {
            SettingsAction::Show => cmd_settings_show(&config, &path),
            SettingsAction::Set { repo } => runtime.block_on(cmd_settings_set(config, &path, repo)),
        },
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "gitmycommits=debug"
    } else {
        "gitmycommits=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn cmd_log(config: &Config, repo: RepoArgs, json: bool) -> Result<()> {
    let client = Arc::new(CommitsClient::from_config(config)?);
    let mut fetcher = CommitListFetcher::new(client);

    fetcher.configure(repo.resolve(config));
    print_commits(fetcher.settle().await, json)
}

async fn cmd_show(config: &Config, repo: RepoArgs, sha: String, json: bool) -> Result<()> {
    let client = Arc::new(CommitsClient::from_config(config)?);
    let mut fetcher = CommitDetailFetcher::new(client);

    fetcher.configure(repo.resolve(config), sha);
    print_files(fetcher.settle().await, json)
}

fn cmd_settings_show(config: &Config, path: &Path) -> Result<()> {
    println!("Account:    {}", config.account);
    println!("Repository: {}", config.repository);
    println!("API:        {}", config.api_url);
    println!("Config:     {}", path.display());
    Ok(())
}

async fn cmd_settings_set(mut config: Config, path: &Path, repo: RepoArgs) -> Result<()> {
    let settings = RepoSettings::new(config.coordinates());
    let mut updates = settings.subscribe();

    if let Some(account) = repo.account {
        settings.set_account(account);
    }
    if let Some(repository) = repo.repository {
        settings.set_repository(repository);
    }

    if !updates.has_changed().unwrap_or(false) {
        println!("Settings unchanged: {}", settings.current());
        return Ok(());
    }

    let coordinates = settings.current();
    request::commits_url(&config.api_url, &coordinates, None)?;

    config.set_coordinates(coordinates.clone());
    config.save(path)?;
    println!("Saved {} to {}", coordinates, path.display());
    println!();

    let client = Arc::new(CommitsClient::from_config(&config)?);
    let mut fetcher = CommitListFetcher::new(client);
    fetcher.follow(&mut updates).await;
    print_commits(fetcher.settle().await, false)
}

/// The fetched data, or the composed error message as an error.
fn finished<'a, T>(state: &'a FetchState<T>, prefix: &str) -> Result<&'a T> {
    if let Some(message) = state.error_message(prefix) {
        anyhow::bail!(message);
    }
    state.data.as_ref().context("Fetch finished without data")
}

fn print_commits(state: &FetchState<Vec<CommitSummary>>, json: bool) -> Result<()> {
    let commits = finished(state, CommitList::ERROR_PREFIX)?;

    if json {
        println!("{}", serde_json::to_string_pretty(commits)?);
        return Ok(());
    }

    if commits.is_empty() {
        println!("No commits.");
    }

    for commit in commits {
        println!(
            "{:<7}  {}  {:<20}  {}",
            commit.commit_hash(),
            commit.author.date.format("%Y-%m-%d"),
            commit.author.name,
            commit.headline()
        );
    }

    Ok(())
}

fn print_files(state: &FetchState<CommitDetail>, json: bool) -> Result<()> {
    let detail = finished(state, CommitFiles::ERROR_PREFIX)?;

    if json {
        println!("{}", serde_json::to_string_pretty(detail)?);
        return Ok(());
    }

    for file in &detail.files {
        println!(
            "{:<9} +{:<5} -{:<5} {}",
            file.status, file.additions, file.deletions, file.filename
        );
    }

    let additions: u64 = detail.files.iter().map(|f| u64::from(f.additions)).sum();
    let deletions: u64 = detail.files.iter().map(|f| u64::from(f.deletions)).sum();
    println!();
    println!(
        "{} files changed, {} insertions(+), {} deletions(-)",
        detail.files.len(),
        additions,
        deletions
    );

    Ok(())
}
