use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod github;
mod output;
mod stats;

use config::Settings;
use error::OrgStatError;
use github::{Credentials, GitHubClient, HostingApi};
use output::{ReportData, Reporter};
use stats::pipeline::progress_bar;
use stats::{collect_org_stats, Aggregator, Cutoffs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GitHub organisation name
    #[arg(long)]
    org: String,

    /// GitHub user
    #[arg(long, env = "GITHUB_USER")]
    user: String,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Output file; - for stdout
    #[arg(short, long)]
    out: String,

    /// Output format (html, json)
    #[arg(short, long, default_value = "html")]
    format: String,

    /// Settings file (toml, yaml or json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Hide the banner and progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--out -` stays clean.
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref())?;

    if !cli.quiet {
        eprintln!(
            "{}",
            "orgstat - GitHub organisation contributor stats"
                .bright_cyan()
                .bold()
        );
        eprintln!("Organisation: {}", cli.org.bright_white());
    }

    let client = GitHubClient::new(
        &settings,
        Credentials {
            user: cli.user.clone(),
            token: cli.token.clone(),
        },
    )
    .context("could not create HTTP client")?;

    let cutoffs = Cutoffs::at(Utc::now());

    info!("Listing repositories of {}...", cli.org);
    let repos = client
        .list_repositories(&cli.org)
        .await
        .map_err(|source| OrgStatError::List {
            org: cli.org.clone(),
            source,
        })?;

    let archived = repos.iter().filter(|r| r.archived).count();
    debug!("{} of {} repositories are archived", archived, repos.len());

    let names: Vec<String> = repos.into_iter().map(|r| r.name).collect();
    info!("Fetching contributor stats for {} repositories", names.len());

    let aggregator = Arc::new(Aggregator::new(cutoffs));
    let summary = collect_org_stats(
        Arc::new(client),
        &cli.org,
        &names,
        Arc::clone(&aggregator),
        settings.max_concurrent_fetches,
        progress_bar(names.len(), !cli.quiet),
    )
    .await;

    info!(
        "Aggregated {} authors from {} repositories",
        aggregator.author_count(),
        aggregator.repositories()
    );

    let failed = summary.failed.len();
    let data = ReportData {
        org: cli.org.clone(),
        report: aggregator.report(settings.top_authors),
        summary,
    };
    Reporter::new(&cli.format, &cli.out).generate_report(&data)?;

    if !cli.quiet {
        if failed > 0 {
            eprintln!(
                "{}",
                format!("{} repositories could not be fetched", failed).yellow()
            );
        }
        eprintln!("{}", "Report complete!".bright_green().bold());
    }

    Ok(())
}
