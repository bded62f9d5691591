// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and validate them into a Config
// 2. Resolve the user (or ask GitHub who owns the token)
// 3. Sum stars + forks across every repository the user owns
// 4. Write the total into the README
// 5. Print a summary and exit (0 = success, 1 = run failed, 2 = bad config)
//
// main() only wires things together; run() takes an explicit Config so the
// whole flow can be exercised in tests without touching the process
// environment.
// =============================================================================

mod cli;
mod config;
mod error;
mod github;
mod readme;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use github::{GithubClient, Totals};
use readme::PatchMethod;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Everything runs sequentially, so a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::from_cli(&cli, |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            let e = error::Error::from(e);
            eprintln!("Error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    match run(&config).await {
        Ok(summary) => match print_summary(&summary, config.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

// RUST_LOG wins when set; otherwise info, or debug with --verbose.
// Logs go to stderr so stdout stays clean for --json and --dry-run output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// What a successful run did
#[derive(Debug, Serialize)]
struct RunSummary {
    user: String,
    #[serde(flatten)]
    totals: Totals,
    total: u64,
    method: PatchMethod,
    readme: PathBuf,
    written: bool,
    /// Patched document, only kept for --dry-run
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<String>,
}

/// Counts the user's stars and forks and patches the README.
async fn run(config: &Config) -> Result<RunSummary> {
    let client = GithubClient::from_config(config)?;

    let user = match &config.user {
        Some(user) => user.clone(),
        None => {
            let login = client
                .authenticated_user()
                .await
                .context("failed to look up the authenticated user")?;
            info!(user = %login, "authenticated");
            login
        }
    };

    let totals = github::aggregate(&client, &user)
        .await
        .with_context(|| format!("failed to count repositories for {user}"))?;
    info!(
        repositories = totals.repositories,
        stars = totals.stars,
        forks = totals.forks,
        total = totals.total(),
        "fetched repositories (type=owner)"
    );

    let update = readme::update_file(&config.readme, totals.total(), config.dry_run)
        .await
        .with_context(|| format!("failed to update {}", config.readme.display()))?;

    Ok(RunSummary {
        user,
        total: totals.total(),
        totals,
        method: update.method,
        readme: config.readme.clone(),
        written: update.written,
        document: config.dry_run.then_some(update.text),
    })
}

// Domain errors carry their own exit code; anything else is a plain failure.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<error::Error>()
        .map(error::Error::exit_code)
        .unwrap_or(1)
}

// Prints the summary either as JSON or as a short human-readable report
fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
        return Ok(());
    }

    if let Some(document) = &summary.document {
        print!("{document}");
    }

    let outcome = match (summary.written, summary.document.is_some()) {
        (true, _) => "updated",
        (false, true) => "dry run, not written",
        (false, false) => "already up to date",
    };

    println!("📊 Summary for {}:", summary.user);
    println!("   📦 Repositories: {}", summary.totals.repositories);
    println!("   ⭐ Stars: {}", summary.totals.stars);
    println!("   🍴 Forks: {}", summary.totals.forks);
    println!("   📋 Total: {}", summary.total);
    println!(
        "✅ {} ({}, via {})",
        summary.readme.display(),
        outcome,
        summary.method
    );
    Ok(())
}
