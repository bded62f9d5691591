// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The tool only does one thing, so there are no subcommands: every option is
// a flag on the top-level command. Turning these raw arguments into a checked
// configuration happens in config.rs.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

/// Default location of the document we patch, relative to the working directory
pub const DEFAULT_README: &str = "README.md";

/// Environment variable that holds the API credential unless --token-env says otherwise
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Public GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "star-tally",
    version,
    about = "Sum the stars and forks of a GitHub user's repositories and write the total into a README",
    long_about = "star-tally counts the stars and forks across every repository a user owns \
                  and writes the total into README.md. It looks for a \
                  <!--START_TOTAL_SCORE--> marker first, then a 'Total Stars + Forks:' line, \
                  then a '### ⭐ Github Status:' heading, and appends a new block as a last resort."
)]
pub struct Cli {
    /// GitHub login whose repositories are counted
    ///
    /// When omitted, the owner of the credential is looked up via GET /user.
    #[arg(long)]
    pub user: Option<String>,

    /// Path of the document to patch
    #[arg(long, default_value = DEFAULT_README)]
    pub readme: PathBuf,

    /// Name of the environment variable holding the API token
    #[arg(long, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// Base URL of the GitHub REST API (change for GitHub Enterprise)
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print the patched document instead of writing it back
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}
