// src/config.rs
// =============================================================================
// Validated run configuration.
//
// Everything the run needs (who to count, which token, which API, which file)
// is collected here once, at the boundary. Nothing further down reads the
// environment or the command line.
// =============================================================================

use crate::cli::Cli;
use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// None means "whoever owns the token"
    pub user: Option<String>,
    pub token: String,
    pub api_url: Url,
    pub readme: PathBuf,
    pub timeout: Duration,
    pub dry_run: bool,
    pub json: bool,
}

impl Config {
    /// Builds a Config from parsed arguments, reading the token through `env`.
    ///
    /// `env` is a lookup function rather than `std::env::var` directly so tests
    /// don't have to mutate the process environment.
    pub fn from_cli<F>(cli: &Cli, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = env(&cli.token_env)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingToken {
                var: cli.token_env.clone(),
            })?;

        let user = match cli.user.as_deref().map(str::trim) {
            Some("") => return Err(ConfigError::EmptyUser),
            Some(user) => Some(user.to_string()),
            None => None,
        };

        if cli.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            user,
            token,
            api_url: parse_api_url(&cli.api_url)?,
            readme: cli.readme.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
            dry_run: cli.dry_run,
            json: cli.json,
        })
    }
}

// Only http(s) URLs that can carry a path are usable as an API base.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }

    Ok(url)
}
