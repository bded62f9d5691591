// src/error.rs
// =============================================================================
// Error types shared by the whole tool.
//
// Every failure is fatal: nothing is retried, the run stops and main() turns
// the error into a message on stderr and a non-zero exit code.
//
//   ConfigError   -> bad or missing configuration (exit 2)
//   Auth          -> the API rejected our credential (exit 1)
//   Upstream      -> malformed / rate-limited response or timeout (exit 1)
//   MissingTarget -> the README to patch does not exist (exit 1)
//   Io            -> reading or writing an existing README failed (exit 1)
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Problems detected while turning CLI arguments and environment into a Config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} environment variable not set")]
    MissingToken { var: String },

    #[error("credential contains characters not allowed in an HTTP header")]
    InvalidToken,

    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("--user must not be empty")]
    EmptyUser,

    #[error("--timeout-secs must be greater than zero")]
    ZeroTimeout,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("authorization failed: {0}")]
    Auth(String),

    #[error("upstream API error: {0}")]
    Upstream(String),

    #[error("{} not found", .0.display())]
    MissingTarget(PathBuf),

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
