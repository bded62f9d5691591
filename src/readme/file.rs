// src/readme/file.rs
// =============================================================================
// Reads the README, runs the strategy chain and writes the result back.
//
// The whole file is read into memory, patched, and written in one go. The
// document must already exist: we never create a README from scratch.
// =============================================================================

use super::{patch, PatchMethod};
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of patching a README on disk
#[derive(Debug, Clone)]
pub struct DocumentUpdate {
    pub method: PatchMethod,
    /// Full patched document
    pub text: String,
    /// False for dry runs and when the patch changed nothing
    pub written: bool,
}

/// Writes `total` into the document at `path`.
///
/// Fails with [`Error::MissingTarget`] before any strategy runs when `path`
/// does not exist. With `dry_run` the file is left untouched.
pub async fn update_file(path: &Path, total: u64, dry_run: bool) -> Result<DocumentUpdate> {
    let original = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::MissingTarget(path.to_path_buf()))
        }
        Err(source) => {
            return Err(Error::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let patched = patch(&original, total);
    info!(method = %patched.method, "{}", patched.method.describe());

    let written = if dry_run {
        debug!(path = %path.display(), "dry run, not writing");
        false
    } else if patched.text == original {
        debug!(path = %path.display(), "document already up to date");
        false
    } else {
        tokio::fs::write(path, &patched.text)
            .await
            .map_err(|source| Error::Io {
                action: "write",
                path: path.to_path_buf(),
                source,
            })?;
        true
    };

    Ok(DocumentUpdate {
        method: patched.method,
        text: patched.text,
        written,
    })
}
