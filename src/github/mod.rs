// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Submodules:
// - client: authenticated HTTP client, status code -> error mapping
// - repos: repository records and the paginated stars + forks aggregation
// =============================================================================

mod client;
mod repos;

pub use client::GithubClient;
pub use repos::{aggregate, Totals};
