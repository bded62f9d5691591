// src/github/client.rs
// =============================================================================
// A thin client for the two GitHub REST endpoints we need:
//
//   GET /user                  -> login of whoever owns the token
//   GET /users/{user}/repos    -> one page of that user's repositories
//
// Every request carries the token, the v3 Accept header and a User-Agent
// (GitHub rejects requests without one), plus a fixed timeout.
//
// Status handling:
//   401                         -> Error::Auth
//   403 with rate limit spent   -> Error::Upstream
//   403 otherwise               -> Error::Auth
//   anything else non-2xx       -> Error::Upstream
//   timeout / connection error  -> Error::Upstream
// =============================================================================

use crate::config::Config;
use crate::error::{ConfigError, Error, Result};
use crate::github::repos::RepositoryRecord;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("star-tally/", env!("CARGO_PKG_VERSION"));
const GITHUB_V3_JSON: &str = "application/vnd.github.v3+json";

// Longest snippet of an error body we echo back in messages
const MAX_DETAIL_CHARS: usize = 200;

pub struct GithubClient {
    http: Client,
    api_url: Url,
}

impl GithubClient {
    /// Creates a client that sends `token` as a bearer credential to `api_url`.
    pub fn new(api_url: Url, token: &str, timeout: Duration) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ConfigError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_JSON));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { http, api_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), &config.token, config.timeout)
    }

    /// Login of the account the token belongs to.
    pub async fn authenticated_user(&self) -> Result<String> {
        let url = self.endpoint(&["user"])?;
        let body = self.get_json(url, &[]).await?;

        body.get("login")
            .and_then(Value::as_str)
            .filter(|login| !login.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Upstream("could not determine the authenticated user's login".to_string())
            })
    }

    /// Fetches one page of repositories owned by `user`, sorted by full name.
    ///
    /// Pages are numbered from 1. A body that is not a JSON array (GitHub
    /// sometimes answers 200 with an error object) is an Upstream error.
    pub async fn list_owned_repos_page(
        &self,
        user: &str,
        page: u32,
        per_page: usize,
    ) -> Result<Vec<RepositoryRecord>> {
        let url = self.endpoint(&["users", user, "repos"])?;
        let query = [
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
            ("type", "owner".to_string()),
            ("sort", "full_name".to_string()),
        ];

        match self.get_json(url, &query).await? {
            Value::Array(items) => Ok(items.into_iter().map(RepositoryRecord::from_value).collect()),
            other => Err(Error::Upstream(format!(
                "unexpected response fetching repositories for {user}: {}",
                describe_body(&other)
            ))),
        }
    }

    // Appends path segments to the API base, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidApiUrl {
                url: self.api_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url, query: &[(&str, String)]) -> Result<Value> {
        debug!(%url, ?query, "GET");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;
        response.json::<Value>().await.map_err(transport_error)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        == Some("0");

    let detail = error_detail(response).await;

    match status {
        StatusCode::UNAUTHORIZED => Err(Error::Auth(format!("HTTP {status}: {detail}"))),
        StatusCode::FORBIDDEN if !rate_limited => {
            Err(Error::Auth(format!("HTTP {status}: {detail}")))
        }
        _ if rate_limited => Err(Error::Upstream(format!(
            "rate limit exceeded (HTTP {status}): {detail}"
        ))),
        _ => Err(Error::Upstream(format!("HTTP {status}: {detail}"))),
    }
}

// GitHub error bodies look like {"message": "...", "documentation_url": "..."}
async fn error_detail(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<Value>(&text) {
        Ok(body) => describe_body(&body),
        Err(_) if text.trim().is_empty() => "no details".to_string(),
        Err(_) => truncate(text.trim()),
    }
}

fn describe_body(body: &Value) -> String {
    match body.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => truncate(&body.to_string()),
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_DETAIL_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Upstream("request timed out".to_string())
    } else if error.is_decode() {
        Error::Upstream(format!("response is not valid JSON: {error}"))
    } else {
        Error::Upstream(error.to_string())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does `?` work on a ConfigError inside a function returning Error?
//    - Error has `#[from] ConfigError`, so thiserror generates
//      `impl From<ConfigError> for Error`
//    - `?` calls From::from on the error before returning it
//
// 2. What does set_sensitive(true) do?
//    - Marks the Authorization header so it is hidden from Debug output
//
// 3. Why serde_json::Value instead of a typed struct for pages?
//    - We need to tell "a list" apart from "an error object" before
//      looking at individual records
// -----------------------------------------------------------------------------
