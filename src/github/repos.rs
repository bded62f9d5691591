// src/github/repos.rs
// =============================================================================
// Repository records and the stars + forks aggregation.
//
// How it works:
// 1. Ask for page 1 of the user's owned repositories (100 per page)
// 2. Add every record's stargazers_count and forks_count to the running totals
// 3. A page with fewer than 100 records is the last one; otherwise fetch the
//    next page
//
// Individual records are read leniently: a missing, null, negative or
// non-integer count is 0, and a record that is not a JSON object counts as
// an empty repository. Only a page that is not a list at all is an error
// (see client.rs).
// =============================================================================

use crate::error::Result;
use crate::github::client::GithubClient;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Number of repositories requested per page (GitHub's maximum)
pub const PAGE_SIZE: usize = 100;

/// The two counters we care about from a repository listing entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryRecord {
    #[serde(default, deserialize_with = "lenient_count")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub forks_count: u64,
}

impl RepositoryRecord {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_u64).unwrap_or(0))
}

/// Running sums over every fetched repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub repositories: usize,
    pub stars: u64,
    pub forks: u64,
}

impl Totals {
    /// Stars plus forks: the number written into the README.
    pub fn total(&self) -> u64 {
        self.stars.saturating_add(self.forks)
    }

    pub fn add(&mut self, record: &RepositoryRecord) {
        self.repositories += 1;
        self.stars = self.stars.saturating_add(record.stargazers_count);
        self.forks = self.forks.saturating_add(record.forks_count);
    }
}

impl<'a> FromIterator<&'a RepositoryRecord> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a RepositoryRecord>>(iter: I) -> Self {
        let mut totals = Totals::default();
        for record in iter {
            totals.add(record);
        }
        totals
    }
}

/// Walks every page of `user`'s owned repositories and sums their stars and forks.
///
/// Stops after the first page holding fewer than [`PAGE_SIZE`] records, so N
/// full pages followed by a short one cost exactly N + 1 requests.
pub async fn aggregate(client: &GithubClient, user: &str) -> Result<Totals> {
    let mut totals = Totals::default();
    let mut page = 1;

    loop {
        let records = client.list_owned_repos_page(user, page, PAGE_SIZE).await?;
        debug!(page, count = records.len(), "fetched repository page");

        for record in &records {
            totals.add(record);
        }

        if records.len() < PAGE_SIZE {
            break;
        }
        page += 1;
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GithubClient {
        let url = Url::parse(&server.uri()).unwrap();
        GithubClient::new(url, "test-token", Duration::from_secs(5)).unwrap()
    }

    fn repos(count: usize, stars: u64, forks: u64) -> Value {
        let items: Vec<Value> = (0..count)
            .map(|_| json!({"stargazers_count": stars, "forks_count": forks}))
            .collect();
        Value::Array(items)
    }

    async fn mount_page(server: &MockServer, page: u32, body: Value) {
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn test_record_defaults_for_missing_and_null() {
        let record = RepositoryRecord::from_value(json!({"name": "x", "forks_count": null}));
        assert_eq!(record, RepositoryRecord::default());

        let record = RepositoryRecord::from_value(json!({"stargazers_count": 7}));
        assert_eq!(record.stargazers_count, 7);
        assert_eq!(record.forks_count, 0);
    }

    #[test]
    fn test_record_tolerates_malformed_counts() {
        let record = RepositoryRecord::from_value(json!({
            "stargazers_count": "many",
            "forks_count": -3
        }));
        assert_eq!(record, RepositoryRecord::default());

        assert_eq!(RepositoryRecord::from_value(json!(42)), RepositoryRecord::default());
        assert_eq!(RepositoryRecord::from_value(json!([1, 2])), RepositoryRecord::default());
    }

    #[test]
    fn test_totals_sum_stars_and_forks() {
        let records = [
            RepositoryRecord { stargazers_count: 10, forks_count: 2 },
            RepositoryRecord { stargazers_count: 0, forks_count: 0 },
            RepositoryRecord { stargazers_count: 5, forks_count: 9 },
        ];
        let totals: Totals = records.iter().collect();
        assert_eq!(totals.repositories, 3);
        assert_eq!(totals.stars, 15);
        assert_eq!(totals.forks, 11);
        assert_eq!(totals.total(), 26);

        let reversed: Totals = records.iter().rev().collect();
        assert_eq!(reversed, totals);
    }

    #[test]
    fn test_totals_saturate() {
        let records = [
            RepositoryRecord { stargazers_count: u64::MAX, forks_count: 1 },
            RepositoryRecord { stargazers_count: 1, forks_count: 0 },
        ];
        let totals: Totals = records.iter().collect();
        assert_eq!(totals.stars, u64::MAX);
        assert_eq!(totals.total(), u64::MAX);
    }

    #[tokio::test]
    async fn test_single_short_page() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            1,
            json!([
                {"stargazers_count": 3, "forks_count": 1},
                {"stargazers_count": null, "forks_count": 4},
                {"full_name": "octocat/empty"}
            ]),
        )
        .await;

        let totals = aggregate(&client_for(&server), "octocat").await.unwrap();
        assert_eq!(totals, Totals { repositories: 3, stars: 3, forks: 5 });
        assert_eq!(totals.total(), 8);
    }

    #[tokio::test]
    async fn test_paginates_until_short_page() {
        let server = MockServer::start().await;
        mount_page(&server, 1, repos(PAGE_SIZE, 1, 0)).await;
        mount_page(&server, 2, repos(PAGE_SIZE, 2, 1)).await;
        mount_page(&server, 3, repos(7, 0, 3)).await;

        let totals = aggregate(&client_for(&server), "octocat").await.unwrap();

        assert_eq!(totals.repositories, 207);
        assert_eq!(totals.stars, 100 + 200);
        assert_eq!(totals.forks, 100 + 21);
        assert_eq!(totals.total(), 421);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn test_full_page_followed_by_empty_page() {
        let server = MockServer::start().await;
        mount_page(&server, 1, repos(PAGE_SIZE, 1, 1)).await;
        mount_page(&server, 2, json!([])).await;

        let totals = aggregate(&client_for(&server), "octocat").await.unwrap();
        assert_eq!(totals.total(), 200);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_later_page_fails() {
        let server = MockServer::start().await;
        mount_page(&server, 1, repos(PAGE_SIZE, 1, 1)).await;
        mount_page(&server, 2, json!({"message": "API rate limit exceeded"})).await;

        let err = aggregate(&client_for(&server), "octocat").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
