//! University-name autocomplete proxy (universities.hipolabs.com).
//!
//! Best-effort lookup for the education editor: short queries, upstream
//! failures, and malformed payloads all degrade to an empty list rather than
//! surfacing an error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

const HIPOLABS_BASE_URL: &str = "http://universities.hipolabs.com";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);
const MIN_QUERY_CHARS: usize = 2;
const MAX_RESULTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct University {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamUniversity {
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Clone)]
pub struct UniversityClient {
    client: reqwest::Client,
    base_url: String,
}

impl UniversityClient {
    pub fn new() -> Self {
        Self::with_base_url(HIPOLABS_BASE_URL.to_string())
    }

    /// Base URL override for tests.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn search(&self, query: &str) -> Vec<University> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let url = format!(
            "{}/search?name={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            MAX_RESULTS
        );

        match self.fetch(&url).await {
            Ok(results) => results
                .into_iter()
                .take(MAX_RESULTS)
                .map(|u| University {
                    name: u.name,
                    country: u.country,
                })
                .collect(),
            Err(e) => {
                warn!("university lookup failed: {e}");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<UpstreamUniversity>, reqwest::Error> {
        self.client
            .get(url)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

impl Default for UniversityClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_short_query_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = UniversityClient::with_base_url(server.url());
        assert!(client.search("m").await.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_results_are_mapped_and_capped() {
        let mut server = mockito::Server::new_async().await;
        let body: Vec<serde_json::Value> = (0..12)
            .map(|i| {
                serde_json::json!({
                    "name": format!("University {i}"),
                    "country": "Wonderland",
                    "domains": ["u.example"],
                    "alpha_two_code": "WL"
                })
            })
            .collect();
        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("name".into(), "massachusetts tech".into()),
                mockito::Matcher::UrlEncoded("limit".into(), "8".into()),
            ]))
            .with_status(200)
            .with_body(serde_json::to_string(&body).unwrap())
            .create_async()
            .await;

        let client = UniversityClient::with_base_url(server.url());
        let results = client.search("massachusetts tech").await;

        assert_eq!(results.len(), 8);
        assert_eq!(results[0].name, "University 0");
        assert_eq!(results[0].country, "Wonderland");
    }

    #[tokio::test]
    async fn test_upstream_failure_degrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let client = UniversityClient::with_base_url(server.url());
        assert!(client.search("mit").await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_upstream_payload_degrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = UniversityClient::with_base_url(server.url());
        assert!(client.search("mit").await.is_empty());
    }
}
