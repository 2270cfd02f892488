use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use jiff::civil::Date;
use reqwest::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} answered {status}")]
    Status { endpoint: String, status: StatusCode },

    #[error("unexpected response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One search hit, in the order the movie database ranked it.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub external_id: i64,
    pub title: String,
    pub release_date: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieDetail {
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub poster_path: Option<String>,
}

#[async_trait::async_trait]
pub trait MovieLookup: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, LookupError>;

    async fn fetch_detail(&self, external_id: i64) -> Result<MovieDetail, LookupError>;
}

pub struct TmdbClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, access_token: String, base_url: String, rps: u32) -> Self {
        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, access_token, base_url, limiter }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        self.limiter.until_ready().await;

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status { endpoint: path.to_string(), status });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl MovieLookup for TmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        let resp: SearchResponse = self.get_json("/search/movie", &[("query", query)]).await?;
        debug!(query, hits = resp.results.len(), "tmdb search");

        Ok(resp
            .results
            .into_iter()
            .map(|m| Candidate { external_id: m.id, title: m.title, release_date: m.release_date })
            .collect())
    }

    async fn fetch_detail(&self, external_id: i64) -> Result<MovieDetail, LookupError> {
        let resp: DetailResponse = self.get_json(&format!("/movie/{external_id}"), &[]).await?;
        debug!(external_id, title = %resp.original_title, "tmdb detail");

        Ok(MovieDetail {
            year: release_year(&resp.release_date),
            title: resp.original_title,
            description: resp.overview,
            poster_path: resp.poster_path.filter(|p| !p.trim().is_empty()),
        })
    }
}

/// Year of a `YYYY-MM-DD` release date. TMDB sends an empty string for unknown dates.
pub fn release_year(release_date: &str) -> Option<i32> {
    release_date.trim().parse::<Date>().ok().map(|d| i32::from(d.year()))
}

pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> String {
    match poster_path {
        Some(path) => format!("{}{}", image_base_url.trim_end_matches('/'), path),
        None => String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    id: i64,
    title: String,
    #[serde(default)]
    release_date: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    original_title: String,
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    overview: String,
    poster_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_from_release_date() {
        assert_eq!(release_year("2010-07-15"), Some(2010));
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("soon"), None);
    }

    #[test]
    fn poster_url_joins_prefix_and_path() {
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500/", Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(poster_url("https://image.tmdb.org/t/p/w500", None), "");
    }

    #[test]
    fn detail_tolerates_null_fields() {
        let body = r#"{"original_title":"Arrival","release_date":"2016-11-10","overview":"Linguist","poster_path":null}"#;
        let detail: DetailResponse = serde_json::from_str(body).unwrap();
        assert_eq!(detail.original_title, "Arrival");
        assert!(detail.poster_path.is_none());
    }
}
