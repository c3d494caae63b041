use rand::seq::IndexedRandom;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// One fetched page. Status is carried as data; callers treat >= 400 as
/// "not usable" rather than as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    pub body: String,
    pub status: u16,
}

/// Browser strings the fetcher picks from once at construction. The pick is
/// stable for the fetcher's lifetime so one run presents one identity.
const USER_AGENT_POOL: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0",
];

const FETCH_TIMEOUT: Duration = Duration::from_secs(12);
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);
const FETCH_RETRIES: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Bounded HTTP GET with per-request timeout and retry. A failed fetch is
/// "no result", never an error - a single unreachable page must not abort a
/// crawl.
pub struct Fetcher {
    client: Client,
    user_agent: String,
}

impl Fetcher {
    pub fn new() -> Self {
        let user_agent = USER_AGENT_POOL
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(USER_AGENT_POOL[0])
            .to_string();
        Self::with_user_agent(user_agent)
    }

    /// Fixed User-Agent, for deterministic runs and tests.
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(&user_agent)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(6))
            .redirect(reqwest::redirect::Policy::limited(5))
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, user_agent }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Crawl fetch: 12s timeout, up to 2 retries with linearly increasing
    /// backoff (500ms x attempt number).
    pub async fn fetch(&self, url: &str) -> Option<FetchedPage> {
        self.get_with_policy(url, FETCH_TIMEOUT, FETCH_RETRIES).await
    }

    /// Short single-shot fetch used for machine-readable spec discovery:
    /// 3s timeout, no retries.
    pub async fn probe(&self, url: &str) -> Option<FetchedPage> {
        self.get_with_policy(url, PROBE_TIMEOUT, 0).await
    }

    async fn get_with_policy(
        &self,
        url: &str,
        timeout: Duration,
        retries: u32,
    ) -> Option<FetchedPage> {
        for attempt in 0..=retries {
            if attempt > 0 {
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }

            match self.client.get(url).timeout(timeout).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    match response.text().await {
                        Ok(body) => {
                            debug!("GET {} -> {} ({} bytes)", url, status, body.len());
                            return Some(FetchedPage { body, status });
                        }
                        Err(e) => {
                            debug!("GET {} body read failed (attempt {}): {}", url, attempt + 1, e);
                        }
                    }
                }
                Err(e) => {
                    debug!("GET {} failed (attempt {}): {}", url, attempt + 1, e);
                }
            }
        }

        warn!("Giving up on {} after {} attempts", url, retries + 1);
        None
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
