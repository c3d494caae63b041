use crate::extract::extract_links;
use crate::fetch::{FetchedPage, Fetcher};
use crate::origin::Origin;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Bounds for one crawl run. The batch width and pacing are parameters so
/// tests can tighten them without touching control flow.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Hard cap on fetched pages for the whole run.
    pub max_pages: usize,
    /// Concurrent fetches inside one batch.
    pub batch_size: usize,
    /// Fixed pause between batches; keeps the crawl from presenting as
    /// hostile burst traffic.
    pub batch_pause: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 30,
            batch_size: 5,
            batch_pause: Duration::from_millis(300),
        }
    }
}

/// State owned by a single crawl run and threaded by value through the
/// phases, so each phase is independently testable.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Fetched bodies keyed by path (main origin) or full URL (other hosts).
    pub pages: HashMap<String, FetchedPage>,
    /// Every URL attempted, successful or not.
    pub visited: HashSet<String>,
    /// URLs that yielded a usable page, in completion order. Only set
    /// membership is scored; the order may vary run to run.
    pub crawled: Vec<String>,
}

/// Well-known path suffixes seeded against the main origin.
const SEED_PATHS: &[&str] = &[
    "/docs",
    "/documentation",
    "/developers",
    "/developer",
    "/api",
    "/api-docs",
    "/pricing",
    "/plans",
    "/terms",
    "/terms-of-service",
    "/legal",
    "/security",
    "/sla",
    "/status",
    "/sandbox",
    "/signup",
    "/register",
    "/get-started",
    "/integrations",
    "/changelog",
    "/faq",
];

/// Infrastructure subdomains worth probing even when nothing links to them.
const SEED_SUBDOMAINS: &[&str] = &["docs", "developer", "developers", "api", "status"];

/// Extensions that mark a link as binary/media/document payload.
const SKIP_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".css", ".js", ".mjs", ".pdf",
    ".doc", ".docx", ".ppt", ".pptx", ".xls", ".xlsx", ".zip", ".gz", ".tar", ".mp3", ".mp4",
    ".webm", ".avi", ".mov", ".woff", ".woff2", ".ttf", ".eot",
];

/// Path segments that mark non-product content.
const SKIP_SEGMENTS: &[&str] = &[
    "blog", "press", "news", "careers", "jobs", "about-us", "team", "contact-us", "events",
    "podcast", "webinar",
];

/// A discovered path must match at least one topic group to be fetched.
/// Together with the exclusions above, this keeps the crawl on product
/// surface instead of wandering into marketing content.
const TOPIC_PATTERNS: &[&[&str]] = &[
    // API and docs
    &["api", "docs", "documentation", "developer", "reference"],
    // Pricing
    &["pricing", "plans", "billing", "cost", "rates"],
    // Legal and compliance
    &["terms", "legal", "privacy", "compliance", "policy", "tos"],
    // Integrations and marketplaces
    &["integration", "marketplace", "partners", "connect", "apps"],
    // Security and SLAs
    &["security", "sla", "uptime", "status", "trust"],
    // Sandbox and trials
    &["sandbox", "trial", "demo", "test"],
    // Signup and onboarding
    &["signup", "sign-up", "register", "get-started", "onboarding", "account"],
    // API technology
    &["openapi", "swagger", "graphql", "webhook", "sdk"],
    // Identity and KYC
    &["kyc", "verification", "identity", "aml"],
];

/// Two-sided relevance filter applied to discovered links (seeds bypass it):
/// excluded on extension or non-product segment, then included only on a
/// topic match.
pub fn is_relevant_path(path: &str) -> bool {
    let path = path.to_lowercase();

    if SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }
    if SKIP_SEGMENTS
        .iter()
        .any(|seg| path.split('/').any(|part| part == *seg))
    {
        return false;
    }

    TOPIC_PATTERNS
        .iter()
        .any(|group| group.iter().any(|kw| path.contains(kw)))
}

/// Drives the crawl: seed generation, link discovery, relevance filtering,
/// and bounded batched fetching into a run-scoped `CrawlState`.
pub struct Frontier<'a> {
    fetcher: &'a Fetcher,
    origin: &'a Origin,
    config: CrawlConfig,
}

impl<'a> Frontier<'a> {
    pub fn new(fetcher: &'a Fetcher, origin: &'a Origin, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            origin,
            config,
        }
    }

    /// Run the seeded crawl and the discovery crawl, returning the final
    /// state. Never fetches more than `max_pages` pages in total.
    pub async fn crawl(&self) -> CrawlState {
        let state = CrawlState::default();
        let state = self.seed_crawl(state).await;
        let state = self.discovery_crawl(state).await;
        info!(
            "Crawl of {} finished: {} pages from {} attempted URLs",
            self.origin,
            state.pages.len(),
            state.visited.len()
        );
        state
    }

    /// Phase 1: the root page, ~20 well-known paths on the main origin, and
    /// the seeded subdomain roots.
    async fn seed_crawl(&self, mut state: CrawlState) -> CrawlState {
        let mut candidates = vec![self.origin.join("")];
        candidates.extend(SEED_PATHS.iter().map(|p| self.origin.join(p)));
        for prefix in SEED_SUBDOMAINS {
            candidates.push(format!("https://{}.{}", prefix, self.origin.base_domain()));
        }

        debug!("Seed crawl: {} candidates", candidates.len());
        self.fetch_batches(candidates, &mut state).await;
        state
    }

    /// Phases 2 and 3: mine links out of everything fetched so far, keep the
    /// on-site relevant ones, and crawl them under the same batch discipline.
    async fn discovery_crawl(&self, mut state: CrawlState) -> CrawlState {
        let budget = self.config.max_pages.saturating_sub(state.pages.len());
        if budget == 0 {
            return state;
        }

        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        for page_url in &state.crawled {
            let Ok(base) = Url::parse(page_url) else {
                continue;
            };
            let Some(page) = state.pages.get(&self.page_key(&base)) else {
                continue;
            };

            for link in extract_links(&page.body, &base) {
                let Some(host) = link.host_str() else { continue };
                if !self.origin.owns_host(host) {
                    continue;
                }

                let normalized = link.as_str().trim_end_matches('/').to_string();
                if state.visited.contains(&normalized) || !is_relevant_path(link.path()) {
                    continue;
                }
                if seen.insert(normalized.clone()) {
                    candidates.push(normalized);
                }
            }
        }

        candidates.truncate(budget);
        debug!(
            "Discovery crawl: {} candidates within budget {}",
            candidates.len(),
            budget
        );
        self.fetch_batches(candidates, &mut state).await;
        state
    }

    /// Fetch candidates in `batch_size`-wide bursts with a fixed pause
    /// between bursts. Every attempted URL is marked visited whether or not
    /// it yields a page; a batch fully settles before the next one starts.
    async fn fetch_batches(&self, candidates: Vec<String>, state: &mut CrawlState) {
        let mut queue = Vec::new();
        for url in candidates {
            if state.visited.insert(url.clone()) {
                queue.push(url);
            }
        }

        for (index, batch) in queue.chunks(self.config.batch_size).enumerate() {
            if state.pages.len() >= self.config.max_pages {
                break;
            }
            if index > 0 {
                tokio::time::sleep(self.config.batch_pause).await;
            }

            let fetches = batch.iter().map(|url| async move {
                (url.clone(), self.fetcher.fetch(url).await)
            });
            let settled: Vec<(String, Option<FetchedPage>)> = stream::iter(fetches)
                .buffer_unordered(self.config.batch_size)
                .collect()
                .await;

            for (url, fetched) in settled {
                if state.pages.len() >= self.config.max_pages {
                    break;
                }
                // Status >= 400 means the URL answered but is not usable
                if let Some(page) = fetched
                    && page.status < 400
                    && let Ok(parsed) = Url::parse(&url)
                {
                    let key = self.page_key(&parsed);
                    // www/no-www variants collapse to one key; keep the first
                    if !state.pages.contains_key(&key) {
                        debug!("Crawled {} ({} bytes)", url, page.body.len());
                        state.pages.insert(key, page);
                        state.crawled.push(url);
                    }
                }
            }
        }
    }

    /// Pages on the main origin are keyed by path; anything on another host
    /// keeps its full URL as the key. Trailing slashes are dropped so `/docs`
    /// and `/docs/` collapse.
    fn page_key(&self, url: &Url) -> String {
        let host = url.host_str().unwrap_or_default();
        let host = host.strip_prefix("www.").unwrap_or(host);

        if host == self.origin.base_domain() {
            let path = url.path().trim_end_matches('/');
            if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            }
        } else {
            url.as_str().trim_end_matches('/').to_string()
        }
    }
}
