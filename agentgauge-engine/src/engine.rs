use crate::corpus::Corpus;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::frontier::{CrawlConfig, Frontier};
use crate::origin::Origin;
use crate::result::ScoringResult;
use crate::rubric::{self, SpecProbes};
use tracing::{info, warn};

/// The crawl-and-score engine. One instance can score any number of sites;
/// each `score` call owns its crawl state independently.
pub struct ScoringEngine {
    fetcher: Fetcher,
    config: CrawlConfig,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            fetcher: Fetcher::new(),
            config: CrawlConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.fetcher = Fetcher::with_user_agent(user_agent);
        self
    }

    /// Score a site for agent readiness. Fails with `InvalidUrl` or
    /// `NotAFullUrl` before any network activity; otherwise always returns a
    /// result - a completely unreachable site produces zero scores and a soft
    /// error string rather than a failure.
    pub async fn score(&self, input: &str) -> Result<ScoringResult> {
        let origin = Origin::parse(input)?;
        info!("Scoring {}", origin);

        let frontier = Frontier::new(&self.fetcher, &origin, self.config.clone());
        let state = frontier.crawl().await;

        let mut errors = Vec::new();
        if state.pages.is_empty() {
            warn!("No pages fetched for {}", origin);
            errors.push("Could not fetch any pages from this URL".to_string());
        }

        let crawled_pages = state.crawled.clone();
        let corpus = Corpus::build(&origin, state);

        // Spec probes are pointless when the site never answered
        let probes = if corpus.is_empty() {
            SpecProbes::default()
        } else {
            SpecProbes::gather(&self.fetcher, &origin).await
        };

        let categories = rubric::evaluate(&corpus, &probes);

        Ok(ScoringResult::assemble(
            origin.as_str(),
            categories,
            crawled_pages,
            errors,
        ))
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
