use crate::extract::extract_links;
use crate::fetch::FetchedPage;
use crate::frontier::CrawlState;
use crate::origin::Origin;
use std::collections::HashMap;
use url::Url;

/// Lowercase text and link views over everything a crawl fetched, plus the
/// page-existence map. Every rubric rule reads these views; none touches raw
/// responses.
#[derive(Debug, Default)]
pub struct Corpus {
    /// All page bodies concatenated, lowercased.
    pub text: String,
    /// All extracted hrefs concatenated, lowercased.
    pub links: String,
    /// Page map from the crawl: path keys for the main origin, full URLs for
    /// other hosts.
    pub pages: HashMap<String, FetchedPage>,
    /// URLs that yielded pages.
    pub crawled: Vec<String>,
}

impl Corpus {
    pub fn build(origin: &Origin, state: CrawlState) -> Self {
        let CrawlState { pages, crawled, .. } = state;

        // Sorted key order keeps the views identical run to run even though
        // the map itself has none.
        let mut keys: Vec<&String> = pages.keys().collect();
        keys.sort();

        let mut text = String::new();
        let mut links = String::new();

        for key in keys {
            let page = &pages[key];
            text.push_str(&page.body.to_lowercase());
            text.push('\n');

            let page_url = if key.starts_with('/') {
                origin.join(key)
            } else {
                key.clone()
            };
            if let Ok(base) = Url::parse(&page_url) {
                for link in extract_links(&page.body, &base) {
                    links.push_str(&link.as_str().to_lowercase());
                    links.push('\n');
                }
            }
        }

        Self {
            text,
            links,
            pages,
            crawled,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn text_has(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    pub fn text_has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }

    pub fn links_has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.links.contains(n))
    }

    /// First crawled page matching any pattern. A pattern starting with `/`
    /// matches path-key suffixes; anything else is a substring match against
    /// full-URL keys (used for subdomain pages).
    pub fn first_page(&self, patterns: &[&str]) -> Option<&str> {
        // Sorted for a stable answer; the map has no order of its own
        let mut keys: Vec<&String> = self.pages.keys().collect();
        keys.sort();

        for pattern in patterns {
            for key in &keys {
                let hit = if pattern.starts_with('/') {
                    key.ends_with(pattern)
                } else {
                    key.contains(pattern)
                };
                if hit {
                    return Some(key.as_str());
                }
            }
        }
        None
    }

    pub fn has_page(&self, patterns: &[&str]) -> bool {
        self.first_page(patterns).is_some()
    }
}
