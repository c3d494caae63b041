use scraper::{Html, Selector};
use url::Url;

/// Pull every anchor target out of an HTML document, resolved against the
/// page's own URL. Pure function: no network access, no state; hrefs that
/// cannot resolve are silently discarded.
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href")
            && let Some(resolved) = resolve_href(base, href)
        {
            links.push(resolved);
        }
    }
    links
}

fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    // Skip empty, javascript:, mailto:, tel:, and fragment-only targets
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved)
}
