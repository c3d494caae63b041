use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Canonical `scheme://host` for a scoring run: lowercase host, no `www.`
/// prefix, no trailing slash. Derived once from user input and immutable
/// afterwards. External result caches key on this string, so normalization
/// must be idempotent and `www.`-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    origin: String,
    base_domain: String,
}

impl Origin {
    /// Normalize free-form input into an origin. Input without a scheme gets
    /// `https://` prefixed. Unparseable input fails with `InvalidUrl`; a host
    /// without a `.` fails with `NotAFullUrl` so the caller can retry with a
    /// TLD attached.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let parsed = Url::parse(&with_scheme)
            .map_err(|e| ScoreError::InvalidUrl(format!("'{}': {}", trimmed, e)))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ScoreError::InvalidUrl(format!("'{}' has no host", trimmed)))?
            .to_lowercase();

        if !host.contains('.') {
            return Err(ScoreError::NotAFullUrl(format!(
                "'{}' has no TLD; try e.g. {}.com",
                host, host
            )));
        }

        let base_domain = host.strip_prefix("www.").unwrap_or(&host).to_string();

        // Non-default ports survive normalization so local targets stay
        // reachable; hosts never carry one in practice.
        let port_suffix = parsed
            .port()
            .map(|p| format!(":{}", p))
            .unwrap_or_default();

        Ok(Self {
            origin: format!("{}://{}{}", parsed.scheme(), base_domain, port_suffix),
            base_domain,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.origin
    }

    /// Bare host used for same-site matching.
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Absolute URL for a path on this origin.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    /// True when `host` (after stripping `www.`) is this origin's domain or
    /// one of its subdomains.
    pub fn owns_host(&self, host: &str) -> bool {
        let host = host.strip_prefix("www.").unwrap_or(host);
        host == self.base_domain || host.ends_with(&format!(".{}", self.base_domain))
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;

    #[test]
    fn test_bare_domain_gets_https() {
        let origin = Origin::parse("acme.com").unwrap();
        assert_eq!(origin.as_str(), "https://acme.com");
        assert_eq!(origin.base_domain(), "acme.com");
    }

    #[test]
    fn test_www_is_stripped() {
        let origin = Origin::parse("www.acme.com").unwrap();
        assert_eq!(origin.as_str(), "https://acme.com");
    }

    #[test]
    fn test_www_insensitive() {
        assert_eq!(
            Origin::parse("www.acme.com").unwrap(),
            Origin::parse("acme.com").unwrap()
        );
    }

    #[test]
    fn test_idempotent() {
        let first = Origin::parse("HTTPS://WWW.Acme.Com/some/path?q=1").unwrap();
        let second = Origin::parse(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_path_and_query_dropped() {
        let origin = Origin::parse("https://acme.com/pricing?plan=pro").unwrap();
        assert_eq!(origin.as_str(), "https://acme.com");
    }

    #[test]
    fn test_missing_tld_rejected() {
        let err = Origin::parse("localhost").unwrap_err();
        assert!(matches!(err, ScoreError::NotAFullUrl(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        let err = Origin::parse("http://").unwrap_err();
        assert!(matches!(err, ScoreError::InvalidUrl(_)));
    }

    #[test]
    fn test_port_preserved() {
        let origin = Origin::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(origin.as_str(), "http://127.0.0.1:8080");
        assert_eq!(origin.base_domain(), "127.0.0.1");
    }

    #[test]
    fn test_owns_host_subdomains() {
        let origin = Origin::parse("acme.com").unwrap();
        assert!(origin.owns_host("acme.com"));
        assert!(origin.owns_host("www.acme.com"));
        assert!(origin.owns_host("docs.acme.com"));
        assert!(!origin.owns_host("acme.com.evil.net"));
        assert!(!origin.owns_host("notacme.com"));
    }

    #[test]
    fn test_join() {
        let origin = Origin::parse("acme.com").unwrap();
        assert_eq!(origin.join("/docs"), "https://acme.com/docs");
    }
}
