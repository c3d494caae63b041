use crate::corpus::Corpus;
use crate::fetch::Fetcher;
use crate::origin::Origin;
use crate::result::{CategoryScore, FrictionType, SubScore};
use serde_json::Value;
use tracing::debug;

/// The four rubric categories, each capped at 10 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Discovery,
    Purchase,
    Integration,
    Trust,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Discovery,
        Category::Purchase,
        Category::Integration,
        Category::Trust,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Discovery => "DISCOVERY",
            Category::Purchase => "PURCHASE",
            Category::Integration => "INTEGRATION",
            Category::Trust => "TRUST",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Discovery => "Can an agent find this product?",
            Category::Purchase => "Can an agent buy it?",
            Category::Integration => "Can an agent use it programmatically?",
            Category::Trust => "Would the owner let an agent run unsupervised?",
        }
    }
}

// ============================================================================
// Keyword sets
// ============================================================================

const API_DOCS_TEXT: &[&str] = &[
    "api documentation",
    "api docs",
    "api reference",
    "developer documentation",
    "developer docs",
];
const API_DOCS_LINKS: &[&str] = &["/docs", "/documentation", "/developers", "/api", "://docs."];
const DOCS_PAGES: &[&str] = &[
    "/docs",
    "/documentation",
    "/developers",
    "/developer",
    "/api-docs",
    "://docs.",
    "://developer",
];

const PRICING_PAGES: &[&str] = &["/pricing", "/plans"];
const PRICING_TEXT: &[&str] = &["pricing", "per month", "/mo", "per user", "free tier"];
const STRUCTURED_PRICING_MARKERS: &[&str] = &[
    "pricespecification",
    "itemprop=\"price\"",
    "\"price\"",
    "\"offers\"",
];

const DIRECTORY_KEYWORDS: &[&str] = &[
    "marketplace",
    "app store",
    "product hunt",
    "zapier",
    "partner directory",
    "integrations directory",
    "listed on",
];

const OPENAPI_KEYWORDS: &[&str] = &["openapi", "swagger"];

const KYC_KEYWORDS: &[&str] = &[
    "kyc",
    "know your customer",
    "identity verification",
    "verify your identity",
    "aml check",
    "aml compliance",
    "anti-money laundering",
    "government-issued id",
];
const CONTACT_SALES: &[&str] = &[
    "contact sales",
    "talk to sales",
    "contact our sales",
    "book a demo",
    "request a demo",
    "schedule a call",
    "talk to an expert",
];
const SELF_SERVE: &[&str] = &[
    "sign up",
    "signup",
    "create account",
    "create an account",
    "get started",
    "start free",
    "free trial",
    "get api key",
    "api key",
];

const CAPTCHA_VENDORS: &[&str] = &[
    "captcha",
    "recaptcha",
    "hcaptcha",
    "turnstile",
    "arkose",
    "funcaptcha",
    "geetest",
];

const METERED_BILLING: &[&str] = &[
    "pay as you go",
    "pay-as-you-go",
    "usage-based",
    "usage based",
    "metered billing",
    "per request",
    "per-request",
    "per api call",
    "per token",
];
const SUBSCRIPTION_BILLING: &[&str] = &[
    "per month",
    "/month",
    "monthly plan",
    "per seat",
    "per user",
    "annual plan",
    "subscription",
];

const CRYPTO_PAYMENT: &[&str] = &[
    "stablecoin",
    "usdc",
    "usdt",
    "crypto payment",
    "cryptocurrency",
    "bitcoin",
    "ethereum",
    "on-chain",
];

const AGENT_PAYMENT_PROTOCOLS: &[&str] = &[
    "x402",
    "ap2",
    "agent payments protocol",
    "universal commerce protocol",
    "ucp",
];

const AGENT_PROTOCOLS: &[&str] = &[
    "model context protocol",
    "mcp server",
    "mcp endpoint",
    "a2a",
    "agent2agent",
    "agent-to-agent",
];

const STRUCTURED_API: &[&str] = &["json", "rest api", "restful", "graphql"];
const SDK_KEYWORDS: &[&str] = &["sdk", "client library", "client libraries"];

const SANDBOX_KEYWORDS: &[&str] = &[
    "sandbox",
    "test mode",
    "test environment",
    "test api key",
    "staging environment",
];

const RATE_LIMIT_KEYWORDS: &[&str] = &[
    "rate limit",
    "rate-limit",
    "rate limiting",
    "429",
    "retry-after",
    "error code",
    "error handling",
    "idempotency",
];

const PRICE_SIGNALS: &[&str] = &["$", "\u{20ac}", "\u{a3}", "per month", "/mo", "per year", "pricing"];

const SPEND_CONTROL_KEYWORDS: &[&str] = &[
    "spending limit",
    "spend limit",
    "usage cap",
    "usage limit",
    "budget alert",
    "billing alert",
    "hard cap",
    "quota",
];

const SLA_KEYWORDS: &[&str] = &[
    "service level agreement",
    "uptime guarantee",
    "uptime sla",
    "99.9",
    "99.95",
    "99.99",
];
const SLA_PAGES: &[&str] = &["/status", "/sla", "://status."];

const TOS_PAGES: &[&str] = &["/terms", "/terms-of-service", "/tos", "/legal"];
const ANTI_BOT: &[&str] = &[
    "no bots",
    "no automated access",
    "automated access is prohibited",
    "scraping is prohibited",
    "prohibit automated",
    "use of bots is prohibited",
    "must not use any robot",
];
const PRO_AUTOMATION: &[&str] = &[
    "automated access is permitted",
    "api access is permitted",
    "agents are permitted",
    "bots are permitted",
    "automated agents may",
];

/// Well-known locations for a machine-readable API description.
const SPEC_PROBE_PATHS: &[&str] = &[
    "/openapi.json",
    "/swagger.json",
    "/api/openapi.json",
    "/.well-known/openapi.json",
];

// ============================================================================
// Spec probes
// ============================================================================

/// Results of the direct machine-readable-spec fetches, gathered once before
/// the table is evaluated. These are the only network calls the rubric makes.
#[derive(Debug, Default)]
pub struct SpecProbes {
    /// Well-known spec path that answered with JSON carrying an "openapi"
    /// field, if any.
    pub openapi_at: Option<String>,
}

impl SpecProbes {
    /// Short single-shot fetches: a slow or absent spec endpoint costs a few
    /// seconds at most and never retries.
    pub async fn gather(fetcher: &Fetcher, origin: &Origin) -> Self {
        let mut probes = Self::default();

        for path in SPEC_PROBE_PATHS {
            let url = origin.join(path);
            if let Some(page) = fetcher.probe(&url).await
                && page.status < 400
                && let Ok(value) = serde_json::from_str::<Value>(&page.body)
                && value.get("openapi").is_some()
            {
                debug!("Live OpenAPI document at {}", url);
                probes.openapi_at = Some(url);
                break;
            }
        }

        probes
    }
}

// ============================================================================
// Signal table
// ============================================================================

/// What an evaluator hands back. The runner combines it with the table row,
/// clamping the score to the row's max.
#[derive(Debug, Default)]
pub struct SignalOutcome {
    pub score: u8,
    pub findings: Vec<String>,
    pub friction_type: FrictionType,
    pub friction_note: Option<String>,
}

/// One rubric signal: a named, weighted evaluator over the corpus and the
/// probe results.
pub struct SignalSpec {
    pub name: &'static str,
    pub category: Category,
    pub max_points: u8,
    pub eval: fn(&Corpus, &SpecProbes) -> SignalOutcome,
}

/// The whole rubric as data. Adding or re-weighting a signal is an edit to
/// this table, not to control flow.
pub const SIGNALS: &[SignalSpec] = &[
    // DISCOVERY
    SignalSpec {
        name: "Public API documentation",
        category: Category::Discovery,
        max_points: 3,
        eval: eval_api_docs,
    },
    SignalSpec {
        name: "Machine-readable pricing",
        category: Category::Discovery,
        max_points: 3,
        eval: eval_pricing_data,
    },
    SignalSpec {
        name: "Directory and marketplace presence",
        category: Category::Discovery,
        max_points: 2,
        eval: eval_directory_listings,
    },
    SignalSpec {
        name: "OpenAPI specification",
        category: Category::Discovery,
        max_points: 2,
        eval: eval_openapi_spec,
    },
    // PURCHASE
    SignalSpec {
        name: "Programmatic signup",
        category: Category::Purchase,
        max_points: 2,
        eval: eval_signup,
    },
    SignalSpec {
        name: "CAPTCHA absence",
        category: Category::Purchase,
        max_points: 2,
        eval: eval_captcha,
    },
    SignalSpec {
        name: "Usage-based billing",
        category: Category::Purchase,
        max_points: 2,
        eval: eval_usage_billing,
    },
    SignalSpec {
        name: "Crypto and stablecoin payments",
        category: Category::Purchase,
        max_points: 2,
        eval: eval_crypto_payments,
    },
    SignalSpec {
        name: "Agent payment protocols",
        category: Category::Purchase,
        max_points: 2,
        eval: eval_agent_payments,
    },
    // INTEGRATION
    SignalSpec {
        name: "MCP or A2A support",
        category: Category::Integration,
        max_points: 3,
        eval: eval_agent_protocols,
    },
    SignalSpec {
        name: "Structured JSON output",
        category: Category::Integration,
        max_points: 3,
        eval: eval_structured_output,
    },
    SignalSpec {
        name: "Sandbox environment",
        category: Category::Integration,
        max_points: 2,
        eval: eval_sandbox,
    },
    SignalSpec {
        name: "Rate limits and error handling docs",
        category: Category::Integration,
        max_points: 2,
        eval: eval_rate_limits,
    },
    // TRUST
    SignalSpec {
        name: "Pricing transparency",
        category: Category::Trust,
        max_points: 3,
        eval: eval_pricing_transparency,
    },
    SignalSpec {
        name: "Spend controls",
        category: Category::Trust,
        max_points: 3,
        eval: eval_spend_controls,
    },
    SignalSpec {
        name: "SLA and uptime guarantees",
        category: Category::Trust,
        max_points: 2,
        eval: eval_sla,
    },
    SignalSpec {
        name: "Terms of service automation stance",
        category: Category::Trust,
        max_points: 2,
        eval: eval_tos,
    },
];

/// Evaluate the full table, grouped into the four categories in rubric order.
pub fn evaluate(corpus: &Corpus, probes: &SpecProbes) -> Vec<CategoryScore> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let subs = SIGNALS
                .iter()
                .filter(|s| s.category == category)
                .map(|s| {
                    let out = (s.eval)(corpus, probes);
                    SubScore {
                        name: s.name.to_string(),
                        max_points: s.max_points,
                        score: out.score.min(s.max_points),
                        findings: out.findings,
                        friction_type: out.friction_type,
                        friction_note: out.friction_note,
                    }
                })
                .collect();
            CategoryScore::from_sub_scores(category.name(), category.description(), subs)
        })
        .collect()
}

fn first_hit<'a>(haystack: &str, needles: &[&'a str]) -> Option<&'a str> {
    needles.iter().find(|n| haystack.contains(*n)).copied()
}

// ============================================================================
// DISCOVERY evaluators
// ============================================================================

fn eval_api_docs(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, API_DOCS_TEXT) {
        out.score += 1;
        out.findings
            .push(format!("Documentation language in page text (\"{}\")", hit));
    }
    if let Some(hit) = first_hit(&corpus.links, API_DOCS_LINKS) {
        out.score += 1;
        out.findings
            .push(format!("Links point at developer docs (\"{}\")", hit));
    }
    if let Some(key) = corpus.first_page(DOCS_PAGES) {
        out.score += 1;
        out.findings
            .push(format!("Documentation page crawled directly ({})", key));
    }
    if out.findings.is_empty() {
        out.findings
            .push("No public API documentation signals found".to_string());
    }
    out
}

fn eval_pricing_data(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    // Structured data alone maxes this signal
    if corpus.text_has("schema.org") && corpus.text_has_any(STRUCTURED_PRICING_MARKERS) {
        out.score = 3;
        out.findings
            .push("schema.org structured pricing data present".to_string());
        return out;
    }

    if let Some(key) = corpus.first_page(PRICING_PAGES) {
        out.score += 2;
        out.findings
            .push(format!("Pricing page crawled directly ({})", key));
    }
    if let Some(hit) = first_hit(&corpus.text, PRICING_TEXT) {
        out.score += 1;
        out.findings
            .push(format!("Pricing language in page text (\"{}\")", hit));
    }
    if out.findings.is_empty() {
        out.findings
            .push("No machine-readable pricing signals found".to_string());
    }
    out
}

fn eval_directory_listings(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    let hits: Vec<&str> = DIRECTORY_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| corpus.text_has(kw) || corpus.links.contains(kw))
        .collect();

    out.score = hits.len().min(2) as u8;
    for hit in &hits {
        out.findings
            .push(format!("Directory/marketplace mention (\"{}\")", hit));
    }
    if hits.is_empty() {
        out.findings
            .push("No directory or marketplace mentions found".to_string());
    }
    out
}

fn eval_openapi_spec(corpus: &Corpus, probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    // Either evidence path maxes this signal
    if let Some(url) = &probes.openapi_at {
        out.score = 2;
        out.findings
            .push(format!("Live OpenAPI document served at {}", url));
        return out;
    }

    if let Some(hit) = first_hit(&corpus.text, OPENAPI_KEYWORDS)
        .or_else(|| first_hit(&corpus.links, OPENAPI_KEYWORDS))
    {
        out.score = 2;
        out.findings
            .push(format!("API spec tooling mentioned (\"{}\")", hit));
    } else {
        out.findings
            .push("No OpenAPI or Swagger evidence found".to_string());
    }
    out
}

// ============================================================================
// PURCHASE evaluators
// ============================================================================

/// Friction-classification anchor: regulatory gates cost half the signal,
/// sales-mediated onboarding costs all of it.
fn eval_signup(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, KYC_KEYWORDS) {
        out.score = 1;
        out.friction_type = FrictionType::Regulatory;
        out.friction_note = Some(
            "Identity verification (KYC/AML) gates signup - a legal requirement, not a design choice"
                .to_string(),
        );
        out.findings
            .push(format!("Identity-verification language found (\"{}\")", hit));
        return out;
    }

    let self_serve = first_hit(&corpus.text, SELF_SERVE);
    if let Some(hit) = first_hit(&corpus.text, CONTACT_SALES)
        && self_serve.is_none()
    {
        out.score = 0;
        out.friction_type = FrictionType::Voluntary;
        out.friction_note =
            Some("Manual onboarding only (\"contact sales\") - agents are blocked by choice".to_string());
        out.findings.push(format!(
            "Sales-mediated onboarding language found (\"{}\") with no self-serve path",
            hit
        ));
        return out;
    }

    if let Some(hit) = self_serve {
        out.score = 2;
        out.findings
            .push(format!("Self-serve signup language found (\"{}\")", hit));
    } else {
        out.findings.push("No signup signals found".to_string());
    }
    out
}

fn eval_captcha(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    // Absence is only evidence when there were pages to look at
    if corpus.is_empty() {
        out.findings
            .push("No pages crawled; CAPTCHA posture unknown".to_string());
        return out;
    }

    if let Some(hit) = first_hit(&corpus.text, CAPTCHA_VENDORS) {
        out.score = 0;
        out.friction_type = FrictionType::Voluntary;
        out.friction_note =
            Some("CAPTCHA challenges block automated signup by choice".to_string());
        out.findings
            .push(format!("CAPTCHA vendor fingerprint found (\"{}\")", hit));
    } else {
        out.score = 2;
        out.findings
            .push("No CAPTCHA fingerprints anywhere in the crawl".to_string());
    }
    out
}

fn eval_usage_billing(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, METERED_BILLING) {
        out.score = 2;
        out.findings
            .push(format!("Metered billing language found (\"{}\")", hit));
    } else if let Some(hit) = first_hit(&corpus.text, SUBSCRIPTION_BILLING) {
        out.score = 1;
        out.findings.push(format!(
            "Only traditional subscription language found (\"{}\")",
            hit
        ));
    } else {
        out.findings.push("No billing model signals found".to_string());
    }
    out
}

fn eval_crypto_payments(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, CRYPTO_PAYMENT) {
        out.score = 2;
        out.findings
            .push(format!("Crypto/stablecoin payment mention (\"{}\")", hit));
    } else {
        out.findings
            .push("No crypto payment acceptance found".to_string());
    }
    out
}

fn eval_agent_payments(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, AGENT_PAYMENT_PROTOCOLS) {
        out.score = 2;
        out.findings
            .push(format!("Agent payment protocol mention (\"{}\")", hit));
    } else {
        out.findings
            .push("No agent payment protocol support found".to_string());
    }
    out
}

// ============================================================================
// INTEGRATION evaluators
// ============================================================================

fn eval_agent_protocols(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, AGENT_PROTOCOLS)
        .or_else(|| first_hit(&corpus.links, AGENT_PROTOCOLS))
    {
        out.score = 3;
        out.findings
            .push(format!("Agent protocol support mentioned (\"{}\")", hit));
    } else {
        out.findings
            .push("No MCP or A2A support found".to_string());
    }
    out
}

fn eval_structured_output(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, STRUCTURED_API) {
        out.score += 2;
        out.findings
            .push(format!("Structured API language found (\"{}\")", hit));
    }
    if let Some(hit) = first_hit(&corpus.text, SDK_KEYWORDS) {
        out.score += 1;
        out.findings
            .push(format!("Client tooling mentioned (\"{}\")", hit));
    }
    if out.findings.is_empty() {
        out.findings
            .push("No structured output signals found".to_string());
    }
    out
}

fn eval_sandbox(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, SANDBOX_KEYWORDS) {
        out.score = 2;
        out.findings
            .push(format!("Test environment mentioned (\"{}\")", hit));
    } else {
        out.findings
            .push("No sandbox or test environment found".to_string());
    }
    out
}

fn eval_rate_limits(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, RATE_LIMIT_KEYWORDS) {
        out.score = 2;
        out.findings.push(format!(
            "Rate limit / error handling documentation (\"{}\")",
            hit
        ));
    } else {
        out.findings
            .push("No rate limit or error handling docs found".to_string());
    }
    out
}

// ============================================================================
// TRUST evaluators
// ============================================================================

fn eval_pricing_transparency(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    let price = first_hit(&corpus.text, PRICE_SIGNALS);
    let contact = first_hit(&corpus.text, CONTACT_SALES);

    match (price, contact) {
        (Some(hit), None) => {
            out.score = 3;
            out.findings
                .push(format!("Visible pricing with no sales gate (\"{}\")", hit));
        }
        (Some(hit), Some(_)) => {
            // Enterprise upsell tier atop a transparent base
            out.score = 2;
            out.findings.push(format!(
                "Public pricing (\"{}\") alongside a sales-mediated tier",
                hit
            ));
        }
        (None, Some(hit)) => {
            out.score = 0;
            out.findings.push(format!(
                "Sales-gated pricing only (\"{}\"), no visible price terms",
                hit
            ));
        }
        (None, None) => {
            out.score = 0;
            out.findings.push("No pricing signals found".to_string());
        }
    }
    out
}

fn eval_spend_controls(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, SPEND_CONTROL_KEYWORDS) {
        out.score = 3;
        out.findings
            .push(format!("Spend control language found (\"{}\")", hit));
    } else {
        out.findings
            .push("No spend controls or usage caps found".to_string());
    }
    out
}

fn eval_sla(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    if let Some(hit) = first_hit(&corpus.text, SLA_KEYWORDS) {
        out.score = 2;
        out.findings
            .push(format!("Uptime/SLA language found (\"{}\")", hit));
    } else if let Some(key) = corpus.first_page(SLA_PAGES) {
        out.score = 2;
        out.findings
            .push(format!("Status/SLA page crawled directly ({})", key));
    } else {
        out.findings
            .push("No SLA or uptime guarantees found".to_string());
    }
    out
}

fn eval_tos(corpus: &Corpus, _probes: &SpecProbes) -> SignalOutcome {
    let mut out = SignalOutcome::default();

    // Anti-bot language zeroes the signal regardless of the page's existence
    if let Some(hit) = first_hit(&corpus.text, ANTI_BOT) {
        out.score = 0;
        out.findings
            .push(format!("Anti-automation language in terms (\"{}\")", hit));
        return out;
    }

    if let Some(key) = corpus.first_page(TOS_PAGES) {
        out.score = 1;
        out.findings
            .push(format!("Terms of service locatable ({})", key));

        if let Some(hit) = first_hit(&corpus.text, PRO_AUTOMATION) {
            out.score = 2;
            out.findings.push(format!(
                "Terms explicitly permit automated access (\"{}\")",
                hit
            ));
        }
    } else {
        out.findings
            .push("No terms-of-service page found".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchedPage;

    fn corpus_with_text(text: &str) -> Corpus {
        corpus_with_page("/", text)
    }

    fn corpus_with_page(key: &str, body: &str) -> Corpus {
        let mut corpus = Corpus {
            text: body.to_lowercase(),
            ..Corpus::default()
        };
        corpus.pages.insert(
            key.to_string(),
            FetchedPage {
                body: body.to_string(),
                status: 200,
            },
        );
        corpus
    }

    // ========================================================================
    // Table shape
    // ========================================================================

    #[test]
    fn test_table_has_seventeen_signals() {
        assert_eq!(SIGNALS.len(), 17);
    }

    #[test]
    fn test_each_category_maxes_at_ten() {
        for category in Category::ALL {
            let max: u8 = SIGNALS
                .iter()
                .filter(|s| s.category == category)
                .map(|s| s.max_points)
                .sum();
            assert_eq!(max, 10, "category {} sums to {}", category.name(), max);
        }
    }

    #[test]
    fn test_signal_names_unique() {
        let mut names: Vec<&str> = SIGNALS.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SIGNALS.len());
    }

    // ========================================================================
    // Friction classification (the anchor semantics)
    // ========================================================================

    #[test]
    fn test_kyc_scores_half_with_regulatory_friction() {
        let corpus = corpus_with_text("Signup requires identity verification to comply with KYC.");
        let out = eval_signup(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 1);
        assert_eq!(out.friction_type, FrictionType::Regulatory);
        assert!(out.friction_note.is_some());
    }

    #[test]
    fn test_contact_sales_only_scores_zero_with_voluntary_friction() {
        let corpus = corpus_with_text("Contact sales to get onboarded.");
        let out = eval_signup(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 0);
        assert_eq!(out.friction_type, FrictionType::Voluntary);
        assert!(out.friction_note.is_some());
    }

    #[test]
    fn test_contact_sales_with_self_serve_still_scores() {
        let corpus =
            corpus_with_text("Sign up for free, or contact sales for enterprise volume.");
        let out = eval_signup(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
        assert_eq!(out.friction_type, FrictionType::None);
    }

    #[test]
    fn test_kyc_takes_precedence_over_contact_sales() {
        let corpus = corpus_with_text("Contact sales. Identity verification required by AML law.");
        let out = eval_signup(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 1);
        assert_eq!(out.friction_type, FrictionType::Regulatory);
    }

    #[test]
    fn test_no_signals_scores_zero_without_friction() {
        let corpus = corpus_with_text("We make widgets.");
        let out = eval_signup(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 0);
        assert_eq!(out.friction_type, FrictionType::None);
        assert!(out.friction_note.is_none());
    }

    #[test]
    fn test_captcha_vendor_zeroes_signal() {
        let corpus = corpus_with_text("Protected by reCAPTCHA.");
        let out = eval_captcha(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 0);
        assert_eq!(out.friction_type, FrictionType::Voluntary);
    }

    #[test]
    fn test_no_captcha_keeps_full_points() {
        let corpus = corpus_with_text("Sign up with your email.");
        let out = eval_captcha(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
        assert_eq!(out.friction_type, FrictionType::None);
    }

    // ========================================================================
    // Discovery signals
    // ========================================================================

    #[test]
    fn test_api_docs_evidence_is_additive() {
        let mut corpus = corpus_with_page("/docs", "Read our API documentation.");
        corpus.links = "https://acme.com/docs\n".to_string();
        let out = eval_api_docs(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 3);
        assert_eq!(out.findings.len(), 3);
    }

    #[test]
    fn test_structured_pricing_alone_maxes_signal() {
        let corpus = corpus_with_text(
            r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Offer","price":"10"}</script>"#,
        );
        let out = eval_pricing_data(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 3);
    }

    #[test]
    fn test_pricing_page_plus_keywords() {
        let corpus = corpus_with_page("/pricing", "Simple pricing: $10 per month.");
        let out = eval_pricing_data(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 3);
    }

    #[test]
    fn test_directory_hits_capped_at_two() {
        let corpus =
            corpus_with_text("Find us on Zapier, the app store, Product Hunt, and our marketplace.");
        let out = eval_directory_listings(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
        assert!(out.findings.len() >= 3);
    }

    #[test]
    fn test_live_openapi_probe_maxes_signal() {
        let corpus = corpus_with_text("We make widgets.");
        let probes = SpecProbes {
            openapi_at: Some("https://acme.com/openapi.json".to_string()),
        };
        let out = eval_openapi_spec(&corpus, &probes);

        assert_eq!(out.score, 2);
    }

    #[test]
    fn test_openapi_keyword_alone_maxes_signal() {
        let corpus = corpus_with_text("Download our OpenAPI spec.");
        let out = eval_openapi_spec(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
    }

    // ========================================================================
    // Purchase signals
    // ========================================================================

    #[test]
    fn test_metered_billing_beats_subscription() {
        let corpus = corpus_with_text("Pay as you go, or $20 per month.");
        let out = eval_usage_billing(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
    }

    #[test]
    fn test_subscription_only_scores_one() {
        let corpus = corpus_with_text("Plans from $20 per month.");
        let out = eval_usage_billing(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 1);
    }

    #[test]
    fn test_stablecoin_acceptance() {
        let corpus = corpus_with_text("We accept USDC.");
        let out = eval_crypto_payments(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
    }

    #[test]
    fn test_x402_protocol() {
        let corpus = corpus_with_text("Pay per request over x402.");
        let out = eval_agent_payments(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
    }

    // ========================================================================
    // Integration signals
    // ========================================================================

    #[test]
    fn test_mcp_support_scores_three() {
        let corpus = corpus_with_text("Connect via our MCP server.");
        let out = eval_agent_protocols(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 3);
    }

    #[test]
    fn test_structured_output_additive_with_sdk() {
        let corpus = corpus_with_text("A REST API returning JSON, with an official SDK.");
        let out = eval_structured_output(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 3);
    }

    #[test]
    fn test_structured_output_without_sdk() {
        let corpus = corpus_with_text("A GraphQL endpoint.");
        let out = eval_structured_output(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
    }

    // ========================================================================
    // Trust signals
    // ========================================================================

    #[test]
    fn test_transparent_pricing_scores_three() {
        let corpus = corpus_with_text("Plans start at $5 per month.");
        let out = eval_pricing_transparency(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 3);
    }

    #[test]
    fn test_pricing_with_sales_tier_scores_two() {
        let corpus = corpus_with_text("Pro is $50 per month; contact sales for enterprise.");
        let out = eval_pricing_transparency(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
    }

    #[test]
    fn test_sales_only_pricing_scores_zero() {
        let corpus = corpus_with_text("Contact sales for a quote.");
        let out = eval_pricing_transparency(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 0);
    }

    #[test]
    fn test_sla_from_crawled_status_page() {
        let corpus = corpus_with_page("/status", "All systems operational.");
        let out = eval_sla(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
    }

    #[test]
    fn test_tos_page_alone_scores_one() {
        let corpus = corpus_with_page("/terms", "These are our terms of service.");
        let out = eval_tos(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 1);
    }

    #[test]
    fn test_tos_permitting_automation_scores_two() {
        let corpus = corpus_with_page("/terms", "Automated access is permitted via the API.");
        let out = eval_tos(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 2);
    }

    #[test]
    fn test_anti_bot_language_zeroes_tos_even_with_page() {
        let corpus = corpus_with_page("/terms", "Scraping is prohibited. No bots.");
        let out = eval_tos(&corpus, &SpecProbes::default());

        assert_eq!(out.score, 0);
    }

    // ========================================================================
    // Full evaluation
    // ========================================================================

    #[test]
    fn test_evaluate_produces_four_capped_categories() {
        let corpus = corpus_with_page(
            "/docs",
            "API documentation, OpenAPI spec, JSON REST API with an SDK, sandbox, \
             rate limits, sign up free, pay as you go at $1 per request, USDC accepted, \
             x402 supported, MCP server, spending limits, 99.99 uptime guarantee, \
             listed on Zapier and Product Hunt marketplace.",
        );
        let categories = evaluate(&corpus, &SpecProbes::default());

        assert_eq!(categories.len(), 4);
        for category in &categories {
            assert!(category.score <= category.max_points);
            assert_eq!(category.max_points, 10);
        }
        let total: u8 = categories.iter().map(|c| c.score).sum();
        assert!(total <= 40);
        assert!(total >= 25, "rich corpus should score well, got {}", total);
    }

    #[test]
    fn test_empty_corpus_scores_zero() {
        let categories = evaluate(&Corpus::default(), &SpecProbes::default());

        let total: u8 = categories.iter().map(|c| c.score).sum();
        assert_eq!(total, 0);
    }
}
