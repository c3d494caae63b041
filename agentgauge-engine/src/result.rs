use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CATEGORY_MAX: u8 = 10;
pub const TOTAL_MAX: u8 = 40;

/// Why a purchase/signup obstacle exists. Regulatory friction is a legal
/// necessity and costs half a signal; voluntary friction is a design choice
/// and forfeits the whole signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrictionType {
    Voluntary,
    Regulatory,
    #[default]
    None,
}

/// One rubric signal's independent evaluation: points plus the evidence
/// strings that justify them. Produced by exactly one evaluator and immutable
/// once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubScore {
    pub name: String,
    pub max_points: u8,
    pub score: u8,
    pub findings: Vec<String>,
    pub friction_type: FrictionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friction_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub description: String,
    pub max_points: u8,
    pub score: u8,
    pub sub_scores: Vec<SubScore>,
}

impl CategoryScore {
    /// Sub-scores are additive, but a category never exceeds its cap even
    /// when its signals could sum higher.
    pub fn from_sub_scores(name: &str, description: &str, sub_scores: Vec<SubScore>) -> Self {
        let sum: u8 = sub_scores.iter().map(|s| s.score).sum();
        Self {
            name: name.to_string(),
            description: description.to_string(),
            max_points: CATEGORY_MAX,
            score: sum.min(CATEGORY_MAX),
            sub_scores,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Pure function of the total score.
    pub fn from_total(total: u8) -> Self {
        match total {
            35.. => Grade::A,
            28..=34 => Grade::B,
            20..=27 => Grade::C,
            10..=19 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Friction notes from every sub-score, partitioned by why the obstacle
/// exists. `agent_ready_pending` flags products that would score higher once
/// agent-identity infrastructure matures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrictionSummary {
    pub voluntary_friction: Vec<String>,
    pub regulatory_friction: Vec<String>,
    pub agent_ready_pending: bool,
}

impl FrictionSummary {
    pub fn collect(categories: &[CategoryScore]) -> Self {
        let mut voluntary = Vec::new();
        let mut regulatory = Vec::new();

        for sub in categories.iter().flat_map(|c| &c.sub_scores) {
            if let Some(note) = &sub.friction_note {
                match sub.friction_type {
                    FrictionType::Voluntary => voluntary.push(note.clone()),
                    FrictionType::Regulatory => regulatory.push(note.clone()),
                    FrictionType::None => {}
                }
            }
        }

        Self {
            agent_ready_pending: !regulatory.is_empty(),
            voluntary_friction: voluntary,
            regulatory_friction: regulatory,
        }
    }
}

/// The sole artifact a scoring run hands to callers. Immutable after
/// construction; the engine itself never stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResult {
    pub id: Uuid,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub total_score: u8,
    pub max_score: u8,
    pub grade: Grade,
    pub categories: Vec<CategoryScore>,
    pub friction_summary: FrictionSummary,
    pub crawled_pages: Vec<String>,
    pub errors: Vec<String>,
}

impl ScoringResult {
    pub fn assemble(
        url: &str,
        categories: Vec<CategoryScore>,
        crawled_pages: Vec<String>,
        errors: Vec<String>,
    ) -> Self {
        let total_score = categories.iter().map(|c| c.score).sum::<u8>().min(TOTAL_MAX);
        let friction_summary = FrictionSummary::collect(&categories);

        Self {
            id: Uuid::new_v4(),
            url: url.to_string(),
            timestamp: Utc::now(),
            total_score,
            max_score: TOTAL_MAX,
            grade: Grade::from_total(total_score),
            categories,
            friction_summary,
            crawled_pages,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(name: &str, max: u8, score: u8) -> SubScore {
        SubScore {
            name: name.to_string(),
            max_points: max,
            score,
            findings: vec![],
            friction_type: FrictionType::None,
            friction_note: None,
        }
    }

    fn sub_with_friction(friction_type: FrictionType, note: &str) -> SubScore {
        SubScore {
            friction_type,
            friction_note: Some(note.to_string()),
            ..sub("signal", 2, 0)
        }
    }

    // ========================================================================
    // Category aggregation
    // ========================================================================

    #[test]
    fn test_category_score_sums_sub_scores() {
        let category =
            CategoryScore::from_sub_scores("DISCOVERY", "", vec![sub("a", 3, 2), sub("b", 2, 1)]);
        assert_eq!(category.score, 3);
    }

    #[test]
    fn test_category_score_caps_at_ten() {
        let subs = vec![sub("a", 3, 3), sub("b", 3, 3), sub("c", 3, 3), sub("d", 3, 3)];
        let category = CategoryScore::from_sub_scores("PURCHASE", "", subs);
        assert_eq!(category.score, CATEGORY_MAX);
    }

    // ========================================================================
    // Grade boundaries
    // ========================================================================

    #[test]
    fn test_grade_boundaries_exact() {
        assert_eq!(Grade::from_total(40), Grade::A);
        assert_eq!(Grade::from_total(35), Grade::A);
        assert_eq!(Grade::from_total(34), Grade::B);
        assert_eq!(Grade::from_total(28), Grade::B);
        assert_eq!(Grade::from_total(27), Grade::C);
        assert_eq!(Grade::from_total(20), Grade::C);
        assert_eq!(Grade::from_total(19), Grade::D);
        assert_eq!(Grade::from_total(10), Grade::D);
        assert_eq!(Grade::from_total(9), Grade::F);
        assert_eq!(Grade::from_total(0), Grade::F);
    }

    // ========================================================================
    // Friction summary
    // ========================================================================

    #[test]
    fn test_friction_summary_partitions_notes() {
        let categories = vec![CategoryScore::from_sub_scores(
            "PURCHASE",
            "",
            vec![
                sub_with_friction(FrictionType::Regulatory, "KYC gate"),
                sub_with_friction(FrictionType::Voluntary, "CAPTCHA wall"),
                sub("plain", 2, 2),
            ],
        )];

        let summary = FrictionSummary::collect(&categories);

        assert_eq!(summary.regulatory_friction, vec!["KYC gate"]);
        assert_eq!(summary.voluntary_friction, vec!["CAPTCHA wall"]);
        assert!(summary.agent_ready_pending);
    }

    #[test]
    fn test_agent_ready_pending_requires_regulatory_note() {
        let categories = vec![CategoryScore::from_sub_scores(
            "PURCHASE",
            "",
            vec![sub_with_friction(FrictionType::Voluntary, "CAPTCHA wall")],
        )];

        let summary = FrictionSummary::collect(&categories);

        assert!(!summary.agent_ready_pending);
    }

    // ========================================================================
    // Result assembly
    // ========================================================================

    #[test]
    fn test_total_is_sum_of_categories() {
        let categories = vec![
            CategoryScore::from_sub_scores("DISCOVERY", "", vec![sub("a", 10, 7)]),
            CategoryScore::from_sub_scores("PURCHASE", "", vec![sub("b", 10, 5)]),
        ];

        let result = ScoringResult::assemble("https://acme.com", categories, vec![], vec![]);

        assert_eq!(result.total_score, 12);
        assert_eq!(result.max_score, TOTAL_MAX);
        assert_eq!(result.grade, Grade::D);
    }

    #[test]
    fn test_result_serializes_round_trip() {
        let categories = vec![CategoryScore::from_sub_scores(
            "TRUST",
            "desc",
            vec![sub("a", 2, 1)],
        )];
        let result =
            ScoringResult::assemble("https://acme.com", categories, vec!["/".into()], vec![]);

        let json = serde_json::to_string(&result).unwrap();
        let back: ScoringResult = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, result.id);
        assert_eq!(back.total_score, result.total_score);
        assert_eq!(back.categories.len(), 1);
    }
}
