// Report generation from scoring results

use agentgauge_engine::{FrictionType, ScoringResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

const DIVIDER: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

pub fn generate_text_report(result: &ScoringResult) -> String {
    let mut report = String::new();

    // Header
    report.push_str(DIVIDER);
    report.push_str("                      AGENTGAUGE READINESS REPORT\n");
    report.push_str(DIVIDER);
    report.push('\n');

    report.push_str(&format!("Target:        {}\n", result.url));
    report.push_str(&format!("Report ID:     {}\n", result.id));
    report.push_str(&format!(
        "Scored At:     {}\n",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str(&format!("Pages Crawled: {}\n", result.crawled_pages.len()));
    report.push('\n');

    report.push_str(&format!(
        "GRADE: {}   ({}/{} points)\n",
        result.grade, result.total_score, result.max_score
    ));
    report.push('\n');

    // Category summary
    report.push_str(DIVIDER);
    report.push_str("SCORE SUMMARY\n");
    report.push_str(DIVIDER);
    report.push('\n');
    for category in &result.categories {
        report.push_str(&format!(
            "  {:<13} {:>2}/{:<3} {}\n",
            category.name, category.score, category.max_points, category.description
        ));
    }
    report.push('\n');

    // Detailed signals
    report.push_str(DIVIDER);
    report.push_str("DETAILED SIGNALS\n");
    report.push_str(DIVIDER);
    report.push('\n');

    for category in &result.categories {
        for sub in &category.sub_scores {
            report.push_str(&format!(
                "[{}] {}  {}/{}\n",
                category.name, sub.name, sub.score, sub.max_points
            ));
            for finding in &sub.findings {
                report.push_str(&format!("  - {}\n", finding));
            }
            if let Some(note) = &sub.friction_note {
                let label = match sub.friction_type {
                    FrictionType::Regulatory => "regulatory friction",
                    FrictionType::Voluntary => "voluntary friction",
                    FrictionType::None => "friction",
                };
                report.push_str(&format!("  ! {}: {}\n", label, note));
            }
            report.push('\n');
        }
    }

    // Friction summary
    let friction = &result.friction_summary;
    if !friction.voluntary_friction.is_empty() || !friction.regulatory_friction.is_empty() {
        report.push_str(DIVIDER);
        report.push_str("FRICTION SUMMARY\n");
        report.push_str(DIVIDER);
        report.push('\n');

        if !friction.voluntary_friction.is_empty() {
            report.push_str("Voluntary (design choices that block agents):\n");
            for note in &friction.voluntary_friction {
                report.push_str(&format!("  - {}\n", note));
            }
            report.push('\n');
        }
        if !friction.regulatory_friction.is_empty() {
            report.push_str("Regulatory (legal requirements, half penalty):\n");
            for note in &friction.regulatory_friction {
                report.push_str(&format!("  - {}\n", note));
            }
            report.push('\n');
        }
        if friction.agent_ready_pending {
            report.push_str(
                "This product is agent-ready-pending: it would score higher once\n\
                 agent-identity infrastructure matures.\n\n",
            );
        }
    }

    // Errors
    if !result.errors.is_empty() {
        report.push_str("Errors:\n");
        for error in &result.errors {
            report.push_str(&format!("  - {}\n", error));
        }
        report.push('\n');
    }

    // Footer
    report.push_str(DIVIDER);
    report.push_str("                            End of Report\n");
    report.push_str(DIVIDER);
    report.push_str("\nGenerated by agentgauge - heuristic signals, not a compliance audit.\n");

    report
}

pub fn generate_json_report(result: &ScoringResult) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "agentgauge",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json",
            },
            "result": result,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(result: &ScoringResult) -> String {
    let mut report = String::new();

    report.push_str(&format!("# Agent readiness: {}\n\n", result.url));
    report.push_str(&format!(
        "**Grade {}** - {}/{} points - {} pages crawled - {}\n\n",
        result.grade,
        result.total_score,
        result.max_score,
        result.crawled_pages.len(),
        result.timestamp.format("%Y-%m-%d")
    ));

    report.push_str("| Category | Score | Question |\n");
    report.push_str("|---|---|---|\n");
    for category in &result.categories {
        report.push_str(&format!(
            "| {} | {}/{} | {} |\n",
            category.name, category.score, category.max_points, category.description
        ));
    }
    report.push('\n');

    for category in &result.categories {
        report.push_str(&format!("## {}\n\n", category.name));
        for sub in &category.sub_scores {
            report.push_str(&format!(
                "### {} ({}/{})\n\n",
                sub.name, sub.score, sub.max_points
            ));
            for finding in &sub.findings {
                report.push_str(&format!("- {}\n", finding));
            }
            if let Some(note) = &sub.friction_note {
                report.push_str(&format!("- **Friction:** {}\n", note));
            }
            report.push('\n');
        }
    }

    let friction = &result.friction_summary;
    if friction.agent_ready_pending {
        report.push_str(
            "> Agent-ready pending: regulatory friction present; the score should rise \
             as agent-identity infrastructure matures.\n\n",
        );
    }

    if !result.errors.is_empty() {
        report.push_str("## Errors\n\n");
        for error in &result.errors {
            report.push_str(&format!("- {}\n", error));
        }
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
