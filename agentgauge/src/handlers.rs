use agentgauge_core::report::{
    ReportFormat, generate_json_report, generate_markdown_report, generate_text_report,
    save_report,
};
use agentgauge_engine::rubric::SIGNALS;
use agentgauge_engine::{CrawlConfig, Grade, Origin, ScoringEngine, ScoringResult};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Load scoring targets from either a hosts file or a single URL argument
pub fn load_targets_from_source(
    url: Option<&String>,
    hosts_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(hosts_file_path) = hosts_file {
        load_targets_from_file(hosts_file_path)
    } else if let Some(url) = url {
        Ok(vec![url.clone()])
    } else {
        Err("Either --url or --hosts-file must be provided".to_string())
    }
}

/// Load and normalize targets from a newline-delimited file
pub fn load_targets_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hosts file {}: {}", path.display(), e))?;

    let targets: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| normalize_target(line.trim()))
        .collect();

    if targets.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(targets)
}

/// Normalize a single line into an origin, skipping entries the engine
/// would reject anyway
pub fn normalize_target(line: &str) -> Option<String> {
    match Origin::parse(line) {
        Ok(origin) => Some(origin.as_str().to_string()),
        Err(e) => {
            eprintln!("⚠️  Skipping '{}': {}", line, e);
            None
        }
    }
}

pub fn render_report(result: &ScoringResult, format: &ReportFormat) -> Result<String> {
    let rendered = match format {
        ReportFormat::Text => generate_text_report(result),
        ReportFormat::Json => generate_json_report(result)?,
        ReportFormat::Markdown => generate_markdown_report(result),
    };
    Ok(rendered)
}

pub async fn handle_score(sub_matches: &ArgMatches) -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<String>("url");
    let hosts_file = sub_matches.get_one::<PathBuf>("hosts-file");
    let format_arg = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let output = sub_matches.get_one::<PathBuf>("output");
    let max_pages = *sub_matches.get_one::<usize>("max-pages").unwrap_or(&30);
    let user_agent = sub_matches.get_one::<String>("user-agent");

    let format = ReportFormat::from_str(format_arg)
        .ok_or_else(|| anyhow!("Unknown report format '{}'", format_arg))?;

    let targets = load_targets_from_source(url, hosts_file).map_err(|e| anyhow!(e))?;

    let mut engine = ScoringEngine::new().with_config(CrawlConfig {
        max_pages,
        ..CrawlConfig::default()
    });
    if let Some(ua) = user_agent {
        engine = engine.with_user_agent(ua);
    }

    for (idx, target) in targets.iter().enumerate() {
        if targets.len() > 1 {
            println!(
                "\nScoring host {}/{}: {}",
                idx + 1,
                targets.len(),
                target
            );
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("Crawling {}...", target));

        let scored = engine.score(target).await;
        spinner.finish_and_clear();

        match scored {
            Ok(result) => {
                print_summary(&result);

                let rendered = render_report(&result, &format)?;
                match output {
                    Some(path) => {
                        save_report(&rendered, path).with_context(|| {
                            format!("Failed to write report to {}", path.display())
                        })?;
                        println!("{} Report saved to {}", "✓".green().bold(), path.display());
                    }
                    None => print!("{}", rendered),
                }
            }
            Err(e) => {
                eprintln!("{} Failed to score {}: {}", "✗".red().bold(), target, e);
            }
        }
    }

    Ok(())
}

fn print_summary(result: &ScoringResult) {
    let grade = result.grade.to_string();
    let grade = match result.grade {
        Grade::A | Grade::B => grade.green().bold(),
        Grade::C => grade.yellow().bold(),
        Grade::D | Grade::F => grade.red().bold(),
    };

    println!(
        "\n{} scored {}/{} (grade {})",
        result.url.bright_white().bold(),
        result.total_score,
        result.max_score,
        grade
    );

    if result.friction_summary.agent_ready_pending {
        println!(
            "{}",
            "Agent-ready pending: regulatory friction detected".yellow()
        );
    }
    println!();
}

pub fn handle_signals() {
    println!(
        "{}",
        "Scoring rubric: 40 points across four categories"
            .bright_white()
            .bold()
    );

    let mut current = None;
    for signal in SIGNALS {
        if current != Some(signal.category) {
            current = Some(signal.category);
            println!(
                "\n{} - {}",
                signal.category.name().bright_cyan().bold(),
                signal.category.description()
            );
        }
        println!("  {:<42} {} pts", signal.name, signal.max_points);
    }
    println!();
}
