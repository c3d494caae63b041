pub mod report;

pub use report::{
    ReportFormat, generate_json_report, generate_markdown_report, generate_text_report,
    save_report,
};

use colored::Colorize;

pub fn print_banner() {
    let art = r#"
                          _
   __ _  __ _  ___  _ __ | |_ __ _  __ _ _   _  __ _  ___
  / _` |/ _` |/ _ \| '_ \| __/ _` |/ _` | | | |/ _` |/ _ \
 | (_| | (_| |  __/| | | | || (_| | (_| | |_| | (_| |  __/
  \__,_|\__, |\___||_| |_|\__\__, |\__,_|\__,_|\__, |\___|
        |___/                |___/             |___/
"#;
    println!("{}", art.bright_cyan());
    println!(
        "{}",
        "  how agent-ready is your product?".bright_white().bold()
    );
    println!();
}
