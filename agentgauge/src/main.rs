use agentgauge::commands::command_argument_builder;
use agentgauge::handlers::{handle_score, handle_signals};
use agentgauge_core::print_banner;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    match chosen_command.subcommand() {
        Some(("score", sub_matches)) => {
            if let Err(e) = handle_score(sub_matches).await {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
        }
        Some(("signals", _)) => handle_signals(),
        None => {
            // No subcommand provided, just show the banner
        }
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
