// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Haulchat - chat intake and quoting for a waste removal business.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use haulchat_config::model::HaulchatConfig;
use haulchat_intake::{ChatRequest, IntakeClassifier, Turn, synthesize};
use haulchat_quote::{MAX_ESTIMATED_YARDS, calculate_loads, is_quotable};

/// Haulchat - chat intake and quoting for a waste removal business.
#[derive(Parser, Debug)]
#[command(name = "haulchat", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Classify one chat message and print the reply JSON.
    Classify {
        /// The customer's message.
        message: String,
        /// The bot's previous utterance, used to infer the current stage.
        #[arg(long)]
        last_bot: Option<String>,
    },
    /// Print the load banding for an estimated volume in cubic yards.
    Loads {
        yards: f64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => {
            let config = load_config_or_exit(cli.config.as_deref());
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Classify { message, last_bot }) => {
            let config = load_config_or_exit(cli.config.as_deref());
            let classifier = serve::build_classifier(&config.intake);
            println!("{}", classify_json(&classifier, &message, last_bot.as_deref()));
        }
        Some(Commands::Loads { yards }) => {
            if !is_quotable(yards) {
                eprintln!("error: yards must be greater than 0 and at most {MAX_ESTIMATED_YARDS}");
                std::process::exit(1);
            }
            let loads = calculate_loads(yards);
            println!(
                "{}",
                serde_json::to_string_pretty(&loads).unwrap_or_default()
            );
        }
        None => {
            println!("haulchat: use --help for available commands");
        }
    }
}

/// Load and validate configuration, rendering diagnostics and exiting on failure.
fn load_config_or_exit(path: Option<&Path>) -> HaulchatConfig {
    let config = match path {
        Some(path) => haulchat_config::load_and_validate_path(path),
        None => haulchat_config::load_and_validate(),
    };
    match config {
        Ok(config) => config,
        Err(errors) => {
            haulchat_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Reply JSON for a single message, optionally answering `last_bot`.
fn classify_json(
    classifier: &IntakeClassifier,
    message: &str,
    last_bot: Option<&str>,
) -> String {
    let mut request = ChatRequest::from_message(message);
    request.history = last_bot.map(Turn::bot).into_iter().collect();
    let reply = synthesize(classifier, &request);
    serde_json::to_string_pretty(&reply).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn classify_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "haulchat",
            "classify",
            "household",
            "--last-bot",
            "What type of rubbish is it?",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Classify { message, last_bot }) => {
                assert_eq!(message, "household");
                assert_eq!(last_bot.as_deref(), Some("What type of rubbish is it?"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn classify_uses_last_bot_turn() {
        let json: serde_json::Value = serde_json::from_str(&classify_json(
            &IntakeClassifier::new(),
            "household",
            Some("Thanks! What type of rubbish is it?"),
        ))
        .unwrap();
        assert_eq!(json["waste_type"], "household");
        assert_eq!(json["next_step"], "extras");
    }

    #[test]
    fn classify_follows_configured_locality() {
        let config = haulchat_config::load_and_validate_str(
            "[intake]\nregional_prefix = \"WF\"\ninner_city_outward_codes = []\n",
        )
        .unwrap();
        let classifier = serve::build_classifier(&config.intake);

        let json: serde_json::Value =
            serde_json::from_str(&classify_json(&classifier, "WF99 9ZZ", None)).unwrap();
        assert_eq!(json["local_area"], true);
        let json: serde_json::Value =
            serde_json::from_str(&classify_json(&classifier, "LS10 1AB", None)).unwrap();
        assert_eq!(json["local_area"], false);
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = haulchat_config::load_and_validate_str("").expect("defaults should be valid");
        assert_eq!(config.server.port, 3000);
    }
}
