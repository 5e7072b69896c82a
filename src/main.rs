mod client;
mod collector;
mod config;
mod error;
mod logging;
mod model;
mod report;
mod scraper;
mod utils;

use crate::collector::Collector;
use crate::config::Config;
use crate::error::Result;
use crate::logging::{init_logging, parse_log_level, LoggerConfig};
use crate::model::SkillBook;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skillbook",
    version,
    about = "Scrapes per-skill evaluation scores and reports aggregated percentages"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, walk units and projects, and save the skill book
    Collect {
        /// Output JSON path (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the aggregated report from a saved skill book
    Report {
        /// Input JSON path (defaults to the configured output)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;

    let logger_config = LoggerConfig {
        directory: config.logging.directory.clone(),
        file_name: config.logging.filename.clone(),
        rotation: tracing_appender::rolling::Rotation::DAILY,
        level: parse_log_level(&config.logging.level)?,
    };
    init_logging(logger_config)?;

    if let Err(e) = run(cli.command, config).await {
        log_error!(&e => "[main] Aborting");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Collect { output } => {
            if let Some(output) = output {
                config.output = output.display().to_string();
            }

            log_info!("[main] Collecting skills from {}", config.base_url);
            let collector = Collector::new(config)?;
            let book = collector.collect_and_save().await?;
            log_info!("[main] Collected {} units", book.len());
        }
        Commands::Report { input } => {
            let input = input
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| config.output.clone());

            log_info!("[main] Reading skill book from {}", input);
            let book: SkillBook = utils::load_json(&input)?;
            report::print_report(&book);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flag_parses_after_subcommand() {
        let cli = Cli::try_parse_from(["skillbook", "collect", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(matches!(cli.command, Commands::Collect { output: None }));
    }

    #[test]
    fn config_flag_parses_before_subcommand() {
        let cli = Cli::try_parse_from(["skillbook", "--config", "alt.toml", "report"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }

    #[test]
    fn report_accepts_input_override() {
        let cli = Cli::try_parse_from(["skillbook", "report", "--input", "book.json"]).unwrap();
        match cli.command {
            Commands::Report { input } => assert_eq!(input, Some(PathBuf::from("book.json"))),
            _ => panic!("expected the report subcommand"),
        }
    }
}
