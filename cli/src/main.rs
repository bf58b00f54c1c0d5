//! CLI entry point for nanopayoff reports.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::info;

use nanopayoff_cli::commands;
use nanopayoff_cli::config::Config;
use nanopayoff_cli::error::Result;
use nanopayoff_cli::request;

#[derive(Parser)]
#[command(name = "payoff-report")]
#[command(about = "Payoff profiles for stock and option portfolios")]
#[command(version)]
struct Cli {
    /// Path to payoff.toml (defaults apply if it does not exist)
    #[arg(long, default_value = "payoff.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the payoff report and print it as JSON
    Compute {
        /// Path to request.json
        request: PathBuf,

        /// Write the report here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print bounds, aggregate curve, break-evens and extrema
    Summary {
        /// Path to request.json
        request: PathBuf,
    },

    /// Validate a request without computing it
    Check {
        /// Path to request.json
        request: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format_timestamp_secs()
    .init();

    if let Err(e) = run(&cli.command, &config) {
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Compute { request: file, output } => {
            let spec = request::load(file)?;
            match output {
                Some(path) => {
                    let file = File::create(path)?;
                    let mut writer = BufWriter::new(file);
                    commands::compute(config, &spec, &mut writer)?;
                    writer.flush()?;
                    info!("Report written to {}", path.display());
                }
                None => {
                    commands::compute(config, &spec, &mut io::stdout().lock())?;
                }
            }
            Ok(())
        }
        Command::Summary { request: file } => {
            let spec = request::load(file)?;
            commands::summary(config, &spec, &mut io::stdout().lock())?;
            Ok(())
        }
        Command::Check { request: file } => {
            let spec = request::load(file)?;
            let n = commands::check(config, &spec)?;
            println!("OK: {n} positions");
            Ok(())
        }
    }
}
