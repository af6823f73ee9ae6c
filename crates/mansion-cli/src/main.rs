mod advisor;
mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::advise::AdviseArgs;
use commands::simulate::ScenarioArgs;

/// Real-estate investment simulation and advisory
#[derive(Parser)]
#[command(
    name = "mia",
    version,
    about = "Real-estate investment simulation and advisory",
    long_about = "Projects 30-year amortization schedules and investment KPIs \
                  for rental-property scenarios with decimal precision, browses \
                  the curated listings, and forwards questions about the current \
                  scenario to the AI advisor."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the 30-year amortization schedule with KPI summary
    Simulate(ScenarioArgs),
    /// Compute the KPI dashboard figures only
    Kpis(ScenarioArgs),
    /// Show the curated property listings
    Listings,
    /// Ask the AI advisor about the current scenario
    Advise(AdviseArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Kpis(args) => commands::simulate::run_kpis(args),
        Commands::Listings => commands::listings::run_listings(),
        Commands::Advise(args) => commands::advise::run_advise(args),
        Commands::Version => {
            println!("mia {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
