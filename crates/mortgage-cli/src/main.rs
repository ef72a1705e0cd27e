mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::{ExportArgs, QuoteArgs, ScheduleArgs};
use commands::programs::ProgramsArgs;

/// Mortgage payment schedules and quotes
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage payment schedules and quotes",
    long_about = "A CLI for fixed-rate mortgage calculations with decimal precision. \
                  Quotes a monthly payment from price, down payment, term and rate \
                  program, prints monthly or yearly amortisation schedules, and \
                  exports schedules to CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Rate program table (YAML or JSON, name -> annual rate percent)
    #[arg(long, global = true)]
    programs: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the monthly payment, first-month split and overpayment
    Quote(QuoteArgs),
    /// Print the amortisation schedule (monthly or yearly view)
    Schedule(ScheduleArgs),
    /// Export the monthly schedule to a CSV file
    Export(ExportArgs),
    /// List the configured rate programs
    Programs(ProgramsArgs),
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
    env_logger::init();
    let cli = Cli::parse();

    let table = match config::load_program_table(cli.programs.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::mortgage::run_quote(args, &table),
        Commands::Schedule(args) => commands::mortgage::run_schedule(args, &table),
        Commands::Export(args) => commands::mortgage::run_export(args, &table),
        Commands::Programs(args) => commands::programs::run_programs(args, &table),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
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
