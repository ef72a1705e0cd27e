use clap::Args;
use serde_json::Value;

use mortgage_core::programs::RateProgramTable;

/// Arguments for listing rate programs
#[derive(Args)]
pub struct ProgramsArgs {
    /// Show only this program
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run_programs(args: ProgramsArgs, table: &RateProgramTable) -> Result<Value, Box<dyn std::error::Error>> {
    match args.name {
        Some(name) => {
            let rate = table.rate_for(&name)?;
            Ok(serde_json::json!({
                "name": name,
                "annual_rate_percent": rate.to_string(),
            }))
        }
        None => Ok(serde_json::to_value(table.programs())?),
    }
}
