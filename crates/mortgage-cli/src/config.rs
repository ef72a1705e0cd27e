use log::debug;
use mortgage_core::programs::RateProgramTable;
use mortgage_core::MortgageResult;
use rust_decimal_macros::dec;
use std::path::Path;

use crate::input;

/// Programs offered when no `--programs` file is given.
pub fn default_program_table() -> MortgageResult<RateProgramTable> {
    RateProgramTable::new()
        .with_program("base", dec!(14.0))?
        .with_program("family", dec!(6.0))?
        .with_program("it", dec!(5.0))
}

/// Load the program table from a YAML/JSON file, or fall back to defaults.
pub fn load_program_table(
    path: Option<&str>,
) -> Result<RateProgramTable, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(default_program_table()?);
    };

    let contents = input::file::read_to_string(path)?;
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let table = if is_json {
        RateProgramTable::from_json_str(&contents)?
    } else {
        RateProgramTable::from_yaml_str(&contents)?
    };

    if table.is_empty() {
        return Err(format!("Program table '{path}' defines no programs").into());
    }
    debug!("loaded {} rate programs from {path}", table.len());
    Ok(table)
}
