//! Named interest-rate programs (e.g. base, family, sector-specific).
//!
//! The table is configuration owned by the caller; the engine only ever
//! sees the resolved annual rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MortgageError;
use crate::types::Percent;
use crate::MortgageResult;

/// Program name -> annual rate percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateProgramTable {
    programs: BTreeMap<String, Percent>,
}

/// One row of the table, for listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateProgram {
    pub name: String,
    pub annual_rate_percent: Percent,
}

impl RateProgramTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; rejects blank names and negative rates.
    pub fn with_program(mut self, name: &str, annual_rate_percent: Percent) -> MortgageResult<Self> {
        self.insert(name, annual_rate_percent)?;
        Ok(self)
    }

    pub fn insert(&mut self, name: &str, annual_rate_percent: Percent) -> MortgageResult<()> {
        validate_entry(name, annual_rate_percent)?;
        self.programs
            .insert(name.trim().to_string(), annual_rate_percent);
        Ok(())
    }

    /// Annual rate for a program, matched case-insensitively.
    pub fn rate_for(&self, name: &str) -> MortgageResult<Percent> {
        let wanted = name.trim();
        self.programs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(wanted))
            .map(|(_, rate)| *rate)
            .ok_or_else(|| MortgageError::UnknownProgram(wanted.to_string()))
    }

    pub fn programs(&self) -> Vec<RateProgram> {
        self.programs
            .iter()
            .map(|(name, rate)| RateProgram {
                name: name.clone(),
                annual_rate_percent: *rate,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn from_yaml_str(s: &str) -> MortgageResult<Self> {
        let table: RateProgramTable = serde_yaml::from_str(s)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_json_str(s: &str) -> MortgageResult<Self> {
        let table: RateProgramTable = serde_json::from_str(s)?;
        table.validate()?;
        Ok(table)
    }

    /// Re-check entries that bypassed `insert` (e.g. deserialised ones).
    pub fn validate(&self) -> MortgageResult<()> {
        for (name, rate) in &self.programs {
            validate_entry(name, *rate)?;
        }
        Ok(())
    }
}

fn validate_entry(name: &str, annual_rate_percent: Percent) -> MortgageResult<()> {
    if name.trim().is_empty() {
        return Err(MortgageError::invalid("program", "Program name must not be empty"));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "annual_rate_percent",
            format!("Program '{name}' has a negative rate"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> RateProgramTable {
        RateProgramTable::new()
            .with_program("base", dec!(14))
            .unwrap()
            .with_program("family", dec!(6))
            .unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(table().rate_for("Family").unwrap(), dec!(6));
        assert_eq!(table().rate_for(" base ").unwrap(), dec!(14));
    }

    #[test]
    fn test_unknown_program() {
        let err = table().rate_for("it").unwrap_err();
        assert!(matches!(err, MortgageError::UnknownProgram(ref n) if n == "it"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(RateProgramTable::new().with_program("promo", dec!(-1)).is_err());
        assert!(RateProgramTable::new().with_program("  ", dec!(1)).is_err());
    }

    #[test]
    fn test_from_yaml() {
        let t = RateProgramTable::from_yaml_str("base: \"14\"\nit: \"5\"\n").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.rate_for("it").unwrap(), dec!(5));
    }

    #[test]
    fn test_from_json_rejects_negative() {
        assert!(RateProgramTable::from_json_str(r#"{"base": "-2"}"#).is_err());
        let t = RateProgramTable::from_json_str(r#"{"base": "14.5"}"#).unwrap();
        assert_eq!(t.rate_for("base").unwrap(), dec!(14.5));
    }

    #[test]
    fn test_listing_is_ordered_by_name() {
        let names: Vec<String> = table().programs().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["base".to_string(), "family".to_string()]);
    }
}
