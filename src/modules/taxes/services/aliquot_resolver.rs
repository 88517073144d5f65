use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use crate::core::{PricingError, Result};
use crate::modules::taxes::models::{TaxCode, TaxTable};

/// Maps a tax code or percentage selection to a numeric rate (percent)
#[derive(Debug, Clone)]
pub struct AliquotResolver {
    table: TaxTable,
    default_rate: Option<Decimal>,
}

impl AliquotResolver {
    /// `default_rate` is the explicit fallback for unrecognised input.
    /// With `None`, unrecognised input fails with `InvalidTaxCode`.
    pub fn new(table: TaxTable, default_rate: Option<Decimal>) -> Self {
        Self {
            table,
            default_rate,
        }
    }

    pub fn table(&self) -> &TaxTable {
        &self.table
    }

    /// Resolve a fiscal code ("01", "EX") or a percentage ("16", "16%", "8.00")
    pub fn resolve(&self, input: &str) -> Result<Decimal> {
        match self.lookup(input) {
            Some(rate) => Ok(rate),
            None => match self.default_rate {
                Some(rate) => {
                    warn!(
                        tax_code = %input,
                        default_rate = %rate,
                        "Unrecognised tax code, applying configured default rate"
                    );
                    Ok(rate)
                }
                None => Err(PricingError::invalid_tax_code(input.trim())),
            },
        }
    }

    /// Resolve a parsed code; never fails
    pub fn resolve_code(&self, code: TaxCode) -> Decimal {
        self.table.rate_for(code)
    }

    /// Normalise free-form input to a fiscal code, if it names one
    pub fn code_of(&self, input: &str) -> Option<TaxCode> {
        if let Ok(code) = TaxCode::from_str(input) {
            return Some(code);
        }
        parse_percent(input).and_then(|percent| self.table.code_for_rate(percent))
    }

    fn lookup(&self, input: &str) -> Option<Decimal> {
        self.code_of(input).map(|code| self.table.rate_for(code))
    }
}

fn parse_percent(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    Decimal::from_str(number).ok()
}
