use rust_decimal::Decimal;

use crate::core::{PricingError, Result};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// TaxCalculator applies a percentage aliquot to a net amount
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Calculate tax amount for a net amount
    /// tax_amount = net × rate_percent / 100
    pub fn calculate_tax(&self, net: Decimal, rate_percent: Decimal) -> Result<Decimal> {
        self.validate_tax_rate(rate_percent)?;

        Ok(net * rate_percent / HUNDRED)
    }

    /// Validate a percentage rate is within 0..=100 with at most 4 decimal places
    pub fn validate_tax_rate(&self, rate_percent: Decimal) -> Result<()> {
        if rate_percent < Decimal::ZERO {
            return Err(PricingError::validation("Tax rate cannot be negative"));
        }

        if rate_percent > HUNDRED {
            return Err(PricingError::validation("Tax rate cannot exceed 100%"));
        }

        if rate_percent.normalize().scale() > 4 {
            return Err(PricingError::validation(
                "Tax rate cannot have more than 4 decimal places",
            ));
        }

        Ok(())
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
