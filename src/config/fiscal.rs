use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Currency, PricingError, Result};
use crate::modules::taxes::{TaxCalculator, TaxTable};

use super::{parse_or, Lookup};

/// Whether the order discount reduces the taxable base or the final total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// Discount lowers every line's net; tax is charged on the discounted amount
    #[default]
    BeforeTax,
    /// Tax is charged on the full amount; discount comes off the taxed total
    AfterTax,
}

impl fmt::Display for DiscountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountPolicy::BeforeTax => write!(f, "before_tax"),
            DiscountPolicy::AfterTax => write!(f, "after_tax"),
        }
    }
}

impl std::str::FromStr for DiscountPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before_tax" => Ok(DiscountPolicy::BeforeTax),
            "after_tax" => Ok(DiscountPolicy::AfterTax),
            _ => Err(format!("Invalid discount policy: {}", s)),
        }
    }
}

/// IGTF surcharge rule: which payment methods pay it and at what rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgtfPolicy {
    /// Percentage charged on the converted subtotal
    pub rate: Decimal,
    /// Cash-equivalent methods that never pay IGTF
    pub exempt_methods: Vec<String>,
    /// Payment methods offered at checkout
    pub payment_methods: Vec<String>,
}

impl IgtfPolicy {
    /// Method names are compared case-insensitively after trimming
    pub fn is_applicable(&self, payment_method: &str) -> bool {
        let method = normalize_method(payment_method);
        !self
            .exempt_methods
            .iter()
            .any(|exempt| normalize_method(exempt) == method)
    }

    pub fn is_known_method(&self, payment_method: &str) -> bool {
        let method = normalize_method(payment_method);
        self.payment_methods
            .iter()
            .any(|known| normalize_method(known) == method)
    }
}

impl Default for IgtfPolicy {
    fn default() -> Self {
        Self {
            rate: Decimal::from(3),
            exempt_methods: vec!["efectivo".to_string()],
            payment_methods: [
                "efectivo",
                "tarjeta",
                "transferencia",
                "pago_movil",
                "zelle",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

pub(crate) fn normalize_method(method: &str) -> String {
    method.trim().to_lowercase()
}

/// Regulatory parameters consumed by the pricing engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiscalConfig {
    pub local_currency: Currency,
    pub tax_table: TaxTable,
    /// IVA percentage applied on reference (REF) totals
    pub reference_iva_rate: Decimal,
    pub igtf: IgtfPolicy,
    /// Rate used for unrecognised tax codes; `None` rejects them
    pub default_tax_rate: Option<Decimal>,
    pub discount_policy: DiscountPolicy,
}

impl Default for FiscalConfig {
    fn default() -> Self {
        Self {
            local_currency: Currency::VES,
            tax_table: TaxTable::default(),
            reference_iva_rate: Decimal::from(16),
            igtf: IgtfPolicy::default(),
            default_tax_rate: None,
            discount_policy: DiscountPolicy::default(),
        }
    }
}

impl FiscalConfig {
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self> {
        let defaults = FiscalConfig::default();

        let tax_table = TaxTable {
            general: parse_or(lookup, "IVA_GENERAL_RATE", defaults.tax_table.general)?,
            reduced: parse_or(lookup, "IVA_REDUCED_RATE", defaults.tax_table.reduced)?,
            luxury: parse_or(lookup, "IVA_LUXURY_RATE", defaults.tax_table.luxury)?,
            withheld: defaults.tax_table.withheld,
        };

        let default_tax_rate = match lookup("DEFAULT_TAX_RATE") {
            Some(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<Decimal>().map_err(|_| {
                PricingError::configuration("Invalid DEFAULT_TAX_RATE")
            })?),
            _ => None,
        };

        let exempt_methods = match lookup("IGTF_EXEMPT_METHODS") {
            Some(raw) => split_list(&raw),
            None => defaults.igtf.exempt_methods,
        };

        let payment_methods = match lookup("PAYMENT_METHODS") {
            Some(raw) => split_list(&raw),
            None => defaults.igtf.payment_methods,
        };

        Ok(FiscalConfig {
            local_currency: parse_or(lookup, "LOCAL_CURRENCY", defaults.local_currency)?,
            tax_table,
            reference_iva_rate: parse_or(
                lookup,
                "IVA_REFERENCE_RATE",
                defaults.reference_iva_rate,
            )?,
            igtf: IgtfPolicy {
                rate: parse_or(lookup, "IGTF_RATE", defaults.igtf.rate)?,
                exempt_methods,
                payment_methods,
            },
            default_tax_rate,
            discount_policy: parse_or(lookup, "DISCOUNT_POLICY", defaults.discount_policy)?,
        })
    }

    /// Validate fiscal parameters
    pub fn validate(&self) -> Result<()> {
        let calculator = TaxCalculator::new();

        for (code, rate) in self.tax_table.entries() {
            calculator.validate_tax_rate(rate).map_err(|e| {
                PricingError::configuration(format!("Tax code {}: {}", code, e))
            })?;
        }

        calculator
            .validate_tax_rate(self.reference_iva_rate)
            .map_err(|e| PricingError::configuration(format!("Reference IVA: {}", e)))?;

        calculator
            .validate_tax_rate(self.igtf.rate)
            .map_err(|e| PricingError::configuration(format!("IGTF: {}", e)))?;

        if let Some(rate) = self.default_tax_rate {
            calculator
                .validate_tax_rate(rate)
                .map_err(|e| PricingError::configuration(format!("Default tax rate: {}", e)))?;
        }

        if self.local_currency == Currency::USD {
            return Err(PricingError::configuration(
                "Local currency cannot be the USD reference anchor",
            ));
        }

        if self.igtf.payment_methods.is_empty() {
            return Err(PricingError::configuration(
                "At least one payment method must be configured",
            ));
        }

        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
