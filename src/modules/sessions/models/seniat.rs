use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::IgtfPolicy;
use crate::core::{PricingError, Result};

/// Sale on cash terms or on credit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Contado,
    Credito,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Contado => write!(f, "contado"),
            TransactionType::Credito => write!(f, "credito"),
        }
    }
}

/// Fiscal-compliance metadata attached to an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeniatFields {
    pub payment_method: String,
    pub transaction_type: TransactionType,
    /// Required for credit sales, absent otherwise
    pub credit_days: Option<u32>,
}

impl Default for SeniatFields {
    fn default() -> Self {
        Self {
            payment_method: "efectivo".to_string(),
            transaction_type: TransactionType::Contado,
            credit_days: None,
        }
    }
}

impl SeniatFields {
    pub fn validate(&self, igtf: &IgtfPolicy) -> Result<()> {
        if !igtf.is_known_method(&self.payment_method) {
            return Err(PricingError::validation(format!(
                "Unknown payment method: {}",
                self.payment_method
            )));
        }

        match (self.transaction_type, self.credit_days) {
            (TransactionType::Credito, None) | (TransactionType::Credito, Some(0)) => Err(
                PricingError::validation("Credit sales require a positive number of credit days"),
            ),
            (TransactionType::Contado, Some(_)) => Err(PricingError::validation(
                "Credit days only apply to credit sales",
            )),
            _ => Ok(()),
        }
    }
}
