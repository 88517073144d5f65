use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies with their decimal precision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Venezuelan Bolívar (local quoted currency)
    VES,
    /// US Dollar (reference anchor)
    USD,
    /// Euro
    EUR,
    /// Colombian Peso (no decimal places)
    COP,
}

impl Currency {
    /// Returns the decimal scale for this currency
    /// - COP: 0 (no decimals)
    /// - VES/USD/EUR: 2
    pub fn scale(&self) -> u32 {
        match self {
            Currency::COP => 0,
            Currency::VES | Currency::USD | Currency::EUR => 2,
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Display symbol used on price panels
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::VES => "Bs.",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::COP => "COP$",
        }
    }

    /// Formats an amount for display with the correct decimal places
    pub fn format_amount(&self, amount: Decimal) -> String {
        let scale = self.scale();
        if scale == 0 {
            format!("{} {}", self.symbol(), amount.round_dp(0))
        } else {
            format!(
                "{} {:.width$}",
                self.symbol(),
                self.round(amount),
                width = scale as usize
            )
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::VES => write!(f, "VES"),
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
            Currency::COP => write!(f, "COP"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            // "BS" is how the dashboard labels the local currency
            "VES" | "BS" => Ok(Currency::VES),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "COP" => Ok(Currency::COP),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
