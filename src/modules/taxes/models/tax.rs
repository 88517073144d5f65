use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fiscal tax codes used on invoice lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxCode {
    /// '01' general IVA
    #[default]
    #[serde(rename = "01")]
    General,
    /// '02' reduced IVA
    #[serde(rename = "02")]
    Reduced,
    /// '03' luxury goods IVA
    #[serde(rename = "03")]
    Luxury,
    /// '06' withheld, charged at 0%
    #[serde(rename = "06")]
    Withheld,
    /// 'EX' exempt
    #[serde(rename = "EX")]
    Exempt,
}

impl TaxCode {
    pub fn as_code(&self) -> &'static str {
        match self {
            TaxCode::General => "01",
            TaxCode::Reduced => "02",
            TaxCode::Luxury => "03",
            TaxCode::Withheld => "06",
            TaxCode::Exempt => "EX",
        }
    }

    pub fn is_exempt(&self) -> bool {
        matches!(self, TaxCode::Exempt)
    }
}

impl fmt::Display for TaxCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl std::str::FromStr for TaxCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "01" => Ok(TaxCode::General),
            "02" => Ok(TaxCode::Reduced),
            "03" => Ok(TaxCode::Luxury),
            "06" => Ok(TaxCode::Withheld),
            "EX" | "E" => Ok(TaxCode::Exempt),
            _ => Err(format!("Invalid tax code: {}", s)),
        }
    }
}

/// Aliquot table: percentage charged for each tax code
///
/// '02' is 8% under the standard table. Some dashboard screens labelled it
/// 31%, so the reduced rate is kept configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTable {
    pub general: Decimal,
    pub reduced: Decimal,
    pub luxury: Decimal,
    #[serde(default)]
    pub withheld: Decimal,
}

impl TaxTable {
    /// Percentage for a code; exempt lines always map to zero
    pub fn rate_for(&self, code: TaxCode) -> Decimal {
        match code {
            TaxCode::General => self.general,
            TaxCode::Reduced => self.reduced,
            TaxCode::Luxury => self.luxury,
            TaxCode::Withheld => self.withheld,
            TaxCode::Exempt => Decimal::ZERO,
        }
    }

    /// Code whose configured percentage equals `percent`, preferring the general rate
    pub fn code_for_rate(&self, percent: Decimal) -> Option<TaxCode> {
        [
            TaxCode::General,
            TaxCode::Reduced,
            TaxCode::Luxury,
            TaxCode::Withheld,
        ]
        .into_iter()
        .find(|code| self.rate_for(*code) == percent)
    }

    pub fn entries(&self) -> [(TaxCode, Decimal); 4] {
        [
            (TaxCode::General, self.general),
            (TaxCode::Reduced, self.reduced),
            (TaxCode::Luxury, self.luxury),
            (TaxCode::Withheld, self.withheld),
        ]
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        Self {
            general: Decimal::from(16),
            reduced: Decimal::from(8),
            luxury: Decimal::from(31),
            withheld: Decimal::ZERO,
        }
    }
}
