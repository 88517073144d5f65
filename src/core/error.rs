/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, PricingError>;

/// Pricing engine error type
#[derive(thiserror::Error, Debug)]
pub enum PricingError {
    /// Tax code or percentage not present in the aliquot table
    #[error("Invalid tax code: {0}")]
    InvalidTaxCode(String),

    /// Reference rate lookup failed or returned no usable data
    #[error("Exchange rate unavailable: {0}")]
    ExchangeRateUnavailable(String),

    /// Line item input rejected before reaching the calculator
    #[error("Invalid line item ({field}): {reason}")]
    InvalidLineItem { field: &'static str, reason: String },

    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl PricingError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PricingError::Validation(msg.into())
    }

    pub fn invalid_tax_code(code: impl Into<String>) -> Self {
        PricingError::InvalidTaxCode(code.into())
    }

    pub fn rate_unavailable(msg: impl Into<String>) -> Self {
        PricingError::ExchangeRateUnavailable(msg.into())
    }

    pub fn invalid_line_item(field: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidLineItem {
            field,
            reason: reason.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        PricingError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        PricingError::Internal(msg.into())
    }

    /// Form field the error should be displayed next to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PricingError::InvalidLineItem { field, .. } => Some(field),
            PricingError::InvalidTaxCode(_) => Some("tax_code"),
            _ => None,
        }
    }

    /// Whether the caller may recover by falling back to legacy totals
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            PricingError::ExchangeRateUnavailable(_)
                | PricingError::HttpClient(_)
                | PricingError::Json(_)
        )
    }
}
