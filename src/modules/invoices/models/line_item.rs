// A line item is one product row on an invoice or POS cart.
//
// Quantity and prices are validated on every mutation so the calculator only
// ever sees well-formed input. Invalid edits are rejected with the offending
// field name, never clamped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::product::ProductRecord;
use crate::core::{PricingError, Result};
use crate::modules::taxes::TaxCode;

/// Represents a single product row in an invoice or cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog product identifier
    pub product_id: String,

    /// Product name shown on the row
    #[serde(default)]
    pub description: String,

    /// Units sold; integral unless the product allows fractions
    pub quantity: Decimal,

    /// Price per unit in the invoice currency
    pub unit_price: Decimal,

    /// Price per unit in USD, used for REF pricing
    #[serde(default)]
    pub unit_price_usd: Option<Decimal>,

    /// Tax selection: a fiscal code ("01", "EX") or a percentage ("16")
    pub tax_code: String,

    /// Exempt rows carry no tax whatever their tax code says
    #[serde(default)]
    pub is_exempt: bool,

    /// Whether the product is sold by weight/volume
    #[serde(default)]
    pub allows_fractional: bool,
}

impl LineItem {
    /// Create a new line item with validation
    ///
    /// # Arguments
    /// * `product_id` - Catalog product id (non-empty)
    /// * `quantity` - Must be positive and integral
    /// * `unit_price` - Must be non-negative
    /// * `tax_code` - Fiscal code or percentage
    pub fn new(
        product_id: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        tax_code: impl Into<String>,
    ) -> Result<Self> {
        let item = Self {
            product_id: product_id.into(),
            description: String::new(),
            quantity,
            unit_price,
            unit_price_usd: None,
            tax_code: tax_code.into(),
            is_exempt: false,
            allows_fractional: false,
        };

        item.validate()?;

        Ok(item)
    }

    /// Build a row from a catalog record
    pub fn from_product(product: &ProductRecord, quantity: Decimal, tax_code: &str) -> Result<Self> {
        let item = Self {
            product_id: product.id.clone(),
            description: product.name.clone(),
            quantity,
            unit_price: product.price,
            unit_price_usd: product.price_usd,
            tax_code: tax_code.to_string(),
            is_exempt: false,
            allows_fractional: product.allows_fractional,
        };

        item.validate()?;

        Ok(item)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_reference_price(mut self, unit_price_usd: Decimal) -> Result<Self> {
        Self::validate_price("unit_price_usd", unit_price_usd)?;
        self.unit_price_usd = Some(unit_price_usd);
        Ok(self)
    }

    pub fn exempt(mut self) -> Self {
        self.is_exempt = true;
        self
    }

    pub fn fractional(mut self) -> Self {
        self.allows_fractional = true;
        self
    }

    /// True when the row is flagged exempt or carries the exempt code
    pub fn is_effectively_exempt(&self) -> bool {
        self.is_exempt
            || TaxCode::from_str(&self.tax_code)
                .map(|code| code.is_exempt())
                .unwrap_or(false)
    }

    /// quantity × unit_price_usd, if the row has a reference price
    pub fn reference_net(&self) -> Option<Decimal> {
        self.unit_price_usd.map(|price| self.quantity * price)
    }

    pub fn set_quantity(&mut self, quantity: Decimal) -> Result<()> {
        Self::validate_quantity(quantity, self.allows_fractional)?;
        self.quantity = quantity;
        Ok(())
    }

    pub fn set_unit_price(&mut self, unit_price: Decimal) -> Result<()> {
        Self::validate_price("unit_price", unit_price)?;
        self.unit_price = unit_price;
        Ok(())
    }

    pub fn set_tax_code(&mut self, tax_code: impl Into<String>) -> Result<()> {
        let tax_code = tax_code.into();
        Self::validate_tax_code(&tax_code)?;
        self.tax_code = tax_code;
        Ok(())
    }

    pub fn set_exempt(&mut self, is_exempt: bool) {
        self.is_exempt = is_exempt;
    }

    /// Validate every field of the row
    pub fn validate(&self) -> Result<()> {
        if self.product_id.trim().is_empty() {
            return Err(PricingError::invalid_line_item(
                "product_id",
                "Product is required",
            ));
        }

        Self::validate_quantity(self.quantity, self.allows_fractional)?;
        Self::validate_price("unit_price", self.unit_price)?;

        if let Some(price) = self.unit_price_usd {
            Self::validate_price("unit_price_usd", price)?;
        }

        Self::validate_tax_code(&self.tax_code)
    }

    fn validate_quantity(quantity: Decimal, allows_fractional: bool) -> Result<()> {
        if quantity <= Decimal::ZERO {
            return Err(PricingError::invalid_line_item(
                "quantity",
                format!("Quantity must be positive, got: {}", quantity),
            ));
        }

        if !allows_fractional && quantity.fract() != Decimal::ZERO {
            return Err(PricingError::invalid_line_item(
                "quantity",
                format!("Quantity must be a whole number, got: {}", quantity),
            ));
        }

        Ok(())
    }

    fn validate_price(field: &'static str, price: Decimal) -> Result<()> {
        if price < Decimal::ZERO {
            return Err(PricingError::invalid_line_item(
                field,
                format!("Price must be non-negative, got: {}", price),
            ));
        }

        Ok(())
    }

    fn validate_tax_code(tax_code: &str) -> Result<()> {
        if tax_code.trim().is_empty() {
            return Err(PricingError::invalid_line_item(
                "tax_code",
                "Tax code is required",
            ));
        }

        Ok(())
    }
}
