use rust_decimal::Decimal;

use crate::core::Result;
use crate::modules::invoices::models::{LineAmounts, LineItem};
use crate::modules::taxes::{AliquotResolver, TaxCalculator};

/// Computes net, tax and total for a single row
#[derive(Debug, Clone)]
pub struct LineItemCalculator {
    resolver: AliquotResolver,
    tax: TaxCalculator,
}

impl LineItemCalculator {
    pub fn new(resolver: AliquotResolver) -> Self {
        Self {
            resolver,
            tax: TaxCalculator::new(),
        }
    }

    pub fn resolver(&self) -> &AliquotResolver {
        &self.resolver
    }

    /// net = quantity × unit_price; tax = net × rate / 100 unless exempt
    pub fn compute(&self, item: &LineItem) -> Result<LineAmounts> {
        item.validate()?;

        let net = item.quantity * item.unit_price;
        let exempt = item.is_effectively_exempt();

        let rate = if exempt {
            Decimal::ZERO
        } else {
            self.resolver.resolve(&item.tax_code)?
        };

        let tax = self.tax.calculate_tax(net, rate)?;

        Ok(LineAmounts {
            net,
            tax,
            total: net + tax,
            rate,
            exempt,
        })
    }

    /// Amounts for every row, in input order
    pub fn breakdown(&self, items: &[LineItem]) -> Result<Vec<LineAmounts>> {
        items.iter().map(|item| self.compute(item)).collect()
    }
}
