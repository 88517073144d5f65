use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::FiscalConfig;
use crate::core::{Currency, PricingError, Result};
use crate::modules::invoices::{InvoiceTotals, InvoiceTotalsAggregator, LineItemCalculator};
use crate::modules::reference::{ExchangeRate, ReferenceConverter, ReferenceTotals};
use crate::modules::sessions::models::{InvoicePayload, PayloadItem, PricingSession};
use crate::modules::taxes::AliquotResolver;

/// Everything needed to compute REF totals for one session revision
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRequest {
    pub session_id: uuid::Uuid,
    pub revision: u64,
    pub subtotal_usd: Decimal,
    pub target: Currency,
    pub payment_method: String,
    pub date: NaiveDate,
}

/// Totals shown on a form: legacy always, reference when available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub revision: u64,
    pub currency: Currency,
    pub legacy: InvoiceTotals,
    pub reference: Option<ReferenceTotals>,
}

impl Quote {
    /// Amount to charge: the REF total when present, the legacy total otherwise
    pub fn amount_due(&self) -> (Currency, Decimal) {
        match &self.reference {
            Some(reference) => (reference.target_currency, reference.total_amount),
            None => (self.currency, self.legacy.total),
        }
    }
}

/// Single source of pricing truth shared by the new-invoice, edit-invoice
/// and POS screens
#[derive(Debug, Clone)]
pub struct PricingEngine {
    fiscal: FiscalConfig,
    aggregator: InvoiceTotalsAggregator,
    converter: ReferenceConverter,
}

impl PricingEngine {
    pub fn new(fiscal: FiscalConfig) -> Result<Self> {
        fiscal.validate()?;

        let resolver = AliquotResolver::new(fiscal.tax_table.clone(), fiscal.default_tax_rate);
        let aggregator =
            InvoiceTotalsAggregator::new(LineItemCalculator::new(resolver), fiscal.discount_policy);
        let converter = ReferenceConverter::new(&fiscal);

        Ok(Self {
            fiscal,
            aggregator,
            converter,
        })
    }

    pub fn fiscal(&self) -> &FiscalConfig {
        &self.fiscal
    }

    pub fn aggregator(&self) -> &InvoiceTotalsAggregator {
        &self.aggregator
    }

    pub fn converter(&self) -> &ReferenceConverter {
        &self.converter
    }

    /// Local-currency totals; always available synchronously
    pub fn legacy_totals(&self, session: &PricingSession) -> Result<InvoiceTotals> {
        self.aggregator
            .aggregate(session.items(), session.discount_percent(), session.currency())
    }

    /// Discounted USD subtotal, if every row carries a reference price
    pub fn reference_subtotal(&self, session: &PricingSession) -> Option<Decimal> {
        if session.items().is_empty() {
            return None;
        }

        let gross = session
            .items()
            .iter()
            .map(|item| item.reference_net())
            .sum::<Option<Decimal>>()?;

        let discount = gross * session.discount_percent() / Decimal::ONE_HUNDRED;
        Some(gross - discount)
    }

    /// Build the REF request for the session's current revision.
    ///
    /// `None` when the cart has rows without a USD price; the form then
    /// shows legacy totals only.
    pub fn reference_request(
        &self,
        session: &PricingSession,
        date: NaiveDate,
    ) -> Option<ReferenceRequest> {
        let subtotal_usd = match self.reference_subtotal(session) {
            Some(subtotal) => subtotal,
            None => {
                debug!(
                    session_id = %session.id(),
                    revision = session.revision(),
                    "Cart has rows without a reference price, skipping REF pricing"
                );
                return None;
            }
        };

        Some(ReferenceRequest {
            session_id: session.id(),
            revision: session.revision(),
            subtotal_usd,
            target: self.fiscal.local_currency,
            payment_method: session.payment_method().to_string(),
            date,
        })
    }

    pub fn convert_reference(
        &self,
        request: &ReferenceRequest,
        rate: &ExchangeRate,
    ) -> Result<ReferenceTotals> {
        self.converter.convert(
            request.subtotal_usd,
            rate,
            request.target,
            &request.payment_method,
        )
    }

    /// Legacy totals plus the overlay valid for the current revision
    pub fn quote(&self, session: &PricingSession) -> Result<Quote> {
        Ok(Quote {
            revision: session.revision(),
            currency: session.currency(),
            legacy: self.legacy_totals(session)?,
            reference: session.reference().cloned(),
        })
    }

    /// Validate the session, format the outbound payload and freeze the session
    pub fn submit(&self, session: &mut PricingSession) -> Result<InvoicePayload> {
        let customer_id = session
            .customer_id()
            .ok_or_else(|| PricingError::validation("Customer is required"))?
            .to_string();
        let warehouse_id = session
            .warehouse_id()
            .ok_or_else(|| PricingError::validation("Warehouse is required"))?
            .to_string();

        if session.items().is_empty() {
            return Err(PricingError::validation(
                "Invoice must have at least one line item",
            ));
        }

        session.seniat().validate(&self.fiscal.igtf)?;

        let totals = self.legacy_totals(session)?;
        let items = self
            .aggregator
            .calculator()
            .breakdown(session.items())?
            .into_iter()
            .zip(session.items())
            .map(|(amounts, item)| PayloadItem {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                tax_rate: amounts.rate,
                is_exempt: amounts.exempt,
            })
            .collect();

        let seniat = session.seniat().clone();
        let payload = InvoicePayload {
            session_id: session.id().to_string(),
            customer_id,
            warehouse_id,
            currency: session.currency(),
            discount_percent: session.discount_percent(),
            items,
            totals,
            reference: session.reference().cloned(),
            payment_method: seniat.payment_method,
            transaction_type: seniat.transaction_type,
            credit_days: seniat.credit_days,
        };

        session.mark_submitted()?;

        info!(
            session_id = %payload.session_id,
            kind = %session.kind(),
            items = payload.items.len(),
            total = %payload.totals.total,
            "Invoice session submitted"
        );

        Ok(payload)
    }
}
