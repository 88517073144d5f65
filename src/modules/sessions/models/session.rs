// A pricing session is one open invoice form or POS cart.
//
// Every successful edit bumps `revision`. Reference totals are tagged with the
// revision they were computed for and ignored once the session moves on.
// After submission the session is frozen.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::seniat::{SeniatFields, TransactionType};
use crate::core::{Currency, PricingError, Result};
use crate::modules::invoices::LineItem;
use crate::modules::reference::ReferenceTotals;

/// Which screen owns the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    NewInvoice,
    EditInvoice,
    PointOfSale,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::NewInvoice => write!(f, "new_invoice"),
            SessionKind::EditInvoice => write!(f, "edit_invoice"),
            SessionKind::PointOfSale => write!(f, "point_of_sale"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Open,
    Submitted,
}

/// Invoice or cart being edited by one user
#[derive(Debug, Clone)]
pub struct PricingSession {
    id: Uuid,
    kind: SessionKind,
    currency: Currency,
    customer_id: Option<String>,
    warehouse_id: Option<String>,
    items: Vec<LineItem>,
    discount_percent: Decimal,
    seniat: SeniatFields,
    revision: u64,
    status: SessionStatus,
    reference: Option<(u64, ReferenceTotals)>,
    created_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl PricingSession {
    pub fn new(kind: SessionKind, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            currency,
            customer_id: None,
            warehouse_id: None,
            items: Vec::new(),
            discount_percent: Decimal::ZERO,
            seniat: SeniatFields::default(),
            revision: 0,
            status: SessionStatus::Open,
            reference: None,
            created_at: Utc::now(),
            submitted_at: None,
        }
    }

    /// Edit form preloaded with a stored invoice's rows
    pub fn for_existing(currency: Currency, items: Vec<LineItem>) -> Result<Self> {
        for item in &items {
            item.validate()?;
        }

        let mut session = Self::new(SessionKind::EditInvoice, currency);
        session.items = items;
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn warehouse_id(&self) -> Option<&str> {
        self.warehouse_id.as_deref()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn seniat(&self) -> &SeniatFields {
        &self.seniat
    }

    pub fn payment_method(&self) -> &str {
        &self.seniat.payment_method
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    pub fn is_mutable(&self) -> bool {
        self.status == SessionStatus::Open
    }

    pub fn set_customer(&mut self, customer_id: impl Into<String>) -> Result<()> {
        self.ensure_mutable()?;
        self.customer_id = Some(customer_id.into());
        Ok(())
    }

    pub fn set_warehouse(&mut self, warehouse_id: impl Into<String>) -> Result<()> {
        self.ensure_mutable()?;
        self.warehouse_id = Some(warehouse_id.into());
        Ok(())
    }

    /// Append a row; returns its index
    pub fn add_item(&mut self, item: LineItem) -> Result<usize> {
        self.ensure_mutable()?;
        item.validate()?;
        self.items.push(item);
        self.touch();
        Ok(self.items.len() - 1)
    }

    pub fn remove_item(&mut self, index: usize) -> Result<LineItem> {
        self.ensure_mutable()?;
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.touch();
        Ok(removed)
    }

    pub fn update_quantity(&mut self, index: usize, quantity: Decimal) -> Result<()> {
        self.edit_item(index, |item| item.set_quantity(quantity))
    }

    pub fn update_unit_price(&mut self, index: usize, unit_price: Decimal) -> Result<()> {
        self.edit_item(index, |item| item.set_unit_price(unit_price))
    }

    pub fn update_tax_code(&mut self, index: usize, tax_code: &str) -> Result<()> {
        self.edit_item(index, |item| item.set_tax_code(tax_code))
    }

    pub fn set_item_exempt(&mut self, index: usize, is_exempt: bool) -> Result<()> {
        self.edit_item(index, |item| {
            item.set_exempt(is_exempt);
            Ok(())
        })
    }

    pub fn set_discount_percent(&mut self, discount_percent: Decimal) -> Result<()> {
        self.ensure_mutable()?;
        if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(PricingError::validation(format!(
                "Discount must be between 0 and 100 percent, got: {}",
                discount_percent
            )));
        }
        self.discount_percent = discount_percent;
        self.touch();
        Ok(())
    }

    pub fn set_payment_method(&mut self, payment_method: impl Into<String>) -> Result<()> {
        self.ensure_mutable()?;
        let payment_method = payment_method.into();
        if payment_method.trim().is_empty() {
            return Err(PricingError::validation("Payment method is required"));
        }
        self.seniat.payment_method = payment_method.trim().to_string();
        self.touch();
        Ok(())
    }

    pub fn set_transaction_type(
        &mut self,
        transaction_type: TransactionType,
        credit_days: Option<u32>,
    ) -> Result<()> {
        self.ensure_mutable()?;
        self.seniat.transaction_type = transaction_type;
        self.seniat.credit_days = match transaction_type {
            TransactionType::Credito => credit_days,
            TransactionType::Contado => None,
        };
        Ok(())
    }

    /// Store reference totals computed for `revision`.
    ///
    /// Returns false and keeps the current overlay when `revision` is not
    /// the session's current revision.
    pub fn apply_reference(&mut self, revision: u64, totals: ReferenceTotals) -> bool {
        if revision != self.revision {
            return false;
        }
        self.reference = Some((revision, totals));
        true
    }

    /// Drop the overlay if it belongs to `revision`
    pub fn clear_reference(&mut self, revision: u64) -> bool {
        if revision != self.revision {
            return false;
        }
        self.reference = None;
        true
    }

    /// Reference totals valid for the current revision, if any
    pub fn reference(&self) -> Option<&ReferenceTotals> {
        match &self.reference {
            Some((revision, totals)) if *revision == self.revision => Some(totals),
            _ => None,
        }
    }

    pub(crate) fn mark_submitted(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.status = SessionStatus::Submitted;
        self.submitted_at = Some(Utc::now());
        Ok(())
    }

    fn edit_item<F>(&mut self, index: usize, edit: F) -> Result<()>
    where
        F: FnOnce(&mut LineItem) -> Result<()>,
    {
        self.ensure_mutable()?;
        self.check_index(index)?;
        edit(&mut self.items[index])?;
        self.touch();
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(PricingError::validation(format!(
                "No line item at position {}",
                index
            )));
        }
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<()> {
        if !self.is_mutable() {
            return Err(PricingError::validation(format!(
                "Session {} was already submitted",
                self.id
            )));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
