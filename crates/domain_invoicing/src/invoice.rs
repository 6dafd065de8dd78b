//! The invoice model handed to rendering and persistence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculator::ComputedInvoice;
use crate::error::InvoicingError;
use crate::numbering::InvoiceNumber;
use crate::tax::{GstRates, TaxMode};

/// Customer details as they appear on the invoice
///
/// Only the name is mandatory. Walk-in customers often give nothing else,
/// and fleet customers add vehicle and job card references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub gstin: Option<String>,
    pub vehicle_number: Option<String>,
    pub job_card_number: Option<String>,
    pub purchase_order_number: Option<String>,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), InvoicingError> {
        if self.name.trim().is_empty() {
            return Err(InvoicingError::MissingCustomerName);
        }
        Ok(())
    }
}

/// A fully computed invoice ready for rendering or persistence
///
/// Everything downstream (PDF, database, API response) reads from this
/// struct; nothing downstream recomputes amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableInvoice {
    pub number: InvoiceNumber,
    pub date: NaiveDate,
    pub customer: CustomerDetails,
    pub computed: ComputedInvoice,
    pub tax_mode: TaxMode,
    pub rates: GstRates,
}

impl RenderableInvoice {
    /// The date formatted as printed on the invoice, e.g. "23-08-2026"
    pub fn formatted_date(&self) -> String {
        self.date.format("%d-%m-%Y").to_string()
    }
}
