//! Invoice line items

use core_kernel::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InvoicingError;

/// A single billable line on an invoice
///
/// Quantity is decimal so fractional units (litres of coolant, hours of
/// labour) bill correctly. Rate is the unit price before tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub hsn_code: Option<String>,
    pub quantity: Decimal,
    pub rate: Money,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Money) -> Self {
        Self {
            description: description.into(),
            hsn_code: None,
            quantity,
            rate,
        }
    }

    pub fn with_hsn(mut self, hsn_code: impl Into<String>) -> Self {
        self.hsn_code = Some(hsn_code.into());
        self
    }

    /// Validates this line, reporting `index` in any error
    pub fn validate(&self, index: usize) -> Result<(), InvoicingError> {
        if self.description.trim().is_empty() {
            return Err(InvoicingError::BlankDescription { index });
        }
        if self.quantity <= Decimal::ZERO {
            return Err(InvoicingError::NonPositiveQuantity { index });
        }
        if self.rate.is_negative() {
            return Err(InvoicingError::NegativeRate { index });
        }
        Ok(())
    }

    /// Unrounded pre-tax amount for this line: quantity * rate
    pub fn taxable_value(&self) -> Money {
        self.rate.multiply(self.quantity)
    }
}
