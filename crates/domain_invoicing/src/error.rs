//! Invoicing domain errors

use thiserror::Error;

/// Errors raised while validating or computing an invoice
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoicingError {
    #[error("Invoice must contain at least one line item")]
    EmptyItems,

    #[error("Line {index}: description must not be blank")]
    BlankDescription { index: usize },

    #[error("Line {index}: quantity must be greater than zero")]
    NonPositiveQuantity { index: usize },

    #[error("Line {index}: rate must not be negative")]
    NegativeRate { index: usize },

    #[error("Customer name is required")]
    MissingCustomerName,

    #[error("Tax rate must not be negative")]
    NegativeTaxRate,
}
