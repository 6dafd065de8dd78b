//! Invoicing Domain - GST tax invoice calculation and numbering
//!
//! This crate owns the billing rules of the workshop:
//! - Line items with quantity and unit rate
//! - GST computation (CGST + SGST split) with a single rounding boundary
//! - Sequential, gapless invoice numbering
//! - The renderable invoice model handed to persistence and PDF output

pub mod calculator;
pub mod error;
pub mod invoice;
pub mod line_item;
pub mod numbering;
pub mod tax;

pub use calculator::{compute, ComputedInvoice, ComputedLine, InvoiceTotals};
pub use error::InvoicingError;
pub use invoice::{CustomerDetails, RenderableInvoice};
pub use line_item::LineItem;
pub use numbering::{InvoiceNumber, InvoiceSequence, MemorySequence};
pub use tax::{GstRates, TaxMode};
