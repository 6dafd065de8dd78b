//! GST tax modes and rates

use core_kernel::Percent;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InvoicingError;

/// Whether an invoice carries GST
///
/// The shop issues both tax invoices and plain cash bills. A cash bill
/// skips the tax columns entirely rather than printing zero rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    WithGst,
    WithoutGst,
}

impl TaxMode {
    pub fn is_taxed(&self) -> bool {
        matches!(self, TaxMode::WithGst)
    }
}

/// The CGST/SGST rate pair for an intra-state supply
///
/// GST on an intra-state sale splits evenly between the central and state
/// components, so the default is 9% + 9% for the 18% slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstRates {
    pub cgst: Percent,
    pub sgst: Percent,
}

impl GstRates {
    pub fn new(cgst: Percent, sgst: Percent) -> Result<Self, InvoicingError> {
        if cgst.value().is_sign_negative() || sgst.value().is_sign_negative() {
            return Err(InvoicingError::NegativeTaxRate);
        }
        Ok(Self { cgst, sgst })
    }

    /// The combined rate, e.g. 18% for the default 9% + 9%
    pub fn combined(&self) -> Percent {
        Percent::new(self.cgst.value() + self.sgst.value())
    }
}

impl Default for GstRates {
    fn default() -> Self {
        Self {
            cgst: Percent::new(dec!(9)),
            sgst: Percent::new(dec!(9)),
        }
    }
}
