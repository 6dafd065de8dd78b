//! Invoice totals calculation
//!
//! The calculation policy is sum-then-round: every line's taxable value and
//! tax amounts are carried at full precision, aggregates are summed over the
//! unrounded values, and each printed figure is rounded exactly once. The
//! grand total is the sum of the already-rounded components so the columns
//! on the printed invoice always add up.

use core_kernel::Money;

use crate::error::InvoicingError;
use crate::line_item::LineItem;
use crate::tax::{GstRates, TaxMode};

/// A line item with its computed amounts, rounded for display
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLine {
    pub item: LineItem,
    pub taxable_value: Money,
    pub cgst_amount: Money,
    pub sgst_amount: Money,
    pub line_total: Money,
}

/// Aggregate invoice totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub taxable_total: Money,
    pub cgst_total: Money,
    pub sgst_total: Money,
    pub grand_total: Money,
}

/// The result of computing an invoice
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedInvoice {
    pub lines: Vec<ComputedLine>,
    pub totals: InvoiceTotals,
}

/// Computes per-line amounts and invoice totals
///
/// Validates every line first; a validation failure leaves no side effects,
/// so callers can safely reserve an invoice number only after this succeeds.
/// In [`TaxMode::WithoutGst`] both tax components are zero and the grand
/// total equals the taxable total.
pub fn compute(
    items: &[LineItem],
    mode: TaxMode,
    rates: GstRates,
) -> Result<ComputedInvoice, InvoicingError> {
    if items.is_empty() {
        return Err(InvoicingError::EmptyItems);
    }
    for (index, item) in items.iter().enumerate() {
        item.validate(index)?;
    }

    let mut taxable_total = Money::ZERO;
    let mut cgst_total = Money::ZERO;
    let mut sgst_total = Money::ZERO;
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let taxable = item.taxable_value();
        let (cgst, sgst) = match mode {
            TaxMode::WithGst => (rates.cgst.apply(taxable), rates.sgst.apply(taxable)),
            TaxMode::WithoutGst => (Money::ZERO, Money::ZERO),
        };

        taxable_total += taxable;
        cgst_total += cgst;
        sgst_total += sgst;

        lines.push(ComputedLine {
            item: item.clone(),
            taxable_value: taxable.rounded(),
            cgst_amount: cgst.rounded(),
            sgst_amount: sgst.rounded(),
            line_total: (taxable + cgst + sgst).rounded(),
        });
    }

    // Each aggregate is rounded once; the grand total is the sum of the
    // rounded components, not a rounding of the raw sum.
    let taxable_total = taxable_total.rounded();
    let cgst_total = cgst_total.rounded();
    let sgst_total = sgst_total.rounded();
    let grand_total = taxable_total + cgst_total + sgst_total;

    Ok(ComputedInvoice {
        lines,
        totals: InvoiceTotals {
            taxable_total,
            cgst_total,
            sgst_total,
            grand_total,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(desc: &str, qty: rust_decimal::Decimal, rate: rust_decimal::Decimal) -> LineItem {
        LineItem::new(desc, qty, Money::new(rate))
    }

    #[test]
    fn test_standard_gst_invoice() {
        let items = vec![item("Alternator repair", dec!(2), dec!(100))];
        let result = compute(&items, TaxMode::WithGst, GstRates::default()).unwrap();

        assert_eq!(result.totals.taxable_total.amount(), dec!(200.00));
        assert_eq!(result.totals.cgst_total.amount(), dec!(18.00));
        assert_eq!(result.totals.sgst_total.amount(), dec!(18.00));
        assert_eq!(result.totals.grand_total.amount(), dec!(236.00));
    }

    #[test]
    fn test_without_gst() {
        let items = vec![item("Wiring harness", dec!(2), dec!(100))];
        let result = compute(&items, TaxMode::WithoutGst, GstRates::default()).unwrap();

        assert_eq!(result.totals.taxable_total.amount(), dec!(200.00));
        assert!(result.totals.cgst_total.is_zero());
        assert!(result.totals.sgst_total.is_zero());
        assert_eq!(result.totals.grand_total.amount(), dec!(200.00));
    }

    #[test]
    fn test_empty_items_rejected() {
        let result = compute(&[], TaxMode::WithGst, GstRates::default());
        assert_eq!(result, Err(InvoicingError::EmptyItems));
    }

    #[test]
    fn test_fractional_rate_sums_before_rounding() {
        // 3 x 33.333 = 99.999, which rounds to 100.00 only if the sum is
        // taken before rounding.
        let items = vec![item("Fuse", dec!(3), dec!(33.333))];
        let result = compute(&items, TaxMode::WithoutGst, GstRates::default()).unwrap();
        assert_eq!(result.totals.taxable_total.amount(), dec!(100.00));
        assert_eq!(result.totals.grand_total.amount(), dec!(100.00));
    }

    #[test]
    fn test_grand_total_is_sum_of_rounded_components() {
        // Taxable 10.004 per line. Three lines: raw taxable 30.012 -> 30.01.
        // Tax per component: 30.012 * 9% = 2.70108 -> 2.70.
        let items = vec![
            item("Terminal", dec!(1), dec!(10.004)),
            item("Terminal", dec!(1), dec!(10.004)),
            item("Terminal", dec!(1), dec!(10.004)),
        ];
        let result = compute(&items, TaxMode::WithGst, GstRates::default()).unwrap();

        let t = result.totals;
        assert_eq!(t.taxable_total.amount(), dec!(30.01));
        assert_eq!(t.cgst_total.amount(), dec!(2.70));
        assert_eq!(t.sgst_total.amount(), dec!(2.70));
        assert_eq!(
            t.grand_total,
            t.taxable_total + t.cgst_total + t.sgst_total
        );
        assert_eq!(t.grand_total.amount(), dec!(35.41));
    }

    #[test]
    fn test_per_line_breakdown() {
        let items = vec![
            item("Self starter overhaul", dec!(1), dec!(850)),
            item("Carbon brush set", dec!(2), dec!(120)),
        ];
        let result = compute(&items, TaxMode::WithGst, GstRates::default()).unwrap();

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].taxable_value.amount(), dec!(850.00));
        assert_eq!(result.lines[0].cgst_amount.amount(), dec!(76.50));
        assert_eq!(result.lines[1].taxable_value.amount(), dec!(240.00));
        assert_eq!(result.lines[1].line_total.amount(), dec!(283.20));
    }

    #[test]
    fn test_validation_reports_failing_index() {
        let items = vec![
            item("Good line", dec!(1), dec!(100)),
            item("Bad line", dec!(-1), dec!(100)),
        ];
        let result = compute(&items, TaxMode::WithGst, GstRates::default());
        assert_eq!(result, Err(InvoicingError::NonPositiveQuantity { index: 1 }));
    }
}
