//! Ready-made domain fixtures

use chrono::NaiveDate;
use domain_invoicing::{
    compute, GstRates, InvoiceNumber, RenderableInvoice, TaxMode,
};
use rust_decimal_macros::dec;

use crate::builders::{CustomerBuilder, LineItemBuilder};

/// A two-line GST invoice for customer "Ramesh Kumar", number as given
pub fn sample_invoice(number: u64) -> RenderableInvoice {
    let items = vec![
        LineItemBuilder::new()
            .description("Self starter overhaul")
            .quantity(dec!(1))
            .rate(dec!(850))
            .build(),
        LineItemBuilder::new()
            .description("Carbon brush set")
            .quantity(dec!(2))
            .rate(dec!(120))
            .build(),
    ];
    let rates = GstRates::default();
    let computed = compute(&items, TaxMode::WithGst, rates)
        .expect("fixture items are valid");

    RenderableInvoice {
        number: InvoiceNumber::new(number),
        date: NaiveDate::from_ymd_opt(2026, 8, 23).expect("valid date"),
        customer: CustomerBuilder::new()
            .phone("9876543210")
            .vehicle_number("AP 39 AB 1234")
            .build(),
        computed,
        tax_mode: TaxMode::WithGst,
        rates,
    }
}
