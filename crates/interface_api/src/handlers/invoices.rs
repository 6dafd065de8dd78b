//! Invoice handlers
//!
//! The generate flow mirrors how a bill leaves the counter: validate and
//! compute first, then draw the invoice number (from the database counter
//! when persistence is on, the in-process sequence otherwise), then render.
//! Validation failures never consume a number.

use axum::{
    extract::{Path, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::{info, instrument};

use domain_invoicing::{compute, CustomerDetails, InvoiceSequence, RenderableInvoice};
use infra_db::InvoiceRepository;
use render_pdf::{render_invoice, MAX_LINE_ITEMS};

use crate::dto::{GenerateInvoiceRequest, InvoiceResponse};
use crate::error::ApiError;
use crate::AppState;

pub const INVOICE_NUMBER_HEADER: &str = "x-invoice-number";

/// POST /api/v1/invoices - generates an invoice and returns the PDF
#[instrument(skip(state, request), fields(customer = %request.customer.name))]
pub async fn generate_invoice(
    State(state): State<AppState>,
    Json(request): Json<GenerateInvoiceRequest>,
) -> Result<Response, ApiError> {
    let tax_mode = request.tax_mode();
    let rates = request.rates()?;
    let items = request.line_items();

    // The page limit is validated here, before the number draw, so an
    // over-long request is rejected without consuming a number or
    // persisting anything.
    if items.len() > MAX_LINE_ITEMS {
        return Err(ApiError::Validation(format!(
            "an invoice fits at most {} line items, got {}",
            MAX_LINE_ITEMS,
            items.len()
        )));
    }

    let customer = CustomerDetails::from(request.customer);
    customer.validate()?;
    let computed = compute(&items, tax_mode, rates)?;

    let date = Utc::now().date_naive();
    let number = match &state.pool {
        Some(pool) => {
            InvoiceRepository::new(pool.clone())
                .save(date, &customer, &computed, tax_mode, rates)
                .await?
        }
        None => state.sequence.next(),
    };

    let invoice = RenderableInvoice {
        number,
        date,
        customer,
        computed,
        tax_mode,
        rates,
    };
    let pdf = render_invoice(&invoice, &state.company)?;

    info!(invoice_number = %number, bytes = pdf.len(), "invoice generated");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"invoice_{number}.pdf\""),
        ),
        (
            HeaderName::from_static(INVOICE_NUMBER_HEADER),
            number.to_string(),
        ),
    ];
    Ok((headers, pdf).into_response())
}

/// GET /api/v1/invoices/:number - returns a stored invoice as JSON
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(number): Path<u64>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let Some(pool) = &state.pool else {
        return Err(ApiError::Unavailable(
            "invoice lookup requires a configured database".to_string(),
        ));
    };

    let stored = InvoiceRepository::new(pool.clone())
        .find_by_number(domain_invoicing::InvoiceNumber::new(number))
        .await?;

    Ok(Json(InvoiceResponse::from(stored)))
}
