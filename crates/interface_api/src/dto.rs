//! Request and response data transfer objects

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Percent};
use domain_invoicing::{CustomerDetails, GstRates, InvoicingError, LineItem, TaxMode};
use infra_db::StoredInvoice;

fn default_true() -> bool {
    true
}

/// Request body for POST /api/v1/invoices
#[derive(Debug, Deserialize)]
pub struct GenerateInvoiceRequest {
    pub customer: CustomerDto,
    pub items: Vec<LineItemDto>,
    /// GST invoice when true (default), plain cash bill when false
    #[serde(default = "default_true")]
    pub with_gst: bool,
    /// CGST percentage, defaults to 9
    pub cgst_rate: Option<Decimal>,
    /// SGST percentage, defaults to 9
    pub sgst_rate: Option<Decimal>,
}

impl GenerateInvoiceRequest {
    pub fn tax_mode(&self) -> TaxMode {
        if self.with_gst {
            TaxMode::WithGst
        } else {
            TaxMode::WithoutGst
        }
    }

    pub fn rates(&self) -> Result<GstRates, InvoicingError> {
        let defaults = GstRates::default();
        GstRates::new(
            self.cgst_rate.map(Percent::new).unwrap_or(defaults.cgst),
            self.sgst_rate.map(Percent::new).unwrap_or(defaults.sgst),
        )
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .map(|dto| LineItem {
                description: dto.description.clone(),
                hsn_code: dto.hsn_code.clone(),
                quantity: dto.quantity,
                rate: Money::new(dto.rate),
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_order_number: Option<String>,
}

impl From<CustomerDto> for CustomerDetails {
    fn from(dto: CustomerDto) -> Self {
        CustomerDetails {
            name: dto.name,
            address: dto.address,
            phone: dto.phone,
            gstin: dto.gstin,
            vehicle_number: dto.vehicle_number,
            job_card_number: dto.job_card_number,
            purchase_order_number: dto.purchase_order_number,
        }
    }
}

impl From<&CustomerDetails> for CustomerDto {
    fn from(customer: &CustomerDetails) -> Self {
        CustomerDto {
            name: customer.name.clone(),
            address: customer.address.clone(),
            phone: customer.phone.clone(),
            gstin: customer.gstin.clone(),
            vehicle_number: customer.vehicle_number.clone(),
            job_card_number: customer.job_card_number.clone(),
            purchase_order_number: customer.purchase_order_number.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LineItemDto {
    pub description: String,
    #[serde(default)]
    pub hsn_code: Option<String>,
    pub quantity: Decimal,
    pub rate: Decimal,
}

/// Response body for GET /api/v1/invoices/{number}
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub invoice_number: String,
    pub date: String,
    pub with_gst: bool,
    pub cgst_rate: Decimal,
    pub sgst_rate: Decimal,
    pub customer: CustomerDto,
    pub items: Vec<InvoiceItemResponse>,
    pub totals: TotalsResponse,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceItemResponse {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub taxable_value: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub taxable_total: Decimal,
    pub cgst_total: Decimal,
    pub sgst_total: Decimal,
    pub grand_total: Decimal,
}

impl From<StoredInvoice> for InvoiceResponse {
    fn from(stored: StoredInvoice) -> Self {
        let invoice = stored.invoice;
        let totals = invoice.computed.totals;
        InvoiceResponse {
            invoice_number: invoice.number.to_string(),
            date: invoice.formatted_date(),
            with_gst: invoice.tax_mode.is_taxed(),
            cgst_rate: invoice.rates.cgst.value(),
            sgst_rate: invoice.rates.sgst.value(),
            customer: CustomerDto::from(&invoice.customer),
            items: invoice
                .computed
                .lines
                .into_iter()
                .map(|line| InvoiceItemResponse {
                    description: line.item.description,
                    hsn_code: line.item.hsn_code,
                    quantity: line.item.quantity,
                    rate: line.item.rate.rounded().amount(),
                    taxable_value: line.taxable_value.amount(),
                    cgst_amount: line.cgst_amount.amount(),
                    sgst_amount: line.sgst_amount.amount(),
                    line_total: line.line_total.amount(),
                })
                .collect(),
            totals: TotalsResponse {
                taxable_total: totals.taxable_total.amount(),
                cgst_total: totals.cgst_total.amount(),
                sgst_total: totals.sgst_total.amount(),
                grand_total: totals.grand_total.amount(),
            },
            created_at: stored.created_at,
        }
    }
}
