//! Invoice repository
//!
//! Persists an invoice in a single transaction: customer upsert by phone,
//! counter increment, header insert, and item inserts all commit or roll
//! back together. The counter row is the source of invoice numbers; because
//! the increment lives inside the transaction, a failed insert rolls the
//! counter back and the sequence stays gapless.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::prelude::FromRow;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use core_kernel::{CustomerId, InvoiceId, LineItemId, Money, Percent};
use domain_invoicing::{
    ComputedInvoice, ComputedLine, CustomerDetails, GstRates, InvoiceNumber, LineItem,
    RenderableInvoice, TaxMode,
};

use crate::error::DatabaseError;

/// An invoice read back from the database
#[derive(Debug, Clone)]
pub struct StoredInvoice {
    pub invoice: RenderableInvoice,
    pub created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct InvoiceHeaderRow {
    id: Uuid,
    invoice_date: NaiveDate,
    with_gst: bool,
    cgst_rate: Decimal,
    sgst_rate: Decimal,
    taxable_total: Decimal,
    cgst_total: Decimal,
    sgst_total: Decimal,
    grand_total: Decimal,
    vehicle_number: Option<String>,
    job_card_number: Option<String>,
    purchase_order_number: Option<String>,
    created_at: DateTime<Utc>,
    customer_name: String,
    customer_address: Option<String>,
    customer_phone: Option<String>,
    customer_gstin: Option<String>,
}

#[derive(FromRow)]
struct InvoiceItemRow {
    description: String,
    hsn_code: Option<String>,
    quantity: Decimal,
    rate: Decimal,
    taxable_value: Decimal,
    cgst_amount: Decimal,
    sgst_amount: Decimal,
    line_total: Decimal,
}

/// Repository for invoice persistence
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a computed invoice and returns the number it was assigned
    ///
    /// Callers pass an already validated and computed invoice; this method
    /// only assigns the number and writes rows.
    #[instrument(skip(self, customer, computed), fields(customer = %customer.name))]
    pub async fn save(
        &self,
        date: NaiveDate,
        customer: &CustomerDetails,
        computed: &ComputedInvoice,
        tax_mode: TaxMode,
        rates: GstRates,
    ) -> Result<InvoiceNumber, DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(|e| DatabaseError::from(&e))?;

        // Returning customers are matched by phone and get their details
        // refreshed; customers without a phone always get a new row.
        let customer_id: CustomerId = if let Some(phone) = customer.phone.as_deref() {
            sqlx::query_scalar(
                r#"
                INSERT INTO customers (id, name, phone, address, gstin)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (phone) DO UPDATE SET
                    name = EXCLUDED.name,
                    address = COALESCE(EXCLUDED.address, customers.address),
                    gstin = COALESCE(EXCLUDED.gstin, customers.gstin)
                RETURNING id
                "#,
            )
            .bind(Uuid::from(CustomerId::new_v7()))
            .bind(&customer.name)
            .bind(phone)
            .bind(&customer.address)
            .bind(&customer.gstin)
            .fetch_one(&mut *tx)
            .await
            .map(CustomerId::from_uuid)
            .map_err(|e| DatabaseError::from(&e))?
        } else {
            sqlx::query_scalar(
                r#"
                INSERT INTO customers (id, name, address, gstin)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(Uuid::from(CustomerId::new_v7()))
            .bind(&customer.name)
            .bind(&customer.address)
            .bind(&customer.gstin)
            .fetch_one(&mut *tx)
            .await
            .map(CustomerId::from_uuid)
            .map_err(|e| DatabaseError::from(&e))?
        };

        let counter: i64 = sqlx::query_scalar(
            "UPDATE invoice_counter SET value = value + 1 RETURNING value",
        )
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;
        let number = number_from_counter(counter)?;

        let invoice_id = InvoiceId::new_v7();
        let totals = &computed.totals;
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, invoice_date, customer_id, with_gst,
                cgst_rate, sgst_rate,
                taxable_total, cgst_total, sgst_total, grand_total,
                vehicle_number, job_card_number, purchase_order_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(Uuid::from(invoice_id))
        .bind(counter)
        .bind(date)
        .bind(Uuid::from(customer_id))
        .bind(tax_mode.is_taxed())
        .bind(rates.cgst.value())
        .bind(rates.sgst.value())
        .bind(totals.taxable_total.amount())
        .bind(totals.cgst_total.amount())
        .bind(totals.sgst_total.amount())
        .bind(totals.grand_total.amount())
        .bind(&customer.vehicle_number)
        .bind(&customer.job_card_number)
        .bind(&customer.purchase_order_number)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        for (position, line) in computed.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, position, description, hsn_code,
                    quantity, rate,
                    taxable_value, cgst_amount, sgst_amount, line_total
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(Uuid::from(LineItemId::new_v7()))
            .bind(Uuid::from(invoice_id))
            .bind(position as i32)
            .bind(&line.item.description)
            .bind(&line.item.hsn_code)
            .bind(line.item.quantity)
            .bind(line.item.rate.amount())
            .bind(line.taxable_value.amount())
            .bind(line.cgst_amount.amount())
            .bind(line.sgst_amount.amount())
            .bind(line.line_total.amount())
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from(&e))?;
        }

        tx.commit().await.map_err(|e| DatabaseError::from(&e))?;

        info!(invoice_number = counter, "invoice persisted");
        Ok(number)
    }

    /// Loads an invoice, its customer, and its items by invoice number
    pub async fn find_by_number(
        &self,
        number: InvoiceNumber,
    ) -> Result<StoredInvoice, DatabaseError> {
        // A number outside the i64 range cannot exist in the table.
        let number_param = i64::try_from(number.value())
            .map_err(|_| DatabaseError::not_found("Invoice", number))?;

        let header: InvoiceHeaderRow = sqlx::query_as(
            r#"
            SELECT
                i.id, i.invoice_date, i.with_gst,
                i.cgst_rate, i.sgst_rate,
                i.taxable_total, i.cgst_total, i.sgst_total, i.grand_total,
                i.vehicle_number, i.job_card_number, i.purchase_order_number,
                i.created_at,
                c.name AS customer_name,
                c.address AS customer_address,
                c.phone AS customer_phone,
                c.gstin AS customer_gstin
            FROM invoices i
            JOIN customers c ON c.id = i.customer_id
            WHERE i.invoice_number = $1
            "#,
        )
        .bind(number_param)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?
        .ok_or_else(|| DatabaseError::not_found("Invoice", number))?;

        let item_rows: Vec<InvoiceItemRow> = sqlx::query_as(
            r#"
            SELECT description, hsn_code, quantity, rate,
                   taxable_value, cgst_amount, sgst_amount, line_total
            FROM invoice_items
            WHERE invoice_id = $1
            ORDER BY position
            "#,
        )
        .bind(header.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(Self::assemble(number, header, item_rows))
    }

    fn assemble(
        number: InvoiceNumber,
        header: InvoiceHeaderRow,
        item_rows: Vec<InvoiceItemRow>,
    ) -> StoredInvoice {
        let tax_mode = if header.with_gst {
            TaxMode::WithGst
        } else {
            TaxMode::WithoutGst
        };
        let rates = GstRates {
            cgst: Percent::new(header.cgst_rate),
            sgst: Percent::new(header.sgst_rate),
        };

        // Amounts are returned exactly as persisted; nothing is recomputed.
        let lines = item_rows
            .into_iter()
            .map(|row| ComputedLine {
                item: LineItem {
                    description: row.description,
                    hsn_code: row.hsn_code,
                    quantity: row.quantity,
                    rate: Money::new(row.rate),
                },
                taxable_value: Money::new(row.taxable_value),
                cgst_amount: Money::new(row.cgst_amount),
                sgst_amount: Money::new(row.sgst_amount),
                line_total: Money::new(row.line_total),
            })
            .collect();

        let computed = ComputedInvoice {
            lines,
            totals: domain_invoicing::InvoiceTotals {
                taxable_total: Money::new(header.taxable_total),
                cgst_total: Money::new(header.cgst_total),
                sgst_total: Money::new(header.sgst_total),
                grand_total: Money::new(header.grand_total),
            },
        };

        StoredInvoice {
            invoice: RenderableInvoice {
                number,
                date: header.invoice_date,
                customer: CustomerDetails {
                    name: header.customer_name,
                    address: header.customer_address,
                    phone: header.customer_phone,
                    gstin: header.customer_gstin,
                    vehicle_number: header.vehicle_number,
                    job_card_number: header.job_card_number,
                    purchase_order_number: header.purchase_order_number,
                },
                computed,
                tax_mode,
                rates,
            },
            created_at: header.created_at,
        }
    }
}

/// Converts a counter value read from the database into an invoice number,
/// rejecting anything outside the valid range instead of wrapping
fn number_from_counter(value: i64) -> Result<InvoiceNumber, DatabaseError> {
    u64::try_from(value)
        .map(InvoiceNumber::new)
        .map_err(|_| DatabaseError::QueryFailed(format!("invoice counter out of range: {value}")))
}
