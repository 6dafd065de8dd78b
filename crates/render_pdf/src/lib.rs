//! PDF rendering for workshop tax invoices
//!
//! Produces a single-page A4 invoice: company letterhead, customer and
//! vehicle block, an items table whose tax columns appear only on GST
//! invoices, a totals block, and the signature footer. All amounts come
//! pre-computed from the domain layer; nothing here recalculates.

pub mod company;

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use qrcode::QrCode;
use thiserror::Error;

use domain_invoicing::RenderableInvoice;

pub use company::CompanyProfile;

/// Errors raised while producing the PDF
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Too many line items for a single page: {0}")]
    TooManyItems(usize),
}

/// How many item rows fit on one page between the table header and the
/// totals/footer block. Callers that assign invoice numbers before
/// rendering must reject longer item lists up front.
pub const MAX_LINE_ITEMS: usize = 24;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const RIGHT_EDGE_MM: f32 = PAGE_WIDTH_MM - MARGIN_MM;

const QR_SIZE_MM: f32 = 24.0;
const QR_QUIET_ZONE: usize = 4;
const QR_SCALE_PX: usize = 4;

fn push_line(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, font_size, Mm(x), Mm(y), font);
}

/// Right-aligns `text` so it ends at `x_right`
///
/// Helvetica has no kerning table here, so width is estimated from a mean
/// glyph advance. Amount columns hold short numeric strings where the
/// estimate is accurate to well under a millimetre.
fn push_line_right(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x_right: f32,
    y: f32,
) {
    let approx_width = text.chars().count() as f32 * font_size * 0.5 * 0.3528;
    layer.use_text(text, font_size, Mm(x_right - approx_width), Mm(y), font);
}

fn divider(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    layer.add_line(printpdf::Line {
        points: vec![
            (printpdf::Point::new(Mm(x1), Mm(y)), false),
            (printpdf::Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Embeds the logo if a readable PNG is configured; a missing or bad file
/// is logged and skipped so the invoice still renders
fn try_embed_logo(layer: &PdfLayerReference, company: &CompanyProfile) -> bool {
    use printpdf::image_crate::codecs::png::PngDecoder;
    use printpdf::{Image, ImageTransform};

    let Some(path) = company.logo_path.as_deref() else {
        return false;
    };

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path, error = %e, "logo not readable, rendering without it");
            return false;
        }
    };

    let decoder = match PngDecoder::new(std::io::Cursor::new(bytes)) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(path, error = %e, "logo is not a valid PNG, rendering without it");
            return false;
        }
    };

    let image = match Image::try_from(decoder) {
        Ok(i) => i,
        Err(e) => {
            tracing::warn!(path, error = %e, "logo could not be embedded, rendering without it");
            return false;
        }
    };

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM)),
            translate_y: Some(Mm(PAGE_HEIGHT_MM - 38.0)),
            ..Default::default()
        },
    );
    true
}

/// The payload encoded in the verification QR: seller GSTIN, invoice
/// number, date, and grand total, pipe-separated
fn qr_payload(invoice: &RenderableInvoice, company: &CompanyProfile) -> String {
    format!(
        "{}|{}|{}|{}",
        company.gstin,
        invoice.number,
        invoice.date.format("%d%m%Y"),
        invoice.computed.totals.grand_total,
    )
}

/// Draws the verification QR in the top-right corner; a QR that cannot be
/// built or embedded is logged and skipped so the invoice still renders
fn try_draw_qr(
    layer: &PdfLayerReference,
    invoice: &RenderableInvoice,
    company: &CompanyProfile,
) -> bool {
    use printpdf::image_crate::codecs::png::{PngDecoder, PngEncoder};
    use printpdf::image_crate::{ColorType, ImageEncoder};
    use printpdf::{Image, ImageTransform};

    let payload = qr_payload(invoice, company);
    let code = match QrCode::new(payload.as_bytes()) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "verification QR could not be built, rendering without it");
            return false;
        }
    };

    // Rasterize to a greyscale PNG: dark modules on white, with a quiet zone.
    let width = code.width();
    let px = (width + 2 * QR_QUIET_ZONE) * QR_SCALE_PX;
    let mut pixels = vec![255u8; px * px];
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let (mx, my) = (i % width, i / width);
        for dy in 0..QR_SCALE_PX {
            for dx in 0..QR_SCALE_PX {
                let x = (mx + QR_QUIET_ZONE) * QR_SCALE_PX + dx;
                let y = (my + QR_QUIET_ZONE) * QR_SCALE_PX + dy;
                pixels[y * px + x] = 0;
            }
        }
    }

    let mut png = Vec::new();
    if let Err(e) =
        PngEncoder::new(&mut png).write_image(&pixels, px as u32, px as u32, ColorType::L8)
    {
        tracing::warn!(error = %e, "verification QR could not be encoded, rendering without it");
        return false;
    }

    let decoder = match PngDecoder::new(std::io::Cursor::new(png)) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "verification QR could not be decoded, rendering without it");
            return false;
        }
    };

    let image = match Image::try_from(decoder) {
        Ok(i) => i,
        Err(e) => {
            tracing::warn!(error = %e, "verification QR could not be embedded, rendering without it");
            return false;
        }
    };

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(RIGHT_EDGE_MM - QR_SIZE_MM)),
            translate_y: Some(Mm(PAGE_HEIGHT_MM - MARGIN_MM - QR_SIZE_MM)),
            dpi: Some(px as f32 * 25.4 / QR_SIZE_MM),
            ..Default::default()
        },
    );
    true
}

/// Renders the invoice to PDF bytes
pub fn render_invoice(
    invoice: &RenderableInvoice,
    company: &CompanyProfile,
) -> Result<Vec<u8>, RenderError> {
    if invoice.computed.lines.len() > MAX_LINE_ITEMS {
        return Err(RenderError::TooManyItems(invoice.computed.lines.len()));
    }

    let with_gst = invoice.tax_mode.is_taxed();

    let (doc, page1, layer1) = PdfDocument::new(
        format!("Invoice {}", invoice.number),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    // Letterhead, indented when the logo renders
    let logo_drawn = try_embed_logo(&layer, company);
    let head_x = if logo_drawn { MARGIN_MM + 25.0 } else { MARGIN_MM };

    if try_draw_qr(&layer, invoice, company) {
        push_line_right(
            &layer,
            &font,
            "Scan for Verification",
            8.0,
            RIGHT_EDGE_MM,
            PAGE_HEIGHT_MM - MARGIN_MM - QR_SIZE_MM - 4.0,
        );
    }

    let mut y = PAGE_HEIGHT_MM - 15.0;
    push_line(&layer, &font_bold, &company.name, 14.0, head_x, y);
    for line in [
        &company.tagline,
        &company.address_line1,
        &company.address_line2,
        &company.state_line,
        &company.phone,
        &company.gstin,
    ] {
        y -= 5.0;
        push_line(&layer, &font, line, 10.0, head_x, y);
    }

    // Title and invoice meta
    y -= 12.0;
    let title = if with_gst { "TAX INVOICE" } else { "INVOICE" };
    push_line(&layer, &font_bold, title, 18.0, MARGIN_MM, y);
    push_line_right(
        &layer,
        &font_bold,
        &format!("Invoice #: {}", invoice.number),
        12.0,
        RIGHT_EDGE_MM,
        y,
    );
    y -= 6.0;
    push_line_right(
        &layer,
        &font_bold,
        &format!("Date : {}", invoice.formatted_date()),
        12.0,
        RIGHT_EDGE_MM,
        y,
    );

    // Customer and vehicle block
    y -= 10.0;
    push_line(&layer, &font_bold, "Bill To :", 12.0, MARGIN_MM, y);
    push_line(&layer, &font, &invoice.customer.name, 11.0, MARGIN_MM + 25.0, y);
    if let Some(vehicle) = &invoice.customer.vehicle_number {
        push_line(
            &layer,
            &font,
            &format!("Vehicle No.: {vehicle}"),
            11.0,
            120.0,
            y,
        );
    }
    y -= 5.0;
    if let Some(address) = &invoice.customer.address {
        push_line(&layer, &font, address, 11.0, MARGIN_MM + 25.0, y);
    }
    if let Some(job_card) = &invoice.customer.job_card_number {
        push_line(
            &layer,
            &font,
            &format!("Job-Card No.: {job_card}"),
            11.0,
            120.0,
            y,
        );
    }
    y -= 5.0;
    if let Some(phone) = &invoice.customer.phone {
        push_line(&layer, &font, phone, 11.0, MARGIN_MM + 25.0, y);
    }
    if let Some(po) = &invoice.customer.purchase_order_number {
        push_line(&layer, &font, &format!("PO No.: {po}"), 11.0, 120.0, y);
    }

    // Items table; tax columns only on GST invoices
    y -= 12.0;
    let x_sl = MARGIN_MM;
    let x_desc = MARGIN_MM + 10.0;
    let x_hsn = 85.0;
    let x_qty = 103.0;
    let (x_rate, x_tax, x_cgst, x_sgst, x_amt) = if with_gst {
        (118.0, 138.0, 158.0, 176.0, RIGHT_EDGE_MM)
    } else {
        (140.0, 0.0, 0.0, 0.0, RIGHT_EDGE_MM)
    };

    push_line(&layer, &font_bold, "Sl.", 10.0, x_sl, y);
    push_line(&layer, &font_bold, "Description", 10.0, x_desc, y);
    push_line(&layer, &font_bold, "HSN", 10.0, x_hsn, y);
    push_line(&layer, &font_bold, "Qty", 10.0, x_qty, y);
    push_line_right(&layer, &font_bold, "Rate", 10.0, x_rate, y);
    if with_gst {
        push_line_right(
            &layer,
            &font_bold,
            &format!("CGST {}", invoice.rates.cgst),
            10.0,
            x_cgst,
            y,
        );
        push_line_right(
            &layer,
            &font_bold,
            &format!("SGST {}", invoice.rates.sgst),
            10.0,
            x_sgst,
            y,
        );
        push_line_right(&layer, &font_bold, "Taxable", 10.0, x_tax, y);
    }
    push_line_right(&layer, &font_bold, "Amount", 10.0, x_amt, y);
    y -= 2.0;
    divider(&layer, MARGIN_MM, RIGHT_EDGE_MM, y);
    y -= 6.0;

    for (idx, line) in invoice.computed.lines.iter().enumerate() {
        push_line(&layer, &font, &format!("{}", idx + 1), 10.0, x_sl, y);
        push_line(&layer, &font, &line.item.description, 10.0, x_desc, y);
        if let Some(hsn) = &line.item.hsn_code {
            push_line(&layer, &font, hsn, 10.0, x_hsn, y);
        }
        push_line(&layer, &font, &line.item.quantity.normalize().to_string(), 10.0, x_qty, y);
        push_line_right(&layer, &font, &line.item.rate.to_string(), 10.0, x_rate, y);
        if with_gst {
            push_line_right(&layer, &font, &line.taxable_value.to_string(), 10.0, x_tax, y);
            push_line_right(&layer, &font, &line.cgst_amount.to_string(), 10.0, x_cgst, y);
            push_line_right(&layer, &font, &line.sgst_amount.to_string(), 10.0, x_sgst, y);
        }
        push_line_right(&layer, &font, &line.line_total.to_string(), 10.0, x_amt, y);
        y -= 5.5;
    }

    y -= 1.0;
    divider(&layer, 110.0, RIGHT_EDGE_MM, y);

    // Totals block
    let totals = &invoice.computed.totals;
    let mut rows: Vec<(&str, String)> = vec![("Taxable", totals.taxable_total.to_string())];
    if with_gst {
        rows.push(("CGST", totals.cgst_total.to_string()));
        rows.push(("SGST", totals.sgst_total.to_string()));
    }
    rows.push(("Grand Total", totals.grand_total.to_string()));

    for (label, value) in rows {
        y -= 5.5;
        push_line(&layer, &font_bold, &format!("{label} :"), 10.0, 130.0, y);
        push_line_right(&layer, &font_bold, &value, 10.0, x_amt, y);
    }

    // Footer: disclaimer left, signature right
    push_line(
        &layer,
        &font,
        "Goods once sold cannot be taken back.",
        9.0,
        MARGIN_MM,
        30.0,
    );
    push_line(
        &layer,
        &font,
        "Disputes are subject to Gudivada jurisdiction only.",
        9.0,
        MARGIN_MM,
        25.0,
    );
    push_line_right(
        &layer,
        &font,
        &format!("For {}", company.name),
        9.0,
        RIGHT_EDGE_MM,
        18.0,
    );
    push_line_right(&layer, &font, "Proprietor", 9.0, RIGHT_EDGE_MM, 13.0);

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::sample_invoice;

    #[test]
    fn test_renders_pdf_bytes() {
        let invoice = sample_invoice(1);
        let bytes = render_invoice(&invoice, &CompanyProfile::default()).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_qr_payload_format() {
        let invoice = sample_invoice(7);
        let payload = qr_payload(&invoice, &CompanyProfile::default());

        assert_eq!(payload, "GSTIN : 37CYCP5977H1ZM|0007|23082026|1286.20");
    }

    #[test]
    fn test_missing_logo_is_skipped() {
        let invoice = sample_invoice(2);
        let company = CompanyProfile {
            logo_path: Some("/nonexistent/logo.png".to_string()),
            ..Default::default()
        };

        let bytes = render_invoice(&invoice, &company).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_cash_bill_renders() {
        use domain_invoicing::{compute, GstRates, InvoiceNumber, RenderableInvoice, TaxMode};
        use rust_decimal_macros::dec;
        use test_utils::{CustomerBuilder, LineItemBuilder};

        let items = vec![LineItemBuilder::new().quantity(dec!(2)).rate(dec!(75)).build()];
        let rates = GstRates::default();
        let invoice = RenderableInvoice {
            number: InvoiceNumber::new(3),
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            customer: CustomerBuilder::new().build(),
            computed: compute(&items, TaxMode::WithoutGst, rates).unwrap(),
            tax_mode: TaxMode::WithoutGst,
            rates,
        };

        let bytes = render_invoice(&invoice, &CompanyProfile::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_too_many_items_rejected() {
        use domain_invoicing::{compute, GstRates, InvoiceNumber, RenderableInvoice, TaxMode};
        use rust_decimal_macros::dec;
        use test_utils::{CustomerBuilder, LineItemBuilder};

        let items: Vec<_> = (0..60)
            .map(|i| {
                LineItemBuilder::new()
                    .description(format!("Item {i}"))
                    .quantity(dec!(1))
                    .rate(dec!(10))
                    .build()
            })
            .collect();
        let rates = GstRates::default();
        let invoice = RenderableInvoice {
            number: InvoiceNumber::new(4),
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            customer: CustomerBuilder::new().build(),
            computed: compute(&items, TaxMode::WithGst, rates).unwrap(),
            tax_mode: TaxMode::WithGst,
            rates,
        };

        let result = render_invoice(&invoice, &CompanyProfile::default());
        assert!(matches!(result, Err(RenderError::TooManyItems(60))));
    }

    #[test]
    fn test_full_page_renders() {
        use domain_invoicing::{compute, GstRates, InvoiceNumber, RenderableInvoice, TaxMode};
        use rust_decimal_macros::dec;
        use test_utils::{CustomerBuilder, LineItemBuilder};

        let items: Vec<_> = (0..MAX_LINE_ITEMS)
            .map(|i| {
                LineItemBuilder::new()
                    .description(format!("Item {i}"))
                    .quantity(dec!(1))
                    .rate(dec!(10))
                    .build()
            })
            .collect();
        let rates = GstRates::default();
        let invoice = RenderableInvoice {
            number: InvoiceNumber::new(5),
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            customer: CustomerBuilder::new().build(),
            computed: compute(&items, TaxMode::WithGst, rates).unwrap(),
            tax_mode: TaxMode::WithGst,
            rates,
        };

        let bytes = render_invoice(&invoice, &CompanyProfile::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
