//! Excel export functionality.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::path::{Path, PathBuf};

use crate::format::{format_currency, format_datetime, parse_amount};
use crate::listing::SaleRow;

/// Export the sales currently shown in the list to an Excel file.
///
/// Rows are written in the given order. Amounts are written as numbers when they
/// parse, otherwise as the formatted `N/A` text.
pub fn export_sales_to_excel(rows: &[SaleRow<'_>], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Sales")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let money_format = Format::new().set_num_format("$#,##0.00");
    let na_format = Format::new().set_align(FormatAlign::Right);

    // Headers
    let headers = [
        "ID",
        "Date",
        "Customer",
        "Payment Method",
        "Subtotal",
        "Tax",
        "Discounts",
        "Total",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 8)?; // ID
    worksheet.set_column_width(1, 22)?; // Date
    worksheet.set_column_width(2, 30)?; // Customer
    worksheet.set_column_width(3, 16)?; // Payment Method
    for col in 4..=7 {
        worksheet.set_column_width(col, 12)?;
    }

    // Data rows
    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        let sale = row.sale;

        worksheet.write_number(r, 0, sale.sale_id as f64)?;
        worksheet.write_string(r, 1, format_datetime(&sale.sale_datetime))?;
        worksheet.write_string(r, 2, &row.customer)?;
        worksheet.write_string(r, 3, &sale.payment_method)?;

        let amounts = [&sale.subtotal, &sale.tax, &sale.total_discounts_amount, &sale.total];
        for (offset, text) in amounts.iter().enumerate() {
            let col = 4 + offset as u16;
            match parse_amount(text) {
                Some(v) => worksheet.write_number_with_format(r, col, v, &money_format)?,
                None => worksheet.write_string_with_format(r, col, format_currency(text), &na_format)?,
            };
        }
    }

    // Autofilter
    if !rows.is_empty() {
        let last_row = rows.len() as u32;
        worksheet.autofilter(0, 0, last_row, 7)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate a timestamped filename for exports.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}
