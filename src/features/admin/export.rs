//! Spreadsheet rendering for the application export.

use chrono::{DateTime, NaiveDate, Utc};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::AdminApplicationDto;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Applications";

/// Header text and column width, in sheet order
const COLUMNS: [(&str, f64); 17] = [
    ("No", 6.0),
    ("Tracking code", 22.0),
    ("Submitted", 18.0),
    ("Company", 20.0),
    ("Contact", 12.0),
    ("E-mail", 28.0),
    ("Phone", 16.0),
    ("Industry", 20.0),
    ("Service", 26.0),
    ("Budget", 22.0),
    ("Timeline", 14.0),
    ("Status", 10.0),
    ("Current marketing", 40.0),
    ("Challenges", 40.0),
    ("Description", 50.0),
    ("Attachments", 30.0),
    ("Updated", 18.0),
];

fn xlsx_error(e: XlsxError) -> AppError {
    tracing::error!("Failed to build spreadsheet: {:?}", e);
    AppError::Internal("Failed to build spreadsheet".to_string())
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// `attachment; filename="applications_YYYY-MM-DD.xlsx"`
pub fn content_disposition(date: NaiveDate) -> String {
    format!(
        "attachment; filename=\"applications_{}.xlsx\"",
        date.format("%Y-%m-%d")
    )
}

/// Original names joined with ", ", or "None"
fn attachments_cell(app: &AdminApplicationDto) -> String {
    if app.attachments.is_empty() {
        return "None".to_string();
    }
    app.attachments
        .iter()
        .map(|a| a.original_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_cells(app: &AdminApplicationDto) -> [String; 16] {
    [
        app.tracking_code.clone(),
        timestamp(&app.created_at),
        app.company_name.clone(),
        app.contact_name.clone(),
        app.contact_email.clone(),
        app.contact_phone.clone(),
        app.project_title.clone(),
        app.project_type.label().to_string(),
        app.budget_range.label().to_string(),
        app.timeline.clone(),
        app.status.label().to_string(),
        app.ai_requirements.clone(),
        app.blockchain_needs.clone(),
        app.description.clone(),
        attachments_cell(app),
        timestamp(&app.updated_at),
    ]
}

/// Render applications into an xlsx workbook, one row each after a bold header
pub fn build_workbook(applications: &[AdminApplicationDto]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).map_err(xlsx_error)?;

        for (col, (title, width)) in COLUMNS.iter().enumerate() {
            let col = col as u16;
            sheet
                .write_string_with_format(0, col, *title, &header)
                .map_err(xlsx_error)?;
            sheet.set_column_width(col, *width).map_err(xlsx_error)?;
        }

        for (index, app) in applications.iter().enumerate() {
            let row = index as u32 + 1;
            sheet
                .write_number(row, 0, (index + 1) as f64)
                .map_err(xlsx_error)?;
            for (offset, value) in row_cells(app).iter().enumerate() {
                sheet
                    .write_string(row, offset as u16 + 1, value)
                    .map_err(xlsx_error)?;
            }
        }
    }

    workbook.save_to_buffer().map_err(xlsx_error)
}
