//! Row ⇄ record conversion.
//!
//! Reading never fails: malformed cells fall back to defaults. Writing
//! validates the create payload and synthesizes identifiers from the row count.

use crate::domain::model::{NewOrder, Record};
use crate::domain::row::{CellValue, Row};
use crate::utils::error::{Result, SheetError};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

pub const DEFAULT_PROJECT_NAME: &str = "Unnamed Project";
pub const DEFAULT_PROJECT_TYPE: &str = "Other";
pub const DEFAULT_REGION: &str = "Unknown";
pub const ORDER_ID_PREFIX: &str = "ORD";
pub const PROJECT_ID_PREFIX: &str = "PRJ";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
// 試算表序號日期上限 (9999-12-31)
const MAX_SERIAL_DAY: f64 = 2_958_465.0;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `ORD-007`, `PRJ-123`, `ORD-1000`.
pub fn format_id(prefix: &str, position: usize) -> String {
    format!("{}-{:03}", prefix, position)
}

/// Decimal value of a price cell, `0` when it does not parse.
pub fn parse_price(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Calendar date of a cell. Numbers are spreadsheet serial days.
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Text(s) => parse_date_str(s),
        CellValue::Number(n) if n.is_finite() && *n >= 1.0 && *n <= MAX_SERIAL_DAY => {
            let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
            epoch.checked_add_signed(Duration::days(n.floor() as i64))
        }
        _ => None,
    }
}

pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|datetime| datetime.date())
}

fn text_or(cell: &CellValue, default: &str) -> String {
    cell.as_text().unwrap_or_else(|| default.to_string())
}

pub fn row_to_record(row: &Row, row_index: usize) -> Record {
    row_to_record_on(row, row_index, today())
}

/// `row_index` is the 1-based position among data rows; it seeds the
/// identifiers when the stored ones are missing.
pub fn row_to_record_on(row: &Row, row_index: usize, today: NaiveDate) -> Record {
    Record {
        order_id: row
            .order_id()
            .as_text()
            .unwrap_or_else(|| format_id(ORDER_ID_PREFIX, row_index)),
        project_id: row
            .project_id()
            .as_text()
            .unwrap_or_else(|| format_id(PROJECT_ID_PREFIX, row_index)),
        project_name: text_or(row.project_name(), DEFAULT_PROJECT_NAME),
        project_type: text_or(row.project_type(), DEFAULT_PROJECT_TYPE),
        region: text_or(row.region(), DEFAULT_REGION),
        price: parse_price(row.price()),
        date: parse_date(row.date())
            .unwrap_or(today)
            .format(DATE_FORMAT)
            .to_string(),
    }
}

fn required_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// projectName, projectType, region and a non-zero price must all be present.
pub fn validate_order(input: &NewOrder) -> Result<()> {
    let price = input.price.as_ref().map(parse_price).unwrap_or(0.0);

    if required_text(&input.project_name).is_none()
        || required_text(&input.project_type).is_none()
        || required_text(&input.region).is_none()
        || price == 0.0
    {
        return Err(SheetError::validation(MISSING_FIELDS_MESSAGE));
    }

    Ok(())
}

/// Builds the row appended for a create request. `data_rows` is the number
/// of data rows already stored; the new row takes position `data_rows + 1`.
pub fn record_to_row(input: &NewOrder, data_rows: usize, today: NaiveDate) -> Result<Row> {
    validate_order(input)?;

    let position = data_rows + 1;
    let date = input
        .date
        .as_deref()
        .and_then(parse_date_str)
        .unwrap_or(today);

    // validate_order 已確認以下欄位存在
    let text = |value: &Option<String>| CellValue::Text(value.clone().unwrap_or_default());

    Ok(Row::from_cells(vec![
        CellValue::Text(format_id(ORDER_ID_PREFIX, position)),
        CellValue::Text(format_id(PROJECT_ID_PREFIX, position)),
        text(&input.project_name),
        text(&input.project_type),
        text(&input.region),
        CellValue::Number(input.price.as_ref().map(parse_price).unwrap_or(0.0)),
        CellValue::Text(date.format(DATE_FORMAT).to_string()),
    ]))
}
