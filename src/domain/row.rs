//! Fixed-width rows as stored in the sheet.
//!
//! Host values arrive as loosely-typed cell arrays; they are normalised into
//! [`Row`] once, at the store boundary, so nothing above it indexes by position.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const COLUMN_COUNT: usize = 7;

pub const HEADERS: [&str; COLUMN_COUNT] = [
    "Order ID",
    "Project ID",
    "Project Name",
    "Project Type",
    "Region",
    "Price",
    "Date",
];

/// A raw spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Spreadsheet truthiness: empty, `""`, `0` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Text(s) => !s.is_empty(),
        }
    }

    /// Text of a truthy cell, `None` otherwise.
    pub fn as_text(&self) -> Option<String> {
        if self.is_truthy() {
            Some(self.to_string())
        } else {
            None
        }
    }

    /// Infer a typed cell from its textual form (CSV storage).
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Empty;
        }
        match raw {
            "TRUE" => return CellValue::Bool(true),
            "FALSE" => return CellValue::Bool(false),
            _ => {}
        }
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && raw.trim() == raw => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// Column-aware [`CellValue::infer`]: only the price column is typed,
    /// every other column keeps its text verbatim (`"007"` stays `"007"`).
    pub fn infer_at(index: usize, raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else if index == Column::Price.index() {
            Self::infer(raw)
        } else {
            CellValue::Text(raw.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    OrderId = 0,
    ProjectId = 1,
    ProjectName = 2,
    ProjectType = 3,
    Region = 4,
    Price = 5,
    Date = 6,
}

impl Column {
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: [CellValue; COLUMN_COUNT],
}

impl Row {
    /// Short rows are padded with empty cells; extra cells are dropped.
    pub fn from_cells(cells: Vec<CellValue>) -> Self {
        let mut iter = cells.into_iter();
        Self {
            cells: std::array::from_fn(|_| iter.next().unwrap_or_default()),
        }
    }

    pub fn header() -> Self {
        Self {
            cells: HEADERS.map(CellValue::from),
        }
    }

    pub fn get(&self, column: Column) -> &CellValue {
        &self.cells[column.index()]
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<CellValue> {
        self.cells.into()
    }

    pub fn order_id(&self) -> &CellValue {
        self.get(Column::OrderId)
    }

    pub fn project_id(&self) -> &CellValue {
        self.get(Column::ProjectId)
    }

    pub fn project_name(&self) -> &CellValue {
        self.get(Column::ProjectName)
    }

    pub fn project_type(&self) -> &CellValue {
        self.get(Column::ProjectType)
    }

    pub fn region(&self) -> &CellValue {
        self.get(Column::Region)
    }

    pub fn price(&self) -> &CellValue {
        self.get(Column::Price)
    }

    pub fn date(&self) -> &CellValue {
        self.get(Column::Date)
    }
}
