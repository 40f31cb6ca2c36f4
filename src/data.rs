//! In-memory model for the sales table.
//!
//! A [`Table`] is the decoded CSV: a header list plus an ordered sequence of
//! [`Row`]s. Rows keep their fields as decoded strings; the `Order Date`
//! column is additionally normalized to a typed [`NaiveDate`] at load time,
//! with unparseable dates coerced to `None` rather than rejected.

use chrono::NaiveDate;

pub const REGION: &str = "Region";
pub const CATEGORY: &str = "Category";
pub const ORDER_DATE: &str = "Order Date";
pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";
pub const DISCOUNT: &str = "Discount";

/// Columns every sales export must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[REGION, CATEGORY, ORDER_DATE, SALES, PROFIT, DISCOUNT];

/// The one date format the export uses, e.g. `11/08/2016`.
pub const ORDER_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parses an `Order Date` cell. Anything that does not match
/// [`ORDER_DATE_FORMAT`] exactly becomes `None`; a bad date never fails the
/// load or blocks the remaining rows.
pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ORDER_DATE_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    fields: Vec<String>,
    order_date: Option<NaiveDate>,
}

impl Row {
    pub fn new(fields: Vec<String>, order_date: Option<NaiveDate>) -> Self {
        Self { fields, order_date }
    }

    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn order_date(&self) -> Option<NaiveDate> {
        self.order_date
    }

    /// Lenient numeric read of a cell: empty or unparseable values yield
    /// `None` and are excluded from aggregates.
    pub fn numeric(&self, index: usize) -> Option<f64> {
        let raw = self.field(index).trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<f64>().ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(predicate);
    }

    /// Renders rows for display: raw fields, except the `Order Date` cell
    /// which shows the normalized date (`YYYY-MM-DD`, blank when null).
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let date_index = self.column_index(ORDER_DATE);
        self.rows
            .iter()
            .map(|row| {
                (0..self.headers.len())
                    .map(|idx| {
                        if Some(idx) == date_index {
                            row.order_date()
                                .map(|d| d.format("%Y-%m-%d").to_string())
                                .unwrap_or_default()
                        } else {
                            row.field(idx).to_string()
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
