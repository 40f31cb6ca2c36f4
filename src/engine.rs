//! Filter and summary engine.
//!
//! A pure, stateless transformation: given a loaded [`Table`] and a
//! [`Selection`] of attribute choices, produce the matching subset and (for a
//! non-empty subset) three summary metrics. Filters are exact, case-sensitive
//! equality matches combined with AND; the [`ALL`] sentinel means "no
//! constraint on this attribute". Row order is preserved throughout and the
//! input table is never mutated.

use std::collections::BTreeSet;

use anyhow::{Result, anyhow};
use log::debug;
use serde::Serialize;

use crate::data::{DISCOUNT, PROFIT, SALES, Table};

/// Sentinel selection value meaning "no constraint".
pub const ALL: &str = "All";

/// Ordered attribute choices, e.g. `Region -> "West"`, `Category -> "All"`.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub choices: Vec<(String, String)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.choices.push((attribute.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_sales: f64,
    pub total_profit: f64,
    pub avg_discount_percent: f64,
}

/// Applies `selection` to `table` and summarizes the result.
///
/// Returns the matching subset (a sub-sequence of `table` in original order)
/// and `Some(Summary)` when the subset is non-empty. Naming an attribute that
/// is not a column of `table` is an error.
pub fn apply(table: &Table, selection: &Selection) -> Result<(Table, Option<Summary>)> {
    let mut subset = table.clone();
    for (attribute, value) in &selection.choices {
        if value == ALL {
            continue;
        }
        let index = table
            .column_index(attribute)
            .ok_or_else(|| anyhow!("Column '{attribute}' not found for filter"))?;
        debug!("Filtering by {attribute}: {value}");
        subset.retain(|row| row.field(index) == value.as_str());
    }
    let summary = summarize(&subset)?;
    Ok((subset, summary))
}

/// Whole-table aggregates: `None` for an empty table, otherwise the sum of
/// `Sales` and `Profit` and the mean `Discount` as a percentage.
///
/// Cells that are empty or fail to parse as a number are excluded from the
/// sums and from the mean denominator; a table whose discount sample is
/// entirely unparseable reports a 0.0 average.
pub fn summarize(table: &Table) -> Result<Option<Summary>> {
    if table.is_empty() {
        return Ok(None);
    }
    let sales = required_column(table, SALES)?;
    let profit = required_column(table, PROFIT)?;
    let discount = required_column(table, DISCOUNT)?;

    let total_sales: f64 = table.rows().iter().filter_map(|r| r.numeric(sales)).sum();
    let total_profit: f64 = table.rows().iter().filter_map(|r| r.numeric(profit)).sum();

    let discounts: Vec<f64> = table
        .rows()
        .iter()
        .filter_map(|r| r.numeric(discount))
        .collect();
    let avg_discount_percent = if discounts.is_empty() {
        0.0
    } else {
        discounts.iter().sum::<f64>() / discounts.len() as f64 * 100.0
    };

    Ok(Some(Summary {
        total_sales,
        total_profit,
        avg_discount_percent,
    }))
}

/// Distinct values of `attribute`, deduplicated and in ascending
/// case-sensitive lexical order. Callers prefix the [`ALL`] sentinel when
/// presenting options.
pub fn distinct_values(table: &Table, attribute: &str) -> Result<Vec<String>> {
    let index = table
        .column_index(attribute)
        .ok_or_else(|| anyhow!("Column '{attribute}' not found in table"))?;
    let values: BTreeSet<String> = table
        .rows()
        .iter()
        .map(|row| row.field(index).to_string())
        .collect();
    Ok(values.into_iter().collect())
}

fn required_column(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| anyhow!("Column '{name}' not found in table"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CATEGORY, REGION, Row};

    fn sample_table() -> Table {
        let headers = vec![
            REGION.to_string(),
            CATEGORY.to_string(),
            SALES.to_string(),
            PROFIT.to_string(),
            DISCOUNT.to_string(),
        ];
        let rows = vec![
            row(&["West", "Furniture", "100", "10", "0.1"]),
            row(&["East", "Furniture", "200", "40", "0.2"]),
        ];
        Table::new(headers, rows)
    }

    fn row(fields: &[&str]) -> Row {
        Row::new(fields.iter().map(|s| s.to_string()).collect(), None)
    }

    #[test]
    fn west_selection_yields_first_row_and_its_metrics() {
        let table = sample_table();
        let selection = Selection::new().with(REGION, "West").with(CATEGORY, ALL);

        let (subset, summary) = apply(&table, &selection).unwrap();
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.rows()[0].field(0), "West");

        let summary = summary.expect("non-empty subset has a summary");
        assert_eq!(summary.total_sales, 100.0);
        assert_eq!(summary.total_profit, 10.0);
        assert!((summary.avg_discount_percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn all_sentinel_passes_the_whole_table_through() {
        let table = sample_table();
        let selection = Selection::new().with(REGION, ALL).with(CATEGORY, ALL);

        let (subset, summary) = apply(&table, &selection).unwrap();
        assert_eq!(subset, table);
        assert_eq!(summary, summarize(&table).unwrap());
    }

    #[test]
    fn empty_subset_has_no_summary() {
        let table = sample_table();
        let selection = Selection::new()
            .with(REGION, "West")
            .with(CATEGORY, "Technology");

        let (subset, summary) = apply(&table, &selection).unwrap();
        assert!(subset.is_empty());
        assert!(summary.is_none());
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let table = sample_table();
        let (subset, _) = apply(&table, &Selection::new().with(REGION, "west")).unwrap();
        assert!(subset.is_empty());
        let (subset, _) = apply(&table, &Selection::new().with(REGION, "Wes")).unwrap();
        assert!(subset.is_empty());
    }

    #[test]
    fn unknown_filter_attribute_is_an_error() {
        let table = sample_table();
        let err = apply(&table, &Selection::new().with("Segment", "Consumer")).unwrap_err();
        assert!(err.to_string().contains("Segment"));
    }

    #[test]
    fn apply_never_mutates_the_input() {
        let table = sample_table();
        let before = table.clone();
        let _ = apply(&table, &Selection::new().with(REGION, "West")).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn distinct_values_are_sorted_and_deduplicated() {
        let headers = vec![REGION.to_string()];
        let rows = vec![row(&["West"]), row(&["East"]), row(&["West"]), row(&["Central"])];
        let table = Table::new(headers, rows);

        assert_eq!(
            distinct_values(&table, REGION).unwrap(),
            vec!["Central", "East", "West"]
        );
    }

    #[test]
    fn summarize_excludes_unparseable_numeric_cells() {
        let headers = vec![SALES.to_string(), PROFIT.to_string(), DISCOUNT.to_string()];
        let rows = vec![
            row(&["100", "10", "0.2"]),
            row(&["n/a", "", "bad"]),
            row(&["50", "5", "0.4"]),
        ];
        let table = Table::new(headers, rows);

        let summary = summarize(&table).unwrap().expect("summary");
        assert_eq!(summary.total_sales, 150.0);
        assert_eq!(summary.total_profit, 15.0);
        // Mean over the two parseable discounts only.
        assert!((summary.avg_discount_percent - 30.0).abs() < 1e-9);
    }

    #[test]
    fn summarize_with_no_parseable_discounts_reports_zero() {
        let headers = vec![SALES.to_string(), PROFIT.to_string(), DISCOUNT.to_string()];
        let table = Table::new(headers, vec![row(&["100", "10", "oops"])]);

        let summary = summarize(&table).unwrap().expect("summary");
        assert_eq!(summary.avg_discount_percent, 0.0);
    }
}
