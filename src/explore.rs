//! The `explore` subcommand: filter, display, summarize.

use std::{path::Path, sync::Arc};

use anyhow::{Result, anyhow};
use log::info;
use serde::Serialize;

use crate::{
    cli::ExploreArgs,
    data::{CATEGORY, REGION, Table},
    engine::{self, Selection, Summary},
    loader::{self, LoadError},
    table,
};

#[derive(Debug, Serialize)]
struct ExploreReport {
    region: String,
    category: String,
    matching_records: usize,
    summary: Option<Summary>,
}

pub fn execute(args: &ExploreArgs) -> Result<()> {
    let data = load_or_message(&args.input)?;
    let selection = Selection::new()
        .with(REGION, args.region.as_str())
        .with(CATEGORY, args.category.as_str());
    let (subset, summary) = engine::apply(&data, &selection)?;

    if args.json {
        let report = ExploreReport {
            region: args.region.clone(),
            category: args.category.clone(),
            matching_records: subset.len(),
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Showing data for {} region and {} category.",
        args.region, args.category
    );
    println!("Found {} matching record(s).", subset.len());

    if subset.is_empty() {
        return Ok(());
    }

    println!();
    table::print_table(subset.headers(), &subset.display_rows());

    if let Some(summary) = summary {
        println!();
        println!("Total Sales    {}", format_currency(summary.total_sales));
        println!("Total Profit   {}", format_currency(summary.total_profit));
        println!("Avg. Discount  {:.1}%", summary.avg_discount_percent);
    }

    info!(
        "Displayed {} of {} row(s) from {:?}",
        subset.len(),
        data.len(),
        args.input
    );
    Ok(())
}

/// Loads the table, recovering a missing file into a user-facing message. The
/// engine is never reached when the load fails.
pub fn load_or_message(path: &Path) -> Result<Arc<Table>> {
    loader::load(path).map_err(|err| match err {
        LoadError::NotFound { path } => anyhow!(
            "Couldn't find the file: {}. Make sure the sales export exists there, or pass --input.",
            path.display()
        ),
        LoadError::Other(err) => err,
    })
}

/// Formats a dollar amount with thousands grouping, e.g. `$1,234.56`.
fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (idx, digit) in whole.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let whole: String = grouped.chars().rev().collect();

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${whole}.{cents}")
}
