use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_DATA_FILE: &str = "Superstore.csv";

#[derive(Debug, Parser)]
#[command(author, version, about = "Explore Superstore-style sales data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Filter the sales data by region and category and summarize the result
    Explore(ExploreArgs),
    /// List the selectable values for a filter attribute
    Options(OptionsArgs),
    /// Preview the first few rows of the sales data
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// Path to the sales CSV export
    #[arg(short = 'i', long = "input", default_value = DEFAULT_DATA_FILE)]
    pub input: PathBuf,
    /// Region to filter by ("All" keeps every region)
    #[arg(long, default_value = crate::engine::ALL)]
    pub region: String,
    /// Category to filter by ("All" keeps every category)
    #[arg(long, default_value = crate::engine::ALL)]
    pub category: String,
    /// Emit the match count and summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct OptionsArgs {
    /// Path to the sales CSV export
    #[arg(short = 'i', long = "input", default_value = DEFAULT_DATA_FILE)]
    pub input: PathBuf,
    /// Attribute to list values for (e.g. Region or Category)
    #[arg(short = 'a', long = "attribute")]
    pub attribute: String,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Path to the sales CSV export
    #[arg(short = 'i', long = "input", default_value = DEFAULT_DATA_FILE)]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}
