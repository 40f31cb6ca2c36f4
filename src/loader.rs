//! Dataset loader with a process-lifetime cache.
//!
//! [`load()`] reads the sales export once per distinct path and memoizes the
//! resulting [`Table`] behind an `Arc`. Repeated loads of the same path return
//! the cached table without touching the file; there is no eviction and no
//! invalidation when the file changes on disk, a known staleness trade-off.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock},
};

use anyhow::{Context, Result, anyhow};
use log::info;
use thiserror::Error;

use crate::{
    data::{ORDER_DATE, REQUIRED_COLUMNS, Row, Table, parse_order_date},
    io_utils,
};

#[derive(Debug, Error)]
pub enum LoadError {
    /// The data file does not exist. Callers present this to the user and
    /// must not proceed to filtering.
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<Table>>>> = OnceLock::new();

/// Loads the sales table at `path`, consulting the path-keyed cache first.
pub fn load(path: &Path) -> Result<Arc<Table>, LoadError> {
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    if let Some(table) = cache.lock().expect("loader cache mutex").get(path) {
        return Ok(Arc::clone(table));
    }

    info!("Loading sales data from {path:?}");
    let table = Arc::new(read_table(path)?);
    info!("Loaded {} row(s) from {path:?}", table.len());

    // Two racing first loads may both read the file; the first insertion wins
    // so at most one table per path survives.
    let mut guard = cache.lock().expect("loader cache mutex");
    let entry = guard
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::clone(&table));
    Ok(Arc::clone(entry))
}

fn read_table(path: &Path) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let delimiter = io_utils::resolve_input_delimiter(path);
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader)?;
    validate_headers(&headers, path)?;
    let date_index = headers
        .iter()
        .position(|h| h == ORDER_DATE)
        .ok_or_else(|| anyhow!("Column '{ORDER_DATE}' missing after validation"))?;

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let fields = io_utils::decode_record(&record)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        let order_date = fields
            .get(date_index)
            .and_then(|value| parse_order_date(value));
        rows.push(Row::new(fields, order_date));
    }

    Ok(Table::new(headers, rows))
}

fn validate_headers(headers: &[String], path: &Path) -> Result<()> {
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "Input {path:?} is missing required column(s): {}",
            missing.join(", ")
        ))
    }
}
