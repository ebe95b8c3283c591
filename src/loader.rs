//! CSV ingestion of raw assessment rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::EngineConfig;
use crate::dataset::{Dataset, RawRow};

/// Deserializes every row of a headed CSV stream.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let row: RawRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

/// Reads the CSV file at `path` into raw rows.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let rows = read_rows(file).with_context(|| format!("failed to parse {}", path.display()))?;

    debug!(path = %path.display(), rows = rows.len(), "Loaded CSV rows");
    Ok(rows)
}

/// Loads and validates a dataset in one step.
pub fn load_dataset(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Dataset> {
    let path = path.as_ref();
    let rows = load_csv(path)?;
    let dataset = Dataset::construct(rows, config)
        .with_context(|| format!("invalid dataset {}", path.display()))?;
    Ok(dataset)
}
