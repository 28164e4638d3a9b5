use super::figure::ChartDescription;
use crate::error::{ChartError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a chart description as pretty JSON for an external renderer.
pub fn write_chart_json<P: AsRef<Path>>(path: P, chart: &ChartDescription) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        ChartError::DataLoading(format!("Failed to create chart JSON '{}': {}", path.display(), e))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), chart)?;
    log::info!("Wrote chart with {} traces to {}", chart.traces().len(), path.display());
    Ok(())
}

pub fn read_chart_json<P: AsRef<Path>>(path: P) -> Result<ChartDescription> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ChartError::DataLoading(format!("Failed to open chart JSON '{}': {}", path.display(), e))
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
