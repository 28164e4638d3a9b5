use crate::config::AppConfig;
use crate::data::{series_from_frame_as, ColumnRole, CsvConnector, DatasetMetadata};
use crate::types::PriceSeries;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

pub struct DataLoader;

impl DataLoader {
    /// Load a price CSV and describe it for the data panel
    pub fn load_prices(path: &Path, config: &AppConfig) -> Result<(DataFrame, DatasetMetadata)> {
        let columns = &config.data.columns;
        let df = CsvConnector::load_prices(path, columns, config.data.min_rows)
            .with_context(|| format!("Cannot load prices from {}", path.display()))?;

        let metadata = CsvConnector::create_metadata(path, &df, columns)
            .context("Price table has no usable date/value series")?;

        Ok((df, metadata))
    }

    /// Load a predictions CSV as a single series
    pub fn load_predictions(path: &Path, config: &AppConfig) -> Result<PriceSeries> {
        let columns = &config.data.columns;
        let df = CsvConnector::load_predictions(path, columns)
            .with_context(|| format!("Cannot load predictions from {}", path.display()))?;

        series_from_frame_as(&df, &columns.date, &columns.predicted, ColumnRole::Predicted)
            .context("Predictions table has no usable date/value series")
    }
}
