use super::{
    types::{ColumnRole, ColumnSpec, DatasetMetadata},
    validator::DataValidator,
};
use crate::data::frame::series_from_frame_as;
use crate::error::{ChartError, Result};
use polars::prelude::*;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame, parsing date-like columns
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|opts| opts.with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| ChartError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        log::info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.as_ref().display()
        );
        Ok(df)
    }

    /// Load a price table and check it has usable date and value columns
    pub fn load_prices<P: AsRef<Path>>(path: P, columns: &ColumnSpec, min_rows: usize) -> Result<DataFrame> {
        Self::load_validated(path, columns, ColumnRole::Value, min_rows)
    }

    /// Load a predictions table (date column plus predicted values)
    pub fn load_predictions<P: AsRef<Path>>(path: P, columns: &ColumnSpec) -> Result<DataFrame> {
        Self::load_validated(path, columns, ColumnRole::Predicted, 1)
    }

    fn load_validated<P: AsRef<Path>>(
        path: P,
        columns: &ColumnSpec,
        value_role: ColumnRole,
        min_rows: usize,
    ) -> Result<DataFrame> {
        let df = Self::load(&path)?;

        let preferred = match value_role {
            ColumnRole::Predicted => &columns.predicted,
            _ => &columns.value,
        };
        let date_col = DataValidator::resolve_column(&df, ColumnRole::Date, &columns.date)?;
        let value_col = DataValidator::resolve_column(&df, value_role, preferred)?;
        DataValidator::validate_temporal(&df, &date_col)?;
        DataValidator::validate_numeric(&df, &value_col)?;
        DataValidator::validate_minimum_rows(&df, min_rows)?;

        // Warn about nulls but don't fail
        let null_report = DataValidator::check_nulls(&df);
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        Ok(df)
    }

    /// Create metadata for a loaded price table
    pub fn create_metadata<P: AsRef<Path>>(path: P, df: &DataFrame, columns: &ColumnSpec) -> Result<DatasetMetadata> {
        let date_column = DataValidator::resolve_column(df, ColumnRole::Date, &columns.date)?;
        let value_column = DataValidator::resolve_column(df, ColumnRole::Value, &columns.value)?;
        let series = series_from_frame_as(df, &date_column, &value_column, ColumnRole::Value)?;

        let date_range = series.first_index().zip(series.last_index());

        Ok(DatasetMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_rows: df.height(),
            columns: df.get_column_names().iter().map(|s| s.to_string()).collect(),
            date_column,
            value_column,
            date_range,
            value_range: series.value_range(),
        })
    }
}
