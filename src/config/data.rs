use super::traits::ConfigSection;
use crate::data::ColumnSpec;
use crate::error::ChartError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub columns: ColumnSpec,
    pub train_fraction: f64,
    pub min_rows: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            columns: ColumnSpec::default(),
            train_fraction: 0.8,
            min_rows: 2,
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), ChartError> {
        if self.train_fraction <= 0.0 || self.train_fraction >= 1.0 {
            return Err(ChartError::Configuration(
                "Train fraction must be between 0 and 1".to_string()
            ));
        }
        if self.min_rows < 2 {
            return Err(ChartError::Configuration(
                "At least two rows are needed to split a table".to_string()
            ));
        }
        if self.columns.date.trim().is_empty() || self.columns.value.trim().is_empty() {
            return Err(ChartError::Configuration(
                "Date and value column names must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
