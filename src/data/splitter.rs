use crate::error::{ChartError, Result};
use polars::prelude::*;

/// Chronological training/testing split of a price table
#[derive(Debug, Clone)]
pub struct DataSplit {
    pub training: DataFrame,
    pub testing: DataFrame,
}

pub struct TrainTestSplitter {
    train_fraction: f64,
}

impl TrainTestSplitter {
    pub fn new(train_fraction: f64) -> Result<Self> {
        if !(train_fraction > 0.0 && train_fraction < 1.0) {
            return Err(ChartError::Validation(format!(
                "Train fraction must be between 0 and 1, got {}",
                train_fraction
            )));
        }
        Ok(Self { train_fraction })
    }

    pub fn train_fraction(&self) -> f64 {
        self.train_fraction
    }

    /// First `train_fraction` of the rows train, the rest test. Rows must already be in time order.
    pub fn split(&self, data: &DataFrame) -> Result<DataSplit> {
        let total_rows = data.height();
        let train_rows = (total_rows as f64 * self.train_fraction) as usize;

        if train_rows == 0 || train_rows >= total_rows {
            return Err(ChartError::Validation(format!(
                "Invalid split: {} of {} rows leaves an empty side",
                train_rows, total_rows
            )));
        }

        Ok(DataSplit {
            training: data.slice(0, train_rows),
            testing: data.slice(train_rows as i64, total_rows - train_rows),
        })
    }
}
