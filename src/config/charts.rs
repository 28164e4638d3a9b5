use super::traits::ConfigSection;
use crate::error::ChartError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROGRESS_MESSAGE: &str = "Plotting train and test sets...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub split_progress_message: String,
    pub prediction_progress_message: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            split_progress_message: DEFAULT_PROGRESS_MESSAGE.to_string(),
            prediction_progress_message: DEFAULT_PROGRESS_MESSAGE.to_string(),
        }
    }
}

impl ConfigSection for ChartConfig {
    fn section_name() -> &'static str {
        "charts"
    }

    fn validate(&self) -> Result<(), ChartError> {
        Ok(())
    }
}
