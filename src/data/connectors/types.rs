use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Columns a price table must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Date,
    Value,
    Predicted,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Value => "value",
            Self::Predicted => "predicted",
        }
    }

    /// Common alternative column names
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Date => vec!["Date", "date", "DATE", "Datetime", "datetime", "timestamp", "time"],
            Self::Value => vec!["Adj Close", "adj_close", "Adj. Close", "adjclose", "Close", "close"],
            Self::Predicted => vec!["Predicted", "predicted", "prediction", "pred", "yhat"],
        }
    }
}

/// Which columns hold the index and the plotted values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub date: String,
    pub value: String,
    pub predicted: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            value: "Adj Close".to_string(),
            predicted: "Predicted".to_string(),
        }
    }
}

/// Metadata about a loaded price file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub file_path: String,
    pub num_rows: usize,
    pub columns: Vec<String>,
    pub date_column: String,
    pub value_column: String,
    pub date_range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub value_range: Option<(f64, f64)>,
}
