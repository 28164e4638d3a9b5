use super::types::ColumnRole;
use crate::error::{ChartError, Result};
use polars::prelude::*;

pub struct DataValidator;

impl DataValidator {
    /// Find the column for `role`, trying `preferred` first and then the role's aliases.
    pub fn resolve_column(df: &DataFrame, role: ColumnRole, preferred: &str) -> Result<String> {
        let columns = df.get_column_names();
        let mut tried = vec![preferred.to_string()];
        tried.extend(role.aliases().into_iter().map(str::to_string));

        let found = tried
            .iter()
            .find(|candidate| columns.iter().any(|col| col.as_str() == candidate.as_str()))
            .cloned();

        match found {
            Some(name) => Ok(name),
            None => Err(ChartError::MissingColumn {
                role: role.as_str().to_string(),
                tried,
            }),
        }
    }

    /// Value columns must be numeric
    pub fn validate_numeric(df: &DataFrame, column: &str) -> Result<()> {
        let series = df.column(column)?;
        if !matches!(
            series.dtype(),
            DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32
        ) {
            return Err(ChartError::DataLoading(format!(
                "Column '{}' must be numeric, found {:?}",
                column,
                series.dtype()
            )));
        }
        Ok(())
    }

    /// Date columns must be temporal or text
    pub fn validate_temporal(df: &DataFrame, column: &str) -> Result<()> {
        let series = df.column(column)?;
        match series.dtype() {
            DataType::Date | DataType::Datetime(_, _) | DataType::String => Ok(()),
            other => Err(ChartError::DataLoading(format!(
                "Column '{}' must hold dates, found {:?}",
                column, other
            ))),
        }
    }

    /// Null counts per column, only for columns that have any
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .filter(|col| col.null_count() > 0)
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }

    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(ChartError::Validation(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_resolve_prefers_configured_name() {
        let df = df! {
            "Close" => &[1.0, 2.0],
            "Adj Close" => &[0.9, 1.9],
            "My Price" => &[5.0, 6.0],
        }
        .unwrap();

        assert_eq!(DataValidator::resolve_column(&df, ColumnRole::Value, "My Price").unwrap(), "My Price");
        assert_eq!(DataValidator::resolve_column(&df, ColumnRole::Value, "missing").unwrap(), "Adj Close");
    }

    #[test]
    fn test_resolve_reports_tried_names() {
        let df = df! { "volume" => &[1.0] }.unwrap();
        match DataValidator::resolve_column(&df, ColumnRole::Value, "Adj Close") {
            Err(ChartError::MissingColumn { role, tried }) => {
                assert_eq!(role, "value");
                assert!(tried.contains(&"close".to_string()));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_numeric_check() {
        let df = df! {
            "price" => &[1.0, 2.0],
            "label" => &["a", "b"],
        }
        .unwrap();
        assert!(DataValidator::validate_numeric(&df, "price").is_ok());
        assert!(DataValidator::validate_numeric(&df, "label").is_err());
    }

    #[test]
    fn test_check_nulls() {
        let df = df! {
            "a" => &[Some(1.0), None, Some(3.0)],
            "b" => &[1.0, 2.0, 3.0],
        }
        .unwrap();
        assert_eq!(DataValidator::check_nulls(&df), vec![("a".to_string(), 1)]);
    }
}
