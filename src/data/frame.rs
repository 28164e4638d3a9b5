use super::connectors::{ColumnRole, DataValidator};
use crate::error::{ChartError, Result};
use crate::types::{PricePoint, PriceSeries};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

/// Extract `(date, value)` pairs from a price table.
///
/// Both columns are resolved by name first and by alias second. Rows with a
/// null, NaN or infinite value are skipped; a null date is an error.
pub fn series_from_frame(df: &DataFrame, date_col: &str, value_col: &str) -> Result<PriceSeries> {
    series_from_frame_as(df, date_col, value_col, ColumnRole::Value)
}

/// [`series_from_frame`] with the aliases of `value_role` as fallbacks.
pub fn series_from_frame_as(
    df: &DataFrame,
    date_col: &str,
    value_col: &str,
    value_role: ColumnRole,
) -> Result<PriceSeries> {
    let date_name = DataValidator::resolve_column(df, ColumnRole::Date, date_col)?;
    let value_name = DataValidator::resolve_column(df, value_role, value_col)?;
    DataValidator::validate_temporal(df, &date_name)?;
    DataValidator::validate_numeric(df, &value_name)?;

    let index = index_values(df.column(&date_name)?)?;
    let values = df.column(&value_name)?.cast(&DataType::Float64)?;
    let values = values.f64()?;

    let mut points = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for (row, (idx, value)) in index.into_iter().zip(values.into_iter()).enumerate() {
        let idx = idx.ok_or_else(|| {
            ChartError::Validation(format!("Null date in column '{}' at row {}", date_name, row))
        })?;
        match value {
            Some(v) if v.is_finite() => points.push(PricePoint::new(idx, v)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with missing or non-finite '{}' values", skipped, value_name);
    }

    PriceSeries::new(points)
}

fn index_values(column: &Column) -> Result<Vec<Option<NaiveDateTime>>> {
    match column.dtype() {
        DataType::Date => {
            let days = column.cast(&DataType::Int32)?;
            Ok(days.i32()?.into_iter().map(|d| d.and_then(date_from_epoch_days)).collect())
        }
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let raw = column.cast(&DataType::Int64)?;
            Ok(raw.i64()?.into_iter().map(|v| v.and_then(|v| datetime_from_epoch(v, unit))).collect())
        }
        DataType::String => column
            .str()?
            .into_iter()
            .map(|s| s.map(parse_date_text).transpose())
            .collect(),
        other => Err(ChartError::DataLoading(format!(
            "Column '{}' must hold dates, found {:?}",
            column.name(),
            other
        ))),
    }
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?
        .checked_add_signed(chrono::Duration::days(days as i64))
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn datetime_from_epoch(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let dt = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value)?,
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value)?,
        TimeUnit::Nanoseconds => DateTime::from_timestamp_nanos(value),
    };
    Some(dt.naive_utc())
}

/// Accepts `2020-01-31`, `2020-01-31 16:00:00`, `2020-01-31T16:00:00` and RFC 3339.
pub fn parse_date_text(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt);
        }
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.naive_utc())
        .map_err(|_| ChartError::DataLoading(format!("Unrecognised date '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_string_dates() {
        let df = df! {
            "Date" => &["2020-01-01", "2020-01-02"],
            "Adj Close" => &[100.0, 101.0],
        }
        .unwrap();

        let series = series_from_frame(&df, "Date", "Adj Close").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].value, 101.0);
        assert_eq!(series.first_index(), Some(parse_date_text("2020-01-01").unwrap()));
    }

    #[test]
    fn test_integer_values_are_widened() {
        let df = df! {
            "Date" => &["2020-01-01", "2020-01-02"],
            "Adj Close" => &[100i64, 101],
        }
        .unwrap();
        let series = series_from_frame(&df, "Date", "Adj Close").unwrap();
        assert_eq!(series.points()[0].value, 100.0);
    }

    #[test]
    fn test_null_values_skipped() {
        let df = df! {
            "Date" => &["2020-01-01", "2020-01-02", "2020-01-03"],
            "Adj Close" => &[Some(1.0), None, Some(3.0)],
        }
        .unwrap();
        let series = series_from_frame(&df, "Date", "Adj Close").unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_non_finite_values_skipped() {
        let df = df! {
            "Date" => &["2020-01-01", "2020-01-02", "2020-01-03", "2020-01-04"],
            "Adj Close" => &[1.0, f64::NAN, f64::INFINITY, 4.0],
        }
        .unwrap();
        let series = series_from_frame(&df, "Date", "Adj Close").unwrap();
        let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 4.0]);
    }

    #[test]
    fn test_unordered_rows_rejected() {
        let df = df! {
            "Date" => &["2020-01-02", "2020-01-01"],
            "Adj Close" => &[1.0, 2.0],
        }
        .unwrap();
        assert!(matches!(
            series_from_frame(&df, "Date", "Adj Close"),
            Err(ChartError::Validation(_))
        ));
    }

    #[test]
    fn test_date_formats() {
        let midnight = parse_date_text("2021-06-30").unwrap();
        assert_eq!(parse_date_text("2021-06-30 00:00:00").unwrap(), midnight);
        assert_eq!(parse_date_text("2021-06-30T00:00:00").unwrap(), midnight);
        assert_eq!(parse_date_text("2021-06-30T00:00:00Z").unwrap(), midnight);
        assert!(parse_date_text("30/06/2021").is_err());
    }
}
