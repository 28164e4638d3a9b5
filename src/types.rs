use crate::error::{ChartError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One observation of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub index: NaiveDateTime,
    pub value: f64,
}

impl PricePoint {
    pub fn new(index: NaiveDateTime, value: f64) -> Self {
        Self { index, value }
    }

    /// Point at midnight of `date`.
    pub fn on(date: NaiveDate, value: f64) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN), value)
    }
}

/// Time-indexed numeric column (training, testing or predicted prices).
///
/// Indices are unique and strictly increasing and every value is finite, with
/// `-0.0` stored as `0.0`. Different series carry no relationship to each
/// other: predictions usually cover only the test period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self> {
        if let Some(p) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(ChartError::Validation(format!(
                "Series value at {} is not finite: {}",
                p.index, p.value
            )));
        }
        if let Some(pos) = points.windows(2).position(|w| w[0].index >= w[1].index) {
            return Err(ChartError::Validation(format!(
                "Series index must be unique and increasing: {} is followed by {} at position {}",
                points[pos].index,
                points[pos + 1].index,
                pos + 1
            )));
        }
        for p in &mut points {
            // 0.0 == -0.0, so both must serialize the same way
            if p.value == 0.0 {
                p.value = 0.0;
            }
        }
        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a daily series from `(date, value)` pairs.
    pub fn from_dates<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::new(pairs.into_iter().map(|(d, v)| PricePoint::on(d, v)).collect())
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_index(&self) -> Option<NaiveDateTime> {
        self.points.first().map(|p| p.index)
    }

    pub fn last_index(&self) -> Option<NaiveDateTime> {
        self.points.last().map(|p| p.index)
    }

    /// (min, max) of the values, `None` when empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.value).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = ChartError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[test]
    fn test_rejects_unordered_index() {
        let err = PriceSeries::from_dates([(day(2), 1.0), (day(1), 2.0)]).unwrap_err();
        assert!(matches!(err, ChartError::Validation(_)));
    }

    #[test]
    fn test_rejects_duplicate_index() {
        assert!(PriceSeries::from_dates([(day(1), 1.0), (day(1), 2.0)]).is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = PriceSeries::from_dates([(day(1), 1.0), (day(2), bad)]).unwrap_err();
            assert!(matches!(err, ChartError::Validation(_)));
        }
    }

    #[test]
    fn test_negative_zero_stored_as_zero() {
        let s = PriceSeries::from_dates([(day(1), -0.0)]).unwrap();
        assert!(s.points()[0].value.is_sign_positive());
        assert_eq!(s, PriceSeries::from_dates([(day(1), 0.0)]).unwrap());
    }

    #[test]
    fn test_value_range() {
        let s = PriceSeries::from_dates([(day(1), 3.0), (day(2), -1.0), (day(3), 2.0)]).unwrap();
        assert_eq!(s.value_range(), Some((-1.0, 3.0)));
        assert_eq!(PriceSeries::empty().value_range(), None);
    }

    #[test]
    fn test_deserialize_checks_order() {
        let s = PriceSeries::from_dates([(day(1), 1.0), (day(2), 2.0)]).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(serde_json::from_str::<PriceSeries>(&json).unwrap(), s);

        let bad = r#"[{"index":"2020-01-02T00:00:00","value":1.0},{"index":"2020-01-01T00:00:00","value":2.0}]"#;
        assert!(serde_json::from_str::<PriceSeries>(bad).is_err());
    }
}
