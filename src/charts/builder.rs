use super::figure::{ChartDescription, Layout, Trace};
use crate::data::{series_from_frame, series_from_frame_as, ColumnRole, ColumnSpec};
use crate::error::Result;
use crate::types::PriceSeries;
use polars::prelude::*;

pub const TRAINING_TRACE: &str = "Training";
pub const TESTING_TRACE: &str = "Testing";
pub const PREDICTED_TRACE: &str = "Predicted";

pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Adj. Close price";
pub const LEGEND_TITLE: &str = "Data";

fn price_layout() -> Layout {
    Layout {
        x_axis_title: X_AXIS_TITLE.to_string(),
        y_axis_title: Y_AXIS_TITLE.to_string(),
        legend_title: LEGEND_TITLE.to_string(),
    }
}

/// Training and testing prices on shared axes.
///
/// Empty series produce empty traces; the two series may be disjoint.
pub fn build_split_view(training: &PriceSeries, testing: &PriceSeries) -> ChartDescription {
    ChartDescription::new(
        vec![
            Trace::line(TRAINING_TRACE, training),
            Trace::line(TESTING_TRACE, testing),
        ],
        price_layout(),
    )
}

/// Testing prices against model predictions.
///
/// `predicted` is drawn as given, without alignment to the testing index.
pub fn build_prediction_view(testing: &PriceSeries, predicted: &PriceSeries) -> ChartDescription {
    ChartDescription::new(
        vec![
            Trace::line(TESTING_TRACE, testing),
            Trace::line(PREDICTED_TRACE, predicted),
        ],
        price_layout(),
    )
}

/// [`build_split_view`] over two price tables.
pub fn split_view_from_frames(
    train: &DataFrame,
    test: &DataFrame,
    columns: &ColumnSpec,
) -> Result<ChartDescription> {
    let training = series_from_frame(train, &columns.date, &columns.value)?;
    let testing = series_from_frame(test, &columns.date, &columns.value)?;
    Ok(build_split_view(&training, &testing))
}

/// [`build_prediction_view`] over a price table and a predictions table.
pub fn prediction_view_from_frames(
    test: &DataFrame,
    predicted: &DataFrame,
    columns: &ColumnSpec,
) -> Result<ChartDescription> {
    let testing = series_from_frame(test, &columns.date, &columns.value)?;
    let predicted =
        series_from_frame_as(predicted, &columns.date, &columns.predicted, ColumnRole::Predicted)?;
    Ok(build_prediction_view(&testing, &predicted))
}
