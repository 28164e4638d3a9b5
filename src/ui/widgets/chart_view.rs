//! Line chart widget drawing a `ChartDescription` with egui's painter.
//!
//! The widget is data-driven: everything it draws comes from the chart
//! description, bounds are computed up front and the painter only maps points.

use crate::charts::{ChartDescription, TraceMode};
use crate::types::PricePoint;
use chrono::DateTime;
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};

const PALETTE: [Color32; 4] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
];

/// Data extent over every trace, x in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl ChartBounds {
    /// `None` when no trace has a finite point.
    pub fn of(chart: &ChartDescription) -> Option<Self> {
        let mut points = chart
            .traces()
            .iter()
            .flat_map(|t| t.points())
            .map(|p| (x_of(p), p.value))
            .filter(|(_, y)| y.is_finite());

        let (x, y) = points.next()?;
        let mut bounds = Self { x: [x, x], y: [y, y] };
        for (x, y) in points {
            bounds.x = [bounds.x[0].min(x), bounds.x[1].max(x)];
            bounds.y = [bounds.y[0].min(y), bounds.y[1].max(y)];
        }

        // A single timestamp or a flat line still needs a non-empty range.
        if bounds.x[1] <= bounds.x[0] {
            bounds.x = [bounds.x[0] - 86_400.0, bounds.x[1] + 86_400.0];
        }
        if bounds.y[1] <= bounds.y[0] {
            bounds.y = [bounds.y[0] - 1.0, bounds.y[1] + 1.0];
        }
        Some(bounds)
    }

    fn to_screen(&self, plot: Rect, x: f64, y: f64) -> Pos2 {
        let u = (x - self.x[0]) / (self.x[1] - self.x[0]);
        let v = (y - self.y[0]) / (self.y[1] - self.y[0]);
        pos2(
            plot.left() + u as f32 * plot.width(),
            plot.bottom() - v as f32 * plot.height(),
        )
    }
}

fn x_of(point: &PricePoint) -> f64 {
    point.index.and_utc().timestamp() as f64
}

fn format_x(seconds: f64) -> String {
    DateTime::from_timestamp(seconds as i64, 0)
        .map(|dt| dt.date_naive().to_string())
        .unwrap_or_default()
}

pub struct ChartView<'a> {
    chart: &'a ChartDescription,
    height: f32,
}

impl<'a> ChartView<'a> {
    pub fn new(chart: &'a ChartDescription) -> Self {
        Self { chart, height: 300.0 }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl egui::Widget for ChartView<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(vec2(ui.available_width(), self.height), Sense::hover());
        if !ui.is_rect_visible(rect) {
            return response;
        }

        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(12.0);

        let Some(bounds) = ChartBounds::of(self.chart) else {
            painter.text(rect.center(), Align2::CENTER_CENTER, "No data", font, text_color);
            return response;
        };

        let plot = Rect::from_min_max(rect.min + vec2(64.0, 20.0), rect.max - vec2(140.0, 36.0));
        if plot.width() < 40.0 || plot.height() < 40.0 {
            painter.text(rect.center(), Align2::CENTER_CENTER, "Chart area too small", font, text_color);
            return response;
        }

        // Axes
        let axis = Stroke::new(1.0, text_color);
        painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
        painter.line_segment([plot.left_bottom(), plot.left_top()], axis);

        // Tick labels at the extremes
        painter.text(plot.left_bottom() + vec2(-4.0, 0.0), Align2::RIGHT_BOTTOM, format!("{:.2}", bounds.y[0]), font.clone(), text_color);
        painter.text(plot.left_top() + vec2(-4.0, 0.0), Align2::RIGHT_TOP, format!("{:.2}", bounds.y[1]), font.clone(), text_color);
        painter.text(plot.left_bottom() + vec2(0.0, 4.0), Align2::LEFT_TOP, format_x(bounds.x[0]), font.clone(), text_color);
        painter.text(plot.right_bottom() + vec2(0.0, 4.0), Align2::RIGHT_TOP, format_x(bounds.x[1]), font.clone(), text_color);

        // Axis titles
        painter.text(
            pos2(plot.center().x, rect.bottom() - 4.0),
            Align2::CENTER_BOTTOM,
            self.chart.x_axis_title(),
            font.clone(),
            text_color,
        );
        painter.text(
            pos2(rect.left() + 4.0, rect.top() + 2.0),
            Align2::LEFT_TOP,
            self.chart.y_axis_title(),
            font.clone(),
            text_color,
        );

        // Traces
        for (i, trace) in self.chart.traces().iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let points: Vec<Pos2> = trace
                .points()
                .iter()
                .filter(|p| p.value.is_finite())
                .map(|p| bounds.to_screen(plot, x_of(p), p.value))
                .collect();

            match trace.mode() {
                TraceMode::Lines if points.len() > 1 => {
                    painter.add(Shape::line(points, Stroke::new(1.5, color)));
                }
                _ => {
                    for p in points {
                        painter.circle_filled(p, 2.0, color);
                    }
                }
            }
        }

        // Legend
        let mut y = plot.top();
        let legend_x = plot.right() + 16.0;
        painter.text(pos2(legend_x, y), Align2::LEFT_TOP, self.chart.legend_title(), font.clone(), text_color);
        for (i, trace) in self.chart.traces().iter().enumerate() {
            y += 18.0;
            let color = PALETTE[i % PALETTE.len()];
            painter.line_segment(
                [pos2(legend_x, y + 7.0), pos2(legend_x + 18.0, y + 7.0)],
                Stroke::new(2.0, color),
            );
            painter.text(pos2(legend_x + 24.0, y), Align2::LEFT_TOP, trace.name(), font.clone(), text_color);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::build_split_view;
    use crate::types::PriceSeries;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[test]
    fn test_bounds_span_all_traces() {
        let train = PriceSeries::from_dates([(day(1), 100.0), (day(2), 101.0)]).unwrap();
        let test = PriceSeries::from_dates([(day(3), 99.0)]).unwrap();
        let bounds = ChartBounds::of(&build_split_view(&train, &test)).unwrap();

        assert_eq!(bounds.y, [99.0, 101.0]);
        assert_eq!(bounds.x[1] - bounds.x[0], 2.0 * 86_400.0);
    }

    #[test]
    fn test_bounds_widen_single_point() {
        let test = PriceSeries::from_dates([(day(3), 5.0)]).unwrap();
        let bounds = ChartBounds::of(&build_split_view(&PriceSeries::empty(), &test)).unwrap();
        assert_eq!(bounds.y, [4.0, 6.0]);
        assert!(bounds.x[1] > bounds.x[0]);
    }

    #[test]
    fn test_empty_chart_has_no_bounds() {
        let chart = build_split_view(&PriceSeries::empty(), &PriceSeries::empty());
        assert!(ChartBounds::of(&chart).is_none());
    }

    #[test]
    fn test_format_x() {
        let x = x_of(&PricePoint::on(day(15), 1.0));
        assert_eq!(format_x(x), "2020-01-15");
    }
}
