use crate::error::Result;
use crate::types::{PricePoint, PriceSeries};
use serde::{Deserialize, Serialize};

/// How a trace is drawn. Price views only use connected lines; the mode is
/// still written to exported JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Lines,
}

/// One named line within a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    name: String,
    mode: TraceMode,
    points: Vec<PricePoint>,
}

impl Trace {
    pub fn line(name: impl Into<String>, series: &PriceSeries) -> Self {
        Self {
            name: name.into(),
            mode: TraceMode::Lines,
            points: series.points().to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> TraceMode {
        self.mode
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Rebuild the series this trace was drawn from.
    pub fn to_series(&self) -> Result<PriceSeries> {
        PriceSeries::new(self.points.clone())
    }
}

/// Axis and legend titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend_title: String,
}

/// Immutable bundle of named traces plus labels, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    traces: Vec<Trace>,
    layout: Layout,
}

impl ChartDescription {
    pub fn new(traces: Vec<Trace>, layout: Layout) -> Self {
        Self { traces, layout }
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.name == name)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn x_axis_title(&self) -> &str {
        &self.layout.x_axis_title
    }

    pub fn y_axis_title(&self) -> &str {
        &self.layout.y_axis_title
    }

    pub fn legend_title(&self) -> &str {
        &self.layout.legend_title
    }

    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.points.len()).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
