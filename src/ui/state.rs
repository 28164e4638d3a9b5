use crate::charts::{ChartDescription, ProgressMessage, ProgressSink};
use crate::data::DatasetMetadata;
use crate::types::PriceSeries;
use crate::ui::services::{RenderJob, RenderOutput, RenderWorker};
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Central application state for the UI
pub struct AppState {
    // Price data
    pub price_file: Option<PathBuf>,
    pub prices: Option<DataFrame>,
    pub metadata: Option<DatasetMetadata>,
    pub train_fraction: f64,
    pub training: Option<PriceSeries>,
    pub testing: Option<PriceSeries>,

    // Predictions
    pub predictions_file: Option<PathBuf>,
    pub predicted: Option<PriceSeries>,

    // Figures
    pub split_chart: Option<Arc<ChartDescription>>,
    pub prediction_chart: Option<Arc<ChartDescription>>,
    pub needs_render: bool,
    pub worker: Option<RenderWorker>,

    // Status
    pub progress: StatusProgress,
    pub status_message: String,
}

impl AppState {
    pub fn new(train_fraction: f64) -> Self {
        Self {
            price_file: None,
            prices: None,
            metadata: None,
            train_fraction,
            training: None,
            testing: None,

            predictions_file: None,
            predicted: None,

            split_chart: None,
            prediction_chart: None,
            needs_render: false,
            worker: None,

            progress: StatusProgress::default(),
            status_message: "Select a price file to start".to_string(),
        }
    }

    /// Series for the next render, or `None` until a price file is split.
    pub fn render_job(&self) -> Option<RenderJob> {
        Some(RenderJob {
            training: self.training.clone()?,
            testing: self.testing.clone()?,
            predicted: self.predicted.clone(),
        })
    }

    pub fn apply_render(&mut self, output: RenderOutput) {
        match output.split {
            Ok(chart) => self.split_chart = Some(chart),
            Err(e) => self.status_message = e,
        }
        match output.prediction {
            Some(Ok(chart)) => self.prediction_chart = Some(chart),
            Some(Err(e)) => self.status_message = e,
            None => {}
        }
    }
}

/// Progress indicator backed by the status line.
#[derive(Debug, Default)]
pub struct StatusProgress {
    pub active: Option<String>,
}

impl StatusProgress {
    /// Replay a message sent by the render worker.
    pub fn apply(&mut self, message: ProgressMessage) {
        match message {
            ProgressMessage::Started(text) => self.begin(&text),
            ProgressMessage::Finished => self.finish(),
        }
    }
}

impl ProgressSink for StatusProgress {
    fn begin(&mut self, message: &str) {
        self.active = Some(message.to_string());
    }

    fn finish(&mut self) {
        self.active = None;
    }
}
