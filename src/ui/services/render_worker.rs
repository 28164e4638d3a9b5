use crate::charts::{ChannelProgress, ChartDescription, ProgressMessage};
use crate::session::DashboardSession;
use crate::types::PriceSeries;
use crate::ui::state::StatusProgress;
use anyhow::{Context, Result};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Snapshot of the series to plot, taken when the worker starts.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub training: PriceSeries,
    pub testing: PriceSeries,
    pub predicted: Option<PriceSeries>,
}

pub type FigureResult = std::result::Result<Arc<ChartDescription>, String>;

/// Figures produced by one job. `prediction` is `None` when no predictions were loaded.
#[derive(Debug)]
pub struct RenderOutput {
    pub split: FigureResult,
    pub prediction: Option<FigureResult>,
}

/// Builds figures off the UI thread so the status line can show progress
/// while a cache miss is being computed.
pub struct RenderWorker {
    handle: Option<JoinHandle<RenderOutput>>,
    progress_rx: Receiver<ProgressMessage>,
}

impl RenderWorker {
    /// Start rendering `job` in a background thread
    pub fn start(session: Arc<DashboardSession>, job: RenderJob) -> Result<Self> {
        let (progress_tx, progress_rx) = channel();

        let handle = thread::Builder::new()
            .name("figure-render".to_string())
            .spawn(move || {
                let mut progress = ChannelProgress::new(progress_tx);
                let split = session
                    .split_view(&job.training, &job.testing, &mut progress)
                    .map_err(|e| format!("Cannot plot split: {}", e));
                let prediction = job.predicted.as_ref().map(|predicted| {
                    session
                        .prediction_view(&job.testing, predicted, &mut progress)
                        .map_err(|e| format!("Cannot plot predictions: {}", e))
                });
                RenderOutput { split, prediction }
            })
            .context("Failed to spawn render thread")?;

        Ok(Self {
            handle: Some(handle),
            progress_rx,
        })
    }

    /// Apply every pending progress message to the status line (non-blocking)
    pub fn poll_progress(&self, status: &mut StatusProgress) {
        while let Ok(message) = self.progress_rx.try_recv() {
            status.apply(message);
        }
    }

    /// Check if rendering is complete and take the figures
    pub fn try_get_results(&mut self) -> Option<RenderOutput> {
        let handle = self.handle.take()?;
        if !handle.is_finished() {
            self.handle = Some(handle);
            return None;
        }

        Some(handle.join().unwrap_or_else(|_| RenderOutput {
            split: Err("Render thread panicked".to_string()),
            prediction: None,
        }))
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}
