use crate::charts::{write_chart_json, ChartDescription};
use crate::session::DashboardSession;
use crate::ui::services::RenderWorker;
use crate::ui::state::AppState;
use crate::ui::widgets::ChartView;
use std::sync::Arc;

pub struct MainPanel;

impl MainPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, session: &Arc<DashboardSession>) {
        if state.needs_render && state.worker.is_none() {
            Self::start_render(state, session);
            ui.ctx().request_repaint();
        }

        if state.split_chart.is_none() && state.prediction_chart.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label("No charts yet. Load a price file to plot the train/test split.");
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            if let Some(chart) = state.split_chart.clone() {
                Self::show_chart(ui, "Train/test split", "split_view", &chart, state);
            }
            if let Some(chart) = state.prediction_chart.clone() {
                ui.separator();
                Self::show_chart(ui, "Predictions", "prediction_view", &chart, state);
            }
        });
    }

    // Figures arrive through AppState::apply_render once the worker finishes
    fn start_render(state: &mut AppState, session: &Arc<DashboardSession>) {
        state.needs_render = false;

        let Some(job) = state.render_job() else {
            return;
        };

        match RenderWorker::start(Arc::clone(session), job) {
            Ok(worker) => state.worker = Some(worker),
            Err(e) => state.status_message = format!("{:#}", e),
        }
    }

    fn show_chart(
        ui: &mut egui::Ui,
        heading: &str,
        id: &str,
        chart: &Arc<ChartDescription>,
        state: &mut AppState,
    ) {
        ui.horizontal(|ui| {
            ui.heading(heading);
            if ui.button("Export JSON...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .set_file_name(format!("{}.json", id))
                    .save_file()
                {
                    state.status_message = match write_chart_json(&path, chart) {
                        Ok(()) => format!("Saved {}", path.display()),
                        Err(e) => format!("Export failed: {}", e),
                    };
                }
            }
        });
        ui.add(ChartView::new(chart).height(320.0));
    }
}
