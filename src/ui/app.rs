use super::panels::{LeftPanel, MainPanel};
use super::state::AppState;
use crate::session::DashboardSession;
use std::sync::Arc;

pub struct ForecastChartsApp {
    state: AppState,
    session: Arc<DashboardSession>,
    left_panel: LeftPanel,
    main_panel: MainPanel,
}

impl ForecastChartsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: DashboardSession) -> Self {
        Self {
            state: AppState::new(session.config().data.train_fraction),
            session: Arc::new(session),
            left_panel: LeftPanel::new(),
            main_panel: MainPanel::new(),
        }
    }
}

impl ForecastChartsApp {
    /// Pull progress and finished figures from the render worker, if one is running.
    fn poll_worker(&mut self, ctx: &egui::Context) {
        let finished = match self.state.worker.as_mut() {
            Some(worker) => {
                // Results first: a finished worker has sent every message
                let results = worker.try_get_results();
                worker.poll_progress(&mut self.state.progress);
                results
            }
            None => return,
        };

        match finished {
            Some(output) => {
                self.state.worker = None;
                self.state.progress.active = None;
                self.state.apply_render(output);
            }
            // Keep polling while the worker runs
            None => ctx.request_repaint(),
        }
    }
}

impl eframe::App for ForecastChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Forecast Charts");
            });
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(message) = &self.state.progress.active {
                    ui.spinner();
                    ui.label(message);
                } else {
                    ui.label(&self.state.status_message);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let stats = self.session.cache_stats();
                    ui.label(format!(
                        "Cache: {} figures, {} hits, {} misses",
                        stats.entries, stats.hits, stats.misses
                    ));
                });
            });
        });

        // Left Panel - Data selection
        egui::SidePanel::left("left_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.left_panel.show(ui, &mut self.state, &self.session);
                });
            });

        // Central Panel - Charts
        egui::CentralPanel::default().show(ctx, |ui| {
            self.main_panel.show(ui, &mut self.state, &self.session);
        });
    }
}
