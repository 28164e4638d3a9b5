use crate::session::DashboardSession;
use crate::ui::state::AppState;
use crate::ui::widgets::DataSelector;

pub struct LeftPanel;

impl LeftPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, session: &DashboardSession) {
        ui.heading("Data");
        ui.separator();

        DataSelector::show(ui, state, session);

        ui.separator();

        if ui.button("Clear figure cache").clicked() {
            session.clear_cache();
            state.status_message = "Figure cache cleared".to_string();
        }
    }
}
