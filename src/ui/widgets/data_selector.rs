use crate::session::DashboardSession;
use crate::ui::services::DataLoader;
use crate::ui::state::AppState;

pub struct DataSelector;

impl DataSelector {
    pub fn show(ui: &mut egui::Ui, state: &mut AppState, session: &DashboardSession) {
        if ui.button("Select price CSV...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV Files", &["csv"])
                .pick_file()
            {
                match DataLoader::load_prices(&path, session.config()) {
                    Ok((df, metadata)) => {
                        state.price_file = Some(path);
                        state.prices = Some(df);
                        state.metadata = Some(metadata);
                        state.prediction_chart = None;
                        Self::resplit(state, session);
                    }
                    Err(e) => {
                        state.status_message = format!("Error loading data: {:#}", e);
                    }
                }
            }
        }

        if let Some(path) = &state.price_file {
            ui.label(format!("File: {}", path.file_name().unwrap_or_default().to_string_lossy()));

            if let Some(meta) = &state.metadata {
                ui.label(format!("Rows: {}", meta.num_rows));
                ui.label(format!("Value column: {}", meta.value_column));
                if let Some((first, last)) = meta.date_range {
                    ui.label(format!("Range: {} to {}", first.date(), last.date()));
                }
            }

            let slider = egui::Slider::new(&mut state.train_fraction, 0.05..=0.95).text("Train fraction");
            if ui.add(slider).changed() {
                Self::resplit(state, session);
            }
        } else {
            ui.label("No price data loaded");
        }

        ui.separator();

        if ui.button("Select predictions CSV...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV Files", &["csv"])
                .pick_file()
            {
                match DataLoader::load_predictions(&path, session.config()) {
                    Ok(series) => {
                        state.status_message = format!("Loaded {} predictions", series.len());
                        state.predictions_file = Some(path);
                        state.predicted = Some(series);
                        state.needs_render = true;
                    }
                    Err(e) => {
                        state.status_message = format!("Error loading predictions: {:#}", e);
                    }
                }
            }
        }

        if let Some(path) = &state.predictions_file {
            ui.label(format!("Predictions: {}", path.file_name().unwrap_or_default().to_string_lossy()));
        }
    }

    fn resplit(state: &mut AppState, session: &DashboardSession) {
        let Some(prices) = &state.prices else {
            return;
        };

        match session.split_prices(prices, state.train_fraction) {
            Ok((training, testing)) => {
                state.status_message = format!(
                    "{} training rows, {} testing rows",
                    training.len(),
                    testing.len()
                );
                state.training = Some(training);
                state.testing = Some(testing);
                state.needs_render = true;
            }
            Err(e) => {
                state.status_message = format!("Cannot split data: {}", e);
            }
        }
    }
}
