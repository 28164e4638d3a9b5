use eframe::NativeOptions;
use forecast_charts::config::ConfigManager;
use forecast_charts::session::DashboardSession;
use forecast_charts::ui::ForecastChartsApp;
use std::path::Path;

const CONFIG_FILE: &str = "forecast-charts.toml";

fn main() -> eframe::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if Path::new(CONFIG_FILE).exists() {
        if let Err(e) = manager.load_from_file(CONFIG_FILE) {
            log::error!("{}; falling back to defaults", e);
        }
    }
    let session = DashboardSession::new(manager.get());

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Forecast Charts"),
        ..Default::default()
    };

    eframe::run_native(
        "Forecast Charts",
        native_options,
        Box::new(|cc| Ok(Box::new(ForecastChartsApp::new(cc, session)))),
    )
}
