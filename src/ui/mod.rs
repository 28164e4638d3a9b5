mod app;
mod panels;
mod state;
mod widgets;
mod services;

pub use app::ForecastChartsApp;
pub use state::{AppState, StatusProgress};
pub use widgets::ChartView;
