pub mod chart_view;
pub mod data_selector;

pub use chart_view::ChartView;
pub use data_selector::DataSelector;
