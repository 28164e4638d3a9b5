//! Price charts for a train/test/prediction dashboard.
//!
//! Figures are built by pure functions in [`charts::builder`] and memoized per
//! dashboard session by [`session::DashboardSession`].

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod session;
pub mod types;
pub mod ui;

pub use charts::{build_prediction_view, build_split_view, ChartDescription, FigureCache, MemoizedRenderer};
pub use error::{ChartError, Result};
pub use session::DashboardSession;
pub use types::{PricePoint, PriceSeries};
