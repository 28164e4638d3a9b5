pub mod traits;
pub mod data;
pub mod charts;
pub mod cache;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use data::DataConfig;
pub use charts::ChartConfig;
pub use cache::CacheConfig;
pub use traits::ConfigSection;
