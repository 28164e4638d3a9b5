pub mod builder;
pub mod cache;
pub mod export;
pub mod figure;
pub mod memo;
pub mod progress;

pub use builder::{
    build_prediction_view, build_split_view, prediction_view_from_frames, split_view_from_frames,
};
pub use cache::{CacheKey, CacheStats, FigureCache};
pub use export::{read_chart_json, write_chart_json};
pub use figure::{ChartDescription, Layout, Trace, TraceMode};
pub use memo::{MemoizedRenderer, SeriesPairBuilder, PREDICTION_VIEW, SPLIT_VIEW};
pub use progress::{ChannelProgress, NoProgress, ProgressMessage, ProgressSink};
