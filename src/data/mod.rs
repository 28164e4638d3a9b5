pub mod connectors;
pub mod frame;
pub mod splitter;

pub use connectors::{ColumnRole, ColumnSpec, CsvConnector, DataValidator, DatasetMetadata};
pub use frame::{parse_date_text, series_from_frame, series_from_frame_as};
pub use splitter::{DataSplit, TrainTestSplitter};
