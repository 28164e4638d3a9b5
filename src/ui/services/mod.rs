pub mod data_loader;
pub mod render_worker;

pub use data_loader::DataLoader;
pub use render_worker::{RenderJob, RenderOutput, RenderWorker};
