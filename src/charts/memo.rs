use super::builder::{build_prediction_view, build_split_view};
use super::cache::{CacheKey, FigureCache};
use super::figure::ChartDescription;
use super::progress::ProgressSink;
use crate::error::Result;
use crate::types::PriceSeries;
use std::any::TypeId;
use std::sync::Arc;

pub const SPLIT_VIEW: &str = "split_view";
pub const PREDICTION_VIEW: &str = "prediction_view";

/// Builder over a pair of series, the signature shared by every price view.
pub type SeriesPairBuilder =
    Box<dyn Fn(&PriceSeries, &PriceSeries) -> Result<ChartDescription> + Send + Sync>;

/// Memoized figure builder.
///
/// Calls with structurally equal series return the stored figure without
/// running the builder. The cache is shared with the other renderers of the
/// same session. Entries are keyed by operation name and builder type, so
/// reusing a name for a different builder does not return its figures.
/// Instances of one closure type share entries whatever they capture.
pub struct MemoizedRenderer {
    operation: &'static str,
    builder_id: TypeId,
    builder: SeriesPairBuilder,
    progress_message: String,
    cache: Arc<FigureCache>,
}

impl MemoizedRenderer {
    pub fn memoize<F>(
        operation: &'static str,
        builder: F,
        progress_message: impl Into<String>,
        cache: Arc<FigureCache>,
    ) -> Self
    where
        F: Fn(&PriceSeries, &PriceSeries) -> Result<ChartDescription> + Send + Sync + 'static,
    {
        Self {
            operation,
            builder_id: TypeId::of::<F>(),
            builder: Box::new(builder),
            progress_message: progress_message.into(),
            cache,
        }
    }

    pub fn split_view(progress_message: impl Into<String>, cache: Arc<FigureCache>) -> Self {
        Self::memoize(
            SPLIT_VIEW,
            |train: &PriceSeries, test: &PriceSeries| Ok(build_split_view(train, test)),
            progress_message,
            cache,
        )
    }

    pub fn prediction_view(progress_message: impl Into<String>, cache: Arc<FigureCache>) -> Self {
        Self::memoize(
            PREDICTION_VIEW,
            |test: &PriceSeries, pred: &PriceSeries| Ok(build_prediction_view(test, pred)),
            progress_message,
            cache,
        )
    }

    pub fn render(
        &self,
        first: &PriceSeries,
        second: &PriceSeries,
        progress: &mut dyn ProgressSink,
    ) -> Result<Arc<ChartDescription>> {
        let key = CacheKey::for_args(self.operation, &(first, second))?.for_builder(self.builder_id);
        self.cache
            .get_or_compute(key, progress, &self.progress_message, || (self.builder)(first, second))
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn progress_message(&self) -> &str {
        &self.progress_message
    }

    pub fn cache(&self) -> &Arc<FigureCache> {
        &self.cache
    }
}
