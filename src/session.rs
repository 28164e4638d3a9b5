//! Per-session figure rendering.
//!
//! A `DashboardSession` owns the figure cache and the two memoized price
//! views. Dropping the session drops every cached figure with it, so two
//! dashboard sessions never see each other's entries.

use crate::charts::{CacheStats, ChartDescription, FigureCache, MemoizedRenderer, ProgressSink};
use crate::config::AppConfig;
use crate::data::{series_from_frame, TrainTestSplitter};
use crate::error::Result;
use crate::types::PriceSeries;
use polars::prelude::*;
use std::sync::Arc;

pub struct DashboardSession {
    config: AppConfig,
    cache: Arc<FigureCache>,
    split_view: MemoizedRenderer,
    prediction_view: MemoizedRenderer,
}

impl DashboardSession {
    pub fn new(config: AppConfig) -> Self {
        let cache = Arc::new(FigureCache::new(config.cache.capacity));
        let split_view =
            MemoizedRenderer::split_view(config.charts.split_progress_message.clone(), Arc::clone(&cache));
        let prediction_view = MemoizedRenderer::prediction_view(
            config.charts.prediction_progress_message.clone(),
            Arc::clone(&cache),
        );

        Self {
            config,
            cache,
            split_view,
            prediction_view,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Memoized training/testing chart.
    pub fn split_view(
        &self,
        training: &PriceSeries,
        testing: &PriceSeries,
        progress: &mut dyn ProgressSink,
    ) -> Result<Arc<ChartDescription>> {
        self.split_view.render(training, testing, progress)
    }

    /// Memoized testing/predicted chart.
    pub fn prediction_view(
        &self,
        testing: &PriceSeries,
        predicted: &PriceSeries,
        progress: &mut dyn ProgressSink,
    ) -> Result<Arc<ChartDescription>> {
        self.prediction_view.render(testing, predicted, progress)
    }

    /// Split a price table chronologically and extract both value series.
    pub fn split_prices(&self, prices: &DataFrame, train_fraction: f64) -> Result<(PriceSeries, PriceSeries)> {
        let columns = &self.config.data.columns;
        let split = TrainTestSplitter::new(train_fraction)?.split(prices)?;
        let training = series_from_frame(&split.training, &columns.date, &columns.value)?;
        let testing = series_from_frame(&split.testing, &columns.date, &columns.value)?;
        Ok((training, testing))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
