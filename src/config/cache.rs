use super::traits::ConfigSection;
use crate::error::ChartError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Figures kept per session before the least recently used is evicted; 0 = unbounded.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 32 }
    }
}

impl ConfigSection for CacheConfig {
    fn section_name() -> &'static str {
        "cache"
    }

    fn validate(&self) -> Result<(), ChartError> {
        Ok(())
    }
}
