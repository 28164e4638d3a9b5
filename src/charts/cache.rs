use super::figure::ChartDescription;
use super::progress::ProgressSink;
use crate::error::{ChartError, Result};
use serde::Serialize;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Operation name, builder identity and the serialized call arguments.
///
/// Two calls with structurally equal arguments produce equal keys. Arguments
/// are serialized as JSON, which writes every non-finite float as `null`:
/// float arguments must be finite (see [`PriceSeries::new`]) or distinct
/// values collide.
///
/// [`PriceSeries::new`]: crate::types::PriceSeries::new
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: &'static str,
    builder: Option<TypeId>,
    args: String,
}

impl CacheKey {
    pub fn for_args<A: Serialize + ?Sized>(operation: &'static str, args: &A) -> Result<Self> {
        let args = serde_json::to_string(args).map_err(|e| {
            ChartError::Cache(format!("Cannot build key for '{}': {}", operation, e))
        })?;
        Ok(Self {
            operation,
            builder: None,
            args,
        })
    }

    /// Tie the key to one builder type, so two builders registered under the
    /// same operation name never read each other's figures.
    pub fn for_builder(mut self, builder: TypeId) -> Self {
        self.builder = Some(builder);
        self
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

struct CacheEntry {
    figure: Arc<ChartDescription>,
    last_used: u64,
}

struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    clock: u64,
    hits: u64,
    misses: u64,
}

/// Hit/miss counters, mostly for the dashboard status bar and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Session-owned memo of built figures.
///
/// Least recently used entries are evicted once `capacity` is reached;
/// a capacity of 0 keeps every entry until [`FigureCache::clear`].
pub struct FigureCache {
    state: Mutex<CacheState>,
    capacity: usize,
}

impl FigureCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::with_capacity(capacity),
                clock: 0,
                hits: 0,
                misses: 0,
            }),
            capacity,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Builders run outside the lock, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<ChartDescription>> {
        let mut state = self.lock();
        state.clock += 1;
        let now = state.clock;
        let entry = state.entries.get_mut(key)?;
        entry.last_used = now;
        Some(Arc::clone(&entry.figure))
    }

    pub fn set(&self, key: CacheKey, figure: Arc<ChartDescription>) {
        let mut state = self.lock();
        state.clock += 1;
        let now = state.clock;

        if self.capacity > 0 && !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                log::info!("Evicting cached '{}' figure", oldest.operation);
                state.entries.remove(&oldest);
            }
        }

        state.entries.insert(key, CacheEntry { figure, last_used: now });
    }

    /// Return the figure stored under `key`, or build, store and return it.
    ///
    /// On a miss `progress` shows `message` while `build` runs. A failed build
    /// propagates its error and leaves the cache untouched.
    pub fn get_or_compute<F>(
        &self,
        key: CacheKey,
        progress: &mut dyn ProgressSink,
        message: &str,
        build: F,
    ) -> Result<Arc<ChartDescription>>
    where
        F: FnOnce() -> Result<ChartDescription>,
    {
        if let Some(figure) = self.get(&key) {
            self.lock().hits += 1;
            log::debug!("Figure cache hit for '{}'", key.operation);
            return Ok(figure);
        }

        self.lock().misses += 1;
        log::debug!("Figure cache miss for '{}'", key.operation);

        progress.begin(message);
        let built = build();
        progress.finish();

        let figure = Arc::new(built?);
        self.set(key, Arc::clone(&figure));
        Ok(figure)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
        }
    }
}

impl Default for FigureCache {
    fn default() -> Self {
        Self::new(crate::config::CacheConfig::default().capacity)
    }
}
