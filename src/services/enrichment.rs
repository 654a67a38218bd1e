use crate::models::{Analysis, Item};
use crate::services::analyzer::Analyzer;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// What `ensure_enriched` did for an item
#[derive(Debug)]
pub enum Ensure {
    /// A result is already cached for the id
    Cached,
    /// A lookup for the id is already running
    Pending,
    /// A new lookup was started
    Spawned(JoinHandle<()>),
    /// No tokio runtime to run the lookup on; nothing was marked in flight
    Skipped,
}

impl Ensure {
    pub fn is_spawned(&self) -> bool {
        matches!(self, Ensure::Spawned(_))
    }

    /// Wait for a spawned lookup to finish; no-op for the other variants
    pub async fn settle(self) {
        if let Ensure::Spawned(handle) = self {
            if let Err(e) = handle.await {
                tracing::warn!("Enrichment task aborted: {}", e);
            }
        }
    }
}

/// Enrichment statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentStats {
    pub cached: u64,
    pub in_flight: usize,
}

/// Single-flight, cached, best-effort analysis of deck items
///
/// Results are keyed by item id and never evicted for the lifetime of the
/// session. A completion only ever writes the cache; readers look up the id
/// they are currently displaying.
#[derive(Clone)]
pub struct Enrichment {
    analyzer: Arc<dyn Analyzer>,
    locality: String,
    timeout: Duration,
    cache: Cache<String, Analysis>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Enrichment {
    pub fn new(analyzer: Arc<dyn Analyzer>, locality: impl Into<String>, timeout: Duration) -> Self {
        Self {
            analyzer,
            locality: locality.into(),
            timeout,
            cache: Cache::builder().build(),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Start a lookup for `item` unless one is cached or already running
    ///
    /// Outside a tokio runtime the lookup is skipped and the item keeps its
    /// base score; a later call from inside a runtime retries it.
    pub fn ensure_enriched(&self, item: &Item) -> Ensure {
        let mut in_flight = lock(&self.in_flight);

        // Completions insert into the cache before clearing the in-flight mark,
        // so under this lock every id is visible in at least one of the two
        if self.cache.contains_key(&item.id) {
            tracing::trace!("Enrichment cache hit: {}", item.id);
            return Ensure::Cached;
        }
        if in_flight.contains(&item.id) {
            tracing::trace!("Enrichment already pending: {}", item.id);
            return Ensure::Pending;
        }
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!("Skipping enrichment for {}: {}", item.id, e);
                return Ensure::Skipped;
            }
        };
        in_flight.insert(item.id.clone());
        drop(in_flight);

        tracing::debug!("Starting enrichment for {}", item.id);

        let guard = InFlightGuard {
            id: item.id.clone(),
            in_flight: Arc::clone(&self.in_flight),
        };
        let analyzer = Arc::clone(&self.analyzer);
        let cache = self.cache.clone();
        let locality = self.locality.clone();
        let timeout = self.timeout;
        let item = item.clone();

        let handle = runtime.spawn(async move {
            match tokio::time::timeout(timeout, analyzer.analyze(&item, &locality)).await {
                Ok(Ok(analysis)) => {
                    tracing::debug!("Enrichment for {} scored {}", item.id, analysis.score);
                    cache.insert(item.id.clone(), analysis);
                }
                Ok(Err(e)) => {
                    tracing::warn!("Enrichment for {} failed: {}", item.id, e);
                }
                Err(_) => {
                    tracing::warn!("Enrichment for {} timed out after {:?}", item.id, timeout);
                }
            }
            drop(guard);
        });

        Ensure::Spawned(handle)
    }

    /// Cached analysis for an item id
    pub fn lookup(&self, id: &str) -> Option<Analysis> {
        self.cache.get(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        lock(&self.in_flight).contains(id)
    }

    /// Copy of `item` with its cached score merged in, if any
    pub fn merge(&self, item: &Item) -> (Item, Option<String>) {
        let mut merged = item.clone();
        match self.lookup(&item.id) {
            Some(analysis) => {
                merged.enriched_score = Some(analysis.score);
                (merged, Some(analysis.reasoning))
            }
            None => (merged, None),
        }
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn stats(&self) -> EnrichmentStats {
        self.cache.run_pending_tasks();
        EnrichmentStats {
            cached: self.cache.entry_count(),
            in_flight: lock(&self.in_flight).len(),
        }
    }
}

/// Clears the in-flight mark when the lookup task ends, including on abort
struct InFlightGuard {
    id: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.id);
    }
}

fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
