//! Size-keyed layout cache with TTL expiry and capacity-bounded eviction.
//!
//! The signature deliberately hashes only (strategy, density, node count,
//! edge count) — a size heuristic, not content identity. Callers re-transform
//! on data changes and bump the engine's request generation, which keeps
//! collisions confined to equally-sized graphs inside one TTL window.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use treeline_core::{Density, GraphDoc, Layout, LayoutConfig, Point, StrategyKind};

/// Time source, injectable so tests can move past the TTL without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default)]
struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CacheOptions {
    pub ttl: Duration,
    pub capacity: usize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            capacity: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheSignature {
    pub strategy: StrategyKind,
    pub density: Density,
    pub node_count: usize,
    pub edge_count: usize,
}

impl CacheSignature {
    pub fn of(doc: &GraphDoc, config: &LayoutConfig) -> Self {
        Self {
            strategy: config.strategy,
            density: config.density,
            node_count: doc.nodes.len(),
            edge_count: doc.edges.len(),
        }
    }
}

struct CacheEntry {
    layout: Layout,
    positions: FxHashMap<String, Point>,
    created: Instant,
}

pub struct LayoutCache {
    entries: FxHashMap<CacheSignature, CacheEntry>,
    options: CacheOptions,
    clock: Arc<dyn Clock>,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(CacheOptions::default())
    }
}

impl LayoutCache {
    pub fn new(options: CacheOptions) -> Self {
        Self::with_clock(options, Arc::new(SystemClock))
    }

    pub fn with_clock(options: CacheOptions, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: FxHashMap::default(),
            options,
            clock,
        }
    }

    /// Returns the cached layout when the entry exists and is younger than
    /// the TTL; a stale entry is removed and treated as a miss.
    pub fn get(&mut self, signature: &CacheSignature) -> Option<Layout> {
        if self.remove_if_stale(signature) {
            return None;
        }
        self.entries.get(signature).map(|e| e.layout.clone())
    }

    /// Same lookup rules as [`LayoutCache::get`], returning only the
    /// id-to-center map for incremental redraws.
    pub fn positions(&mut self, signature: &CacheSignature) -> Option<FxHashMap<String, Point>> {
        if self.remove_if_stale(signature) {
            return None;
        }
        self.entries.get(signature).map(|e| e.positions.clone())
    }

    /// Stores (or overwrites) an entry stamped with the current time, then
    /// purges expired entries and evicts oldest-first down to capacity.
    pub fn set(&mut self, signature: CacheSignature, layout: Layout) {
        let positions = layout.positions();
        let created = self.clock.now();
        self.entries.insert(
            signature,
            CacheEntry {
                layout,
                positions,
                created,
            },
        );
        self.cleanup();
    }

    pub fn contains(&self, signature: &CacheSignature) -> bool {
        self.entries
            .get(signature)
            .is_some_and(|e| self.is_fresh(e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.clock.now().saturating_duration_since(entry.created) < self.options.ttl
    }

    fn remove_if_stale(&mut self, signature: &CacheSignature) -> bool {
        let stale = self
            .entries
            .get(signature)
            .is_some_and(|e| !self.is_fresh(e));
        if stale {
            self.entries.remove(signature);
        }
        stale
    }

    fn cleanup(&mut self) {
        let now = self.clock.now();
        let ttl = self.options.ttl;
        self.entries
            .retain(|_, e| now.saturating_duration_since(e.created) < ttl);

        while self.entries.len() > self.options.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.created)
                .map(|(sig, _)| *sig);
            let Some(oldest) = oldest else { break };
            self.entries.remove(&oldest);
            tracing::debug!(?oldest, "evicted layout cache entry over capacity");
        }
    }
}
