//! Orchestrating engine: strategy selection, cache consultation, radial
//! fallback, and request-generation bookkeeping.
//!
//! Engines are constructed explicitly and passed by reference; there is no
//! module-level instance. A single mutex guards the cache — layout is
//! synchronous CPU-bound work and never needs parallel computation.

use crate::cache::{CacheOptions, CacheSignature, LayoutCache};
use crate::{hierarchical, radial};
use rustc_hash::FxHashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use treeline_core::{
    Density, GraphDoc, GraphEdge, GraphNode, Layout, LayoutConfig, NodeBody, NodeKind, Point,
    StrategyKind,
};

/// Monotonic request generation. Layout triggers can fire faster than
/// computation completes; a result is applied only while its token is still
/// the latest one issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecomputeSize {
    pub node_count: usize,
    pub edge_count: usize,
}

pub struct LayoutEngine {
    cache: Mutex<LayoutCache>,
    generation: AtomicU64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::with_cache(LayoutCache::new(CacheOptions::default()))
    }

    pub fn with_cache(cache: LayoutCache) -> Self {
        Self {
            cache: Mutex::new(cache),
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new layout request, invalidating results from any request
    /// still in flight.
    pub fn begin_request(&self) -> RequestToken {
        RequestToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Computes a layout, consulting and populating the cache. Always returns
    /// a usable layout for well-formed input; data-shaped failures degrade to
    /// the radial fallback instead of surfacing.
    pub fn compute(&self, doc: &GraphDoc, config: &LayoutConfig) -> Layout {
        if doc.nodes.is_empty() {
            tracing::debug!("empty graph document; returning empty layout");
            return Layout::default();
        }

        let signature = CacheSignature::of(doc, config);
        if let Some(hit) = self.lock_cache().get(&signature) {
            tracing::debug!(?signature, "layout cache hit");
            return hit;
        }

        let layout = run_strategy(doc, config);
        self.lock_cache().set(signature, layout.clone());
        layout
    }

    /// Computes a layout, returning it only while `token` is still the
    /// latest request. Computation always runs to completion; a stale result
    /// is cheap to discard.
    pub fn compute_if_current(
        &self,
        token: RequestToken,
        doc: &GraphDoc,
        config: &LayoutConfig,
    ) -> Option<Layout> {
        let layout = self.compute(doc, config);
        if !self.is_current(token) {
            tracing::debug!("discarding stale layout result");
            return None;
        }
        Some(layout)
    }

    /// Cached position map for incremental redraws; `None` on any miss.
    pub fn cached_positions(
        &self,
        doc: &GraphDoc,
        config: &LayoutConfig,
    ) -> Option<FxHashMap<String, Point>> {
        self.lock_cache()
            .positions(&CacheSignature::of(doc, config))
    }

    pub fn cached_layouts(&self) -> usize {
        self.lock_cache().len()
    }

    /// Warms the cache over the cross-product of strategy, density, and the
    /// given size buckets. Combinations that are already cached are skipped;
    /// a failing combination is logged and the rest proceed.
    pub fn precompute(&self, sizes: &[PrecomputeSize]) {
        for strategy in [StrategyKind::Hierarchical, StrategyKind::Radial] {
            for density in [Density::Compact, Density::Normal, Density::Spacious] {
                for &size in sizes {
                    let signature = CacheSignature {
                        strategy,
                        density,
                        node_count: size.node_count,
                        edge_count: size.edge_count,
                    };
                    if self.lock_cache().contains(&signature) {
                        continue;
                    }

                    let doc = placeholder_doc(size);
                    if doc.nodes.len() != size.node_count || doc.edges.len() != size.edge_count {
                        tracing::warn!(
                            ?size,
                            "cannot synthesize placeholder document for size; skipping"
                        );
                        continue;
                    }

                    let config = LayoutConfig {
                        strategy,
                        density,
                        ..Default::default()
                    };
                    let layout = run_strategy(&doc, &config);
                    self.lock_cache().set(signature, layout);
                    tracing::debug!(?signature, "precomputed layout");
                }
            }
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LayoutCache> {
        // A poisoned cache only means a panic mid-insert; the data is still
        // a valid map, so keep the engine usable.
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn run_strategy(doc: &GraphDoc, config: &LayoutConfig) -> Layout {
    match config.strategy {
        StrategyKind::Hierarchical => match hierarchical::layout(doc, config) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::error!(error = %err, "hierarchical layout failed; falling back to radial");
                radial::layout(doc, config)
            }
        },
        StrategyKind::Radial => radial::layout(doc, config),
    }
}

/// Synthesizes a well-formed document of the requested size for cache
/// warming: one root, the remaining nodes cycling through the lower levels,
/// edges chaining consecutive nodes.
fn placeholder_doc(size: PrecomputeSize) -> GraphDoc {
    let mut doc = GraphDoc::default();
    if size.node_count == 0 {
        return doc;
    }

    for i in 0..size.node_count {
        let kind = if i == 0 {
            NodeKind::Root
        } else {
            match (i - 1) % 3 {
                0 => NodeKind::Project,
                1 => NodeKind::BusinessType,
                _ => NodeKind::TestCase,
            }
        };
        doc.nodes.push(placeholder_node(i, kind));
    }

    if size.edge_count > 0 && size.node_count >= 2 {
        for j in 0..size.edge_count {
            let source = j % (size.node_count - 1);
            let target = source + 1;
            doc.edges.push(GraphEdge {
                id: format!("e{j}"),
                source: format!("n{source}"),
                target: format!("n{target}"),
                relationship: "contains".to_string(),
                label: None,
                strength: 3,
                animated: false,
            });
        }
    }

    doc
}

fn placeholder_node(i: usize, kind: NodeKind) -> GraphNode {
    let id = format!("n{i}");
    let size = kind.size();
    let body = match kind {
        NodeKind::Root => NodeBody::Root {
            project_count: 0,
            case_count: 0,
        },
        NodeKind::Project => NodeBody::Project {
            point_count: 0,
            case_count: 0,
        },
        NodeKind::BusinessType => NodeBody::Business { name: id.clone() },
        NodeKind::TestPoint | NodeKind::TestCase => NodeBody::Test {
            stage: kind.as_str().to_string(),
            priority: "medium".to_string(),
            status: "draft".to_string(),
        },
    };
    GraphNode {
        id: id.clone(),
        kind,
        level: kind.level(),
        label: id,
        color: kind.base_color().to_string(),
        width: size.width,
        height: size.height,
        description: None,
        stats: None,
        body,
    }
}
