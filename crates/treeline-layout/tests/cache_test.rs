use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use treeline_core::{
    Density, GraphDoc, GraphNode, LayoutConfig, NodeBody, NodeKind, StrategyKind,
};
use treeline_layout::{CacheOptions, CacheSignature, Clock, LayoutCache, radial};

/// Test clock that only moves when told to.
struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap()
    }
}

fn node(id: &str) -> GraphNode {
    let kind = NodeKind::Project;
    let size = kind.size();
    GraphNode {
        id: id.to_string(),
        kind,
        level: kind.level(),
        label: id.to_string(),
        color: kind.base_color().to_string(),
        width: size.width,
        height: size.height,
        description: None,
        stats: None,
        body: NodeBody::Project {
            point_count: 0,
            case_count: 0,
        },
    }
}

fn signature(node_count: usize) -> CacheSignature {
    CacheSignature {
        strategy: StrategyKind::Hierarchical,
        density: Density::Normal,
        node_count,
        edge_count: 0,
    }
}

fn sample_layout() -> treeline_core::Layout {
    let doc = GraphDoc {
        nodes: vec![node("a"), node("b")],
        edges: vec![],
    };
    radial::layout(&doc, &LayoutConfig::default())
}

#[test]
fn set_then_get_returns_the_stored_layout() {
    let mut cache = LayoutCache::new(CacheOptions::default());
    let layout = sample_layout();
    cache.set(signature(2), layout.clone());
    assert_eq!(cache.get(&signature(2)), Some(layout));
}

#[test]
fn get_miss_returns_none() {
    let mut cache = LayoutCache::new(CacheOptions::default());
    assert_eq!(cache.get(&signature(7)), None);
}

#[test]
fn entries_expire_after_ttl() {
    let clock = ManualClock::new();
    let mut cache = LayoutCache::with_clock(CacheOptions::default(), clock.clone());
    cache.set(signature(2), sample_layout());

    clock.advance(Duration::from_secs(299));
    assert!(cache.get(&signature(2)).is_some());

    clock.advance(Duration::from_secs(2));
    assert_eq!(cache.get(&signature(2)), None);
    // The stale entry was removed on lookup, not just hidden.
    assert!(cache.is_empty());
}

#[test]
fn positions_follow_the_same_lookup_rules() {
    let clock = ManualClock::new();
    let mut cache = LayoutCache::with_clock(CacheOptions::default(), clock.clone());
    cache.set(signature(2), sample_layout());

    let positions = cache.positions(&signature(2)).unwrap();
    assert_eq!(positions.len(), 2);
    assert!(positions.contains_key("a"));
    assert!(positions.contains_key("b"));

    clock.advance(Duration::from_secs(301));
    assert!(cache.positions(&signature(2)).is_none());
}

#[test]
fn capacity_evicts_oldest_entries_first() {
    let clock = ManualClock::new();
    let mut cache = LayoutCache::with_clock(CacheOptions::default(), clock.clone());

    for i in 0..60 {
        cache.set(signature(i), treeline_core::Layout::default());
        clock.advance(Duration::from_millis(1));
    }

    assert_eq!(cache.len(), 50);
    for i in 0..10 {
        assert!(
            cache.get(&signature(i)).is_none(),
            "entry {i} should have been evicted"
        );
    }
    for i in 10..60 {
        assert!(
            cache.get(&signature(i)).is_some(),
            "entry {i} should still be cached"
        );
    }
}

#[test]
fn overwriting_refreshes_the_timestamp() {
    let clock = ManualClock::new();
    let mut cache = LayoutCache::with_clock(CacheOptions::default(), clock.clone());
    cache.set(signature(2), treeline_core::Layout::default());

    clock.advance(Duration::from_secs(200));
    cache.set(signature(2), sample_layout());

    clock.advance(Duration::from_secs(200));
    // 400s after the first insert, 200s after the overwrite: still fresh.
    assert!(cache.get(&signature(2)).is_some());
}

#[test]
fn cleanup_purges_expired_entries_on_set() {
    let clock = ManualClock::new();
    let mut cache = LayoutCache::with_clock(CacheOptions::default(), clock.clone());
    cache.set(signature(1), treeline_core::Layout::default());
    cache.set(signature(2), treeline_core::Layout::default());

    clock.advance(Duration::from_secs(301));
    cache.set(signature(3), treeline_core::Layout::default());

    assert_eq!(cache.len(), 1);
    assert!(cache.get(&signature(3)).is_some());
}
