//! Deterministic radial ("mindmap") layout.
//!
//! Nodes are grouped by hierarchy level and placed on fixed-radius rings
//! around the root. Children are attached to parent slots by ordinal position
//! within their level, not by walking edges; the placement is replayable for
//! identical input and needs no connectivity at all, which is what makes it a
//! safe fallback for the hierarchical strategy.

use rustc_hash::FxHashMap;
use std::f64::consts::TAU;
use treeline_core::{GraphDoc, Layout, LayoutConfig, Point, PositionedNode, StyledEdge};

/// Ring radii for levels 1..=3, before density scaling.
const RING_RADII: [f64; 3] = [250.0, 450.0, 650.0];

pub fn layout(doc: &GraphDoc, config: &LayoutConfig) -> Layout {
    if doc.nodes.is_empty() {
        return Layout::default();
    }

    let mut by_level: [Vec<usize>; 4] = Default::default();
    for (i, node) in doc.nodes.iter().enumerate() {
        by_level[usize::from(node.level.min(3))].push(i);
    }

    // The model guarantees a single level-0 root; tolerate violations by
    // keeping the first and demoting the rest to the first ring.
    if by_level[0].len() > 1 {
        tracing::warn!(
            count = by_level[0].len(),
            "multiple level-0 nodes; keeping the first as root"
        );
        let extras: Vec<usize> = by_level[0].split_off(1);
        by_level[1].extend(extras);
    }

    let m = config.density.multiplier();
    let mut points: FxHashMap<usize, Point> = FxHashMap::default();

    if let Some(&root) = by_level[0].first() {
        points.insert(root, Point { x: 0.0, y: 0.0 });
    }

    // Level 1: evenly spaced on the first ring. A single node lands at
    // angle 0; the fixed radius bounds angular crowding for any count.
    let r1 = RING_RADII[0] * m;
    let n1 = by_level[1].len();
    let mut angles1: Vec<f64> = Vec::with_capacity(n1);
    for (i, &idx) in by_level[1].iter().enumerate() {
        let angle = i as f64 * TAU / n1 as f64;
        angles1.push(angle);
        points.insert(idx, point_on_ring(r1, angle));
    }

    let angles2 = place_ring(&by_level[2], &angles1, RING_RADII[1] * m, &mut points);
    let _ = place_ring(&by_level[3], &angles2, RING_RADII[2] * m, &mut points);

    let (source_handle, target_handle) = config.direction.handles();
    let nodes = doc
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let p = points.get(&i).copied().unwrap_or(Point { x: 0.0, y: 0.0 });
            PositionedNode {
                node: node.clone(),
                x: p.x,
                y: p.y,
                source_handle,
                target_handle,
            }
        })
        .collect();

    let edges = doc
        .edges
        .iter()
        .map(|e| StyledEdge::from_edge(e.clone()))
        .collect();

    Layout { nodes, edges }
}

/// Places one ring's nodes relative to the previous ring's angles by ordinal
/// grouping: node `i` belongs to parent slot `i / per_parent` and fans out at
/// a local offset inside that slot. With no parents the ring degrades to an
/// even fan around the origin.
fn place_ring(
    level: &[usize],
    parent_angles: &[f64],
    radius: f64,
    points: &mut FxHashMap<usize, Point>,
) -> Vec<f64> {
    let n = level.len();
    let mut angles: Vec<f64> = Vec::with_capacity(n);
    if n == 0 {
        return angles;
    }

    if parent_angles.is_empty() {
        for (i, &idx) in level.iter().enumerate() {
            let angle = i as f64 * TAU / n as f64;
            angles.push(angle);
            points.insert(idx, point_on_ring(radius, angle));
        }
        return angles;
    }

    let per_parent = n.div_ceil(parent_angles.len());
    for (i, &idx) in level.iter().enumerate() {
        let parent = (i / per_parent).min(parent_angles.len() - 1);
        let local = i % per_parent;
        let angle =
            parent_angles[parent] + (local + 1) as f64 * TAU / (per_parent + 1) as f64;
        angles.push(angle);
        points.insert(idx, point_on_ring(radius, angle));
    }
    angles
}

fn point_on_ring(radius: f64, angle: f64) -> Point {
    Point {
        x: radius * angle.cos(),
        y: radius * angle.sin(),
    }
}
