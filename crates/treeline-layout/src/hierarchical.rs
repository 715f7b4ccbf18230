//! Layered hierarchical layout.
//!
//! Ranks are assigned with a longest-path pass over the directed graph,
//! in-rank order settles over a fixed number of barycenter sweeps, and
//! coordinates are computed in top-bottom working space before being mapped
//! to the requested direction. The internal pipeline emits top-left anchored
//! coordinates; the renderer expects centers, so positions are converted
//! before returning.

use crate::graph::{RankGraph, RankNode};
use crate::{Error, Result};
use rustc_hash::FxHashMap;
use treeline_core::{
    DEFAULT_NODE_SIZE, Direction, GraphDoc, Layout, LayoutConfig, Point, PositionedNode,
    StyledEdge,
};

/// Ordering runs a fixed number of sweeps, so termination is structural.
const ORDER_SWEEPS: usize = 4;

pub fn layout(doc: &GraphDoc, config: &LayoutConfig) -> Result<Layout> {
    if doc.nodes.is_empty() {
        return Ok(Layout::default());
    }

    let mut g = build_rank_graph(doc, config.direction)?;
    longest_path(&mut g)?;
    normalize_ranks(&mut g);

    let mut layers = build_layer_matrix(&g)?;
    order_layers(&g, &mut layers);
    assign_coordinates(&mut g, &layers, config);

    let positions = resolve_positions(&g, config.direction);
    let (source_handle, target_handle) = config.direction.handles();

    let nodes = doc
        .nodes
        .iter()
        .map(|node| {
            let p = positions
                .get(&node.id)
                .copied()
                .ok_or_else(|| Error::MissingRank {
                    id: node.id.clone(),
                })?;
            Ok(PositionedNode {
                node: node.clone(),
                x: p.x,
                y: p.y,
                source_handle,
                target_handle,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let edges = doc
        .edges
        .iter()
        .map(|e| StyledEdge::from_edge(e.clone()))
        .collect();

    Ok(Layout { nodes, edges })
}

/// Builds the working graph. Horizontal directions layout in transposed
/// space, so width/height are swapped here and the coordinates swapped back
/// at the end.
fn build_rank_graph(doc: &GraphDoc, direction: Direction) -> Result<RankGraph> {
    let mut g = RankGraph::new();

    for node in &doc.nodes {
        let (mut width, mut height) = (node.width, node.height);
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            tracing::warn!(node = %node.id, "node has no usable dimensions; using defaults");
            width = DEFAULT_NODE_SIZE.width;
            height = DEFAULT_NODE_SIZE.height;
        }
        if direction.is_horizontal() {
            (width, height) = (height, width);
        }
        g.set_node(
            node.id.clone(),
            RankNode {
                width,
                height,
                ..Default::default()
            },
        );
    }

    for edge in &doc.edges {
        if !g.has_node(&edge.source) || !g.has_node(&edge.target) {
            return Err(Error::DanglingEdge {
                source_id: edge.source.clone(),
                target: edge.target.clone(),
            });
        }
        g.set_edge(edge.source.clone(), edge.target.clone());
    }

    Ok(g)
}

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    InProgress,
    Done,
}

/// Longest-path ranking anchored at the sources: a node's rank is its longest
/// distance from any source, so every edge spans at least one rank and
/// siblings without children stay with their rank rather than sinking.
/// Cycles are an error; the engine falls back to the radial strategy.
fn longest_path(g: &mut RankGraph) -> Result<()> {
    fn dfs(
        g: &mut RankGraph,
        v: &str,
        state: &mut FxHashMap<String, Visit>,
        ranks: &mut FxHashMap<String, i32>,
    ) -> Result<i32> {
        match state.get(v) {
            Some(Visit::Done) => return Ok(ranks[v]),
            Some(Visit::InProgress) => {
                return Err(Error::CycleDetected { id: v.to_string() });
            }
            None => {}
        }
        state.insert(v.to_string(), Visit::InProgress);

        let predecessors: Vec<String> = g.predecessors(v).to_vec();
        let mut rank: Option<i32> = None;
        for u in predecessors {
            let candidate = dfs(g, &u, state, ranks)? + 1;
            rank = Some(match rank {
                Some(current) => current.max(candidate),
                None => candidate,
            });
        }

        let rank = rank.unwrap_or(0);
        if let Some(label) = g.node_mut(v) {
            label.rank = Some(rank);
        }
        state.insert(v.to_string(), Visit::Done);
        ranks.insert(v.to_string(), rank);
        Ok(rank)
    }

    let mut state: FxHashMap<String, Visit> = FxHashMap::default();
    let mut ranks: FxHashMap<String, i32> = FxHashMap::default();
    for v in g.node_ids() {
        dfs(g, &v, &mut state, &mut ranks)?;
    }
    Ok(())
}

/// Shifts ranks so the minimum is zero.
fn normalize_ranks(g: &mut RankGraph) {
    let mut min_rank = i32::MAX;
    for v in g.node_ids() {
        if let Some(rank) = g.node(&v).and_then(|n| n.rank) {
            min_rank = min_rank.min(rank);
        }
    }
    if min_rank == i32::MAX {
        return;
    }
    for v in g.node_ids() {
        if let Some(n) = g.node_mut(&v) {
            if let Some(rank) = n.rank {
                n.rank = Some(rank - min_rank);
            }
        }
    }
}

/// Rank-indexed node lists, initial in-rank order following input order.
fn build_layer_matrix(g: &RankGraph) -> Result<Vec<Vec<String>>> {
    let mut max_rank: i32 = 0;
    for v in g.node_ids() {
        let rank = g
            .node(&v)
            .and_then(|n| n.rank)
            .ok_or_else(|| Error::MissingRank { id: v.clone() })?;
        max_rank = max_rank.max(rank);
    }

    let mut layers: Vec<Vec<String>> = vec![Vec::new(); (max_rank + 1) as usize];
    for v in g.node_ids() {
        if let Some(rank) = g.node(&v).and_then(|n| n.rank) {
            layers[rank as usize].push(v);
        }
    }
    Ok(layers)
}

/// Alternating down/up barycenter sweeps, bounded by [`ORDER_SWEEPS`].
/// Sorting is stable, so ties keep input order and the result is
/// deterministic.
fn order_layers(g: &RankGraph, layers: &mut [Vec<String>]) {
    if layers.len() < 2 {
        return;
    }

    let mut order_of: FxHashMap<String, usize> = FxHashMap::default();
    for layer in layers.iter() {
        for (i, v) in layer.iter().enumerate() {
            order_of.insert(v.clone(), i);
        }
    }

    for sweep in 0..ORDER_SWEEPS {
        let downward = sweep % 2 == 0;
        let indices: Vec<usize> = if downward {
            (1..layers.len()).collect()
        } else {
            (0..layers.len() - 1).rev().collect()
        };

        for idx in indices {
            let layer = &mut layers[idx];
            let mut keyed: Vec<(f64, String)> = layer
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let neighbors = if downward {
                        g.predecessors(v)
                    } else {
                        g.successors(v)
                    };
                    let weights: Vec<f64> = neighbors
                        .iter()
                        .filter_map(|n| order_of.get(n.as_str()))
                        .map(|&o| o as f64)
                        .collect();
                    let key = if weights.is_empty() {
                        i as f64
                    } else {
                        weights.iter().sum::<f64>() / weights.len() as f64
                    };
                    (key, v.clone())
                })
                .collect();

            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            *layer = keyed.into_iter().map(|(_, v)| v).collect();
            for (i, v) in layer.iter().enumerate() {
                order_of.insert(v.clone(), i);
            }
        }
    }
}

/// Top-left anchored coordinates in top-bottom working space. Rows are
/// centered on the cross axis; ranks advance by the row height plus the
/// configured rank separation.
fn assign_coordinates(g: &mut RankGraph, layers: &[Vec<String>], config: &LayoutConfig) {
    let spacing = config.effective_spacing();
    let mut y = 0.0;

    for layer in layers {
        if layer.is_empty() {
            continue;
        }

        let row_height = layer
            .iter()
            .filter_map(|v| g.node(v))
            .map(|n| n.height)
            .fold(0.0_f64, f64::max);

        let mut xs: Vec<f64> = Vec::with_capacity(layer.len());
        let mut cursor = 0.0;
        for v in layer {
            xs.push(cursor);
            let width = g.node(v).map(|n| n.width).unwrap_or(DEFAULT_NODE_SIZE.width);
            cursor += width + spacing.node_sep;
        }
        let row_width = cursor - spacing.node_sep;
        let shift = -row_width / 2.0;

        for (v, x) in layer.iter().zip(xs) {
            if let Some(n) = g.node_mut(v) {
                n.x = Some(x + shift);
                n.y = Some(y);
            }
        }

        y += row_height + spacing.rank_sep;
    }
}

/// Converts top-left working coordinates to center anchors and maps them to
/// the requested direction: flip the primary axis for the mirrored
/// directions, transpose for the horizontal ones.
fn resolve_positions(g: &RankGraph, direction: Direction) -> FxHashMap<String, Point> {
    let mut out: FxHashMap<String, Point> = FxHashMap::default();
    for v in g.node_ids() {
        let Some(n) = g.node(&v) else { continue };
        let (Some(x), Some(y)) = (n.x, n.y) else {
            continue;
        };
        let cx = x + n.width / 2.0;
        let cy = y + n.height / 2.0;
        let p = match direction {
            Direction::TB => Point { x: cx, y: cy },
            Direction::BT => Point { x: cx, y: -cy },
            Direction::LR => Point { x: cy, y: cx },
            Direction::RL => Point { x: -cy, y: cx },
        };
        out.insert(v, p);
    }
    out
}
