//! Normalizes the duck-typed graph payload from the data-fetching collaborator
//! into the canonical [`GraphDoc`] model.
//!
//! The payload is whatever the API returned; optional fields may be absent and
//! are defaulted, never assumed present. Malformed input degrades to an empty
//! document with a warning rather than an error.

use crate::model::{
    DEFAULT_NODE_SIZE, GraphDoc, GraphEdge, GraphNode, NodeBody, NodeKind, business_color,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNodeData {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stats: Option<Value>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub project_count: Option<u32>,
    #[serde(default)]
    pub point_count: Option<u32>,
    #[serde(default)]
    pub case_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub data: RawNodeData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEdgeData {
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub strength: Option<i64>,
    #[serde(default)]
    pub animated: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEdge {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub data: RawEdgeData,
}

/// The duck-typed shape produced by the graph-fetching collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphPayload {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

/// Deserializes a loose JSON value and transforms it. Anything that does not
/// look like a graph payload yields an empty document.
pub fn transform_value(value: &Value) -> GraphDoc {
    if value.is_null() {
        tracing::warn!("graph payload is null; producing empty document");
        return GraphDoc::default();
    }
    match GraphPayload::deserialize(value) {
        Ok(payload) => transform(&payload),
        Err(err) => {
            tracing::warn!(error = %err, "malformed graph payload; producing empty document");
            GraphDoc::default()
        }
    }
}

/// Pure transform: fresh nodes and edges on every call, no caller input is
/// mutated, no I/O.
pub fn transform(payload: &GraphPayload) -> GraphDoc {
    let nodes: Vec<GraphNode> = payload.nodes.iter().filter_map(transform_node).collect();
    let edges: Vec<GraphEdge> = payload.edges.iter().filter_map(transform_edge).collect();
    GraphDoc { nodes, edges }
}

fn transform_node(raw: &RawNode) -> Option<GraphNode> {
    if raw.id.is_empty() {
        tracing::warn!("skipping node without id");
        return None;
    }

    let data = &raw.data;
    let (kind, size) = if data.kind.trim().is_empty() {
        (NodeKind::TestCase, NodeKind::TestCase.size())
    } else {
        match NodeKind::from_raw(&data.kind) {
            Some(kind) => (kind, kind.size()),
            None => {
                tracing::warn!(node = %raw.id, kind = %data.kind, "unknown node type; using defaults");
                (NodeKind::TestCase, DEFAULT_NODE_SIZE)
            }
        }
    };

    let label = if data.label.is_empty() {
        raw.id.clone()
    } else {
        data.label.clone()
    };

    let color = data
        .business_name
        .as_deref()
        .filter(|_| kind == NodeKind::BusinessType)
        .and_then(business_color)
        .unwrap_or(kind.base_color())
        .to_string();

    let body = match kind {
        NodeKind::Root => NodeBody::Root {
            project_count: data.project_count.unwrap_or(0),
            case_count: data.case_count.unwrap_or(0),
        },
        NodeKind::Project => NodeBody::Project {
            point_count: data.point_count.unwrap_or(0),
            case_count: data.case_count.unwrap_or(0),
        },
        NodeKind::BusinessType => NodeBody::Business {
            name: data.business_name.clone().unwrap_or_else(|| label.clone()),
        },
        NodeKind::TestPoint | NodeKind::TestCase => NodeBody::Test {
            stage: data
                .stage
                .clone()
                .unwrap_or_else(|| kind.as_str().to_string()),
            priority: data.priority.clone().unwrap_or_else(|| "medium".to_string()),
            status: data.status.clone().unwrap_or_else(|| "draft".to_string()),
        },
    };

    Some(GraphNode {
        id: raw.id.clone(),
        kind,
        level: kind.level(),
        label,
        color,
        width: size.width,
        height: size.height,
        description: data.description.clone(),
        stats: data.stats.clone(),
        body,
    })
}

fn transform_edge(raw: &RawEdge) -> Option<GraphEdge> {
    if raw.source.is_empty() || raw.target.is_empty() {
        tracing::warn!(id = ?raw.id, "skipping edge without source/target");
        return None;
    }

    let id = raw
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("{}-{}", raw.source, raw.target));

    let strength = raw
        .data
        .strength
        .map(|s| s.clamp(1, 5) as u8)
        .unwrap_or(3);

    Some(GraphEdge {
        id,
        source: raw.source.clone(),
        target: raw.target.clone(),
        relationship: raw
            .data
            .relationship
            .clone()
            .unwrap_or_else(|| "contains".to_string()),
        label: raw.data.label.clone(),
        strength,
        animated: raw.data.animated.unwrap_or(false),
    })
}
