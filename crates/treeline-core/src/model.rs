use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Node size in pixels, as consumed by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Fallback size for nodes whose raw type string is not in the size table.
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 160.0,
    height: 48.0,
};

/// Canonical node kinds of the knowledge hierarchy, level 0 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Project,
    BusinessType,
    TestPoint,
    #[default]
    TestCase,
}

impl NodeKind {
    /// Maps a loose type string from the raw payload. Returns `None` for
    /// unrecognized strings; the transformer collapses those to
    /// [`NodeKind::TestCase`] with a warning.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim() {
            "root" | "service" => Some(Self::Root),
            "project" => Some(Self::Project),
            "business_type" | "businessType" | "business" => Some(Self::BusinessType),
            "test_point" | "testPoint" | "point" => Some(Self::TestPoint),
            "test_case" | "testCase" | "case" => Some(Self::TestCase),
            _ => None,
        }
    }

    /// Hierarchy depth is a pure function of the kind.
    pub fn level(self) -> u8 {
        match self {
            Self::Root => 0,
            Self::Project => 1,
            Self::BusinessType => 2,
            Self::TestPoint | Self::TestCase => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Project => "project",
            Self::BusinessType => "business_type",
            Self::TestPoint => "test_point",
            Self::TestCase => "test_case",
        }
    }

    pub fn size(self) -> Size {
        match self {
            Self::Root => Size {
                width: 200.0,
                height: 64.0,
            },
            Self::Project => Size {
                width: 180.0,
                height: 56.0,
            },
            Self::BusinessType => Size {
                width: 170.0,
                height: 52.0,
            },
            Self::TestPoint => Size {
                width: 160.0,
                height: 48.0,
            },
            Self::TestCase => Size {
                width: 150.0,
                height: 44.0,
            },
        }
    }

    pub fn base_color(self) -> &'static str {
        match self {
            Self::Root => "#1d39c4",
            Self::Project => "#1677ff",
            Self::BusinessType => "#13c2c2",
            Self::TestPoint => "#52c41a",
            Self::TestCase => "#faad14",
        }
    }
}

/// Business sub-type color override; falls through to the kind palette when the
/// name is not recognized.
pub fn business_color(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_lowercase().as_str() {
        "api" | "interface" => Some("#2f54eb"),
        "ui" | "web" => Some("#722ed1"),
        "performance" => Some("#fa541c"),
        "security" => Some("#cf1322"),
        "data" => Some("#08979c"),
        _ => None,
    }
}

/// Kind-specific payload carried alongside the shared node fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeBody {
    Root {
        project_count: u32,
        case_count: u32,
    },
    Project {
        point_count: u32,
        case_count: u32,
    },
    Business {
        name: String,
    },
    Test {
        stage: String,
        priority: String,
        status: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub level: u8,
    pub label: String,
    pub color: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<serde_json::Value>,
    pub body: NodeBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relationship: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// 1 (weak) through 5 (strong); controls stroke width and color.
    pub strength: u8,
    pub animated: bool,
}

/// The canonical output of the transformer and input to the layout strategies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDoc {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Side of a node where an edge visually attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A node with center-anchored pixel coordinates and resolved handle sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: GraphNode,
    pub x: f64,
    pub y: f64,
    pub source_handle: HandleSide,
    pub target_handle: HandleSide,
}

/// An edge with resolved visual metadata attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledEdge {
    #[serde(flatten)]
    pub edge: GraphEdge,
    pub stroke_width: f64,
    pub stroke_color: String,
    pub line_cap: String,
    pub arrowhead: bool,
}

impl StyledEdge {
    /// Attaches default visual metadata, preserving the edge's own fields.
    pub fn from_edge(edge: GraphEdge) -> Self {
        let strength = edge.strength.clamp(1, 5);
        let stroke_width = 1.0 + f64::from(strength) * 0.5;
        let stroke_color = match strength {
            1 | 2 => "#bfbfbf",
            3 => "#8c8c8c",
            _ => "#434343",
        };
        Self {
            edge,
            stroke_width,
            stroke_color: stroke_color.to_string(),
            line_cap: "round".to_string(),
            arrowhead: true,
        }
    }
}

/// A positioned, styled node/edge set ready for the rendering collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<StyledEdge>,
}

impl Layout {
    /// Id to center-point map, used for incremental redraws.
    pub fn positions(&self) -> FxHashMap<String, Point> {
        self.nodes
            .iter()
            .map(|n| (n.node.id.clone(), Point { x: n.x, y: n.y }))
            .collect()
    }
}
