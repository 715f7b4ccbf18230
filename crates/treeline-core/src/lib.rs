#![forbid(unsafe_code)]

//! Canonical knowledge-graph model and payload transformer.
//!
//! The UI fetches a loosely-typed graph payload (root service, projects,
//! business types, test points/cases); this crate normalizes it into a strict
//! node/edge model that the layout crate consumes. Rendering, data transport,
//! and persistence live with external collaborators.

pub mod config;
pub mod error;
pub mod model;
pub mod transform;

pub use config::{Density, Direction, LayoutConfig, Spacing, StrategyKind};
pub use error::{Error, Result};
pub use model::{
    DEFAULT_NODE_SIZE, GraphDoc, GraphEdge, GraphNode, HandleSide, Layout, NodeBody, NodeKind,
    Point, PositionedNode, Size, StyledEdge,
};
pub use transform::{GraphPayload, transform, transform_value};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
