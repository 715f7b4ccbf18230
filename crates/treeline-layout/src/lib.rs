#![forbid(unsafe_code)]

//! Layout computation for treeline knowledge graphs.
//!
//! Two interchangeable strategies sit behind one engine: a layered
//! hierarchical layout and a deterministic radial layout. The engine memoizes
//! results in a TTL/capacity-bounded cache and always returns a usable layout
//! for well-formed input; hierarchical failures degrade to the radial
//! placement instead of surfacing.

pub mod cache;
pub mod engine;
pub mod graph;
pub mod hierarchical;
pub mod radial;

/// Internal layout failures. These never cross the engine boundary; the
/// engine logs them and falls back to the radial strategy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge references a missing node: {source_id} -> {target}")]
    DanglingEdge { source_id: String, target: String },

    #[error("graph contains a cycle through node {id}")]
    CycleDetected { id: String },

    #[error("no rank assigned for node {id}")]
    MissingRank { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;

pub use cache::{CacheOptions, CacheSignature, Clock, LayoutCache};
pub use engine::{LayoutEngine, PrecomputeSize, RequestToken};
