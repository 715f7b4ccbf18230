#![forbid(unsafe_code)]

//! `treeline` turns a loosely-typed knowledge-graph payload (root service →
//! projects → business types → test points/cases) into a positioned, styled
//! node/edge set ready for rendering.
//!
//! The pipeline: raw payload → [`transform_value`] → [`GraphDoc`] →
//! [`layout::LayoutEngine::compute`] → [`Layout`]. The engine memoizes
//! results and guarantees a usable layout for any well-formed input — the
//! hierarchical strategy degrades to the radial one instead of erroring.

pub use treeline_core::*;

pub mod layout {
    pub use treeline_layout::{
        CacheOptions, CacheSignature, Clock, Error, LayoutCache, LayoutEngine, PrecomputeSize,
        RequestToken, Result, cache, engine, hierarchical, radial,
    };
}

use layout::LayoutEngine;

/// Transforms a duck-typed JSON payload and computes its layout in one call.
///
/// Malformed payloads degrade to an empty document, so the returned layout is
/// empty rather than an error; only truly empty input yields an empty result.
pub fn layout_payload(
    engine: &LayoutEngine,
    payload: &serde_json::Value,
    config: &LayoutConfig,
) -> Layout {
    let doc = transform_value(payload);
    engine.compute(&doc, config)
}
