use serde_json::json;
use treeline::layout::LayoutEngine;
use treeline::{HandleSide, LayoutConfig, layout_payload};

#[test]
fn payload_to_layout_in_one_call() {
    let engine = LayoutEngine::new();
    let payload = json!({
        "nodes": [
            { "id": "svc", "data": { "type": "root", "label": "Service" } },
            { "id": "p1", "data": { "type": "project" } },
            { "id": "p2", "data": { "type": "project" } }
        ],
        "edges": [
            { "source": "svc", "target": "p1" },
            { "source": "svc", "target": "p2" }
        ]
    });

    let config = LayoutConfig::from_loose("hierarchical", "LR", "120", "60", "normal").unwrap();
    let layout = layout_payload(&engine, &payload, &config);

    assert_eq!(layout.nodes.len(), 3);
    assert_eq!(layout.edges.len(), 2);
    for n in &layout.nodes {
        assert_eq!(n.source_handle, HandleSide::Right);
        assert_eq!(n.target_handle, HandleSide::Left);
    }
}

#[test]
fn malformed_payload_yields_empty_layout() {
    let engine = LayoutEngine::new();
    let layout = layout_payload(&engine, &json!("garbage"), &LayoutConfig::default());
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
}

#[test]
fn unknown_config_literal_raises_before_layout() {
    assert!(LayoutConfig::from_loose("hierarchical", "diagonal", "120", "60", "normal").is_err());
}
