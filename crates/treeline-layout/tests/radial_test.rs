use std::f64::consts::TAU;
use treeline_core::{
    Density, GraphDoc, GraphEdge, GraphNode, LayoutConfig, NodeBody, NodeKind, StrategyKind,
};
use treeline_layout::radial;

const EPS: f64 = 1e-9;
const R1: f64 = 250.0;
const R2: f64 = 450.0;

fn node(id: &str, kind: NodeKind) -> GraphNode {
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
        body: NodeBody::Business {
            name: id.to_string(),
        },
    }
}

fn config() -> LayoutConfig {
    LayoutConfig {
        strategy: StrategyKind::Radial,
        ..Default::default()
    }
}

fn pos(layout: &treeline_core::Layout, id: &str) -> (f64, f64) {
    layout
        .nodes
        .iter()
        .find(|n| n.node.id == id)
        .map(|n| (n.x, n.y))
        .unwrap()
}

#[test]
fn single_root_sits_at_origin() {
    let doc = GraphDoc {
        nodes: vec![node("root", NodeKind::Root)],
        edges: vec![],
    };
    let layout = radial::layout(&doc, &config());
    assert_eq!(layout.nodes.len(), 1);
    let (x, y) = pos(&layout, "root");
    assert!(x.abs() < EPS && y.abs() < EPS);
}

#[test]
fn four_children_quarter_the_first_ring() {
    let mut doc = GraphDoc {
        nodes: vec![node("root", NodeKind::Root)],
        edges: vec![],
    };
    for i in 0..4 {
        let id = format!("p{i}");
        doc.nodes.push(node(&id, NodeKind::Project));
        doc.edges.push(GraphEdge {
            id: format!("root-{id}"),
            source: "root".to_string(),
            target: id,
            relationship: "contains".to_string(),
            label: None,
            strength: 3,
            animated: false,
        });
    }

    let layout = radial::layout(&doc, &config());
    let expected = [(R1, 0.0), (0.0, R1), (-R1, 0.0), (0.0, -R1)];
    for (i, (ex, ey)) in expected.iter().enumerate() {
        let (x, y) = pos(&layout, &format!("p{i}"));
        assert!(
            (x - ex).abs() < 1e-6 && (y - ey).abs() < 1e-6,
            "p{i} at ({x}, {y}), expected ({ex}, {ey})"
        );
    }
}

#[test]
fn single_level_one_node_lands_at_angle_zero() {
    let doc = GraphDoc {
        nodes: vec![node("root", NodeKind::Root), node("p", NodeKind::Project)],
        edges: vec![],
    };
    let layout = radial::layout(&doc, &config());
    let (x, y) = pos(&layout, "p");
    assert!((x - R1).abs() < EPS);
    assert!(y.abs() < EPS);
}

#[test]
fn level_two_groups_by_ordinal_parent_slots() {
    let mut doc = GraphDoc::default();
    doc.nodes.push(node("root", NodeKind::Root));
    doc.nodes.push(node("p0", NodeKind::Project));
    doc.nodes.push(node("p1", NodeKind::Project));
    for i in 0..4 {
        doc.nodes
            .push(node(&format!("b{i}"), NodeKind::BusinessType));
    }

    let layout = radial::layout(&doc, &config());

    // per_parent = ceil(4 / 2) = 2; local offsets are (k+1) * TAU/3.
    let parent0 = 0.0;
    let parent1 = TAU / 2.0;
    let expected_angles = [
        parent0 + TAU / 3.0,
        parent0 + 2.0 * TAU / 3.0,
        parent1 + TAU / 3.0,
        parent1 + 2.0 * TAU / 3.0,
    ];
    for (i, expected) in expected_angles.iter().enumerate() {
        let (x, y) = pos(&layout, &format!("b{i}"));
        let radius = x.hypot(y);
        assert!((radius - R2).abs() < 1e-6, "b{i} radius {radius}");
        let angle = y.atan2(x).rem_euclid(TAU);
        assert!(
            (angle - expected.rem_euclid(TAU)).abs() < 1e-6,
            "b{i} angle {angle}, expected {expected}"
        );
    }
}

#[test]
fn level_without_parents_fans_around_origin() {
    let doc = GraphDoc {
        nodes: vec![
            node("b0", NodeKind::BusinessType),
            node("b1", NodeKind::BusinessType),
        ],
        edges: vec![],
    };
    let layout = radial::layout(&doc, &config());
    let (x0, y0) = pos(&layout, "b0");
    let (x1, y1) = pos(&layout, "b1");
    assert!((x0.hypot(y0) - R2).abs() < 1e-6);
    assert!((x1.hypot(y1) - R2).abs() < 1e-6);
    assert!((x0 - R2).abs() < 1e-6 && y0.abs() < 1e-6);
    assert!((x1 + R2).abs() < 1e-6 && y1.abs() < 1e-6);
}

#[test]
fn density_scales_ring_radii() {
    let doc = GraphDoc {
        nodes: vec![node("root", NodeKind::Root), node("p", NodeKind::Project)],
        edges: vec![],
    };
    let cfg = LayoutConfig {
        strategy: StrategyKind::Radial,
        density: Density::Compact,
        ..Default::default()
    };
    let layout = radial::layout(&doc, &cfg);
    let (x, _) = pos(&layout, "p");
    assert!((x - R1 * 0.75).abs() < EPS);
}

#[test]
fn extra_roots_are_demoted_to_the_first_ring() {
    let doc = GraphDoc {
        nodes: vec![node("r1", NodeKind::Root), node("r2", NodeKind::Root)],
        edges: vec![],
    };
    let layout = radial::layout(&doc, &config());
    let (x1, y1) = pos(&layout, "r1");
    assert!(x1.abs() < EPS && y1.abs() < EPS);
    let (x2, y2) = pos(&layout, "r2");
    assert!((x2.hypot(y2) - R1).abs() < 1e-6);
}

#[test]
fn placement_is_deterministic_and_conserving() {
    let mut doc = GraphDoc::default();
    doc.nodes.push(node("root", NodeKind::Root));
    for i in 0..3 {
        doc.nodes.push(node(&format!("p{i}"), NodeKind::Project));
    }
    for i in 0..5 {
        doc.nodes
            .push(node(&format!("b{i}"), NodeKind::BusinessType));
    }
    for i in 0..7 {
        doc.nodes.push(node(&format!("t{i}"), NodeKind::TestCase));
    }

    let a = radial::layout(&doc, &config());
    let b = radial::layout(&doc, &config());
    assert_eq!(a, b);
    assert_eq!(a.nodes.len(), doc.nodes.len());
}

#[test]
fn edges_carry_visual_metadata() {
    let doc = GraphDoc {
        nodes: vec![node("root", NodeKind::Root), node("p", NodeKind::Project)],
        edges: vec![GraphEdge {
            id: "root-p".to_string(),
            source: "root".to_string(),
            target: "p".to_string(),
            relationship: "owns".to_string(),
            label: Some("label".to_string()),
            strength: 5,
            animated: true,
        }],
    };
    let layout = radial::layout(&doc, &config());
    assert_eq!(layout.edges.len(), 1);
    let e = &layout.edges[0];
    assert_eq!(e.stroke_width, 3.5);
    assert_eq!(e.stroke_color, "#434343");
    assert_eq!(e.line_cap, "round");
    assert!(e.arrowhead);
    assert_eq!(e.edge.relationship, "owns");
    assert!(e.edge.animated);
}

#[test]
fn empty_document_yields_empty_layout() {
    let layout = radial::layout(&GraphDoc::default(), &config());
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
}
