use conceptweb_core::{Concept, ConceptGraph, NetworkVariant, build_network};
use conceptweb_render::config::NetworkConfig;
use conceptweb_render::model::RingTier;
use conceptweb_render::network::{
    arrow_alpha, arrow_width, bubble_radius, font_size, rank_concepts, ring_positions, text_color,
};
use conceptweb_render::{Error, LayoutOptions, layout_network};
use std::f64::consts::{PI, TAU};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn graph_of(weights: &[(&str, u32)]) -> ConceptGraph {
    ConceptGraph::with_concepts(weights.iter().map(|(k, n)| Concept::new(*k, *n)))
}

#[test]
fn worked_example_radii_width_and_alpha() {
    let mut g = graph_of(&[("A", 100), ("B", 50), ("C", 10)]);
    g.insert_link("A", "B", 10);

    let layout = layout_network(&g, &LayoutOptions::default()).expect("layout ok");
    let node = |k: &str| layout.nodes.iter().find(|n| n.key == k).unwrap();
    assert!(close(node("A").radius, 1.1));
    assert!(close(node("B").radius, 0.7));

    assert_eq!(layout.arrows.len(), 1);
    let a = &layout.arrows[0];
    assert!(close(a.width, 4.0));
    assert!(close(a.alpha, 0.9));
    assert!(close(a.mutation_scale, 32.0));
}

#[test]
fn tiers_follow_rank_buckets() {
    let g = build_network(NetworkVariant::Final);
    let layout = layout_network(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(layout.nodes.len(), 25);
    for n in &layout.nodes {
        let expected = match n.rank {
            0 => RingTier::Center,
            1..=6 => RingTier::Inner,
            7..=14 => RingTier::Middle,
            _ => RingTier::Outer,
        };
        assert_eq!(n.tier, expected, "{} at rank {}", n.key, n.rank);
    }
    let center = layout.nodes.iter().find(|n| n.tier == RingTier::Center).unwrap();
    assert_eq!(center.key, "probability_theory");
    assert!(close(center.center.x, 0.0) && close(center.center.y, 0.0));
}

#[test]
fn ring_members_are_evenly_spaced() {
    let cfg = NetworkConfig::default();
    let g = build_network(NetworkVariant::Final);
    let placements = ring_positions(&g, &cfg);

    for (tier, size, radius, offset) in [
        (RingTier::Inner, 6usize, 3.5, 0.0),
        (RingTier::Middle, 8, 6.5, PI / 8.0),
        (RingTier::Outer, 10, 9.5, 0.0),
    ] {
        let ring: Vec<_> = placements.iter().filter(|p| p.tier == tier).collect();
        assert_eq!(ring.len(), size, "{tier:?}");
        for p in &ring {
            assert_eq!(p.ring_size, size);
            let expected = offset + TAU * p.index_in_ring as f64 / size as f64;
            assert!(close(p.angle, expected));
            assert!(close(p.position.x.hypot(p.position.y), radius));
        }
        for pair in ring.windows(2) {
            assert!(close(pair[1].angle - pair[0].angle, TAU / size as f64));
        }
    }
}

#[test]
fn ranking_is_stable_for_ties() {
    let g = graph_of(&[("x", 5), ("y", 9), ("z", 5), ("w", 5)]);
    let keys: Vec<&str> = rank_concepts(&g).iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, ["y", "x", "z", "w"]);
}

#[test]
fn arrows_start_and_end_outside_bubbles() {
    let g = build_network(NetworkVariant::Enhanced);
    let layout = layout_network(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(layout.arrows.len(), g.link_count());

    for a in &layout.arrows {
        let from = layout.nodes.iter().find(|n| n.key == a.source).unwrap();
        let to = layout.nodes.iter().find(|n| n.key == a.target).unwrap();
        let ds = (a.start.x - from.center.x).hypot(a.start.y - from.center.y);
        let de = (a.end.x - to.center.x).hypot(a.end.y - to.center.y);
        assert!(ds >= from.radius - 1e-9, "{} -> {}", a.source, a.target);
        assert!(de >= to.radius - 1e-9, "{} -> {}", a.source, a.target);
        assert!(a.alpha > 0.4 && a.alpha <= 0.9 + 1e-9);
        assert!(a.width > 1.0 && a.width <= 4.0 + 1e-9);
    }
}

#[test]
fn font_size_is_clamped() {
    let cfg = NetworkConfig::default();
    assert!(close(font_size(379, 379, &cfg), 10.0));
    assert!(close(font_size(1, 379, &cfg), 8.0));
    let big = NetworkConfig {
        font_size_scale: 20.0,
        ..NetworkConfig::default()
    };
    assert!(close(font_size(379, 379, &big), 12.0));
}

#[test]
fn scale_helpers_match_the_worked_example() {
    let cfg = NetworkConfig::default();
    assert!(close(bubble_radius(100, 100, &cfg), 1.1));
    assert!(close(bubble_radius(50, 100, &cfg), 0.7));
    assert!(close(arrow_width(10, 10, &cfg), 4.0));
    assert!(close(arrow_alpha(10, 10, &cfg), 0.9));
    assert!(close(arrow_alpha(5, 10, &cfg), 0.65));
}

#[test]
fn text_color_contrasts_with_dark_fills() {
    let cfg = NetworkConfig::default();
    assert_eq!(text_color("#FF6B6B", &cfg), "white");
    assert_eq!(text_color("#85c1e9", &cfg), "white");
    assert_eq!(text_color("#FFEAA7", &cfg), "black");
}

#[test]
fn labels_break_on_underscores() {
    let g = build_network(NetworkVariant::Final);
    let layout = layout_network(&g, &LayoutOptions::default()).unwrap();
    let n = layout
        .nodes
        .iter()
        .find(|n| n.key == "extreme_value_theory")
        .unwrap();
    assert_eq!(n.label_lines, ["extreme", "value", "theory"]);
}

#[test]
fn empty_and_zero_weighted_graphs_are_rejected() {
    let err = layout_network(&ConceptGraph::new(), &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset { .. }));

    let g = graph_of(&[("a", 0), ("b", 0)]);
    let err = layout_network(&g, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::ZeroScale { .. }));

    let mut g = graph_of(&[("a", 3), ("b", 1)]);
    g.insert_link("a", "b", 0);
    let err = layout_network(&g, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::ZeroScale { .. }));
}

#[test]
fn graph_without_links_still_lays_out_nodes() {
    let g = graph_of(&[("solo", 4)]);
    let layout = layout_network(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(layout.nodes.len(), 1);
    assert!(layout.arrows.is_empty());
    assert_eq!(layout.max_link_strength, None);
    assert!(layout.bounds.width() > 0.0);
}

#[test]
fn layout_serializes_to_json() {
    let g = build_network(NetworkVariant::Final);
    let layout = layout_network(&g, &LayoutOptions::default()).unwrap();
    let v = serde_json::to_value(&layout).unwrap();
    assert_eq!(v["nodes"][0]["tier"], "center");
    assert_eq!(v["arrows"].as_array().unwrap().len(), 66);
}
