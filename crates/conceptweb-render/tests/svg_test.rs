use conceptweb_core::{CrossReference, NetworkVariant, build_network, main_chapters};
use conceptweb_render::config::DiagramConfig;
use conceptweb_render::svg::{SvgRenderOptions, render_network_svg, render_timeline_svg};
use conceptweb_render::{LayoutOptions, layout_network, layout_timeline};

fn class_count(doc: &roxmltree::Document<'_>, tag: &str, class: &str) -> usize {
    doc.descendants()
        .filter(|n| n.has_tag_name(tag))
        .filter(|n| {
            n.attribute("class")
                .is_some_and(|c| c.split_whitespace().any(|w| w == class))
        })
        .count()
}

#[test]
fn network_svg_has_a_circle_per_concept_and_a_group_per_link() {
    let graph = build_network(NetworkVariant::Final);
    let options = LayoutOptions::default();
    let layout = layout_network(&graph, &options).unwrap();
    let svg = render_network_svg(&layout, &options.config.network, &SvgRenderOptions::default());

    let doc = roxmltree::Document::parse(&svg).expect("well-formed SVG");
    let root = doc.root_element();
    assert_eq!(root.attribute("id"), Some("concept-network"));
    assert!(root.attribute("viewBox").is_some());

    assert_eq!(class_count(&doc, "circle", "concept"), 25);
    assert_eq!(class_count(&doc, "g", "link"), 66);

    let center = doc
        .descendants()
        .find(|n| n.attribute("data-key") == Some("probability_theory"))
        .unwrap();
    assert_eq!(center.attribute("fill"), Some("#FF6B6B"));
    assert_eq!(center.attribute("opacity"), Some("0.85"));
    // 1.1 data units at 60 points per unit.
    assert_eq!(center.attribute("r"), Some("66"));
}

#[test]
fn network_labels_are_split_into_tspans() {
    let graph = build_network(NetworkVariant::Final);
    let options = LayoutOptions::default();
    let layout = layout_network(&graph, &options).unwrap();
    let svg = render_network_svg(&layout, &options.config.network, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).unwrap();

    let tspans: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("tspan"))
        .filter_map(|n| n.text())
        .collect();
    assert!(tspans.contains(&"dimensionality"));
    assert!(tspans.contains(&"reduction"));
    assert!(!tspans.iter().any(|t| t.contains('_')));
}

#[test]
fn background_can_be_disabled_and_id_overridden() {
    let graph = build_network(NetworkVariant::Final);
    let options = LayoutOptions::default();
    let layout = layout_network(&graph, &options).unwrap();
    let svg = render_network_svg(
        &layout,
        &options.config.network,
        &SvgRenderOptions {
            diagram_id: Some("net<1>".to_string()),
            background: None,
            ..Default::default()
        },
    );
    let doc = roxmltree::Document::parse(&svg).unwrap();
    assert_eq!(doc.root_element().attribute("id"), Some("net<1>"));
    assert!(!doc.root_element().children().any(|n| n.has_tag_name("rect")));
}

#[test]
fn timeline_svg_draws_chapters_and_clipped_references() {
    let refs = vec![
        CrossReference {
            from_page: 30,
            to_page: 150,
            from_section: "2.1".to_string(),
            to_section: "9.3".to_string(),
        },
        CrossReference {
            from_page: 260,
            to_page: 100,
            from_section: "14.2".to_string(),
            to_section: "6.1".to_string(),
        },
    ];
    let config = DiagramConfig::default();
    let options = LayoutOptions::with_config(config.clone());
    let layout = layout_timeline(&refs, &main_chapters(), &options).unwrap();
    let svg = render_timeline_svg(&layout, &config.timeline, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).unwrap();

    assert_eq!(class_count(&doc, "line", "chapter"), 19);
    assert_eq!(class_count(&doc, "text", "chapter-label"), 19);
    assert_eq!(class_count(&doc, "polyline", "forward"), 1);
    assert_eq!(class_count(&doc, "polyline", "backward"), 1);
    assert_eq!(class_count(&doc, "g", "arrowhead"), 2);

    let group = doc
        .descendants()
        .find(|n| n.attribute("class") == Some("references"))
        .unwrap();
    assert_eq!(group.attribute("clip-path"), Some("url(#xref-timeline-axes)"));

    let label = doc
        .descendants()
        .find(|n| n.attribute("class") == Some("chapter-label"))
        .unwrap();
    assert_eq!(label.text(), Some("1. Introduction"));
    assert!(label.attribute("transform").unwrap().contains("rotate(-45)"));

    let poly = doc
        .descendants()
        .find(|n| n.has_tag_name("polyline"))
        .unwrap();
    assert_eq!(poly.attribute("points").unwrap().split(' ').count(), 30);
}
