use conceptweb_render::config::DiagramConfig;
use conceptweb_render::{Error, LayoutOptions, layout_network};
use conceptweb_core::{NetworkVariant, build_network};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn partial_yaml_overrides_keep_other_defaults() {
    let cfg = DiagramConfig::from_yaml_str(
        "dpi: 150\nnetwork:\n  outer_radius: 10.0\ntimeline:\n  arc_color: \"#444444\"\n",
    )
    .unwrap();
    assert_eq!(cfg.dpi, 150.0);
    assert_eq!(cfg.network.outer_radius, 10.0);
    assert_eq!(cfg.network.inner_radius, 3.5);
    assert_eq!(cfg.timeline.arc_color, "#444444");
    assert_eq!(cfg.timeline.arc_samples, 30);
}

#[test]
fn json_config_is_accepted() {
    let cfg = DiagramConfig::from_json_str(r#"{"network": {"arrow_curvature": 0.3}}"#).unwrap();
    assert_eq!(cfg.network.arrow_curvature, 0.3);
    assert_eq!(cfg.dpi, 300.0);
}

#[test]
fn invalid_values_are_rejected() {
    let err = DiagramConfig::from_yaml_str("dpi: 0\n").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    let err = DiagramConfig::from_yaml_str("timeline:\n  arc_samples: 1\n").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    let err = DiagramConfig::from_yaml_str("network: [1, 2]\n").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn fixture_config_moves_the_outer_ring() {
    let path = workspace_root()
        .join("fixtures")
        .join("config")
        .join("wide_rings.yaml");
    let cfg = DiagramConfig::from_path(&path).expect("fixture config");
    assert!((cfg.raster_scale() - 1.0).abs() < 1e-6);

    let graph = build_network(NetworkVariant::Final);
    let layout = layout_network(&graph, &LayoutOptions::with_config(cfg)).unwrap();
    let outer = layout
        .nodes
        .iter()
        .find(|n| n.rank == 15)
        .expect("outer ring member");
    assert!((outer.center.x.hypot(outer.center.y) - 10.5).abs() < 1e-9);
}

#[test]
fn missing_config_file_reports_path() {
    let err = DiagramConfig::from_path("nope/missing.yaml").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
