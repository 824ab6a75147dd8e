use conceptweb_core::{Chapter, CrossReference, RefDirection, main_chapters};
use conceptweb_render::config::TimelineConfig;
use conceptweb_render::timeline::{arc_height, arc_points, page_range};
use conceptweb_render::{Error, LayoutOptions, layout_timeline};

fn xref(from: i64, to: i64) -> CrossReference {
    CrossReference {
        from_page: from,
        to_page: to,
        from_section: format!("s{from}"),
        to_section: format!("s{to}"),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn arc_height_grows_with_span_and_saturates() {
    let cfg = TimelineConfig::default();
    assert!(close(arc_height(4, &cfg), 0.258));
    assert!(close(arc_height(100, &cfg), 0.45));
    assert!(close(arc_height(275, &cfg), 0.8));
    assert!(close(arc_height(400, &cfg), 0.8));
}

#[test]
fn forward_arcs_rise_and_backward_arcs_dip() {
    let cfg = TimelineConfig::default();

    let up = arc_points(&xref(50, 150), 30, &cfg);
    assert_eq!(up.len(), 30);
    assert!(close(up[0].x, 50.0) && close(up[0].y, 0.0));
    assert!(close(up[29].x, 150.0) && close(up[29].y, 0.0));
    assert!(up[1..29].iter().all(|p| p.y > 0.0));

    let down = arc_points(&xref(150, 50), 30, &cfg);
    assert!(close(down[0].x, 150.0));
    assert!(close(down[29].x, 50.0));
    assert!(down[1..29].iter().all(|p| p.y < 0.0));
}

#[test]
fn arc_peaks_at_its_midpoint() {
    let cfg = TimelineConfig::default();
    let pts = arc_points(&xref(0, 100), 3, &cfg);
    assert!(close(pts[1].x, 50.0));
    assert!(close(pts[1].y, arc_height(100, &cfg)));
}

#[test]
fn page_range_uses_origins_for_min_and_targets_for_max() {
    let chapters = vec![Chapter {
        page: 26,
        title: "1. Introduction".to_string(),
    }];
    let refs = vec![xref(10, 80), xref(300, 200)];
    assert_eq!(page_range(&refs, &chapters), Some((10, 200)));
    assert_eq!(page_range(&[], &chapters), Some((26, 26)));
    assert_eq!(page_range(&[], &[]), None);
}

#[test]
fn layout_counts_directions_and_extends_limits() {
    let refs = vec![xref(30, 120), xref(200, 60), xref(40, 400)];
    let layout = layout_timeline(&refs, &main_chapters(), &LayoutOptions::default()).unwrap();

    assert_eq!(layout.forward_count, 2);
    assert_eq!(layout.backward_count, 1);
    assert_eq!(layout.arcs.len(), 3);
    assert_eq!(layout.arcs[2].direction, RefDirection::Backward);
    assert!(layout.arcs[2].height < 0.0);

    assert_eq!(layout.min_page, 26);
    assert_eq!(layout.max_page, 414);
    assert!(close(layout.viewport.x_min, 6.0));
    assert!(close(layout.viewport.x_max, 434.0));
    assert!(close(layout.viewport.width_pt, 24.0 * 72.0));
    assert!(close(layout.viewport.height_pt, 8.0 * 72.0));
}

#[test]
fn rotated_chapter_labels_extend_the_bounds_downwards() {
    let layout = layout_timeline(&[], &main_chapters(), &LayoutOptions::default()).unwrap();
    assert_eq!(layout.chapters.len(), 19);
    assert!(layout.bounds.max_y > layout.viewport.height_pt);
    for m in &layout.chapters {
        assert!(m.label_bounds.max_x <= m.label_anchor.x + 1e-9);
        assert!(m.label_bounds.min_y >= m.label_anchor.y - 1e-9);
    }
}

#[test]
fn extreme_pages_lay_out_with_saturated_arcs() {
    let refs = vec![xref(i64::MIN, i64::MAX), xref(i64::MAX, 26)];
    let layout = layout_timeline(&refs, &main_chapters(), &LayoutOptions::default()).unwrap();
    assert_eq!(layout.forward_count, 1);
    assert_eq!(layout.backward_count, 1);
    for arc in &layout.arcs {
        assert!(close(arc.height.abs(), 0.8));
        assert!(arc.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}

#[test]
fn nothing_to_draw_is_an_error() {
    let err = layout_timeline(&[], &[], &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset { .. }));
}
