use super::{SvgRenderOptions, escape_xml, fmt, open_svg, write_arrow_head};
use crate::config::TimelineConfig;
use crate::geom::rotated_box_top_right;
use crate::model::{LayoutPoint, TimelineLayout};
use std::fmt::Write as _;

pub(super) fn render_timeline_svg(
    layout: &TimelineLayout,
    config: &TimelineConfig,
    options: &SvgRenderOptions,
) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("xref-timeline");
    let id = escape_xml(diagram_id);
    let vp = &layout.viewport;
    let (w, h) = (vp.width_pt, vp.height_pt);

    let mut out = String::new();
    open_svg(&mut out, diagram_id, &layout.bounds, options);

    let _ = write!(
        &mut out,
        r#"<defs><clipPath id="{id}-axes"><rect x="0" y="0" width="{w}" height="{h}"/></clipPath></defs>"#,
        w = fmt(w),
        h = fmt(h),
    );

    let axis_y = vp.to_canvas(LayoutPoint::new(vp.x_min, 0.0)).y;
    let _ = write!(
        &mut out,
        r#"<line class="axis" x1="0" y1="{y}" x2="{w}" y2="{y}" stroke="{color}" stroke-width="{sw}" opacity="{alpha}" stroke-linecap="square"/>"#,
        y = fmt(axis_y),
        w = fmt(w),
        color = escape_xml(&config.axis_color),
        sw = fmt(config.axis_width),
        alpha = fmt(config.axis_alpha),
    );

    out.push_str(r#"<g class="chapters">"#);
    for m in &layout.chapters {
        let x = vp.to_canvas(LayoutPoint::new(m.page as f64, 0.0)).x;
        let _ = write!(
            &mut out,
            r#"<line class="chapter" x1="{x}" y1="0" x2="{x}" y2="{h}" stroke="{color}" stroke-width="{sw}" opacity="{alpha}"/>"#,
            x = fmt(x),
            h = fmt(h),
            color = escape_xml(&config.chapter_color),
            sw = fmt(config.chapter_width),
            alpha = fmt(config.chapter_alpha),
        );
    }
    for m in &layout.chapters {
        let (_, baseline) = rotated_box_top_right(
            m.label_anchor,
            m.label_width,
            m.label_height,
            config.label_rotation_deg,
        );
        let _ = write!(
            &mut out,
            r#"<text class="chapter-label" transform="translate({x},{y}) rotate({deg})" text-anchor="end" font-size="{size}" font-weight="bold" fill="{color}">{text}</text>"#,
            x = fmt(m.label_anchor.x + baseline.x),
            y = fmt(m.label_anchor.y + baseline.y),
            deg = fmt(-config.label_rotation_deg),
            size = fmt(config.label_font_size),
            color = escape_xml(&config.label_color),
            text = escape_xml(&m.title),
        );
    }
    out.push_str("</g>");

    let _ = write!(&mut out, r#"<g class="references" clip-path="url(#{id}-axes)">"#);
    for arc in &layout.arcs {
        let mut points = String::new();
        for (i, p) in arc.points.iter().enumerate() {
            let c = vp.to_canvas(*p);
            if i > 0 {
                points.push(' ');
            }
            let _ = write!(&mut points, "{},{}", fmt(c.x), fmt(c.y));
        }
        let _ = write!(
            &mut out,
            r#"<polyline class="reference {dir}" data-from="{from}" data-to="{to}" points="{points}" fill="none" stroke="{color}" stroke-width="{sw}" opacity="{alpha}"/>"#,
            dir = match arc.direction {
                conceptweb_core::RefDirection::Forward => "forward",
                conceptweb_core::RefDirection::Backward => "backward",
            },
            from = arc.from_page,
            to = arc.to_page,
            points = points,
            color = escape_xml(&config.arc_color),
            sw = fmt(config.arc_width),
            alpha = fmt(config.arc_alpha),
        );
        let _ = write!(
            &mut out,
            r#"<g class="arrowhead" stroke="{color}" stroke-width="{sw}" opacity="{alpha}">"#,
            color = escape_xml(&config.arc_color),
            sw = fmt(config.head_line_width),
            alpha = fmt(config.head_alpha),
        );
        write_arrow_head(&mut out, &arc.head);
        out.push_str("</g>");
    }
    out.push_str("</g>");

    let _ = write!(
        &mut out,
        r#"<rect class="frame" x="0" y="0" width="{w}" height="{h}" fill="none" stroke="black" stroke-width="{sw}"/>"#,
        w = fmt(w),
        h = fmt(h),
        sw = fmt(config.frame_width),
    );
    out.push_str("</svg>\n");
    out
}
