use super::{SvgRenderOptions, escape_xml, fmt, open_svg, write_arrow_head};
use crate::config::NetworkConfig;
use crate::model::NetworkLayout;
use std::fmt::Write as _;

pub(super) fn render_network_svg(
    layout: &NetworkLayout,
    config: &NetworkConfig,
    options: &SvgRenderOptions,
) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("concept-network");
    let vp = &layout.viewport;
    let scale = vp.scale_x();

    let mut out = String::new();
    open_svg(&mut out, diagram_id, &layout.bounds, options);

    // Links go underneath the bubbles.
    out.push_str(r#"<g class="links">"#);
    for a in &layout.arrows {
        let s = vp.to_canvas(a.start);
        let c = vp.to_canvas(a.control);
        let e = vp.to_canvas(a.end);
        let _ = write!(
            &mut out,
            r#"<g class="link" data-source="{src}" data-target="{dst}" opacity="{alpha}" stroke="{color}" stroke-width="{w}">"#,
            src = escape_xml(&a.source),
            dst = escape_xml(&a.target),
            alpha = fmt(a.alpha),
            color = escape_xml(&config.arrow_color),
            w = fmt(a.width),
        );
        let _ = write!(
            &mut out,
            r#"<path d="M{sx},{sy}Q{cx},{cy} {ex},{ey}" fill="none" stroke-linecap="round"/>"#,
            sx = fmt(s.x),
            sy = fmt(s.y),
            cx = fmt(c.x),
            cy = fmt(c.y),
            ex = fmt(e.x),
            ey = fmt(e.y),
        );
        write_arrow_head(&mut out, &a.head);
        out.push_str("</g>");
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for n in &layout.nodes {
        let c = vp.to_canvas(n.center);
        let _ = write!(
            &mut out,
            r#"<circle class="concept" data-key="{key}" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{edge}" stroke-width="{ew}" opacity="{alpha}"/>"#,
            key = escape_xml(&n.key),
            cx = fmt(c.x),
            cy = fmt(c.y),
            r = fmt(n.radius * scale),
            fill = escape_xml(&n.fill),
            edge = escape_xml(&config.bubble_edge_color),
            ew = fmt(config.bubble_edge_width),
            alpha = fmt(config.bubble_alpha),
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="labels">"#);
    for n in &layout.nodes {
        let c = vp.to_canvas(n.center);
        let line_height = n.font_size * 1.2;
        let count = n.label_lines.len() as f64;
        let _ = write!(
            &mut out,
            r#"<text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="central" font-size="{size}" font-weight="bold" fill="{color}">"#,
            x = fmt(c.x),
            y = fmt(c.y),
            size = fmt(n.font_size),
            color = escape_xml(&n.text_color),
        );
        for (i, line) in n.label_lines.iter().enumerate() {
            let y = c.y + i as f64 * line_height - line_height * (count - 1.0) / 2.0;
            let _ = write!(
                &mut out,
                r#"<tspan x="{x}" y="{y}">{text}</tspan>"#,
                x = fmt(c.x),
                y = fmt(y),
                text = escape_xml(line),
            );
        }
        out.push_str("</text>");
    }
    out.push_str("</g></svg>\n");
    out
}
