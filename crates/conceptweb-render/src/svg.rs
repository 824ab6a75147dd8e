//! SVG emission. The canvas unit is the point, so the root `viewBox` doubles as the page size
//! for PDF export and `dpi / 72` is the raster scale.

mod network;
mod timeline;

use crate::config::{NetworkConfig, TimelineConfig};
use crate::model::{ArrowHead, Bounds, NetworkLayout, TimelineLayout};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; also prefixes internal ids such as clip paths.
    pub diagram_id: Option<String>,
    /// Fill behind the diagram. `None` leaves the canvas transparent.
    pub background: Option<String>,
    pub font_family: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            background: Some("white".to_string()),
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
        }
    }
}

pub fn render_network_svg(
    layout: &NetworkLayout,
    config: &NetworkConfig,
    options: &SvgRenderOptions,
) -> String {
    network::render_network_svg(layout, config, options)
}

pub fn render_timeline_svg(
    layout: &TimelineLayout,
    config: &TimelineConfig,
    options: &SvgRenderOptions,
) -> String {
    timeline::render_timeline_svg(layout, config, options)
}

fn open_svg(out: &mut String, id: &str, bounds: &Bounds, options: &SvgRenderOptions) {
    let w = bounds.width().max(1.0);
    let h = bounds.height().max(1.0);
    let _ = write!(
        out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}" font-family="{font}">"#,
        id = escape_xml(id),
        w = fmt(w),
        h = fmt(h),
        x = fmt(bounds.min_x),
        y = fmt(bounds.min_y),
        font = escape_xml(&options.font_family),
    );
    if let Some(bg) = options.background.as_deref() {
        let _ = write!(
            out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{bg}"/>"#,
            x = fmt(bounds.min_x),
            y = fmt(bounds.min_y),
            w = fmt(w),
            h = fmt(h),
            bg = escape_xml(bg),
        );
    }
}

fn write_arrow_head(out: &mut String, head: &ArrowHead) {
    let _ = write!(
        out,
        r#"<path d="M{lx},{ly}L{tx},{ty}L{rx},{ry}" fill="none" stroke-linejoin="miter"/>"#,
        lx = fmt(head.left.x),
        ly = fmt(head.left.y),
        tx = fmt(head.tip.x),
        ty = fmt(head.tip.y),
        rx = fmt(head.right.x),
        ry = fmt(head.right.y),
    );
}

fn fmt(v: f64) -> String {
    // Three decimals is well below a pixel at any sane DPI; also avoids `-0`.
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", (v * 1000.0).round() / 1000.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_trailing_zeros_and_negative_zero() {
        assert_eq!(fmt(1.5), "1.5");
        assert_eq!(fmt(2.0), "2");
        assert_eq!(fmt(-0.0001), "0");
        assert_eq!(fmt(1.23456), "1.235");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn escape_xml_handles_markup() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &#39;c&#39;");
    }
}
