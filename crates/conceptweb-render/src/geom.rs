use crate::model::{ArrowHead, LayoutPoint};

/// Head length and half-width of an open arrow, as fractions of the mutation scale.
pub const ARROW_HEAD_LENGTH: f64 = 0.4;
pub const ARROW_HEAD_WIDTH: f64 = 0.2;

pub fn distance(a: LayoutPoint, b: LayoutPoint) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Control point of a quadratic curve bowed by `rad` times the chord length.
///
/// Positive `rad` bends to the right of the travel direction in a y-up space.
pub fn arc3_control(start: LayoutPoint, end: LayoutPoint, rad: f64) -> LayoutPoint {
    let mx = (start.x + end.x) / 2.0;
    let my = (start.y + end.y) / 2.0;
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    LayoutPoint {
        x: mx + rad * dy,
        y: my - rad * dx,
    }
}

/// Point on a quadratic Bézier at `t`.
pub fn quad_point(p0: LayoutPoint, c: LayoutPoint, p1: LayoutPoint, t: f64) -> LayoutPoint {
    let u = 1.0 - t;
    LayoutPoint {
        x: u * u * p0.x + 2.0 * u * t * c.x + t * t * p1.x,
        y: u * u * p0.y + 2.0 * u * t * c.y + t * t * p1.y,
    }
}

/// Barbs of an open arrow head pointing from `prev` to `tip`, in canvas points.
///
/// The tip is pulled back by half the stroke width over the barb angle so that the
/// mitred corner lands on `tip`.
pub fn open_arrow_head(
    prev: LayoutPoint,
    tip: LayoutPoint,
    mutation_scale: f64,
    line_width: f64,
) -> ArrowHead {
    let dx = prev.x - tip.x;
    let dy = prev.y - tip.y;
    let d = dx.hypot(dy);
    if !(d.is_finite() && d > 0.0) {
        return ArrowHead {
            left: tip,
            tip,
            right: tip,
        };
    }

    let head_length = ARROW_HEAD_LENGTH * mutation_scale;
    let head_width = ARROW_HEAD_WIDTH * mutation_scale;
    let head_dist = head_length.hypot(head_width);
    let (cos_t, sin_t) = (head_length / head_dist, head_width / head_dist);

    let pad = 0.5 * line_width / sin_t;
    let (px, py) = (pad * dx / d, pad * dy / d);
    let (ux, uy) = (dx / d * head_dist, dy / d * head_dist);

    let (dx1, dy1) = (cos_t * ux + sin_t * uy, -sin_t * ux + cos_t * uy);
    let (dx2, dy2) = (cos_t * ux - sin_t * uy, sin_t * ux + cos_t * uy);

    let t = LayoutPoint::new(tip.x + px, tip.y + py);
    ArrowHead {
        left: LayoutPoint::new(t.x + dx1, t.y + dy1),
        tip: t,
        right: LayoutPoint::new(t.x + dx2, t.y + dy2),
    }
}

/// Corners of a `width`×`height` box rotated `deg` counter-clockwise on screen and pinned so
/// that the rotated bounding box's top-right corner sits on `anchor` (canvas, y down).
///
/// Returns the box corners in drawing order and the offset from `anchor` to the box's
/// bottom-right corner (the end of the text baseline).
pub fn rotated_box_top_right(
    anchor: LayoutPoint,
    width: f64,
    height: f64,
    deg: f64,
) -> ([LayoutPoint; 4], LayoutPoint) {
    let (s, c) = deg.to_radians().sin_cos();
    // Unrotated corners relative to bottom-right, y up.
    let local = [(0.0, 0.0), (0.0, height), (-width, height), (-width, 0.0)];
    let rotated: Vec<(f64, f64)> = local
        .iter()
        .map(|(x, y)| (x * c - y * s, x * s + y * c))
        .collect();
    let max_x = rotated.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let max_y = rotated.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    // Shift so (max_x, max_y) lands on the anchor, then flip y for the canvas.
    let to_canvas =
        |(x, y): (f64, f64)| LayoutPoint::new(anchor.x + (x - max_x), anchor.y - (y - max_y));
    let corners = [
        to_canvas(rotated[0]),
        to_canvas(rotated[1]),
        to_canvas(rotated[2]),
        to_canvas(rotated[3]),
    ];
    let baseline_end = corners[0];
    (
        corners,
        LayoutPoint::new(baseline_end.x - anchor.x, baseline_end.y - anchor.y),
    )
}
