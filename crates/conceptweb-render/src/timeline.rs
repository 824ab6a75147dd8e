//! Cross-reference timeline: parabolic arcs over a page axis.

use crate::config::{POINTS_PER_INCH, TimelineConfig};
use crate::geom::{open_arrow_head, rotated_box_top_right};
use crate::model::{
    Bounds, ChapterMarkerLayout, LayoutPoint, TimelineArcLayout, TimelineLayout, Viewport,
};
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, LayoutOptions, Result};
use conceptweb_core::{Chapter, CrossReference, RefDirection};

/// Peak height of the arc for a reference spanning `span` pages.
pub fn arc_height(span: u64, config: &TimelineConfig) -> f64 {
    (config.arc_base_height + span as f64 * config.arc_height_per_page)
        .min(config.arc_max_height)
}

/// `samples` points from `from_page` to `to_page` on `y = h·4t(1−t)`, mirrored below the
/// axis for backward references.
pub fn arc_points(
    xref: &CrossReference,
    samples: usize,
    config: &TimelineConfig,
) -> Vec<LayoutPoint> {
    let from = xref.from_page as f64;
    let to = xref.to_page as f64;
    let sign = match xref.direction() {
        RefDirection::Forward => 1.0,
        RefDirection::Backward => -1.0,
    };
    let h = arc_height(xref.span(), config);
    let steps = samples.max(2) - 1;

    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let x = from + (to - from) * t;
            LayoutPoint::new(x, sign * h * 4.0 * t * (1.0 - t))
        })
        .collect()
}

/// First and last page shown: chapters plus reference origins and destinations.
pub fn page_range(refs: &[CrossReference], chapters: &[Chapter]) -> Option<(i64, i64)> {
    let min = chapters
        .iter()
        .map(|c| c.page)
        .chain(refs.iter().map(|r| r.from_page))
        .min()?;
    let max = chapters
        .iter()
        .map(|c| c.page)
        .chain(refs.iter().map(|r| r.to_page))
        .max()?;
    Some((min, max))
}

pub fn timeline_viewport(min_page: i64, max_page: i64, config: &TimelineConfig) -> Viewport {
    Viewport {
        x_min: min_page as f64 - config.page_margin,
        x_max: max_page as f64 + config.page_margin,
        y_min: -config.y_limit,
        y_max: config.y_limit,
        width_pt: config.canvas_width_inches * POINTS_PER_INCH,
        height_pt: config.canvas_height_inches * POINTS_PER_INCH,
    }
}

pub fn layout_timeline(
    refs: &[CrossReference],
    chapters: &[Chapter],
    options: &LayoutOptions,
) -> Result<TimelineLayout> {
    let config = &options.config.timeline;
    let Some((min_page, max_page)) = page_range(refs, chapters) else {
        return Err(Error::EmptyDataset {
            what: "chapters and cross-references",
        });
    };
    let viewport = timeline_viewport(min_page, max_page, config);

    let (forward, backward): (Vec<&CrossReference>, Vec<&CrossReference>) =
        conceptweb_core::partition_by_direction(refs);

    let mut arcs = Vec::with_capacity(refs.len());
    for xref in forward.iter().chain(backward.iter()) {
        if xref.from_page == xref.to_page {
            continue;
        }
        let points = arc_points(xref, config.arc_samples, config);
        let n = points.len();
        let head = open_arrow_head(
            viewport.to_canvas(points[n - 2]),
            viewport.to_canvas(points[n - 1]),
            config.head_mutation_scale,
            config.head_line_width,
        );
        let sign = match xref.direction() {
            RefDirection::Forward => 1.0,
            RefDirection::Backward => -1.0,
        };
        arcs.push(TimelineArcLayout {
            from_page: xref.from_page,
            to_page: xref.to_page,
            direction: xref.direction(),
            height: sign * arc_height(xref.span(), config),
            points,
            head,
        });
    }

    let measurer = options.text_measurer.as_ref();
    let chapter_markers: Vec<ChapterMarkerLayout> = chapters
        .iter()
        .map(|c| chapter_marker(c, &viewport, config, measurer))
        .collect();

    let mut bounds = viewport.canvas_bounds();
    for m in &chapter_markers {
        bounds.union(&m.label_bounds);
    }
    let bounds = bounds.padded(options.config.pad_points());

    tracing::debug!(
        min_page,
        max_page,
        forward = forward.len(),
        backward = backward.len(),
        "laid out cross-reference timeline"
    );

    Ok(TimelineLayout {
        viewport,
        bounds,
        min_page,
        max_page,
        forward_count: forward.len(),
        backward_count: backward.len(),
        chapters: chapter_markers,
        arcs,
    })
}

fn chapter_marker(
    chapter: &Chapter,
    viewport: &Viewport,
    config: &TimelineConfig,
    measurer: &dyn TextMeasurer,
) -> ChapterMarkerLayout {
    let anchor = viewport.to_canvas(LayoutPoint::new(chapter.page as f64, config.label_y));
    let metrics = measurer.measure(&chapter.title, &TextStyle::bold(config.label_font_size));
    let (corners, _) = rotated_box_top_right(
        anchor,
        metrics.width,
        metrics.height,
        config.label_rotation_deg,
    );
    let label_bounds = Bounds::from_points(corners.iter().map(|p| (p.x, p.y)))
        .unwrap_or(Bounds {
            min_x: anchor.x,
            min_y: anchor.y,
            max_x: anchor.x,
            max_y: anchor.y,
        });
    ChapterMarkerLayout {
        page: chapter.page,
        title: chapter.title.clone(),
        label_anchor: anchor,
        label_width: metrics.width,
        label_height: metrics.height,
        label_bounds,
    }
}
