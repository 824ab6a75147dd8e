//! Concentric-ring layout for concept networks.

use crate::config::{NetworkConfig, POINTS_PER_INCH};
use crate::geom::{arc3_control, distance, open_arrow_head, quad_point};
use crate::model::{
    Bounds, LayoutPoint, NetworkArrowLayout, NetworkLayout, NetworkNodeLayout, RingPlacement,
    RingTier, Viewport,
};
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, LayoutOptions, Result};
use conceptweb_core::{Concept, ConceptGraph};
use std::f64::consts::{PI, TAU};

impl RingTier {
    pub fn for_rank(rank: usize, config: &NetworkConfig) -> Self {
        let inner_end = config.center_size + config.inner_size;
        let middle_end = inner_end + config.middle_size;
        if rank < config.center_size {
            Self::Center
        } else if rank < inner_end {
            Self::Inner
        } else if rank < middle_end {
            Self::Middle
        } else {
            Self::Outer
        }
    }

    pub fn radius(self, config: &NetworkConfig) -> f64 {
        match self {
            Self::Center => config.center_radius,
            Self::Inner => config.inner_radius,
            Self::Middle => config.middle_radius,
            Self::Outer => config.outer_radius,
        }
    }

    fn angle_offset(self, ring_size: usize, config: &NetworkConfig) -> f64 {
        match self {
            Self::Middle if config.middle_half_step_offset => PI / ring_size as f64,
            _ => 0.0,
        }
    }
}

/// Concepts by mention count, highest first. Ties keep insertion order.
pub fn rank_concepts(graph: &ConceptGraph) -> Vec<&Concept> {
    let mut ranked: Vec<&Concept> = graph.concepts().collect();
    ranked.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    ranked
}

pub fn ring_positions(graph: &ConceptGraph, config: &NetworkConfig) -> Vec<RingPlacement> {
    let ranked = rank_concepts(graph);
    let tiers: Vec<RingTier> = (0..ranked.len())
        .map(|rank| RingTier::for_rank(rank, config))
        .collect();

    let mut out = Vec::with_capacity(ranked.len());
    for tier in [
        RingTier::Center,
        RingTier::Inner,
        RingTier::Middle,
        RingTier::Outer,
    ] {
        let members: Vec<usize> = (0..ranked.len()).filter(|&r| tiers[r] == tier).collect();
        if members.is_empty() {
            continue;
        }
        let n = members.len();
        let radius = tier.radius(config);
        let offset = tier.angle_offset(n, config);
        for (i, &rank) in members.iter().enumerate() {
            let angle = offset + TAU * i as f64 / n as f64;
            out.push(RingPlacement {
                key: ranked[rank].key.clone(),
                rank,
                tier,
                index_in_ring: i,
                ring_size: n,
                angle,
                position: LayoutPoint::new(radius * angle.cos(), radius * angle.sin()),
            });
        }
    }
    out
}

pub fn bubble_radius(mentions: u32, max_mentions: u32, config: &NetworkConfig) -> f64 {
    config.bubble_base_radius + config.bubble_radius_scale * ratio(mentions, max_mentions)
}

pub fn font_size(mentions: u32, max_mentions: u32, config: &NetworkConfig) -> f64 {
    let size = config.font_base_size + config.font_size_scale * ratio(mentions, max_mentions);
    size.min(config.font_max_size).max(config.font_min_size)
}

pub fn arrow_width(strength: u32, max_strength: u32, config: &NetworkConfig) -> f64 {
    config.arrow_base_width + config.arrow_width_scale * ratio(strength, max_strength)
}

pub fn arrow_alpha(strength: u32, max_strength: u32, config: &NetworkConfig) -> f64 {
    config.arrow_base_alpha + config.arrow_alpha_scale * ratio(strength, max_strength)
}

pub fn text_color<'a>(fill: &str, config: &'a NetworkConfig) -> &'a str {
    let light = config
        .light_text_fills
        .iter()
        .any(|f| f.eq_ignore_ascii_case(fill));
    if light {
        &config.light_text_color
    } else {
        &config.dark_text_color
    }
}

fn ratio(value: u32, max: u32) -> f64 {
    f64::from(value) / f64::from(max)
}

pub fn network_viewport(config: &NetworkConfig) -> Viewport {
    let side = config.canvas_inches * POINTS_PER_INCH;
    Viewport {
        x_min: -config.limit,
        x_max: config.limit,
        y_min: -config.limit,
        y_max: config.limit,
        width_pt: side,
        height_pt: side,
    }
}

pub fn layout_network(graph: &ConceptGraph, options: &LayoutOptions) -> Result<NetworkLayout> {
    let config = &options.config.network;
    if graph.is_empty() {
        return Err(Error::EmptyDataset { what: "concepts" });
    }
    let max_mentions = graph.max_mentions().unwrap_or(0);
    if max_mentions == 0 {
        return Err(Error::ZeroScale {
            what: "concept mention count",
        });
    }
    let max_link_strength = graph.max_link_strength();
    if max_link_strength == Some(0) {
        return Err(Error::ZeroScale {
            what: "link strength",
        });
    }

    let viewport = network_viewport(config);
    let placements = ring_positions(graph, config);

    let mut nodes: Vec<NetworkNodeLayout> = Vec::with_capacity(placements.len());
    for p in &placements {
        let Some(concept) = graph.concept(&p.key) else {
            continue;
        };
        let fill = concept
            .color
            .clone()
            .unwrap_or_else(|| config.default_fill.clone());
        nodes.push(NetworkNodeLayout {
            key: p.key.clone(),
            rank: p.rank,
            tier: p.tier,
            mentions: concept.mentions,
            center: p.position,
            radius: bubble_radius(concept.mentions, max_mentions, config),
            text_color: text_color(&fill, config).to_string(),
            fill,
            font_size: font_size(concept.mentions, max_mentions, config),
            label_lines: concept.display_name().lines().map(str::to_string).collect(),
        });
    }

    let node_by_key = |key: &str| nodes.iter().find(|n| n.key == key);
    let mut arrows = Vec::new();
    if let Some(max_strength) = max_link_strength {
        for link in graph.links() {
            let (Some(from), Some(to)) = (node_by_key(&link.source), node_by_key(&link.target))
            else {
                continue;
            };
            let d = distance(from.center, to.center);
            if d <= 0.0 {
                tracing::debug!(
                    source = %link.source,
                    target = %link.target,
                    "skipping arrow between coincident bubbles"
                );
                continue;
            }
            let ux = (to.center.x - from.center.x) / d;
            let uy = (to.center.y - from.center.y) / d;
            let start = LayoutPoint::new(
                from.center.x + ux * from.radius,
                from.center.y + uy * from.radius,
            );
            let end = LayoutPoint::new(to.center.x - ux * to.radius, to.center.y - uy * to.radius);
            let control = arc3_control(start, end, config.arrow_curvature);

            let width = arrow_width(link.strength, max_strength, config);
            let mutation_scale = width * config.arrow_head_scale;
            let head = open_arrow_head(
                viewport.to_canvas(control),
                viewport.to_canvas(end),
                mutation_scale,
                width,
            );

            arrows.push(NetworkArrowLayout {
                source: link.source,
                target: link.target,
                strength: link.strength,
                start,
                control,
                end,
                width,
                alpha: arrow_alpha(link.strength, max_strength, config),
                mutation_scale,
                head,
            });
        }
    }

    let bounds = network_bounds(
        &viewport,
        &nodes,
        &arrows,
        options.text_measurer.as_ref(),
        options.config.pad_points(),
    );

    tracing::debug!(
        nodes = nodes.len(),
        arrows = arrows.len(),
        max_mentions,
        "laid out concept network"
    );

    Ok(NetworkLayout {
        viewport,
        bounds,
        max_mentions,
        max_link_strength,
        nodes,
        arrows,
    })
}

fn network_bounds(
    viewport: &Viewport,
    nodes: &[NetworkNodeLayout],
    arrows: &[NetworkArrowLayout],
    measurer: &dyn TextMeasurer,
    pad: f64,
) -> Bounds {
    let mut pts: Vec<(f64, f64)> = Vec::new();
    let sx = viewport.scale_x();
    for n in nodes {
        let c = viewport.to_canvas(n.center);
        let r = n.radius * sx;
        pts.push((c.x - r, c.y - r));
        pts.push((c.x + r, c.y + r));

        let metrics = measurer.measure(&n.label_lines.join("\n"), &TextStyle::bold(n.font_size));
        pts.push((c.x - metrics.width / 2.0, c.y - metrics.height / 2.0));
        pts.push((c.x + metrics.width / 2.0, c.y + metrics.height / 2.0));
    }
    for a in arrows {
        for i in 0..=8 {
            let p = quad_point(a.start, a.control, a.end, i as f64 / 8.0);
            let p = viewport.to_canvas(p);
            pts.push((p.x, p.y));
        }
        for p in [a.head.left, a.head.tip, a.head.right] {
            pts.push((p.x, p.y));
        }
    }
    Bounds::from_points(pts)
        .unwrap_or_else(|| viewport.canvas_bounds())
        .padded(pad)
}
