#![forbid(unsafe_code)]

//! `conceptweb` draws two kinds of diagram for a textbook's reading guide: a ring-shaped concept
//! network sized by mention counts, and a page-axis timeline of cross-references between
//! sections.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`conceptweb::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use conceptweb_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use conceptweb_render::config::{DiagramConfig, NetworkConfig, TimelineConfig};
    pub use conceptweb_render::model::{NetworkLayout, TimelineLayout};
    pub use conceptweb_render::svg::SvgRenderOptions;
    pub use conceptweb_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use conceptweb_render::{LayoutOptions, layout_network, layout_timeline};

    use conceptweb_core::{Chapter, ConceptGraph, CrossReference, NetworkVariant};
    use std::path::Path;

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum RenderError {
        #[error(transparent)]
        Data(#[from] conceptweb_core::Error),
        #[error(transparent)]
        Render(#[from] conceptweb_render::Error),
    }

    pub type Result<T> = std::result::Result<T, RenderError>;

    /// SVG options that follow a diagram config: its background and font stack.
    ///
    /// A background of `none` or `transparent` leaves the canvas unfilled.
    pub fn svg_options_for(config: &DiagramConfig) -> SvgRenderOptions {
        let bg = config.background.trim();
        let background = match bg.to_ascii_lowercase().as_str() {
            "" | "none" | "transparent" => None,
            _ => Some(bg.to_string()),
        };
        SvgRenderOptions {
            diagram_id: None,
            background,
            font_family: config.font_family.clone(),
        }
    }

    pub fn render_network_svg(
        graph: &ConceptGraph,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_network(graph, layout_options)?;
        Ok(conceptweb_render::svg::render_network_svg(
            &layout,
            &layout_options.config.network,
            svg_options,
        ))
    }

    /// Builds the chosen built-in network and renders it.
    pub fn render_variant_svg(
        variant: NetworkVariant,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let graph = conceptweb_core::build_network(variant);
        render_network_svg(&graph, layout_options, svg_options)
    }

    pub fn render_timeline_svg(
        references: &[CrossReference],
        chapters: &[Chapter],
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_timeline(references, chapters, layout_options)?;
        Ok(conceptweb_render::svg::render_timeline_svg(
            &layout,
            &layout_options.config.timeline,
            svg_options,
        ))
    }

    /// Loads a cross-reference CSV and renders it against the built-in chapter list.
    pub fn render_timeline_svg_from_csv(
        path: impl AsRef<Path>,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let references = conceptweb_core::load_cross_references(path)?;
        render_timeline_svg(
            &references,
            &conceptweb_core::main_chapters(),
            layout_options,
            svg_options,
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn variant_svg_is_well_formed() {
            let svg = render_variant_svg(
                NetworkVariant::Enhanced,
                &LayoutOptions::default(),
                &SvgRenderOptions::default(),
            )
            .unwrap();
            let doc = roxmltree::Document::parse(&svg).unwrap();
            let circles = doc
                .descendants()
                .filter(|n| n.has_tag_name("circle"))
                .count();
            assert_eq!(circles, conceptweb_core::dataset::enhanced_concepts().len());
        }

        #[test]
        fn transparent_background_drops_the_rect() {
            let config = DiagramConfig {
                background: "Transparent".to_string(),
                ..Default::default()
            };
            assert_eq!(svg_options_for(&config).background, None);
            let defaults = svg_options_for(&DiagramConfig::default());
            assert_eq!(defaults.background.as_deref(), Some("white"));
        }

        #[test]
        fn missing_csv_surfaces_the_data_error() {
            let err = render_timeline_svg_from_csv(
                "does/not/exist.csv",
                &LayoutOptions::default(),
                &SvgRenderOptions::default(),
            )
            .unwrap_err();
            assert!(matches!(err, RenderError::Data(_)));
        }
    }
}
