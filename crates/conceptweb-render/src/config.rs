//! Layout and styling constants.
//!
//! Every field has a default, so a config file only needs the values it overrides:
//!
//! ```yaml
//! dpi: 150
//! network:
//!   outer_radius: 10.0
//! timeline:
//!   arc_color: "#444444"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub center_size: usize,
    pub inner_size: usize,
    pub middle_size: usize,
    pub center_radius: f64,
    pub inner_radius: f64,
    pub middle_radius: f64,
    pub outer_radius: f64,
    /// Rotates the middle ring by half a step so its members sit between inner ones.
    pub middle_half_step_offset: bool,

    pub bubble_base_radius: f64,
    pub bubble_radius_scale: f64,
    pub bubble_alpha: f64,
    pub bubble_edge_color: String,
    pub bubble_edge_width: f64,
    pub default_fill: String,

    pub arrow_base_width: f64,
    pub arrow_width_scale: f64,
    pub arrow_base_alpha: f64,
    pub arrow_alpha_scale: f64,
    /// `rad` of the arc3 connection: control point offset relative to chord length.
    pub arrow_curvature: f64,
    /// Arrow head size in points per unit of arrow width.
    pub arrow_head_scale: f64,
    pub arrow_color: String,

    pub font_base_size: f64,
    pub font_size_scale: f64,
    pub font_min_size: f64,
    pub font_max_size: f64,
    pub light_text_fills: Vec<String>,
    pub light_text_color: String,
    pub dark_text_color: String,

    /// Data limits are `[-limit, limit]` on both axes.
    pub limit: f64,
    pub canvas_inches: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            center_size: 1,
            inner_size: 6,
            middle_size: 8,
            center_radius: 0.0,
            inner_radius: 3.5,
            middle_radius: 6.5,
            outer_radius: 9.5,
            middle_half_step_offset: true,
            bubble_base_radius: 0.3,
            bubble_radius_scale: 0.8,
            bubble_alpha: 0.85,
            bubble_edge_color: "black".to_string(),
            bubble_edge_width: 1.5,
            default_fill: "#B0B0B0".to_string(),
            arrow_base_width: 1.0,
            arrow_width_scale: 3.0,
            arrow_base_alpha: 0.4,
            arrow_alpha_scale: 0.5,
            arrow_curvature: 0.15,
            arrow_head_scale: 8.0,
            arrow_color: "steelblue".to_string(),
            font_base_size: 7.0,
            font_size_scale: 3.0,
            font_min_size: 8.0,
            font_max_size: 12.0,
            light_text_fills: ["#FF6B6B", "#45B7D1", "#BB8FCE", "#85C1E9"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            light_text_color: "white".to_string(),
            dark_text_color: "black".to_string(),
            limit: 12.0,
            canvas_inches: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Pages added on both sides of the page range.
    pub page_margin: f64,
    pub y_limit: f64,
    pub canvas_width_inches: f64,
    pub canvas_height_inches: f64,

    pub arc_samples: usize,
    pub arc_base_height: f64,
    pub arc_height_per_page: f64,
    pub arc_max_height: f64,
    pub arc_color: String,
    pub arc_alpha: f64,
    pub arc_width: f64,
    pub head_mutation_scale: f64,
    pub head_alpha: f64,
    pub head_line_width: f64,

    pub axis_color: String,
    pub axis_width: f64,
    pub axis_alpha: f64,
    pub frame_width: f64,

    pub chapter_color: String,
    pub chapter_alpha: f64,
    pub chapter_width: f64,
    pub label_y: f64,
    pub label_rotation_deg: f64,
    pub label_font_size: f64,
    pub label_color: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            page_margin: 20.0,
            y_limit: 1.4,
            canvas_width_inches: 24.0,
            canvas_height_inches: 8.0,
            arc_samples: 30,
            arc_base_height: 0.25,
            arc_height_per_page: 1.0 / 500.0,
            arc_max_height: 0.8,
            arc_color: "steelblue".to_string(),
            arc_alpha: 0.3,
            arc_width: 2.0,
            head_mutation_scale: 15.0,
            head_alpha: 0.6,
            head_line_width: 1.0,
            axis_color: "black".to_string(),
            axis_width: 3.0,
            axis_alpha: 0.8,
            frame_width: 0.8,
            chapter_color: "red".to_string(),
            chapter_alpha: 0.7,
            chapter_width: 2.0,
            label_y: -1.25,
            label_rotation_deg: 45.0,
            label_font_size: 14.0,
            label_color: "darkred".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub dpi: f64,
    pub background: String,
    /// Padding around the tight content bounds.
    pub pad_inches: f64,
    pub font_family: String,
    pub network: NetworkConfig,
    pub timeline: TimelineConfig,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            background: "white".to_string(),
            pad_inches: 0.1,
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            network: NetworkConfig::default(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl DiagramConfig {
    /// Loads YAML (`.yaml`/`.yml`) or JSON (anything else) from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        );
        let cfg = if is_yaml {
            Self::from_yaml_str(&text)?
        } else {
            Self::from_json_str(&text)?
        };
        tracing::debug!(path = %path.display(), "loaded diagram config");
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("dpi", self.dpi),
            ("network.limit", self.network.limit),
            ("network.canvas_inches", self.network.canvas_inches),
            ("timeline.y_limit", self.timeline.y_limit),
            (
                "timeline.canvas_width_inches",
                self.timeline.canvas_width_inches,
            ),
            (
                "timeline.canvas_height_inches",
                self.timeline.canvas_height_inches,
            ),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::Config {
                    message: format!("{name} must be a positive number (got {v})"),
                });
            }
        }
        if self.timeline.arc_samples < 2 {
            return Err(Error::Config {
                message: "timeline.arc_samples must be at least 2".to_string(),
            });
        }
        if self.pad_inches < 0.0 {
            return Err(Error::Config {
                message: "pad_inches must not be negative".to_string(),
            });
        }
        Ok(())
    }

    pub fn pad_points(&self) -> f64 {
        self.pad_inches * POINTS_PER_INCH
    }

    /// Raster scale that turns SVG points into pixels at [`Self::dpi`].
    pub fn raster_scale(&self) -> f32 {
        (self.dpi / POINTS_PER_INCH) as f32
    }
}
