use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 10.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn bold(font_size: f64) -> Self {
        Self {
            font_family: None,
            font_size,
            font_weight: Some("bold".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Measures text in points for bounds computation.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Width-table-free measurer: every display column is `char_width_factor` ems wide.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub const DEFAULT_CHAR_WIDTH_FACTOR: f64 = 0.6;
    pub const DEFAULT_LINE_HEIGHT_FACTOR: f64 = 1.2;

    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        let out: Vec<&str> = text.split('\n').collect();
        if out.is_empty() { vec![""] } else { out }
    }

    pub fn line_height(&self, font_size: f64) -> f64 {
        let factor = if self.line_height_factor == 0.0 {
            Self::DEFAULT_LINE_HEIGHT_FACTOR
        } else {
            self.line_height_factor
        };
        font_size * factor
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let mut char_width_factor = if self.char_width_factor == 0.0 {
            Self::DEFAULT_CHAR_WIDTH_FACTOR
        } else {
            self.char_width_factor
        };
        if style.font_weight.as_deref() == Some("bold") {
            char_width_factor *= 1.1;
        }

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * self.line_height(font_size),
            line_count: lines.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_widest_line() {
        let m = DeterministicTextMeasurer::default();
        let metrics = m.measure("time\nseries\nanalysis", &TextStyle::default());
        assert_eq!(metrics.line_count, 3);
        assert!((metrics.width - 8.0 * 10.0 * 0.6).abs() < 1e-9);
        assert!((metrics.height - 3.0 * 12.0).abs() < 1e-9);
    }

    #[test]
    fn bold_text_is_wider() {
        let m = DeterministicTextMeasurer::default();
        let regular = m.measure("Entropies", &TextStyle::default());
        let bold = m.measure("Entropies", &TextStyle::bold(10.0));
        assert!(bold.width > regular.width);
    }
}
