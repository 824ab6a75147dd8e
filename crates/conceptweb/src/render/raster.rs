#![forbid(unsafe_code)]

use crate::render::{DiagramConfig, LayoutOptions, RenderError, SvgRenderOptions};
use conceptweb_core::NetworkVariant;

/// SVG canvases are laid out in points.
const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color for JPG rendering")]
    JpegBackground,
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Pixels per SVG point.
    pub scale: f32,
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self::for_dpi(300.0)
    }
}

impl RasterOptions {
    pub fn for_dpi(dpi: f64) -> Self {
        Self {
            scale: dpi as f32 / POINTS_PER_INCH,
            background: Some("white".to_string()),
            jpeg_quality: 90,
        }
    }

    pub fn for_config(config: &DiagramConfig) -> Self {
        let background = crate::render::svg_options_for(config).background;
        Self {
            background,
            ..Self::for_dpi(config.dpi)
        }
    }
}

pub fn render_network_png(
    variant: NetworkVariant,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_variant_svg(variant, layout_options, svg_options)?;
    svg_to_png(&svg, raster)
}

pub fn render_network_pdf(
    variant: NetworkVariant,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_variant_svg(variant, layout_options, svg_options)?;
    svg_to_pdf(&svg)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let Some(color) = parse_tiny_skia_color(bg) else {
        return Err(RasterError::JpegBackground);
    };
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // Opaque fill underneath, so alpha is always 255.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

/// Vector PDF; the page size is the SVG's width/height in points.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

fn usvg_options() -> usvg::Options<'static> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    // Labels ask for DejaVu Sans first; this only kicks in when none of the stack is installed.
    opt.font_family = "Arial".to_string();
    opt
}

fn parse_svg_viewbox(svg: &str) -> Option<(f32, f32)> {
    // Root viewBox only: `viewBox="minX minY w h"`.
    let i = svg.find("viewBox=\"")?;
    let rest = &svg[i + "viewBox=\"".len()..];
    let end = rest.find('"')?;
    let mut it = rest[..end].split_whitespace();
    let _min_x = it.next()?.parse::<f32>().ok()?;
    let _min_y = it.next()?.parse::<f32>().ok()?;
    let width = it.next()?.parse::<f32>().ok()?;
    let height = it.next()?.parse::<f32>().ok()?;
    (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        .then_some((width, height))
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let tree = usvg::Tree::from_str(svg, &usvg_options()).map_err(|_| RasterError::SvgParse)?;

    // usvg already maps the viewBox origin to (0,0), so only the size matters here.
    let (width, height) = parse_svg_viewbox(svg).unwrap_or_else(|| {
        let size = tree.size();
        (size.width(), size.height())
    });

    let width_px = (width * scale).ceil().max(1.0) as u32;
    let height_px = (height * scale).ceil().max(1.0) as u32;
    tracing::debug!(width_px, height_px, scale, "rasterizing SVG");

    let Some(mut pixmap) = tiny_skia::Pixmap::new(width_px, height_px) else {
        return Err(RasterError::PixmapAlloc {
            width: width_px,
            height: height_px,
        });
    };

    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    if s == "none" {
        return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0));
    }
    let Some(hex) = s.strip_prefix('#') else {
        // CSS keywords (`lightgray`, `transparent`) and `rgb(...)`.
        let c = s.parse::<svgtypes::Color>().ok()?;
        return Some(tiny_skia::Color::from_rgba8(c.red, c.green, c.blue, c.alpha));
    };
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let b = hex.as_bytes();
    let [r, g, bl, a] = match b.len() {
        3 => [hex1(b[0])?, hex1(b[1])?, hex1(b[2])?, 255],
        4 => [hex1(b[0])?, hex1(b[1])?, hex1(b[2])?, hex1(b[3])?],
        6 => [hex2(&b[0..2])?, hex2(&b[2..4])?, hex2(&b[4..6])?, 255],
        8 => [
            hex2(&b[0..2])?,
            hex2(&b[2..4])?,
            hex2(&b[4..6])?,
            hex2(&b[6..8])?,
        ],
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, bl, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="72" height="36" viewBox="-10 -10 72 36"><rect x="-10" y="-10" width="72" height="36" fill="black"/></svg>"#;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let bytes = svg_to_png(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn svg_to_pdf_produces_pdf_signature() {
        let bytes = svg_to_pdf(SQUARE).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn svg_to_jpeg_produces_jpeg_signature() {
        let bytes = svg_to_jpeg(SQUARE, &RasterOptions::for_dpi(72.0)).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn pixmap_size_follows_dpi() {
        let pixmap = svg_to_pixmap(SQUARE, RasterOptions::for_dpi(144.0).scale, None).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (144, 72));
    }

    #[test]
    fn jpeg_rejects_translucent_background() {
        let opts = RasterOptions {
            background: Some("#ffffff80".to_string()),
            ..RasterOptions::for_dpi(72.0)
        };
        assert!(matches!(
            svg_to_jpeg(SQUARE, &opts),
            Err(RasterError::JpegOpaqueBackgroundRequired)
        ));
    }

    #[test]
    fn colors_parse_in_short_and_long_hex() {
        let c = parse_tiny_skia_color("#f00").unwrap();
        assert_eq!(c.to_color_u8().red(), 255);
        let c = parse_tiny_skia_color(" #00FF0080 ").unwrap();
        assert_eq!(c.to_color_u8().alpha(), 128);
        assert!(parse_tiny_skia_color("#12345").is_none());
    }

    #[test]
    fn named_colors_parse_as_css_keywords() {
        let c = parse_tiny_skia_color("LightGray").unwrap().to_color_u8();
        assert_eq!([c.red(), c.green(), c.blue()], [211; 3]);
        assert_eq!(c.alpha(), 255);
        let c = parse_tiny_skia_color("transparent").unwrap();
        assert_eq!(c.to_color_u8().alpha(), 0);
        assert!(parse_tiny_skia_color("not-a-color").is_none());
    }

    #[test]
    fn jpeg_accepts_named_background() {
        let opts = RasterOptions {
            background: Some("lightgray".to_string()),
            ..RasterOptions::for_dpi(72.0)
        };
        let bytes = svg_to_jpeg(SQUARE, &opts).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn network_png_renders_end_to_end() {
        let bytes = render_network_png(
            NetworkVariant::Final,
            &LayoutOptions::default(),
            &SvgRenderOptions::default(),
            &RasterOptions::for_dpi(10.0),
        )
        .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
