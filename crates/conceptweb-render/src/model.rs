use conceptweb_core::RefDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.include(x, y);
        }
        Some(b)
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn union(&mut self, other: &Bounds) {
        self.include(other.min_x, other.min_y);
        self.include(other.max_x, other.max_y);
    }

    pub fn padded(&self, pad: f64) -> Self {
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps data coordinates (y up) onto a canvas measured in points (y down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub width_pt: f64,
    pub height_pt: f64,
}

impl Viewport {
    pub fn scale_x(&self) -> f64 {
        self.width_pt / (self.x_max - self.x_min)
    }

    pub fn scale_y(&self) -> f64 {
        self.height_pt / (self.y_max - self.y_min)
    }

    pub fn to_canvas(&self, p: LayoutPoint) -> LayoutPoint {
        LayoutPoint {
            x: (p.x - self.x_min) * self.scale_x(),
            y: (self.y_max - p.y) * self.scale_y(),
        }
    }

    pub fn canvas_bounds(&self) -> Bounds {
        Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: self.width_pt,
            max_y: self.height_pt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingTier {
    Center,
    Inner,
    Middle,
    Outer,
}

/// Open (`->`) arrow head, in canvas points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowHead {
    pub left: LayoutPoint,
    pub tip: LayoutPoint,
    pub right: LayoutPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingPlacement {
    pub key: String,
    pub rank: usize,
    pub tier: RingTier,
    pub index_in_ring: usize,
    pub ring_size: usize,
    pub angle: f64,
    pub position: LayoutPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNodeLayout {
    pub key: String,
    pub rank: usize,
    pub tier: RingTier,
    pub mentions: u32,
    pub center: LayoutPoint,
    pub radius: f64,
    pub fill: String,
    pub text_color: String,
    pub font_size: f64,
    pub label_lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkArrowLayout {
    pub source: String,
    pub target: String,
    pub strength: u32,
    /// Data space. `start`/`end` sit on the source/target bubble boundaries.
    pub start: LayoutPoint,
    pub control: LayoutPoint,
    pub end: LayoutPoint,
    pub width: f64,
    pub alpha: f64,
    pub mutation_scale: f64,
    pub head: ArrowHead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkLayout {
    pub viewport: Viewport,
    /// Tight content bounds in canvas points, padding included.
    pub bounds: Bounds,
    pub max_mentions: u32,
    pub max_link_strength: Option<u32>,
    pub nodes: Vec<NetworkNodeLayout>,
    pub arrows: Vec<NetworkArrowLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineArcLayout {
    pub from_page: i64,
    pub to_page: i64,
    pub direction: RefDirection,
    /// Signed peak height: positive above the axis, negative below.
    pub height: f64,
    /// Data space samples from `from_page` to `to_page`.
    pub points: Vec<LayoutPoint>,
    pub head: ArrowHead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterMarkerLayout {
    pub page: i64,
    pub title: String,
    /// Canvas point the rotated label's top-right corner is pinned to.
    pub label_anchor: LayoutPoint,
    pub label_width: f64,
    pub label_height: f64,
    pub label_bounds: Bounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub viewport: Viewport,
    pub bounds: Bounds,
    pub min_page: i64,
    pub max_page: i64,
    pub forward_count: usize,
    pub backward_count: usize,
    pub chapters: Vec<ChapterMarkerLayout>,
    pub arcs: Vec<TimelineArcLayout>,
}
