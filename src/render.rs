use std::f64::consts::PI;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coords::CubeCoord;
use crate::error::{GridError, Result};
use crate::grid::HexGrid;

/// Offset, in hex sizes, added to both pixel axes by [`hex_to_pixel`].
pub const CENTER_OFFSET_HEXES: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Flat,
    Pointy,
}

impl Orientation {
    fn corner_angle_deg(self, i: usize) -> f64 {
        match self {
            Orientation::Flat => 60.0 * i as f64,
            Orientation::Pointy => 60.0 * i as f64 - 30.0,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Flat => f.write_str("flat"),
            Orientation::Pointy => f.write_str("pointy"),
        }
    }
}

impl FromStr for Orientation {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flat" => Ok(Orientation::Flat),
            "pointy" => Ok(Orientation::Pointy),
            other => Err(GridError::InvalidOrientation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Center-to-corner distance in pixels.
    pub size: f64,
    pub orientation: Orientation,
    pub background: [u8; 4],
    pub foreground: [u8; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            orientation: Orientation::Flat,
            background: [0, 0, 0, 255],
            foreground: [255, 255, 255, 255],
        }
    }
}

/// Pixel position of a cell center, shifted by `size * CENTER_OFFSET_HEXES`.
pub fn hex_to_pixel(c: CubeCoord, size: f64, orientation: Orientation) -> Point2 {
    let x = f64::from(c.x());
    let y = f64::from(c.y());
    let sqrt3 = 3f64.sqrt();
    let (px, py) = match orientation {
        Orientation::Flat => (size * 1.5 * x, size * sqrt3 * (y + x / 2.0)),
        Orientation::Pointy => (size * sqrt3 * (x + y / 2.0), size * 1.5 * y),
    };
    let offset = size * CENTER_OFFSET_HEXES;
    Point2::new(px + offset, py + offset)
}

/// Corner `i` (0..6) of a flat-top hex, at `60° * i` from its center.
pub fn hex_corner(center: Point2, size: f64, i: usize) -> Point2 {
    oriented_corner(center, size, i, Orientation::Flat)
}

pub fn oriented_corner(center: Point2, size: f64, i: usize, orientation: Orientation) -> Point2 {
    let theta = orientation.corner_angle_deg(i) * PI / 180.0;
    Point2::new(center.x + size * theta.cos(), center.y + size * theta.sin())
}

/// Both endpoints inclusive; off-image pixels are skipped.
pub fn draw_line(img: &mut RgbaImage, from: (i32, i32), to: (i32, i32), color: Rgba<u8>) {
    let (mut x0, mut y0) = from;
    let (x1, y1) = to;
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_clipped(img, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn put_clipped(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, color);
    }
}

/// Outlines only. The image covers the projected centers plus one hex size
/// of margin.
pub fn draw_grid(grid: &HexGrid, config: &RenderConfig) -> Result<RgbaImage> {
    let size = config.size;
    if !size.is_finite() || size <= 0.0 {
        return Err(GridError::InvalidHexSize(size));
    }

    let centers: Vec<Point2> = grid
        .coords()
        .into_iter()
        .map(|c| hex_to_pixel(c, size, config.orientation))
        .collect();

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in &centers {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let margin = size;
    let width = (max_x - min_x + 2.0 * margin).ceil() as u32 + 1;
    let height = (max_y - min_y + 2.0 * margin).ceil() as u32 + 1;
    debug!(cells = centers.len(), width, height, "rendering hex outlines");

    let mut img = RgbaImage::from_pixel(width, height, Rgba(config.background));
    let fg = Rgba(config.foreground);
    for p in centers {
        let local = Point2::new(p.x - min_x + margin, p.y - min_y + margin);
        let corners: Vec<(i32, i32)> = (0..6)
            .map(|i| {
                let c = oriented_corner(local, size, i, config.orientation);
                (c.x.round() as i32, c.y.round() as i32)
            })
            .collect();
        for i in 0..6 {
            draw_line(&mut img, corners[i], corners[(i + 1) % 6], fg);
        }
    }
    Ok(img)
}

pub fn render_to_png(
    grid: &HexGrid,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> Result<()> {
    let img = draw_grid(grid, config)?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
