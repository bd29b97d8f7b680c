//! Geometry primitives: points, four-corner polygons, rectangles and the
//! page image descriptor.
//!
//! Coordinates are integer pixels. Nothing here validates geometry: a
//! degenerate rectangle simply yields a degenerate polygon.

use crate::error::PageXmlError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Pixel dimensions of the page image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
}

impl ImageDescriptor {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Read the dimensions of an image file without decoding its pixels.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PageXmlError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PageXmlError::ImageNotFound {
                path: path.to_path_buf(),
            });
        }

        let (width, height) =
            image::image_dimensions(path).map_err(|e| PageXmlError::ImageUnreadable {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        debug!("{}: {}x{} px", path.display(), width, height);
        Ok(Self { width, height })
    }
}

/// An integer point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Build a point from fractional coordinates, truncating toward zero.
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x.trunc() as i64,
            y: y.trunc() as i64,
        }
    }
}

/// Four corners in clockwise order: top-left, top-right, bottom-right,
/// bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polygon(pub [Point; 4]);

impl Polygon {
    /// Corners of the page rectangle inset by one pixel on every side.
    pub fn page_inset(image: ImageDescriptor) -> Self {
        let right = i64::from(image.width) - 2;
        let bottom = i64::from(image.height) - 2;
        Polygon([
            Point::new(1, 1),
            Point::new(right, 1),
            Point::new(right, bottom),
            Point::new(1, bottom),
        ])
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }
}

impl From<Rectangle> for Polygon {
    /// Corners of `r`. Far edges wrap on overflow instead of panicking.
    fn from(r: Rectangle) -> Self {
        let right = r.x.wrapping_add(r.width);
        let bottom = r.y.wrapping_add(r.height);
        Polygon([
            Point::new(r.x, r.y),
            Point::new(right, r.y),
            Point::new(right, bottom),
            Point::new(r.x, bottom),
        ])
    }
}

/// An axis-aligned sub-region of the page, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rectangle {
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl FromStr for Rectangle {
    type Err = PageXmlError;

    /// Parse `x,y,width,height`. Whitespace around each number is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| PageXmlError::InvalidRegion {
            input: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(invalid(format!(
                "expected 4 comma-separated integers, got {}",
                parts.len()
            )));
        }

        let mut values = [0i64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| invalid(format!("'{part}' is not an integer")))?;
        }

        let [x, y, width, height] = values;
        Ok(Rectangle::new(x, y, width, height))
    }
}

/// Load rectangles from a JSON file holding an array of
/// `{"x":..,"y":..,"width":..,"height":..}` objects.
pub fn load_regions(path: impl AsRef<Path>) -> Result<Vec<Rectangle>, PageXmlError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| PageXmlError::InvalidRegion {
        input: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| PageXmlError::InvalidRegion {
        input: path.display().to_string(),
        reason: e.to_string(),
    })
}
