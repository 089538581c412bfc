//! Coordinate math shared by the editor and the exporters.
//!
//! Three coordinate spaces are involved:
//! - *device*: pointer coordinates on the rendered canvas
//! - *canonical*: pixels of the original, unscaled image (device / scale)
//! - *export*: Cartesian -100..100 on both axes with Y pointing up

use serde::{Deserialize, Serialize};

use crate::constants::EXPORT_HALF_RANGE;

/// A 2D point. Which space it lives in depends on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    /// Offset this point by a delta.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Both components are finite (no NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Convert a device-space point to canonical space by dividing by the scale.
pub fn device_to_canonical(point: Point, scale: f64) -> Point {
    Point::new(point.x / scale, point.y / scale)
}

/// Convert a canonical point back to device space.
pub fn canonical_to_device(point: Point, scale: f64) -> Point {
    Point::new(point.x * scale, point.y * scale)
}

/// Map canonical points into the export frame.
///
/// `(x, y)` becomes `(x / width * 200 - 100, -(y / height * 200) + 100)`, so image "down"
/// becomes Cartesian "up".
pub fn to_export_cartesian(points: &[Point], image_width: f64, image_height: f64) -> Vec<[f64; 2]> {
    let span = EXPORT_HALF_RANGE * 2.0;
    points
        .iter()
        .map(|p| {
            let x = p.x / image_width * span - EXPORT_HALF_RANGE;
            let y = -(p.y / image_height * span) + EXPORT_HALF_RANGE;
            [x, y]
        })
        .collect()
}

/// Inverse of [`to_export_cartesian`].
pub fn from_export_cartesian(points: &[[f64; 2]], image_width: f64, image_height: f64) -> Vec<Point> {
    let span = EXPORT_HALF_RANGE * 2.0;
    points
        .iter()
        .map(|[x, y]| {
            Point::new(
                (x + EXPORT_HALF_RANGE) / span * image_width,
                (EXPORT_HALF_RANGE - y) / span * image_height,
            )
        })
        .collect()
}

/// Scale factor between the rendered canvas and the original image.
///
/// Returns None when either width is not a positive finite number.
pub fn compute_scale(rendered_width: f64, original_width: f64) -> Option<f64> {
    if rendered_width > 0.0 && original_width > 0.0 && rendered_width.is_finite() {
        Some(rendered_width / original_width)
    } else {
        None
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Rendering geometry: the loaded image's natural size and the container it is fitted into.
///
/// The stage keeps the image's aspect ratio; its width always equals the container width.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    image_size: Option<(u32, u32)>,
    container_width: f64,
    scale: f64,
    stage_size: (f64, f64),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            image_size: None,
            container_width: 0.0,
            scale: 1.0,
            stage_size: (0.0, 0.0),
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the natural size of a freshly decoded image.
    /// Returns true if the scale or stage size changed.
    pub fn load_image(&mut self, width: u32, height: u32) -> bool {
        self.image_size = Some((width, height));
        self.recompute()
    }

    /// Record a new container width. Returns true if the scale or stage size changed.
    pub fn resize(&mut self, container_width: f64) -> bool {
        if !container_width.is_finite() || container_width < 0.0 {
            log::warn!("Ignoring invalid container width {}", container_width);
            return false;
        }
        self.container_width = container_width;
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let Some((width, height)) = self.image_size else {
            return false;
        };
        let Some(scale) = compute_scale(self.container_width, width as f64) else {
            return false;
        };

        let aspect_ratio = height as f64 / width as f64;
        let stage_size = (self.container_width, self.container_width * aspect_ratio);
        let changed = scale != self.scale || stage_size != self.stage_size;

        self.scale = scale;
        self.stage_size = stage_size;
        if changed {
            log::debug!(
                "🔍 Viewport: scale {:.4}, stage {:.1}x{:.1}",
                scale,
                stage_size.0,
                stage_size.1
            );
        }
        changed
    }

    /// Current device-per-canonical scale factor (1.0 until an image and width are known).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Natural image size, if an image has been loaded.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    /// Rendered stage size in device pixels.
    pub fn stage_size(&self) -> (f64, f64) {
        self.stage_size
    }

    /// Check whether a device-space point lies on the stage.
    pub fn contains(&self, point: Point) -> bool {
        let (width, height) = self.stage_size;
        point.is_finite() && point.x >= 0.0 && point.y >= 0.0 && point.x <= width && point.y <= height
    }

    /// Clamp a device-space point onto the stage.
    pub fn clamp(&self, point: Point) -> Point {
        let (width, height) = self.stage_size;
        Point::new(point.x.clamp(0.0, width.max(0.0)), point.y.clamp(0.0, height.max(0.0)))
    }

    pub fn to_canonical(&self, device: Point) -> Point {
        device_to_canonical(device, self.scale)
    }

    pub fn to_device(&self, canonical: Point) -> Point {
        canonical_to_device(canonical, self.scale)
    }
}
