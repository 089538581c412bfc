//! Global constants for the annotation editor

/// Radius (device pixels) around the first polygon vertex that closes the shape.
/// Divided by the current scale, so the on-screen target stays the same size.
pub const CLOSE_HIT_RADIUS: f64 = 10.0;

/// Stroke width for shape outlines, in device pixels.
pub const STROKE_WIDTH: f64 = 4.0;

/// Length of a vector's arrow head, in device pixels.
pub const ARROW_HEAD_LENGTH: f64 = 10.0;

/// Maximum number of checkpoints kept per annotation editing session.
pub const HISTORY_LIMIT: usize = 100;

/// Artificial latency of the name persistence round-trip, in milliseconds.
pub const RENAME_DELAY_MS: u64 = 500;

/// Half-extent of the exported Cartesian frame (coordinates span -100..100).
pub const EXPORT_HALF_RANGE: f64 = 100.0;

/// Suffix for the coordinates export file name.
pub const COORDINATES_FILE_SUFFIX: &str = "-annotations.json";

/// Suffix for the annotated image export file name.
pub const IMAGE_FILE_SUFFIX: &str = "-with-annotations.png";

/// Overlay colours used when rasterizing saved annotations (RGBA).
pub mod colors {
    /// Outline and arrow colour of saved shapes.
    pub const STROKE: [u8; 4] = [0, 255, 0, 255];
    /// Translucent polygon fill of saved shapes.
    pub const FILL: [u8; 4] = [0, 255, 0, 64];
}
