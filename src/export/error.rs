//! Error types for export operations.

use thiserror::Error;

/// Errors that can occur while producing export artifacts.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Coordinates are normalized by the image size, which is not known yet
    #[error("Image dimensions required for export but no image is loaded")]
    MissingDimensions,

    /// The source image name has no usable base name
    #[error("Cannot derive export file name from '{0}'")]
    EmptyFileName(String),
}
