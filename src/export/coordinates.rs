//! Coordinates export.
//!
//! One entry per annotation with its points mapped into the Cartesian export
//! frame (-100..100 on both axes, Y pointing up).

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExportError;
use crate::geometry::{Point, from_export_cartesian, to_export_cartesian};
use crate::model::{Annotation, AnnotationId, AnnotationKind};

/// A single annotation as written to the coordinates file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedAnnotation {
    pub id: AnnotationId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    /// Points in the Cartesian export frame.
    pub points: Vec<[f64; 2]>,
    #[serde(rename = "isComplete")]
    pub is_complete: bool,
}

impl ExportedAnnotation {
    pub fn from_annotation(ann: &Annotation, image_width: f64, image_height: f64) -> Self {
        Self {
            id: ann.id,
            name: ann.name.clone(),
            kind: ann.kind,
            points: to_export_cartesian(&ann.points, image_width, image_height),
            is_complete: ann.is_complete,
        }
    }

    /// Map the exported points back to canonical image pixels.
    pub fn canonical_points(&self, image_width: f64, image_height: f64) -> Vec<Point> {
        from_export_cartesian(&self.points, image_width, image_height)
    }
}

/// Convert saved annotations into export entries, preserving collection order.
pub fn export_coordinates(
    annotations: &[Annotation],
    image_size: Option<(u32, u32)>,
) -> Result<Vec<ExportedAnnotation>, ExportError> {
    let (width, height) = match image_size {
        Some((w, h)) if w > 0 && h > 0 => (w as f64, h as f64),
        _ => return Err(ExportError::MissingDimensions),
    };
    Ok(annotations
        .iter()
        .map(|ann| ExportedAnnotation::from_annotation(ann, width, height))
        .collect())
}

/// Serialize export entries as pretty-printed JSON.
pub fn to_json(entries: &[ExportedAnnotation]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Write export entries to a file.
pub fn write_coordinates(entries: &[ExportedAnnotation], path: &Path) -> Result<(), ExportError> {
    let json = to_json(entries)?;
    std::fs::write(path, json)?;
    log::info!("📝 Exported {} annotations to {:?}", entries.len(), path);
    Ok(())
}
