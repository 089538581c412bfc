//! Annotation record types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;

/// Minimum number of vertices required for a closed polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Number of points in a directional vector (tail, head).
pub const VECTOR_POINTS: usize = 2;

/// Opaque unique identifier for an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    /// Sentinel that never matches a real annotation. Activating it clears the selection.
    pub const NONE: AnnotationId = AnnotationId(Uuid::nil());

    /// Generate a fresh random identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shape kind of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationKind {
    /// Directional arrow from the first point to the second.
    #[default]
    #[serde(rename = "DIRECTIONAL")]
    Vector,
    /// Closed polygon with three or more vertices.
    Polygon,
}

impl AnnotationKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationKind::Vector => "Direction",
            AnnotationKind::Polygon => "Operational Area",
        }
    }

    /// Get all available kinds.
    pub fn all() -> &'static [AnnotationKind] {
        &[AnnotationKind::Vector, AnnotationKind::Polygon]
    }

    /// Number of points at which drawing is finished and the shape becomes editable.
    pub fn required_points(&self) -> usize {
        match self {
            AnnotationKind::Vector => VECTOR_POINTS,
            AnnotationKind::Polygon => MIN_POLYGON_VERTICES,
        }
    }

    /// Maximum number of points, if the kind has a cap.
    pub fn max_points(&self) -> Option<usize> {
        match self {
            AnnotationKind::Vector => Some(VECTOR_POINTS),
            AnnotationKind::Polygon => None,
        }
    }

    /// Whether a saved point count counts as complete.
    ///
    /// Vectors need one point, polygons need three.
    pub fn is_complete(&self, point_count: usize) -> bool {
        match self {
            AnnotationKind::Vector => point_count >= 1,
            AnnotationKind::Polygon => point_count >= MIN_POLYGON_VERTICES,
        }
    }

    /// Whether a point may be removed from a shape that currently has `point_count` points.
    /// Vectors never allow removal.
    pub fn can_remove_point(&self, point_count: usize) -> bool {
        match self {
            AnnotationKind::Vector => false,
            AnnotationKind::Polygon => point_count > MIN_POLYGON_VERTICES,
        }
    }
}

/// A persisted shape record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier, immutable after creation.
    pub id: AnnotationId,
    /// User-editable label.
    pub name: String,
    /// Shape kind.
    pub kind: AnnotationKind,
    /// Saved points in canonical (original image pixel) space.
    pub points: Vec<Point>,
    /// Whether the saved points satisfy the kind's minimum cardinality.
    pub is_complete: bool,
    /// Whether this record is the one being edited.
    #[serde(skip)]
    pub is_active: bool,
}

impl Annotation {
    /// Create a new, empty, incomplete and inactive annotation.
    pub fn new(id: AnnotationId, name: impl Into<String>, kind: AnnotationKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            points: Vec::new(),
            is_complete: false,
            is_active: false,
        }
    }

    /// Default label for the n-th annotation (1-based).
    pub fn default_name(n: usize) -> String {
        format!("Annotation {}", n)
    }

    pub fn has_points(&self) -> bool {
        !self.points.is_empty()
    }
}
