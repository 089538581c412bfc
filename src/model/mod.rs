//! Data models for the annotation editor.

mod annotation;

pub use annotation::{
    Annotation, AnnotationId, AnnotationKind, MIN_POLYGON_VERTICES, VECTOR_POINTS,
};
