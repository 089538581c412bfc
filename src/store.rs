//! Annotation collection managed as a reducer over store commands.
//!
//! Every mutation goes through [`StoreCommand`], so rapid successive events
//! (activate, update points, rename) are applied one at a time in order.

use crate::geometry::Point;
use crate::model::{Annotation, AnnotationId, AnnotationKind};

/// A single mutation of the annotation collection.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    /// Append a new empty annotation. Ignored if the id already exists.
    Add {
        id: AnnotationId,
        name: String,
        kind: AnnotationKind,
    },
    /// Change an annotation's label.
    Rename { id: AnnotationId, name: String },
    /// Replace an annotation's saved points and completeness.
    SetPoints {
        id: AnnotationId,
        points: Vec<Point>,
        is_complete: bool,
    },
    /// Remove an annotation.
    Remove { id: AnnotationId },
    /// Activate exactly one annotation. Unknown ids deactivate everything.
    SetActive { id: AnnotationId },
    /// Change an annotation's kind without touching its points.
    SetKind { id: AnnotationId, kind: AnnotationKind },
}

impl StoreCommand {
    /// Get a human-readable description of this command
    pub fn description(&self) -> &'static str {
        match self {
            StoreCommand::Add { .. } => "Add annotation",
            StoreCommand::Rename { .. } => "Rename annotation",
            StoreCommand::SetPoints { .. } => "Update points",
            StoreCommand::Remove { .. } => "Delete annotation",
            StoreCommand::SetActive { .. } => "Set active annotation",
            StoreCommand::SetKind { .. } => "Change kind",
        }
    }
}

/// Ordered collection of annotations with at most one active record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a command and return the resulting collection.
    pub fn apply(self, command: StoreCommand) -> Self {
        let mut annotations = self.annotations;
        match command {
            StoreCommand::Add { id, name, kind } => {
                if annotations.iter().any(|ann| ann.id == id) {
                    log::warn!("Annotation {} already exists, ignoring add", id);
                } else {
                    annotations.push(Annotation::new(id, name, kind));
                }
            }
            StoreCommand::Rename { id, name } => {
                if let Some(ann) = annotations.iter_mut().find(|ann| ann.id == id) {
                    ann.name = name;
                }
            }
            StoreCommand::SetPoints {
                id,
                points,
                is_complete,
            } => {
                if let Some(ann) = annotations.iter_mut().find(|ann| ann.id == id) {
                    ann.points = points;
                    ann.is_complete = is_complete;
                }
            }
            StoreCommand::Remove { id } => {
                annotations.retain(|ann| ann.id != id);
            }
            StoreCommand::SetActive { id } => {
                for ann in &mut annotations {
                    ann.is_active = ann.id == id;
                }
            }
            StoreCommand::SetKind { id, kind } => {
                if let Some(ann) = annotations.iter_mut().find(|ann| ann.id == id) {
                    ann.kind = kind;
                }
            }
        }
        Self { annotations }
    }

    /// Apply a command in place.
    pub fn dispatch(&mut self, command: StoreCommand) {
        log::trace!("Store: {}", command.description());
        *self = std::mem::take(self).apply(command);
    }

    /// Get an annotation by ID.
    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|ann| ann.id == *id)
    }

    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.get(id).is_some()
    }

    /// The active annotation, if any.
    pub fn active(&self) -> Option<&Annotation> {
        self.annotations.iter().find(|ann| ann.is_active)
    }

    /// Get all annotations in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Get the number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
