//! Tracked asynchronous name saves.
//!
//! Renaming is optimistic: the new name shows immediately and a request is
//! queued against a persistence backend. Each request ends in exactly one
//! outcome. Success keeps the name, failure or cancellation restores the
//! previous one. Only one request per annotation may be in flight.

use std::time::Duration;

use thiserror::Error;
use web_time::Instant;

use crate::model::AnnotationId;

/// Errors produced by rename requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    /// No annotation with this id exists
    #[error("Annotation not found: {0}")]
    UnknownAnnotation(AnnotationId),

    /// A save for this annotation is still in flight
    #[error("A name save is already pending for annotation {0}")]
    AlreadyPending(AnnotationId),

    /// Names must contain at least one non-whitespace character
    #[error("Annotation name cannot be empty")]
    EmptyName,

    /// There is no in-flight save to cancel
    #[error("No name save pending for annotation {0}")]
    NotPending(AnnotationId),

    /// The backend rejected the save
    #[error("Failed to save name: {0}")]
    Persistence(String),
}

/// Backend that stores annotation names.
pub trait NamePersistence {
    /// Persist a name. Called once per request, after the request's delay has elapsed.
    fn persist(&mut self, id: AnnotationId, name: &str) -> Result<(), RenameError>;
}

/// Stand-in for a remote persistence call. Accepts every name and records it.
#[derive(Debug, Default)]
pub struct SimulatedPersistence {
    saved: Vec<(AnnotationId, String)>,
}

impl SimulatedPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names persisted so far, oldest first.
    pub fn saved(&self) -> &[(AnnotationId, String)] {
        &self.saved
    }
}

impl NamePersistence for SimulatedPersistence {
    fn persist(&mut self, id: AnnotationId, name: &str) -> Result<(), RenameError> {
        self.saved.push((id, name.to_string()));
        Ok(())
    }
}

/// An in-flight name save.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRename {
    pub id: AnnotationId,
    /// Name to restore if the save fails or is cancelled.
    pub previous: String,
    pub requested: String,
    /// When the simulated round-trip completes.
    pub ready_at: Instant,
}

/// Final result of a rename request.
#[derive(Debug, Clone, PartialEq)]
pub enum RenameOutcome {
    /// The backend accepted the name.
    Saved { id: AnnotationId, name: String },
    /// The backend rejected the name; `restored` is back in place.
    Failed {
        id: AnnotationId,
        restored: String,
        error: RenameError,
    },
    /// The request was withdrawn; `restored` is back in place.
    Cancelled { id: AnnotationId, restored: String },
}

/// Book-keeping for in-flight renames.
#[derive(Debug, Clone)]
pub struct RenameTracker {
    pending: Vec<PendingRename>,
    delay: Duration,
}

impl RenameTracker {
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: Vec::new(),
            delay,
        }
    }

    /// Register a new request starting at `now`.
    pub fn begin(
        &mut self,
        id: AnnotationId,
        previous: String,
        requested: String,
        now: Instant,
    ) -> Result<(), RenameError> {
        if self.is_pending(&id) {
            return Err(RenameError::AlreadyPending(id));
        }
        self.pending.push(PendingRename {
            id,
            previous,
            requested,
            ready_at: now + self.delay,
        });
        Ok(())
    }

    /// Remove and return every request whose delay has elapsed, oldest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingRename> {
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.ready_at <= now);
        self.pending = waiting;
        due
    }

    /// Withdraw the request for an annotation.
    pub fn cancel(&mut self, id: &AnnotationId) -> Option<PendingRename> {
        let index = self.pending.iter().position(|p| p.id == *id)?;
        Some(self.pending.remove(index))
    }

    pub fn is_pending(&self, id: &AnnotationId) -> bool {
        self.pending.iter().any(|p| p.id == *id)
    }

    pub fn pending(&self) -> &[PendingRename] {
        &self.pending
    }

    /// Earliest completion time among pending requests.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.ready_at).min()
    }
}
