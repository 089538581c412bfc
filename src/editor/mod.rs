//! Annotation editing engine.
//!
//! [`Editor`] is the whole application state: the annotation collection, the
//! draft buffer of the active annotation, its checkpoint history, the current
//! mode, unsaved "shadow" edits per annotation, the selected tool, the
//! viewport and in-flight renames. Every transition happens through a method
//! on it (or through [`Editor::update`] with a [`Message`]), one at a time.
//!
//! Invalid operations never fail; they are rejected as no-ops and report
//! `false`.

mod mode;
mod tools;

#[cfg(test)]
mod tests;

pub use mode::{Checkpoint, Controls, EditMode};

use std::collections::HashMap;

use web_time::Instant;

use crate::config::{EditorConfig, Preferences};
use crate::draft::DraftBuffer;
use crate::geometry::{Point, Viewport};
use crate::history::{History, HistoryConfig};
use crate::message::Message;
use crate::model::{Annotation, AnnotationId, AnnotationKind};
use crate::rename::{NamePersistence, RenameError, RenameOutcome, RenameTracker};
use crate::store::{AnnotationStore, StoreCommand};

/// Application state of the annotation editor.
#[derive(Debug, Clone)]
pub struct Editor {
    pub(crate) prefs: Preferences,
    pub(crate) store: AnnotationStore,
    pub(crate) draft: DraftBuffer,
    pub(crate) history: History<Checkpoint>,
    pub(crate) mode: EditMode,
    /// Unsaved edits per annotation, kept across selection changes.
    pub(crate) shadow: HashMap<AnnotationId, Vec<Point>>,
    /// Kind given to newly created annotations.
    pub(crate) tool: AnnotationKind,
    pub(crate) viewport: Viewport,
    pub(crate) renames: RenameTracker,
    pub(crate) rename_error: Option<RenameError>,
    /// A touch sequence is in progress; synthetic clicks are ignored.
    pub(crate) touching: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        let prefs = config.preferences.clone();
        let history = History::with_config(
            Checkpoint::default(),
            HistoryConfig {
                max_history: prefs.history_limit,
            },
        );
        Self {
            tool: prefs.default_tool,
            renames: RenameTracker::new(prefs.rename_delay()),
            prefs,
            store: AnnotationStore::new(),
            draft: DraftBuffer::new(),
            history,
            mode: EditMode::Idle,
            shadow: HashMap::new(),
            viewport: Viewport::new(),
            rename_error: None,
            touching: false,
        }
    }

    // =========================================================================
    // Read access for the rendering layer
    // =========================================================================

    pub fn annotations(&self) -> &[Annotation] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn active(&self) -> Option<&Annotation> {
        self.store.active()
    }

    pub fn active_id(&self) -> Option<AnnotationId> {
        self.store.active().map(|ann| ann.id)
    }

    pub(crate) fn active_kind(&self) -> Option<AnnotationKind> {
        self.store.active().map(|ann| ann.kind)
    }

    /// Points of the draft buffer, in canonical space.
    pub fn draft(&self) -> &[Point] {
        self.draft.points()
    }

    /// Draft points as `[x0, y0, x1, y1, ...]`.
    pub fn draft_flat(&self) -> Vec<f64> {
        self.draft.to_flat()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn tool(&self) -> AnnotationKind {
        self.tool
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn history(&self) -> &History<Checkpoint> {
        &self.history
    }

    /// Unsaved edits held for an annotation, if any.
    pub fn shadow_edits(&self, id: &AnnotationId) -> Option<&[Point]> {
        self.shadow.get(id).map(Vec::as_slice)
    }

    /// Live translation of a shape drag, in canonical space. Zero when not dragging a shape.
    pub fn shape_offset(&self) -> Point {
        match self.mode {
            EditMode::DraggingShape { offset, .. } => offset,
            _ => Point::ZERO,
        }
    }

    pub fn can_change_tool(&self) -> bool {
        match self.store.active() {
            Some(ann) => ann.points.is_empty() && self.draft.is_empty(),
            None => true,
        }
    }

    /// Enabled state of the undo, redo, save, cancel, tool and export controls.
    pub fn controls(&self) -> Controls {
        let image_loaded = self.viewport.image_size().is_some();
        let active = self.store.active().is_some();
        let dragging = self.mode.is_dragging();
        Controls {
            undo: image_loaded && !dragging && self.history.can_undo(),
            redo: image_loaded && !dragging && self.history.can_redo(),
            save: image_loaded && active && !self.draft.is_empty(),
            cancel: image_loaded && active,
            change_tool: image_loaded && self.can_change_tool(),
            export: image_loaded && !self.store.is_empty(),
        }
    }

    /// Contextual instruction for the user.
    pub fn hint(&self) -> &'static str {
        if self.store.active().is_some() {
            "Click to add points. Right click to remove a point."
        } else if self.store.is_empty() {
            "Create an annotation to get started."
        } else {
            "Select an annotation to edit."
        }
    }

    // =========================================================================
    // Command channel
    // =========================================================================

    /// Apply a message. Returns true if the editor state changed.
    pub fn update(&mut self, message: Message) -> bool {
        match message {
            Message::ImageLoaded { width, height } => self.load_image(width, height),
            Message::Resized { width } => self.resize(width),
            Message::CreateAnnotation { id } => self.create_annotation_with_id(id),
            Message::SelectAnnotation { id } => self.select_annotation(id),
            Message::ClearSelection => self.select_annotation(AnnotationId::NONE),
            Message::RemoveAnnotation { id } => self.remove_annotation(id),
            Message::SelectTool { kind } => self.select_tool(kind),
            Message::Pointer(event) => self.handle_pointer(event),
            Message::Undo => self.undo(),
            Message::Redo => self.redo(),
            Message::Save => self.save(),
            Message::Cancel => self.cancel(),
            Message::Rename { id, name } => {
                match self.request_rename(id, name, Instant::now()) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("Rename rejected: {}", e);
                        false
                    }
                }
            }
            Message::CancelRename { id } => self.cancel_rename(id).is_ok(),
        }
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Record the natural size of a newly loaded image.
    ///
    /// Draft points are canonical, so in-progress drawing survives.
    pub fn load_image(&mut self, width: u32, height: u32) -> bool {
        log::info!("Image loaded: {}x{}", width, height);
        self.viewport.load_image(width, height)
    }

    /// Record a new container width.
    pub fn resize(&mut self, container_width: f64) -> bool {
        self.viewport.resize(container_width)
    }

    // =========================================================================
    // Annotation lifecycle
    // =========================================================================

    /// Create a new annotation of the current tool's kind and start drawing it.
    pub fn create_annotation(&mut self) -> AnnotationId {
        let id = AnnotationId::new_random();
        self.create_annotation_with_id(id);
        id
    }

    /// Create a new annotation with a caller-chosen id. Returns false if the id is taken.
    pub fn create_annotation_with_id(&mut self, id: AnnotationId) -> bool {
        if id.is_none() || self.store.contains(&id) {
            log::warn!("Cannot create annotation with id {}", id);
            return false;
        }
        let name = Annotation::default_name(self.store.len() + 1);
        log::info!("Created annotation '{}' ({:?})", name, self.tool);
        self.store.dispatch(StoreCommand::Add {
            id,
            name,
            kind: self.tool,
        });
        self.select_annotation(id)
    }

    /// Make an annotation the active one and load its points into the draft.
    ///
    /// Unsaved shadow edits take precedence over saved points. An id that is not
    /// in the collection (such as [`AnnotationId::NONE`]) clears the selection.
    /// Returns true if the selection changed.
    pub fn select_annotation(&mut self, id: AnnotationId) -> bool {
        if self.active_id() == Some(id) {
            return false;
        }
        let had_active = self.store.active().is_some();
        self.finish_drag();
        self.store.dispatch(StoreCommand::SetActive { id });

        let Some(ann) = self.store.get(&id) else {
            self.enter_idle();
            return had_active;
        };

        let seed = self
            .shadow
            .get(&id)
            .cloned()
            .unwrap_or_else(|| ann.points.clone());
        let closed = seed.len() >= ann.kind.required_points();
        log::debug!(
            "Activated '{}' with {} points ({})",
            ann.name,
            seed.len(),
            if closed { "editing" } else { "drawing" }
        );

        self.tool = ann.kind;
        self.draft.replace(&seed);
        self.history.reset(Checkpoint::new(seed, closed));
        self.mode = if closed {
            EditMode::Editing
        } else {
            EditMode::Drawing
        };
        true
    }

    /// Flush the draft into the active annotation and deactivate it.
    pub fn save(&mut self) -> bool {
        if self.draft.is_empty() || self.store.active().is_none() {
            return false;
        }
        self.finish_drag();

        let Some(ann) = self.store.active() else {
            return false;
        };
        let id = ann.id;
        let points = self.draft.to_vec();
        let is_complete = ann.kind.is_complete(points.len());
        log::info!(
            "Saved '{}' with {} points (complete: {})",
            ann.name,
            points.len(),
            is_complete
        );

        self.store.dispatch(StoreCommand::SetPoints {
            id,
            points,
            is_complete,
        });
        self.shadow.remove(&id);
        self.store.dispatch(StoreCommand::SetActive {
            id: AnnotationId::NONE,
        });
        self.enter_idle();
        true
    }

    /// Discard unsaved edits of the active annotation and deactivate it.
    pub fn cancel(&mut self) -> bool {
        let Some(ann) = self.store.active() else {
            return false;
        };
        let id = ann.id;
        let saved = ann.points.clone();
        let closed = saved.len() >= ann.kind.required_points();
        log::info!("Cancelled edits of '{}'", ann.name);

        self.draft.replace(&saved);
        self.history.reset(Checkpoint::new(saved, closed));
        self.shadow.remove(&id);
        self.store.dispatch(StoreCommand::SetActive {
            id: AnnotationId::NONE,
        });
        self.mode = EditMode::Idle;
        true
    }

    /// Delete an annotation together with its shadow edits and pending rename.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> bool {
        let Some(ann) = self.store.get(&id) else {
            return false;
        };
        let was_active = ann.is_active;
        log::info!("Removed annotation '{}'", ann.name);

        self.renames.cancel(&id);
        self.shadow.remove(&id);
        self.store.dispatch(StoreCommand::Remove { id });
        if was_active {
            self.enter_idle();
        }
        true
    }

    /// Select the tool for new annotations, re-tagging the active annotation.
    ///
    /// Rejected while the active annotation has any points. While an annotation
    /// is active its kind is the current tool.
    pub fn select_tool(&mut self, kind: AnnotationKind) -> bool {
        if !self.can_change_tool() {
            log::debug!("Tool change to {:?} rejected: shape in progress", kind);
            return false;
        }
        if self.active_kind().unwrap_or(self.tool) == kind {
            return false;
        }
        self.tool = kind;
        if let Some(id) = self.active_id() {
            self.store.dispatch(StoreCommand::SetKind { id, kind });
            self.draft.clear();
            self.history.reset(Checkpoint::default());
            self.mode = EditMode::Drawing;
        }
        log::debug!("Tool selected: {}", kind.name());
        true
    }

    // =========================================================================
    // Undo / redo
    // =========================================================================

    pub fn undo(&mut self) -> bool {
        if self.mode.is_dragging() {
            return false;
        }
        let Some(checkpoint) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(checkpoint);
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.mode.is_dragging() {
            return false;
        }
        let Some(checkpoint) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(checkpoint);
        true
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.draft.replace(&checkpoint.points);
        if self.store.active().is_some() {
            self.mode = if checkpoint.closed {
                EditMode::Editing
            } else {
                EditMode::Drawing
            };
        }
        self.refresh_shadow();
    }

    // =========================================================================
    // Renames
    // =========================================================================

    /// Rename an annotation. The new name is shown immediately and persisted
    /// once the save delay elapses (see [`Editor::poll_renames`]).
    pub fn request_rename(
        &mut self,
        id: AnnotationId,
        name: impl Into<String>,
        now: Instant,
    ) -> Result<(), RenameError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(RenameError::EmptyName);
        }
        let ann = self
            .store
            .get(&id)
            .ok_or(RenameError::UnknownAnnotation(id))?;
        let previous = ann.name.clone();

        self.renames.begin(id, previous, name.clone(), now)?;
        log::debug!("Saving name '{}' for {}", name, id);
        self.store.dispatch(StoreCommand::Rename { id, name });
        Ok(())
    }

    /// Whether a name save is in flight for the annotation.
    pub fn is_saving_name(&self, id: &AnnotationId) -> bool {
        self.renames.is_pending(id)
    }

    /// Complete every rename whose delay has elapsed at `now`.
    pub fn poll_renames(
        &mut self,
        now: Instant,
        backend: &mut dyn NamePersistence,
    ) -> Vec<RenameOutcome> {
        let mut outcomes = Vec::new();
        for pending in self.renames.take_due(now) {
            match backend.persist(pending.id, &pending.requested) {
                Ok(()) => {
                    log::info!("Saved name '{}' for {}", pending.requested, pending.id);
                    outcomes.push(RenameOutcome::Saved {
                        id: pending.id,
                        name: pending.requested,
                    });
                }
                Err(error) => {
                    log::warn!(
                        "Name save for {} failed, restoring '{}': {}",
                        pending.id,
                        pending.previous,
                        error
                    );
                    self.store.dispatch(StoreCommand::Rename {
                        id: pending.id,
                        name: pending.previous.clone(),
                    });
                    self.rename_error = Some(error.clone());
                    outcomes.push(RenameOutcome::Failed {
                        id: pending.id,
                        restored: pending.previous,
                        error,
                    });
                }
            }
        }
        outcomes
    }

    /// Withdraw an in-flight rename and restore the previous name.
    pub fn cancel_rename(&mut self, id: AnnotationId) -> Result<RenameOutcome, RenameError> {
        let pending = self.renames.cancel(&id).ok_or(RenameError::NotPending(id))?;
        log::debug!("Cancelled name save for {}", id);
        self.store.dispatch(StoreCommand::Rename {
            id,
            name: pending.previous.clone(),
        });
        Ok(RenameOutcome::Cancelled {
            id,
            restored: pending.previous,
        })
    }

    /// Take the most recent rename failure, clearing it.
    pub fn take_rename_error(&mut self) -> Option<RenameError> {
        self.rename_error.take()
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn enter_idle(&mut self) {
        self.draft.clear();
        self.history.reset(Checkpoint::default());
        self.mode = EditMode::Idle;
    }

    /// Record the draft as a checkpoint unless it equals the current one.
    pub(crate) fn commit(&mut self, closed: bool) {
        let checkpoint = Checkpoint::new(self.draft.to_vec(), closed);
        if checkpoint != *self.history.current() {
            self.history.push(checkpoint);
        }
        self.refresh_shadow();
    }

    /// Store the draft as the active annotation's unsaved edits.
    pub(crate) fn mirror_shadow(&mut self) {
        if let Some(id) = self.active_id() {
            self.shadow.insert(id, self.draft.to_vec());
        }
    }

    /// Keep an existing shadow entry in sync with the draft.
    fn refresh_shadow(&mut self) {
        if let Some(id) = self.active_id() {
            if let Some(entry) = self.shadow.get_mut(&id) {
                *entry = self.draft.to_vec();
            }
        }
    }
}
