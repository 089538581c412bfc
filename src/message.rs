//! Editor message types.
//!
//! Every user action and host event is represented as a message in the Elm
//! architecture style and applied with [`crate::Editor::update`]. Messages are
//! serializable so that a recorded session can be replayed.

use serde::{Deserialize, Serialize};

use crate::input::PointerEvent;
use crate::model::{AnnotationId, AnnotationKind};

/// Messages that can be sent to update editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    // Host
    /// Image decoded with its natural size
    ImageLoaded { width: u32, height: u32 },
    /// Container width changed
    Resized { width: f64 },

    // Annotation list
    /// Add an annotation of the current tool's kind and activate it
    CreateAnnotation {
        #[serde(default = "AnnotationId::new_random")]
        id: AnnotationId,
    },
    /// Activate an annotation for editing
    SelectAnnotation { id: AnnotationId },
    /// Deactivate without saving or discarding
    ClearSelection,
    /// Delete an annotation
    RemoveAnnotation { id: AnnotationId },
    /// Start an optimistic rename
    Rename { id: AnnotationId, name: String },
    /// Withdraw an in-flight rename
    CancelRename { id: AnnotationId },

    // Toolbar
    /// Switch between the vector and polygon tools
    SelectTool { kind: AnnotationKind },
    /// Step back one checkpoint
    Undo,
    /// Step forward one checkpoint
    Redo,
    /// Commit the draft to the active annotation
    Save,
    /// Discard unsaved edits of the active annotation
    Cancel,

    // Canvas
    /// Mouse or touch input on the stage
    Pointer(PointerEvent),
}
