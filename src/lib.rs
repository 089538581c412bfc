//! Annotator - annotation editing engine
//!
//! Draws directional vectors and closed polygons over an image, edits them
//! with checkpointed undo/redo, and exports both the annotated image and the
//! shapes' coordinates in a device-independent Cartesian frame.

pub mod config;
pub mod constants;
pub mod draft;
pub mod editor;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
pub mod message;
pub mod model;
pub mod rename;
pub mod store;

pub use config::{ConfigError, EditorConfig, LogLevel, Preferences};
pub use editor::{Checkpoint, Controls, EditMode, Editor};
pub use export::{ExportError, ExportPaths, ExportedAnnotation};
pub use geometry::{Point, Viewport};
pub use input::{HitTarget, InputSource, PointerAction, PointerEvent};
pub use message::Message;
pub use model::{Annotation, AnnotationId, AnnotationKind};
pub use rename::{NamePersistence, RenameError, RenameOutcome, SimulatedPersistence};
