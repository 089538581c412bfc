//! Editing modes, checkpoints and control flags.

use crate::geometry::Point;

/// State of the tool state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditMode {
    /// No active annotation.
    #[default]
    Idle,
    /// Appending points; the shape is still open.
    Drawing,
    /// Shape is closed; points can be dragged or removed.
    Editing,
    /// A single point is being dragged.
    DraggingPoint { index: usize },
    /// The whole shape is being dragged.
    DraggingShape {
        /// Last pointer position, in device space.
        last: Point,
        /// Accumulated translation, in canonical space.
        offset: Point,
    },
}

impl EditMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, EditMode::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, EditMode::Drawing)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            EditMode::DraggingPoint { .. } | EditMode::DraggingShape { .. }
        )
    }

    /// Closed shape, whether or not a drag is in progress.
    pub fn is_closed(&self) -> bool {
        matches!(self, EditMode::Editing) || self.is_dragging()
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditMode::Idle => "idle",
            EditMode::Drawing => "drawing",
            EditMode::Editing => "editing",
            EditMode::DraggingPoint { .. } => "dragging point",
            EditMode::DraggingShape { .. } => "dragging shape",
        }
    }
}

/// One undoable unit of change: the draft's points and whether the shape was closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checkpoint {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Checkpoint {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }
}

/// Enabled state of the editor's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub undo: bool,
    pub redo: bool,
    pub save: bool,
    pub cancel: bool,
    /// Switching between the vector and polygon tools.
    pub change_tool: bool,
    /// Both export actions.
    pub export: bool,
}
