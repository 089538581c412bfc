//! Pointer input adapter.
//!
//! The rendering layer reports what was under the pointer as a typed
//! [`HitTarget`] along with the device-space position. Mouse and touch input
//! are unified here and dispatched to the tool state machine.

use serde::{Deserialize, Serialize};

use crate::editor::{EditMode, Editor};
use crate::geometry::Point;
use crate::model::AnnotationId;

/// Element under the pointer, as determined by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTarget {
    /// Empty canvas or the background image.
    #[default]
    None,
    /// A vertex handle of the active draft.
    Point(usize),
    /// The outline or body of an annotation's shape.
    Shape(AnnotationId),
}

/// Device that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    #[default]
    Mouse,
    Touch,
}

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    /// Primary button click (press and release without dragging).
    Click,
    /// Button press or touch start, beginning a potential drag.
    Press,
    /// Pointer movement during a press.
    Move,
    /// Button release or touch end.
    Release,
    /// Secondary button / context action.
    ContextMenu,
}

/// A pointer event in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    #[serde(default)]
    pub source: InputSource,
    pub position: Point,
    #[serde(default)]
    pub target: HitTarget,
}

impl PointerEvent {
    pub fn new(action: PointerAction, position: Point, target: HitTarget) -> Self {
        Self {
            action,
            source: InputSource::Mouse,
            position,
            target,
        }
    }

    pub fn touch(action: PointerAction, position: Point, target: HitTarget) -> Self {
        Self {
            source: InputSource::Touch,
            ..Self::new(action, position, target)
        }
    }
}

impl Editor {
    /// Dispatch a pointer event to the tool state machine.
    /// Returns true if the event changed editor state.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let PointerEvent {
            action,
            source,
            position,
            target,
        } = event;

        if !position.is_finite() {
            log::trace!("Dropping pointer event with non-finite position {:?}", position);
            return false;
        }

        log::trace!(
            "Pointer: {:?} {:?} at ({:.1}, {:.1}) on {:?}, mode={}",
            source,
            action,
            position.x,
            position.y,
            target,
            self.mode.name()
        );

        match action {
            PointerAction::Move => self.pointer_move(self.viewport.clamp(position)),
            PointerAction::Release => {
                if source == InputSource::Touch {
                    self.touching = false;
                }
                self.finish_drag()
            }
            _ if !self.viewport.contains(position) => {
                log::trace!("Dropping pointer event outside the stage");
                false
            }
            PointerAction::Click => match source {
                // Touch taps are handled on press; the synthetic click is ignored
                InputSource::Touch => false,
                InputSource::Mouse if self.touching => false,
                InputSource::Mouse => self.pointer_tap(position, target),
            },
            PointerAction::Press => match source {
                InputSource::Mouse => self.mouse_press(position, target),
                InputSource::Touch => self.touch_start(position, target),
            },
            PointerAction::ContextMenu => match target {
                HitTarget::Point(index) => self.remove_point(index),
                _ => false,
            },
        }
    }

    /// Click or tap: select a saved shape, otherwise add a point.
    fn pointer_tap(&mut self, position: Point, target: HitTarget) -> bool {
        if let HitTarget::Shape(id) = target {
            if self.is_selectable(id) {
                return self.select_annotation(id);
            }
        }
        if self.mode.is_dragging() {
            return false;
        }
        self.add_point(position)
    }

    /// Mouse drags start on a handle or on the active shape's body.
    fn mouse_press(&mut self, position: Point, target: HitTarget) -> bool {
        match target {
            HitTarget::Point(index) => self.drag_point_start(index),
            HitTarget::Shape(id) if self.active_id() == Some(id) => self.drag_shape_start(position),
            _ => false,
        }
    }

    /// Touch start: close the polygon, grab a handle, grab a shape, or add a point.
    fn touch_start(&mut self, position: Point, target: HitTarget) -> bool {
        self.touching = true;

        if self.mode.is_drawing() && self.closes_polygon(self.viewport.to_canonical(position)) {
            return self.add_point(position);
        }

        match target {
            HitTarget::Point(index) => self.drag_point_start(index),
            HitTarget::Shape(id) => {
                let selected = self.is_selectable(id) && self.select_annotation(id);
                let dragging = self.active_id() == Some(id) && self.drag_shape_start(position);
                selected || dragging
            }
            HitTarget::None => self.add_point(position),
        }
    }

    fn pointer_move(&mut self, position: Point) -> bool {
        match self.mode {
            EditMode::DraggingPoint { index } => self.drag_point_move(index, position),
            EditMode::DraggingShape { .. } => self.drag_shape_move(position),
            _ => false,
        }
    }

    /// A saved, non-active annotation with points can be picked from the canvas.
    fn is_selectable(&self, id: AnnotationId) -> bool {
        self.active_id() != Some(id)
            && self
                .store
                .get(&id)
                .is_some_and(|ann| ann.has_points())
    }
}
