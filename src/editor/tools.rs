//! Point-level operations of the tool state machine.
//!
//! All coordinates passed in are device-space and converted with the live
//! scale factor, so drawing survives viewport resizes unchanged.

use super::{EditMode, Editor};
use crate::geometry::{Point, distance};
use crate::model::{AnnotationKind, MIN_POLYGON_VERTICES, VECTOR_POINTS};

impl Editor {
    /// Append a point to the draft. Only valid while drawing.
    ///
    /// Vectors finish after their second point. Polygons with three or more points
    /// close instead of appending when the click lands near the first vertex.
    pub fn add_point(&mut self, device: Point) -> bool {
        if !self.mode.is_drawing() {
            return false;
        }
        let Some(kind) = self.active_kind() else {
            return false;
        };
        let point = self.viewport.to_canonical(device);

        match kind {
            AnnotationKind::Vector => {
                if self.draft.len() >= VECTOR_POINTS {
                    return false;
                }
                self.draft.push(point);
                let finished = self.draft.len() == VECTOR_POINTS;
                if finished {
                    self.mode = EditMode::Editing;
                }
                log::debug!(
                    "Vector: point {} at ({:.1}, {:.1})",
                    self.draft.len(),
                    point.x,
                    point.y
                );
                self.commit(finished);
            }
            AnnotationKind::Polygon => {
                if self.closes_polygon(point) {
                    self.mode = EditMode::Editing;
                    log::debug!("Polygon: closed with {} vertices", self.draft.len());
                    self.commit(true);
                    return true;
                }
                self.draft.push(point);
                log::debug!(
                    "Polygon: added vertex {} at ({:.1}, {:.1})",
                    self.draft.len(),
                    point.x,
                    point.y
                );
                self.commit(false);
            }
        }
        true
    }

    /// Whether a canonical point would close the polygon being drawn.
    pub(crate) fn closes_polygon(&self, point: Point) -> bool {
        if self.active_kind() != Some(AnnotationKind::Polygon)
            || self.draft.len() < MIN_POLYGON_VERTICES
        {
            return false;
        }
        let Some(first) = self.draft.first() else {
            return false;
        };
        distance(point, first) < self.close_threshold()
    }

    /// Closing radius in canonical units; constant in device pixels.
    pub fn close_threshold(&self) -> f64 {
        self.prefs.close_hit_radius / self.viewport.scale()
    }

    // =========================================================================
    // Point drag
    // =========================================================================

    pub fn drag_point_start(&mut self, index: usize) -> bool {
        if self.mode != EditMode::Editing || index >= self.draft.len() {
            return false;
        }
        log::debug!("Point drag started on vertex {}", index);
        self.mode = EditMode::DraggingPoint { index };
        true
    }

    /// Move the dragged point. Does not create a checkpoint.
    pub fn drag_point_move(&mut self, index: usize, device: Point) -> bool {
        if self.mode != (EditMode::DraggingPoint { index }) {
            return false;
        }
        let point = self.viewport.to_canonical(device);
        if !self.draft.set(index, point) {
            return false;
        }
        log::trace!("Point {} -> ({:.1}, {:.1})", index, point.x, point.y);
        self.mirror_shadow();
        true
    }

    /// Finish a point drag with a single checkpoint.
    pub fn drag_point_end(&mut self) -> bool {
        let EditMode::DraggingPoint { index } = self.mode else {
            return false;
        };
        log::debug!("Point drag ended on vertex {}", index);
        self.mode = EditMode::Editing;
        self.mirror_shadow();
        self.commit(true);
        true
    }

    // =========================================================================
    // Shape drag
    // =========================================================================

    pub fn drag_shape_start(&mut self, device: Point) -> bool {
        if self.mode != EditMode::Editing {
            return false;
        }
        log::debug!("Shape drag started at ({:.1}, {:.1})", device.x, device.y);
        self.mode = EditMode::DraggingShape {
            last: device,
            offset: Point::ZERO,
        };
        true
    }

    /// Accumulate the drag delta. Points are translated only when the drag ends.
    pub fn drag_shape_move(&mut self, device: Point) -> bool {
        let EditMode::DraggingShape { last, offset } = self.mode else {
            return false;
        };
        let scale = self.viewport.scale();
        let offset = offset.offset((device.x - last.x) / scale, (device.y - last.y) / scale);
        log::trace!("Shape offset ({:.1}, {:.1})", offset.x, offset.y);
        self.mode = EditMode::DraggingShape {
            last: device,
            offset,
        };
        true
    }

    /// Apply the accumulated translation with a single checkpoint.
    pub fn drag_shape_end(&mut self) -> bool {
        let EditMode::DraggingShape { offset, .. } = self.mode else {
            return false;
        };
        self.mode = EditMode::Editing;
        if offset == Point::ZERO {
            return true;
        }
        self.draft.translate(offset);
        log::debug!("Shape moved by ({:.1}, {:.1})", offset.x, offset.y);
        self.mirror_shadow();
        self.commit(true);
        true
    }

    /// End whichever drag is in progress.
    pub(crate) fn finish_drag(&mut self) -> bool {
        match self.mode {
            EditMode::DraggingPoint { .. } => self.drag_point_end(),
            EditMode::DraggingShape { .. } => self.drag_shape_end(),
            _ => false,
        }
    }

    // =========================================================================
    // Point removal
    // =========================================================================

    /// Remove a point from a closed shape.
    ///
    /// Rejected for vectors and for polygons at the minimum vertex count.
    /// Removing the last point re-opens the shape for drawing.
    pub fn remove_point(&mut self, index: usize) -> bool {
        if self.mode != EditMode::Editing || index >= self.draft.len() {
            return false;
        }
        let Some(kind) = self.active_kind() else {
            return false;
        };
        if !kind.can_remove_point(self.draft.len()) {
            log::debug!("Cannot remove vertex: {} at minimum", kind.name());
            return false;
        }

        let was_last = index + 1 == self.draft.len();
        self.draft.remove(index);
        log::debug!("Removed vertex {} ({} left)", index, self.draft.len());
        if was_last {
            self.mode = EditMode::Drawing;
        }
        self.commit(!was_last);
        true
    }
}
