//! Working copy of the active annotation's geometry.

use crate::geometry::Point;

/// In-progress point sequence in canonical space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftBuffer {
    points: Vec<Point>,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Move one point. Returns false if the index is out of range.
    pub fn set(&mut self, index: usize, point: Point) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    /// Translate every point by the same canonical delta.
    pub fn translate(&mut self, delta: Point) {
        for p in &mut self.points {
            *p = p.offset(delta.x, delta.y);
        }
    }

    /// Remove one point and return it.
    pub fn remove(&mut self, index: usize) -> Option<Point> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replace the contents with a snapshot.
    pub fn replace(&mut self, points: &[Point]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    /// Flat `[x0, y0, x1, y1, ...]` view, as line renderers expect.
    pub fn to_flat(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    pub fn to_vec(&self) -> Vec<Point> {
        self.points.clone()
    }
}
