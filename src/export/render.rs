//! Annotated image export.
//!
//! Saved shapes are rasterized onto a copy of the source image at its natural
//! resolution. Outline widths are given in device pixels and divided by the
//! scale so the export matches what was on screen.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use super::ExportError;
use crate::constants::{ARROW_HEAD_LENGTH, colors};
use crate::geometry::Point;
use crate::model::{Annotation, AnnotationKind};

/// Stroke geometry in canonical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub stroke_width: f64,
    pub arrow_head_length: f64,
    pub stroke: [u8; 4],
    pub fill: [u8; 4],
}

impl RenderStyle {
    /// Style for an export taken while the image was shown at `scale`.
    pub fn for_scale(stroke_width: f64, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        Self {
            stroke_width: stroke_width / scale,
            arrow_head_length: ARROW_HEAD_LENGTH / scale,
            stroke: colors::STROKE,
            fill: colors::FILL,
        }
    }
}

/// Draw every annotation with points onto a copy of `background`.
pub fn render_annotations(
    background: &RgbaImage,
    annotations: &[Annotation],
    style: &RenderStyle,
) -> RgbaImage {
    let mut canvas = background.clone();
    for ann in annotations.iter().filter(|ann| ann.has_points()) {
        log::trace!("Rendering '{}' ({} points)", ann.name, ann.points.len());
        match ann.kind {
            AnnotationKind::Vector => draw_vector(&mut canvas, &ann.points, style),
            AnnotationKind::Polygon => draw_polygon(&mut canvas, &ann.points, ann.is_complete, style),
        }
    }
    canvas
}

/// Encode an image as PNG.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    image.save_with_format(path, ImageFormat::Png)?;
    log::info!("📝 Exported annotated image to {:?}", path);
    Ok(())
}

fn draw_vector(canvas: &mut RgbaImage, points: &[Point], style: &RenderStyle) {
    match points {
        [tail, head, ..] => {
            draw_segment(canvas, *tail, *head, style.stroke_width, style.stroke);
            draw_arrow_head(canvas, *tail, *head, style);
        }
        [only] => draw_dot(canvas, *only, style.stroke_width, style.stroke),
        [] => {}
    }
}

fn draw_polygon(canvas: &mut RgbaImage, points: &[Point], closed: bool, style: &RenderStyle) {
    if closed {
        fill_polygon(canvas, points, style.fill);
    }
    for pair in points.windows(2) {
        draw_segment(canvas, pair[0], pair[1], style.stroke_width, style.stroke);
    }
    match (closed, points.first(), points.last()) {
        (true, Some(first), Some(last)) => {
            draw_segment(canvas, *last, *first, style.stroke_width, style.stroke)
        }
        (false, Some(only), _) if points.len() == 1 => {
            draw_dot(canvas, *only, style.stroke_width, style.stroke)
        }
        _ => {}
    }
}

/// Filled triangle at the head, pointing along tail -> head.
fn draw_arrow_head(canvas: &mut RgbaImage, tail: Point, head: Point, style: &RenderStyle) {
    let length = tail.distance_to(&head);
    if length <= f64::EPSILON {
        return;
    }
    let (dx, dy) = ((head.x - tail.x) / length, (head.y - tail.y) / length);
    let back = head.offset(-dx * style.arrow_head_length, -dy * style.arrow_head_length);
    let half = style.arrow_head_length / 2.0;
    let left = back.offset(-dy * half, dx * half);
    let right = back.offset(dy * half, -dx * half);
    fill_polygon(canvas, &[head, left, right], style.stroke);
}

// ============================================================================
// Rasterization
// ============================================================================

fn draw_segment(canvas: &mut RgbaImage, a: Point, b: Point, width: f64, color: [u8; 4]) {
    let radius = (width / 2.0).max(0.5);
    let Some((x0, y0, x1, y1)) = pixel_bounds(
        canvas,
        a.x.min(b.x) - radius,
        a.y.min(b.y) - radius,
        a.x.max(b.x) + radius,
        a.y.max(b.y) + radius,
    ) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if distance_to_segment(center, a, b) <= radius {
                blend(canvas, x, y, color);
            }
        }
    }
}

fn draw_dot(canvas: &mut RgbaImage, center: Point, width: f64, color: [u8; 4]) {
    draw_segment(canvas, center, center, width, color);
}

/// Even-odd fill sampled at pixel centers.
fn fill_polygon(canvas: &mut RgbaImage, vertices: &[Point], color: [u8; 4]) {
    if vertices.len() < 3 {
        return;
    }
    let (min_x, min_y, max_x, max_y) = vertices.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), p| (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)),
    );
    let Some((x0, y0, x1, y1)) = pixel_bounds(canvas, min_x, min_y, max_x, max_y) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            if contains_point(vertices, Point::new(x as f64 + 0.5, y as f64 + 0.5)) {
                blend(canvas, x, y, color);
            }
        }
    }
}

fn contains_point(vertices: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y) && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f64::EPSILON {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// Clip a floating-point box to the canvas. Returns half-open pixel ranges.
fn pixel_bounds(
    canvas: &RgbaImage,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
) -> Option<(u32, u32, u32, u32)> {
    if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
        return None;
    }
    let (width, height) = (canvas.width() as f64, canvas.height() as f64);
    let x0 = min_x.floor().clamp(0.0, width) as u32;
    let y0 = min_y.floor().clamp(0.0, height) as u32;
    let x1 = max_x.ceil().clamp(0.0, width) as u32;
    let y1 = max_y.ceil().clamp(0.0, height) as u32;
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

/// Source-over blend of `color` onto one pixel.
fn blend(canvas: &mut RgbaImage, x: u32, y: u32, color: [u8; 4]) {
    let Rgba(dst) = *canvas.get_pixel(x, y);
    let alpha = u32::from(color[3]);
    let mix = |src: u8, dst: u8| ((u32::from(src) * alpha + u32::from(dst) * (255 - alpha)) / 255) as u8;
    let out_alpha = (alpha + u32::from(dst[3]) * (255 - alpha) / 255).min(255) as u8;
    canvas.put_pixel(
        x,
        y,
        Rgba([mix(color[0], dst[0]), mix(color[1], dst[1]), mix(color[2], dst[2]), out_alpha]),
    );
}
