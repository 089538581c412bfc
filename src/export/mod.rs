//! Export artifacts: the coordinates file and the annotated image.

mod coordinates;
mod error;
mod render;

pub use coordinates::{ExportedAnnotation, export_coordinates, to_json, write_coordinates};
pub use error::ExportError;
pub use render::{RenderStyle, render_annotations, write_png};

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::constants::{COORDINATES_FILE_SUFFIX, IMAGE_FILE_SUFFIX};
use crate::editor::Editor;

/// Strip the last extension from a file name.
///
/// `"photo.jpg"` becomes `"photo"` and `"scan.tar.gz"` becomes `"scan.tar"`.
/// Names without an extension, or ending in a bare dot, are returned unchanged.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() && !file_name[dot + 1..].contains('/') => {
            &file_name[..dot]
        }
        _ => file_name,
    }
}

/// `<base>-annotations.json`
pub fn coordinates_file_name(image_name: &str) -> Result<String, ExportError> {
    Ok(format!("{}{}", non_empty_base(image_name)?, COORDINATES_FILE_SUFFIX))
}

/// `<base>-with-annotations.png`
pub fn image_file_name(image_name: &str) -> Result<String, ExportError> {
    Ok(format!("{}{}", non_empty_base(image_name)?, IMAGE_FILE_SUFFIX))
}

fn non_empty_base(image_name: &str) -> Result<&str, ExportError> {
    let base = base_name(image_name);
    if base.trim().is_empty() {
        return Err(ExportError::EmptyFileName(image_name.to_string()));
    }
    Ok(base)
}

/// Files written by [`Editor::write_exports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub coordinates: PathBuf,
    pub image: PathBuf,
}

impl Editor {
    /// Saved annotations in the Cartesian export frame.
    pub fn export_coordinates(&self) -> Result<Vec<ExportedAnnotation>, ExportError> {
        export_coordinates(self.annotations(), self.viewport().image_size())
    }

    /// The coordinates file contents.
    pub fn coordinates_json(&self) -> Result<String, ExportError> {
        to_json(&self.export_coordinates()?)
    }

    /// Saved shapes drawn over `background`, which must be the source image at natural size.
    pub fn render_export(&self, background: &RgbaImage) -> RgbaImage {
        let style = RenderStyle::for_scale(self.preferences().stroke_width, self.scale());
        render_annotations(background, self.annotations(), &style)
    }

    /// Write both artifacts next to each other in `out_dir`, named after `image_name`.
    pub fn write_exports(
        &self,
        background: &RgbaImage,
        image_name: &str,
        out_dir: &Path,
    ) -> Result<ExportPaths, ExportError> {
        let paths = ExportPaths {
            coordinates: out_dir.join(coordinates_file_name(image_name)?),
            image: out_dir.join(image_file_name(image_name)?),
        };
        write_coordinates(&self.export_coordinates()?, &paths.coordinates)?;
        write_png(&self.render_export(background), &paths.image)?;
        Ok(paths)
    }
}
