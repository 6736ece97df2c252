// src/io/mod.rs
pub mod dump;
pub mod obj;
pub mod pdb;
pub mod tables;

use crate::error::FiError;
use crate::model::SurfaceMesh;
use std::path::Path;

pub use dump::write_json_dump;
pub use pdb::{load_specific_to_generic, read_atoms};
pub use tables::{load_property_table, load_radius_table, write_color_layer};

/// Loads a surface mesh, picking the reader from the file extension.
/// Only Wavefront OBJ is understood; anything else is tried as OBJ.
pub fn load_surface(path: &Path) -> Result<SurfaceMesh, FiError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    if ext.as_deref() != Some("obj") {
        log::warn!("{:?} has no .obj extension, reading it as OBJ", path);
    }
    obj::parse_file(path)
}
