//! Maps per-atom fi values onto the vertices of a molecular surface mesh.
//!
//! Atoms are grouped into a point cloud, indexed spatially, and every
//! surface vertex takes the value of the atom whose surface is closest to
//! it (`distance - radius`). The result is one greyscale color per polygon
//! corner.

pub mod config;
pub mod error;
pub mod io;
pub mod mapping;
pub mod model;
pub mod utils;

pub use config::Config;
pub use error::FiError;
pub use mapping::{color_surface, ColorOutcome, ColorReport};
