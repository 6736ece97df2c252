//src/model/mod.rs
pub mod atom;
pub mod elements;
pub mod mesh;
pub mod property;

// Re-exports for cleaner imports
pub use atom::{AtomRecord, AtomSource, PdbAtom, SpecificToGenericMap};
pub use elements::RadiusTable;
pub use mesh::{ColorLayer, Corner, Rgb, SurfaceMesh};
pub use property::PropertyTable;
