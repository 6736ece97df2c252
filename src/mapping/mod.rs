// src/mapping/mod.rs
//
// Atom point cloud -> surface vertex colors.

pub mod assign;
pub mod color;
pub mod pipeline;
pub mod point_cloud;
pub mod spatial_index;

pub use assign::{AssignOptions, Resolution, VertexResolver, DEFAULT_MAX_DISTANCE};
pub use color::{color_for, emit, DEFAULT_LAYER_NAME, FALLBACK_COLOR};
pub use pipeline::{color_surface, ColorOutcome, ColorReport};
pub use point_cloud::{build_point_cloud, normalize_fi, LabelRange, PointCloud};
pub use spatial_index::{Neighbor, SpatialIndex};
