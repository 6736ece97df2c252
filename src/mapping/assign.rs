// src/mapping/assign.rs

use crate::error::FiError;
use crate::mapping::point_cloud::PointCloud;
use crate::mapping::spatial_index::SpatialIndex;
use crate::model::{RadiusTable, SpecificToGenericMap, SurfaceMesh};
use nalgebra::Point3;
use rayon::prelude::*;
use std::collections::HashMap;

/// Proximity radius (Angstroms) for candidate atoms around a surface vertex.
/// Empirical; roughly the largest vdW radius in a protein cloud plus slack.
pub const DEFAULT_MAX_DISTANCE: f64 = 2.7;

/// Outcome for one surface vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// Property value of the winning atom
    Value(f64),
    /// No atom in range and the nearest-atom fallback is off
    Unmatched,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssignOptions {
    pub max_distance: f64,
    /// When nothing lies within `max_distance`, take the nearest atom's
    /// value regardless of distance.
    pub use_nearest_fallback: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            use_nearest_fallback: true,
        }
    }
}

/// Picks the property value for surface vertices from a point cloud.
///
/// Candidates within `max_distance` are ranked by `distance - radius`, so a
/// large atom can claim a surface point over a smaller one whose centre is
/// nominally closer. Results are cached per vertex index: a vertex shared
/// by several polygons is searched once.
pub struct VertexResolver<'a> {
    cloud: &'a PointCloud,
    index: &'a SpatialIndex,
    radii: &'a RadiusTable,
    generic: &'a SpecificToGenericMap,
    options: AssignOptions,
    cache: HashMap<usize, Resolution>,
    queries: usize,
}

impl<'a> VertexResolver<'a> {
    pub fn new(
        cloud: &'a PointCloud,
        index: &'a SpatialIndex,
        radii: &'a RadiusTable,
        generic: &'a SpecificToGenericMap,
        options: AssignOptions,
    ) -> Self {
        Self {
            cloud,
            index,
            radii,
            generic,
            options,
            cache: HashMap::new(),
            queries: 0,
        }
    }

    pub fn options(&self) -> AssignOptions {
        self.options
    }

    /// Resolves one vertex, reusing the cached result when the index was
    /// seen before.
    pub fn resolve(
        &mut self,
        vertex_index: usize,
        coordinate: &Point3<f64>,
    ) -> Result<Resolution, FiError> {
        if let Some(hit) = self.cache.get(&vertex_index) {
            return Ok(*hit);
        }

        let resolution = self.compute(vertex_index, coordinate)?;
        self.queries += 1;
        self.cache.insert(vertex_index, resolution);
        Ok(resolution)
    }

    /// Resolves every vertex the mesh's polygons use, in parallel, and
    /// stores the results in the cache. Later `resolve` calls for those
    /// vertices are lookups.
    pub fn resolve_all(&mut self, mesh: &SurfaceMesh) -> Result<(), FiError> {
        let this = &*self;
        let pending: Vec<usize> = mesh
            .used_vertices()
            .into_iter()
            .filter(|v| !this.cache.contains_key(v))
            .collect();

        let resolved: Vec<(usize, Resolution)> = pending
            .par_iter()
            .map(|&v| {
                this.compute(v, &mesh.vertices()[v])
                    .map(|resolution| (v, resolution))
            })
            .collect::<Result<_, _>>()?;

        self.queries += resolved.len();
        self.cache.extend(resolved);
        Ok(())
    }

    /// Number of spatial searches performed so far
    pub fn queries(&self) -> usize {
        self.queries
    }

    /// Vertex index -> resolution for everything resolved so far
    pub fn cache(&self) -> &HashMap<usize, Resolution> {
        &self.cache
    }

    pub fn unmatched_count(&self) -> usize {
        self.cache
            .values()
            .filter(|r| matches!(r, Resolution::Unmatched))
            .count()
    }

    fn compute(&self, vertex_index: usize, coordinate: &Point3<f64>) -> Result<Resolution, FiError> {
        let mut best: Option<(f64, usize)> = None;

        // Closest first; the score decides, lower point index breaks ties
        for candidate in self.index.within_radius(coordinate, self.options.max_distance) {
            let score = candidate.distance - self.radius_for(candidate.index)?;
            let better = match best {
                None => true,
                Some((s, i)) => score < s || (score == s && candidate.index < i),
            };
            if better {
                best = Some((score, candidate.index));
            }
        }

        let winner = match best {
            Some((_, idx)) => Some(idx),
            None => {
                log::debug!(
                    "Nothing within {} of surface vertex {}",
                    self.options.max_distance,
                    vertex_index
                );
                if !self.options.use_nearest_fallback {
                    return Ok(Resolution::Unmatched);
                }
                self.index.nearest(coordinate).map(|n| {
                    log::trace!("Nearest atom found at {:.3}", n.distance);
                    n.index
                })
            }
        };

        Ok(winner
            .and_then(|idx| self.cloud.value(idx))
            .map_or(Resolution::Unmatched, Resolution::Value))
    }

    /// Radius of the atom at `point_index`: its block label is tried in the
    /// radius table directly, then through the specific-to-generic map.
    fn radius_for(&self, point_index: usize) -> Result<f64, FiError> {
        let label = self
            .cloud
            .label_of(point_index)
            .ok_or_else(|| FiError::UnresolvableRadius {
                label: format!("#{}", point_index),
            })?;

        if let Some(r) = self.radii.get(label) {
            return Ok(r);
        }

        self.generic
            .get(label)
            .and_then(|generic| self.radii.get(generic))
            .ok_or_else(|| FiError::UnresolvableRadius {
                label: label.to_string(),
            })
    }
}
