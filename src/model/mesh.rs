// src/model/mesh.rs

use crate::error::FiError;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type Rgb = [f64; 3];

/// A named per-loop color channel, one entry per polygon corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorLayer {
    pub name: String,
    pub colors: Vec<Rgb>,
}

/// One polygon corner ("loop"): its running loop number, the vertex it
/// points at and that vertex's coordinate.
#[derive(Clone, Copy, Debug)]
pub struct Corner<'a> {
    pub loop_index: usize,
    pub vertex_index: usize,
    pub coordinate: &'a Point3<f64>,
}

/// Surface geometry snapshot plus its color layers.
///
/// Polygons only ever reference existing vertices; this is checked on
/// construction.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    vertices: Vec<Point3<f64>>,
    polygons: Vec<Vec<usize>>,
    color_layers: BTreeMap<String, Vec<Rgb>>,
    active_layer: Option<String>,
}

impl SurfaceMesh {
    pub fn new(vertices: Vec<Point3<f64>>, polygons: Vec<Vec<usize>>) -> Result<Self, FiError> {
        for (p, poly) in polygons.iter().enumerate() {
            if let Some(&bad) = poly.iter().find(|&&v| v >= vertices.len()) {
                return Err(FiError::InvalidTopology {
                    polygon: p,
                    vertex: bad,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Self {
            vertices,
            polygons,
            color_layers: BTreeMap::new(),
            active_layer: None,
        })
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn polygons(&self) -> &[Vec<usize>] {
        &self.polygons
    }

    /// Total number of polygon corners
    pub fn loop_count(&self) -> usize {
        self.polygons.iter().map(Vec::len).sum()
    }

    /// Walks every corner of every polygon in order, numbering loops
    /// consecutively.
    pub fn corners(&self) -> impl Iterator<Item = Corner<'_>> + '_ {
        self.polygons
            .iter()
            .flat_map(|poly| poly.iter().copied())
            .enumerate()
            .map(move |(loop_index, vertex_index)| Corner {
                loop_index,
                vertex_index,
                coordinate: &self.vertices[vertex_index],
            })
    }

    /// Distinct vertex indices referenced by at least one polygon, ascending
    pub fn used_vertices(&self) -> Vec<usize> {
        let set: BTreeSet<usize> = self.polygons.iter().flatten().copied().collect();
        set.into_iter().collect()
    }

    /// Writes a layer into the mesh, creating the channel if absent, and
    /// makes it the active one.
    pub fn apply_color_layer(&mut self, layer: ColorLayer) {
        self.active_layer = Some(layer.name.clone());
        self.color_layers.insert(layer.name, layer.colors);
    }

    pub fn color_layer(&self, name: &str) -> Option<&[Rgb]> {
        self.color_layers.get(name).map(Vec::as_slice)
    }

    pub fn active_layer(&self) -> Option<&str> {
        self.active_layer.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> SurfaceMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        SurfaceMesh::new(vertices, vec![vec![0, 1, 2], vec![0, 2, 3]]).unwrap()
    }

    #[test]
    fn test_corners_follow_polygon_order() {
        let mesh = quad();
        let order: Vec<(usize, usize)> = mesh
            .corners()
            .map(|c| (c.loop_index, c.vertex_index))
            .collect();
        assert_eq!(order, vec![(0, 0), (1, 1), (2, 2), (3, 0), (4, 2), (5, 3)]);
        assert_eq!(mesh.loop_count(), 6);
    }

    #[test]
    fn test_used_vertices_are_deduplicated() {
        let mesh = quad();
        assert_eq!(mesh.used_vertices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rejects_dangling_vertex() {
        let err = SurfaceMesh::new(vec![Point3::origin()], vec![vec![0, 1, 0]]).unwrap_err();
        assert!(matches!(err, FiError::InvalidTopology { polygon: 0, vertex: 1, .. }));
    }

    #[test]
    fn test_apply_creates_then_replaces_layer() {
        let mut mesh = quad();
        assert!(mesh.color_layer("fi_cols").is_none());

        mesh.apply_color_layer(ColorLayer {
            name: "fi_cols".to_string(),
            colors: vec![[0.0; 3]; 6],
        });
        assert_eq!(mesh.active_layer(), Some("fi_cols"));
        assert_eq!(mesh.color_layer("fi_cols").map(|c| c.len()), Some(6));

        mesh.apply_color_layer(ColorLayer {
            name: "fi_cols".to_string(),
            colors: vec![[1.0; 3]; 6],
        });
        assert_eq!(mesh.color_layer("fi_cols").unwrap()[0], [1.0, 1.0, 1.0]);
    }
}
