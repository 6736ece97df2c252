// src/mapping/spatial_index.rs

use nalgebra::Point3;
use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree};

/// A cloud point tagged with its index in the flat coordinate list
type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// A point returned by a proximity query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub coordinate: Point3<f64>,
    /// Index into the point cloud
    pub index: usize,
    pub distance: f64,
}

/// Nearest-neighbour structure over the point cloud coordinates.
///
/// Bulk-loaded R*-tree; O(N log N) to build. Queries report input
/// point indices and Euclidean distances.
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    pub fn build(coordinates: &[Point3<f64>]) -> Self {
        let points: Vec<IndexedPoint> = coordinates
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new([p.x, p.y, p.z], i))
            .collect();

        Self {
            tree: RTree::bulk_load(points),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The closest point; equidistant points resolve to the lowest index.
    pub fn nearest(&self, point: &Point3<f64>) -> Option<Neighbor> {
        let query = [point.x, point.y, point.z];
        let first = self.tree.nearest_neighbor(&query)?;

        // Everything within the best distance is tied with it
        let best_d2 = first.distance_2(&query);
        let best = self
            .tree
            .locate_within_distance(query, best_d2)
            .min_by_key(|p| p.data)
            .unwrap_or(first);

        Some(to_neighbor(best, point))
    }

    /// Every point with `distance <= radius`, closest first. Equal
    /// distances are ordered by ascending index.
    pub fn within_radius(&self, point: &Point3<f64>, radius: f64) -> Vec<Neighbor> {
        if radius < 0.0 {
            return Vec::new();
        }

        let query = [point.x, point.y, point.z];
        let mut found: Vec<Neighbor> = self
            .tree
            .locate_within_distance(query, radius * radius)
            .map(|p| to_neighbor(p, point))
            .collect();

        found.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.index.cmp(&b.index))
        });
        found
    }
}

fn to_neighbor(p: &IndexedPoint, query: &Point3<f64>) -> Neighbor {
    let coordinate = Point3::from(*p.geom());
    Neighbor {
        coordinate,
        index: p.data,
        distance: nalgebra::distance(&coordinate, query),
    }
}
