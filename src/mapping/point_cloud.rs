// src/mapping/point_cloud.rs

use crate::error::FiError;
use crate::model::{AtomRecord, AtomSource, PropertyTable};
use nalgebra::Point3;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rescales a raw fi value into [0, 1] for coloring, rounded to 4 places.
///
/// Rounding works on the exact binary value with ties to even, so
/// 0.08775 (stored just below the half) becomes 0.0877. Scaling by 10^4
/// first would round it up.
pub fn normalize_fi(raw: f64) -> f64 {
    let scaled = (raw + 3.0) * 0.25;
    format!("{:.4}", scaled).parse().unwrap_or(scaled)
}

/// A contiguous block `[start, end)` of the cloud holding atoms that share
/// one name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelRange {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl LabelRange {
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Atoms laid out in clumps of equal name (CA, CA, CA, CB, CB, N, ...).
///
/// `coordinates`, `values` and `records` are index-aligned; `ranges` tile
/// `[0, len)` without gaps, sorted by label.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    coordinates: Vec<Point3<f64>>,
    values: Vec<f64>,
    records: Vec<AtomRecord>,
    ranges: Vec<LabelRange>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn coordinates(&self) -> &[Point3<f64>] {
        &self.coordinates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn records(&self) -> &[AtomRecord] {
        &self.records
    }

    pub fn ranges(&self) -> &[LabelRange] {
        &self.ranges
    }

    /// Label of the block holding point `index`
    pub fn label_of(&self, index: usize) -> Option<&str> {
        let pos = self.ranges.partition_point(|r| r.end <= index);
        self.ranges
            .get(pos)
            .filter(|r| r.contains(index))
            .map(|r| r.label.as_str())
    }
}

/// Groups atoms by name and flattens them into a [`PointCloud`].
///
/// Buckets are emitted in ascending name order so index ranges are stable
/// between runs; atoms keep their input order inside a bucket. Every atom
/// must have an entry in `properties`. Empty input gives an empty cloud.
pub fn build_point_cloud<A: AtomSource>(
    atoms: &[A],
    properties: &PropertyTable,
    normalize: bool,
) -> Result<PointCloud, FiError> {
    let mut buckets: BTreeMap<&str, Vec<AtomRecord>> = BTreeMap::new();

    for atom in atoms {
        let name = atom.atom_name();
        let residue = atom.residue_name();
        let raw = properties
            .get(residue, name)
            .ok_or_else(|| FiError::UnknownProperty {
                residue: residue.to_string(),
                atom: name.to_string(),
            })?;

        let p = atom.position();
        buckets.entry(name).or_default().push(AtomRecord {
            name: name.to_string(),
            residue: residue.to_string(),
            position: [p.x, p.y, p.z],
            element: atom.element().map(str::to_string),
            raw_value: raw,
            value: if normalize { normalize_fi(raw) } else { raw },
        });
    }

    let mut cloud = PointCloud::default();
    for (label, bucket) in buckets {
        let start = cloud.len();
        for record in bucket {
            cloud.coordinates.push(Point3::from(record.position));
            cloud.values.push(record.value);
            cloud.records.push(record);
        }
        cloud.ranges.push(LabelRange {
            start,
            end: cloud.len(),
            label: label.to_string(),
        });
    }

    log::info!(
        "Point cloud: {} atoms in {} name blocks",
        cloud.len(),
        cloud.ranges.len()
    );
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PdbAtom;

    fn atom(name: &str, residue: &str, x: f64) -> PdbAtom {
        PdbAtom {
            name: name.to_string(),
            residue: residue.to_string(),
            position: Point3::new(x, 0.0, 0.0),
            element: None,
        }
    }

    fn table() -> PropertyTable {
        let mut t = PropertyTable::new();
        t.insert("ALA", "CA", -1.0);
        t.insert("ALA", "CB", 0.123456);
        t.insert("ALA", "N", -3.0);
        t.insert("GLY", "CA", 1.0);
        t
    }

    #[test]
    fn test_normalize_formula() {
        assert_eq!(normalize_fi(-3.0), 0.0);
        assert_eq!(normalize_fi(1.0), 1.0);
        assert_eq!(normalize_fi(-0.5), 0.625);
        assert_eq!(normalize_fi(0.123456), 0.7809);
        assert_eq!(normalize_fi(-2.2), 0.2);
    }

    #[test]
    fn test_normalize_rounds_exact_value() {
        // Scaled values that sit a hair off a decimal half
        assert_eq!(normalize_fi(-2.887), 0.0282);
        assert_eq!(normalize_fi(-2.649), 0.0877);
        assert_eq!(normalize_fi(-2.9758), 0.006);
        assert_eq!(normalize_fi(-1.111), 0.4723);
        assert_eq!(normalize_fi(2.347), 1.3367);
    }

    #[test]
    fn test_ranges_partition_cloud_in_label_order() {
        let atoms = vec![
            atom("N", "ALA", 0.0),
            atom("CB", "ALA", 1.0),
            atom("CA", "ALA", 2.0),
            atom("CA", "GLY", 3.0),
            atom("N", "ALA", 4.0),
        ];
        let cloud = build_point_cloud(&atoms, &table(), true).unwrap();

        let labels: Vec<&str> = cloud.ranges().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["CA", "CB", "N"]);

        // Contiguous, gapless, covering [0, N)
        let mut next = 0;
        for r in cloud.ranges() {
            assert_eq!(r.start, next);
            assert!(!r.is_empty());
            next = r.end;
        }
        assert_eq!(next, cloud.len());

        // Every index belongs to exactly one range
        for i in 0..cloud.len() {
            let hits = cloud.ranges().iter().filter(|r| r.contains(i)).count();
            assert_eq!(hits, 1);
        }

        // Input order is kept inside a bucket
        let xs: Vec<f64> = cloud.coordinates().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 1.0, 0.0, 4.0]);
    }

    #[test]
    fn test_values_are_index_aligned_and_normalized() {
        let atoms = vec![
            atom("CB", "ALA", 0.0),
            atom("CA", "GLY", 1.0),
            atom("CA", "ALA", 2.0),
        ];
        let cloud = build_point_cloud(&atoms, &table(), true).unwrap();

        assert_eq!(cloud.values(), &[1.0, 0.5, 0.7809]);
        for (record, value) in cloud.records().iter().zip(cloud.values()) {
            assert_eq!(normalize_fi(record.raw_value), *value);
        }
    }

    #[test]
    fn test_raw_values_when_not_normalizing() {
        let atoms = vec![atom("CA", "ALA", 0.0)];
        let cloud = build_point_cloud(&atoms, &table(), false).unwrap();
        assert_eq!(cloud.values(), &[-1.0]);
    }

    #[test]
    fn test_label_lookup() {
        let atoms = vec![
            atom("N", "ALA", 0.0),
            atom("CA", "ALA", 1.0),
            atom("CA", "GLY", 2.0),
        ];
        let cloud = build_point_cloud(&atoms, &table(), true).unwrap();
        assert_eq!(cloud.label_of(0), Some("CA"));
        assert_eq!(cloud.label_of(1), Some("CA"));
        assert_eq!(cloud.label_of(2), Some("N"));
        assert_eq!(cloud.label_of(3), None);
    }

    #[test]
    fn test_unknown_property_names_the_atom() {
        let atoms = vec![atom("CA", "ALA", 0.0), atom("CZ", "PHE", 1.0)];
        let err = build_point_cloud(&atoms, &table(), true).unwrap_err();
        match err {
            FiError::UnknownProperty { residue, atom } => {
                assert_eq!(residue, "PHE");
                assert_eq!(atom, "CZ");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_gives_empty_cloud() {
        let atoms: Vec<PdbAtom> = Vec::new();
        let cloud = build_point_cloud(&atoms, &table(), true).unwrap();
        assert!(cloud.is_empty());
        assert!(cloud.ranges().is_empty());
    }
}
