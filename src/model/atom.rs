// src/model/atom.rs

use nalgebra::Point3;
use serde::Serialize;
use std::collections::HashMap;

/// Anything that can feed the point cloud builder: a named atom position
/// inside a named residue.
pub trait AtomSource {
    /// Specific atom name within the residue (e.g. "CA", "OD2")
    fn atom_name(&self) -> &str;
    /// Residue (amino acid) name (e.g. "ASP")
    fn residue_name(&self) -> &str;
    fn position(&self) -> Point3<f64>;
    /// Generic element, when the source knows it
    fn element(&self) -> Option<&str> {
        None
    }
}

/// An `ATOM` record read from a PDB file.
#[derive(Clone, Debug, PartialEq)]
pub struct PdbAtom {
    pub name: String,
    pub residue: String,
    pub position: Point3<f64>,
    pub element: Option<String>,
}

impl AtomSource for PdbAtom {
    fn atom_name(&self) -> &str {
        &self.name
    }

    fn residue_name(&self) -> &str {
        &self.residue
    }

    fn position(&self) -> Point3<f64> {
        self.position
    }

    fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }
}

/// One atom after ingestion into a point cloud, with its property value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AtomRecord {
    pub name: String,
    pub residue: String,
    pub position: [f64; 3],
    pub element: Option<String>,
    /// Value as read from the property table
    pub raw_value: f64,
    /// Value used for coloring (normalized unless disabled)
    pub value: f64,
}

/// Remaps the specific name of an atom in a chain to its generic element,
/// e.g. `{"OD2": "O", "CD1": "C", "HH": "H"}`.
///
/// Needed to find an atom's radius when only its position name is known.
/// The first mapping seen for a name is kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpecificToGenericMap {
    map: HashMap<String, String>,
}

impl SpecificToGenericMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `specific -> generic` unless `specific` is already mapped.
    /// Returns whether the entry was inserted.
    pub fn insert_first(&mut self, specific: &str, generic: &str) -> bool {
        if self.map.contains_key(specific) {
            return false;
        }
        self.map.insert(specific.to_string(), generic.to_string());
        true
    }

    pub fn get(&self, specific: &str) -> Option<&str> {
        self.map.get(specific).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for SpecificToGenericMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (specific, generic) in iter {
            out.insert_first(specific, generic);
        }
        out
    }
}
