// src/model/elements.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Van der Waals radii in Angstroms (Bondi 1964), keyed the way PDB
/// element columns spell them (upper case).
///
/// He, Ne, Cd and Hg are left out: their symbols collide with protein atom
/// names (HE, NE, CD, HG) which are looked up here before being mapped to
/// their generic element.
pub const VDW_RADII: &[(&str, f64)] = &[
    // --- Period 1 ---
    ("H", 1.20),
    // --- Period 2 ---
    ("C", 1.70),
    ("N", 1.55),
    ("O", 1.52),
    ("F", 1.47),
    // --- Period 3 ---
    ("NA", 2.27),
    ("MG", 1.73),
    ("SI", 2.10),
    ("P", 1.80),
    ("S", 1.80),
    ("CL", 1.75),
    ("AR", 1.88),
    // --- Period 4 ---
    ("K", 2.75),
    ("NI", 1.63),
    ("CU", 1.40),
    ("ZN", 1.39),
    ("GA", 1.87),
    ("AS", 1.85),
    ("SE", 1.90),
    ("BR", 1.85),
    ("KR", 2.02),
    // --- Period 5 and beyond (selected) ---
    ("PD", 1.63),
    ("AG", 1.72),
    ("IN", 1.93),
    ("SN", 2.17),
    ("I", 1.98),
    ("XE", 2.16),
    ("PT", 1.72),
    ("AU", 1.66),
    ("TL", 1.96),
    ("PB", 2.02),
    ("U", 1.86),
];

/// Maps a generic element identifier to its radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadiusTable {
    radii: HashMap<String, f64>,
}

impl Default for RadiusTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RadiusTable {
    /// Table with no entries
    pub fn empty() -> Self {
        Self { radii: HashMap::new() }
    }

    /// The van der Waals table shipped with the crate
    pub fn builtin() -> Self {
        VDW_RADII.iter().map(|(el, r)| (*el, *r)).collect()
    }

    pub fn insert(&mut self, element: &str, radius: f64) {
        self.radii.insert(element.to_string(), radius);
    }

    /// Exact match first, then the upper-case spelling ("Cl" -> "CL").
    pub fn get(&self, element: &str) -> Option<f64> {
        if let Some(r) = self.radii.get(element) {
            return Some(*r);
        }
        self.radii.get(&element.to_ascii_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for RadiusTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut table = Self::empty();
        for (el, r) in iter {
            table.insert(el, r);
        }
        table
    }
}
