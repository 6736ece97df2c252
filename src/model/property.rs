// src/model/property.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Two-level lookup `residue -> atom name -> raw fi value`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyTable {
    values: HashMap<String, HashMap<String, f64>>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, residue: &str, atom: &str, value: f64) {
        self.values
            .entry(residue.to_string())
            .or_default()
            .insert(atom.to_string(), value);
    }

    pub fn get(&self, residue: &str, atom: &str) -> Option<f64> {
        self.values.get(residue)?.get(atom).copied()
    }

    /// Number of residues in the table
    pub fn residue_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_residue_and_atom() {
        let mut table = PropertyTable::new();
        table.insert("ALA", "CA", -0.1);
        table.insert("ALA", "CB", 0.5);
        table.insert("GLY", "CA", 0.2);

        assert_eq!(table.get("ALA", "CB"), Some(0.5));
        assert_eq!(table.get("GLY", "CA"), Some(0.2));
        assert_eq!(table.get("GLY", "CB"), None);
        assert_eq!(table.get("TRP", "CA"), None);
        assert_eq!(table.residue_count(), 2);
    }

    #[test]
    fn test_deserializes_nested_json() {
        let json = r#"{ "SER": { "OG": -1.25, "CB": 0.3 } }"#;
        let table: PropertyTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.get("SER", "OG"), Some(-1.25));
    }
}
