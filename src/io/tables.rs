// src/io/tables.rs

use crate::error::FiError;
use crate::model::{ColorLayer, PropertyTable, RadiusTable};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Loads `{ residue: { atom: fi } }` from JSON.
pub fn load_property_table(path: &Path) -> Result<PropertyTable, FiError> {
    let reader = BufReader::new(File::open(path)?);
    let table: PropertyTable = serde_json::from_reader(reader)?;
    log::info!(
        "Property table {:?}: {} residues",
        path,
        table.residue_count()
    );
    Ok(table)
}

/// Loads `{ element: radius }` from JSON.
pub fn load_radius_table(path: &Path) -> Result<RadiusTable, FiError> {
    let reader = BufReader::new(File::open(path)?);
    let table: RadiusTable = serde_json::from_reader(reader)?;
    log::info!("Radius table {:?}: {} elements", path, table.len());
    Ok(table)
}

pub fn write_color_layer(path: &Path, layer: &ColorLayer) -> Result<(), FiError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, layer)?;
    log::info!("Wrote {} loop colors to {:?}", layer.colors.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_table_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fi.json");
        fs::write(&path, r#"{"ALA": {"CA": -0.5, "CB": 1.0}}"#).unwrap();

        let table = load_property_table(&path).unwrap();
        assert_eq!(table.get("ALA", "CA"), Some(-0.5));
    }

    #[test]
    fn test_radius_table_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vdw.json");
        fs::write(&path, r#"{"C": 1.7, "O": 1.52}"#).unwrap();

        let table = load_radius_table(&path).unwrap();
        assert_eq!(table.get("O"), Some(1.52));
        assert_eq!(table.get("N"), None);
    }

    #[test]
    fn test_bad_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_radius_table(&path), Err(FiError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_property_table(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, FiError::Io(_)));
    }

    #[test]
    fn test_write_color_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("colors.json");
        let layer = ColorLayer {
            name: "fi_cols".to_string(),
            colors: vec![[0.25, 0.25, 0.25], [0.5, 0.5, 1.0]],
        };
        write_color_layer(&path, &layer).unwrap();

        let back: ColorLayer = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, layer);
    }
}
