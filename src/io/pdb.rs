// src/io/pdb.rs
//
// Fixed-column PDB reading. Column ranges are 0-based byte offsets,
// end exclusive.

use crate::error::FiError;
use crate::model::{PdbAtom, SpecificToGenericMap};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

const RECORD_TAG: &str = "ATOM";
const NAME_COLS: (usize, usize) = (12, 16);
const RESIDUE_COLS: (usize, usize) = (17, 20);
const X_COLS: (usize, usize) = (30, 38);
const Y_COLS: (usize, usize) = (38, 46);
const Z_COLS: (usize, usize) = (46, 54);
const ELEMENT_COLS: (usize, usize) = (76, 78);

/// Builds the specific-name -> element map from the `ATOM` records,
/// e.g. `{"OD2": "O", "CD1": "C", "HH": "H"}`. The first element seen for
/// a name is kept.
pub fn load_specific_to_generic<R: BufRead>(reader: R) -> Result<SpecificToGenericMap, FiError> {
    let mut map = SpecificToGenericMap::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.starts_with(RECORD_TAG) {
            continue;
        }
        let line_no = i + 1;

        let specific = required(&line, NAME_COLS, line_no, "atom name")?;
        let element = required(&line, ELEMENT_COLS, line_no, "element symbol")?;
        map.insert_first(specific, element);
    }

    log::info!("Specific-to-generic map holds {} atom names", map.len());
    Ok(map)
}

pub fn load_specific_to_generic_file(path: &Path) -> Result<SpecificToGenericMap, FiError> {
    let file = File::open(path)?;
    load_specific_to_generic(io::BufReader::new(file))
}

/// Reads every `ATOM` record as an atom entity.
///
/// Name, residue and coordinates are required; the element column is kept
/// when present.
pub fn read_atoms<R: BufRead>(reader: R) -> Result<Vec<PdbAtom>, FiError> {
    let mut atoms = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.starts_with(RECORD_TAG) {
            continue;
        }
        let line_no = i + 1;

        let name = required(&line, NAME_COLS, line_no, "atom name")?;
        let residue = required(&line, RESIDUE_COLS, line_no, "residue name")?;
        let x = coordinate(&line, X_COLS, line_no, "x")?;
        let y = coordinate(&line, Y_COLS, line_no, "y")?;
        let z = coordinate(&line, Z_COLS, line_no, "z")?;
        let element = field(&line, ELEMENT_COLS).map(str::to_string);

        atoms.push(PdbAtom {
            name: name.to_string(),
            residue: residue.to_string(),
            position: Point3::new(x, y, z),
            element,
        });
    }

    log::info!("Read {} ATOM records", atoms.len());
    Ok(atoms)
}

pub fn read_atoms_file(path: &Path) -> Result<Vec<PdbAtom>, FiError> {
    let file = File::open(path)?;
    read_atoms(io::BufReader::new(file))
}

/// Trimmed contents of a column range. Lines cut short inside the range
/// yield what is there; an absent or blank field yields `None`.
fn field(line: &str, (start, end): (usize, usize)) -> Option<&str> {
    if start >= line.len() {
        return None;
    }
    let end = end.min(line.len());
    let value = line.get(start..end)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn required<'a>(
    line: &'a str,
    cols: (usize, usize),
    line_no: usize,
    what: &str,
) -> Result<&'a str, FiError> {
    field(line, cols).ok_or_else(|| FiError::MalformedRecord {
        line: line_no,
        reason: format!("missing {} in columns {}-{}", what, cols.0 + 1, cols.1),
    })
}

fn coordinate(line: &str, cols: (usize, usize), line_no: usize, axis: &str) -> Result<f64, FiError> {
    let raw = required(line, cols, line_no, axis)?;
    raw.parse().map_err(|_| FiError::MalformedRecord {
        line: line_no,
        reason: format!("invalid {} coordinate {:?}", axis, raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
HEADER    TEST PROTEIN
ATOM      1  N   ASP A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ASP A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  OD2 ASP A   1      12.000   5.000  -4.000  1.00  0.00           O
HETATM    4  O   HOH A   2       1.000   2.000   3.000  1.00  0.00           O
ATOM      5  CA  GLY A   2       9.000   8.000   7.000  1.00  0.00          CA
END
";

    #[test]
    fn test_specific_to_generic() {
        let map = load_specific_to_generic(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(map.get("N"), Some("N"));
        assert_eq!(map.get("OD2"), Some("O"));
        // Later CA record with a different element column is ignored
        assert_eq!(map.get("CA"), Some("C"));
        // HETATM records are skipped
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_short_record_is_fatal() {
        let input = "ATOM      1  N   ASP A   1      11.104   6.134  -6.504\n";
        let err = load_specific_to_generic(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, FiError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_read_atoms() {
        let atoms = read_atoms(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(atoms.len(), 4);

        let od2 = &atoms[2];
        assert_eq!(od2.name, "OD2");
        assert_eq!(od2.residue, "ASP");
        assert_eq!(od2.position, Point3::new(12.0, 5.0, -4.0));
        assert_eq!(od2.element.as_deref(), Some("O"));

        assert_eq!(atoms[3].residue, "GLY");
    }

    #[test]
    fn test_read_atoms_without_element_column() {
        let input = "ATOM      1  N   ASP A   1      11.104   6.134  -6.504\n";
        let atoms = read_atoms(Cursor::new(input)).unwrap();
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].element, None);
    }

    #[test]
    fn test_bad_coordinate() {
        let input = "\
ATOM      1  N   ASP A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ASP A   1      11.6x9   6.071  -5.147  1.00  0.00           C
";
        let err = read_atoms(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, FiError::MalformedRecord { line: 2, .. }));
    }
}
