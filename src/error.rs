// src/error.rs

use std::fmt;
use std::io;

/// Errors produced while loading tables, building the point cloud or
/// resolving surface vertices.
#[derive(Debug)]
pub enum FiError {
    /// An input record is missing required fields or holds unparsable values.
    MalformedRecord { line: usize, reason: String },
    /// An atom has no entry in the property table.
    UnknownProperty { residue: String, atom: String },
    /// Neither the radius table nor the specific-to-generic map yields a radius.
    UnresolvableRadius { label: String },
    /// A polygon references a vertex the mesh does not have.
    InvalidTopology { polygon: usize, vertex: usize, vertex_count: usize },
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for FiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FiError::MalformedRecord { line, reason } => {
                write!(f, "Malformed record on line {}: {}", line, reason)
            }
            FiError::UnknownProperty { residue, atom } => {
                write!(f, "No property value for atom {} in residue {}", atom, residue)
            }
            FiError::UnresolvableRadius { label } => {
                write!(f, "No radius known for atom label {}", label)
            }
            FiError::InvalidTopology { polygon, vertex, vertex_count } => write!(
                f,
                "Polygon {} references vertex {}, mesh has {} vertices",
                polygon, vertex, vertex_count
            ),
            FiError::Io(e) => write!(f, "I/O error: {}", e),
            FiError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for FiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FiError::Io(e) => Some(e),
            FiError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FiError {
    fn from(e: io::Error) -> Self {
        FiError::Io(e)
    }
}

impl From<serde_json::Error> for FiError {
    fn from(e: serde_json::Error) -> Self {
        FiError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offending_key() {
        let err = FiError::UnknownProperty {
            residue: "ALA".to_string(),
            atom: "CZ".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ALA"));
        assert!(msg.contains("CZ"));

        let err = FiError::MalformedRecord { line: 7, reason: "short".to_string() };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;
        let err: FiError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
    }
}
