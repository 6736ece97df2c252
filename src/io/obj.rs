// src/io/obj.rs

use crate::error::FiError;
use crate::model::SurfaceMesh;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Reads the geometry of a Wavefront OBJ surface: `v` and `f` lines only.
///
/// Face entries may use the `v/vt/vn` forms; negative indices count back
/// from the last vertex read so far.
pub fn parse<R: BufRead>(reader: R) -> Result<SurfaceMesh, FiError> {
    let mut vertices = Vec::new();
    let mut polygons = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let coords: Vec<&str> = parts.take(3).collect();
                if coords.len() < 3 {
                    return Err(malformed(line_no, "vertex needs three coordinates"));
                }
                let mut xyz = [0.0; 3];
                for (slot, raw) in xyz.iter_mut().zip(&coords) {
                    *slot = raw
                        .parse()
                        .map_err(|_| malformed(line_no, &format!("invalid coordinate {:?}", raw)))?;
                }
                vertices.push(Point3::from(xyz));
            }
            Some("f") => {
                let mut poly = Vec::new();
                for entry in parts {
                    poly.push(face_index(entry, vertices.len(), line_no)?);
                }
                if poly.len() < 3 {
                    return Err(malformed(line_no, "face needs at least three corners"));
                }
                polygons.push(poly);
            }
            _ => continue,
        }
    }

    log::info!(
        "Surface mesh: {} vertices, {} polygons",
        vertices.len(),
        polygons.len()
    );
    SurfaceMesh::new(vertices, polygons)
}

pub fn parse_file(path: &Path) -> Result<SurfaceMesh, FiError> {
    let file = File::open(path)?;
    parse(io::BufReader::new(file))
}

/// Converts one face entry to a 0-based vertex index.
fn face_index(entry: &str, vertex_count: usize, line_no: usize) -> Result<usize, FiError> {
    let raw = entry.split('/').next().unwrap_or(entry);
    let idx: i64 = raw
        .parse()
        .map_err(|_| malformed(line_no, &format!("invalid face index {:?}", entry)))?;

    let resolved = if idx > 0 {
        idx - 1
    } else {
        vertex_count as i64 + idx
    };

    if idx == 0 || resolved < 0 || resolved >= vertex_count as i64 {
        return Err(malformed(
            line_no,
            &format!("face index {} out of range ({} vertices)", idx, vertex_count),
        ));
    }
    Ok(resolved as usize)
}

fn malformed(line: usize, reason: &str) -> FiError {
    FiError::MalformedRecord {
        line,
        reason: reason.to_string(),
    }
}
