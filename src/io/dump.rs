// src/io/dump.rs
//
// Optional diagnostic sidecar files for intermediate mappings.

use crate::error::FiError;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `value` as indented JSON with object keys sorted, so dumps of
/// hash maps diff cleanly between runs.
pub fn write_json_dump<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), FiError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // serde_json's Value keeps object keys in a BTreeMap
    let sorted = serde_json::to_value(value)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &sorted)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    log::debug!("Dumped {:?}", path);
    Ok(())
}
