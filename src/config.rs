// src/config.rs

use crate::error::FiError;
use crate::mapping::assign::{AssignOptions, DEFAULT_MAX_DISTANCE};
use crate::mapping::color::{DEFAULT_LAYER_NAME, FALLBACK_COLOR};
use crate::model::Rgb;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
  /// Proximity radius for candidate atoms (Angstroms)
  pub max_distance: f64,
  /// Use the nearest atom when nothing is within `max_distance`
  pub use_nearest_fallback: bool,
  /// Rescale raw fi values into [0, 1]
  pub normalize: bool,
  /// Resolve vertices on the rayon pool before emitting colors
  pub parallel: bool,
  pub layer_name: String,
  pub fallback_color: Rgb,
  /// Directory for JSON dumps of intermediate mappings; off when unset
  pub dump_dir: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      max_distance: DEFAULT_MAX_DISTANCE,
      use_nearest_fallback: true,
      normalize: true,
      parallel: false,
      layer_name: DEFAULT_LAYER_NAME.to_string(),
      fallback_color: FALLBACK_COLOR,
      dump_dir: None,
    }
  }
}

impl Config {
  /// Loads config from the standard OS location (e.g. ~/.config/fisurf/settings.json),
  /// falling back to defaults when it is missing or unreadable.
  pub fn load() -> Self {
    let path = Self::get_path();
    if !path.exists() {
      log::info!("No config found. Using defaults.");
      return Self::default();
    }

    match Self::load_from(&path) {
      Ok(cfg) => {
        log::info!("Config loaded from {:?}", path);
        cfg
      }
      Err(e) => {
        log::warn!("Error reading config {:?}: {}. Using defaults.", path, e);
        Self::default()
      }
    }
  }

  pub fn load_from(path: &Path) -> Result<Self, FiError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
  }

  /// Saves config to the standard OS location
  pub fn save(&self) -> Result<PathBuf, FiError> {
    let path = Self::get_path();
    self.save_to(&path)?;
    Ok(path)
  }

  pub fn save_to(&self, path: &Path) -> Result<(), FiError> {
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self)?;
    log::info!("Config saved to {:?}", path);
    Ok(())
  }

  pub fn assign_options(&self) -> AssignOptions {
    AssignOptions {
      max_distance: self.max_distance,
      use_nearest_fallback: self.use_nearest_fallback,
    }
  }

  pub fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "fisurf", "fisurf") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_keep_reference_constants() {
    let cfg = Config::default();
    assert_eq!(cfg.max_distance, 2.7);
    assert!(cfg.use_nearest_fallback);
    assert!(cfg.normalize);
    assert_eq!(cfg.layer_name, "fi_cols");
    assert_eq!(cfg.fallback_color, [0.5, 0.5, 1.0]);
  }

  #[test]
  fn test_partial_file_fills_defaults() {
    let cfg: Config = serde_json::from_str(r#"{ "max_distance": 3.5, "parallel": true }"#).unwrap();
    assert_eq!(cfg.max_distance, 3.5);
    assert!(cfg.parallel);
    assert!(cfg.use_nearest_fallback);
    assert_eq!(cfg.layer_name, "fi_cols");
  }

  #[test]
  fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let cfg = Config {
      use_nearest_fallback: false,
      dump_dir: Some(PathBuf::from("tmp")),
      ..Config::default()
    };
    cfg.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), cfg);
  }

  #[test]
  fn test_assign_options_follow_config() {
    let cfg = Config {
      max_distance: 4.0,
      use_nearest_fallback: false,
      ..Config::default()
    };
    let opts = cfg.assign_options();
    assert_eq!(opts.max_distance, 4.0);
    assert!(!opts.use_nearest_fallback);
  }
}
