use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::{Orientation, RenderConfig};
use crate::terrain::Terrain;

/// Every field has a default; a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub radius: u32,
    pub hex_size: f64,
    pub orientation: Orientation,
    pub seed: u64,
    pub start_terrain: Terrain,
    /// Roll a settlement for every cell after terrain.
    pub settlements: bool,
    pub snapshot_path: PathBuf,
    /// No image is written when unset.
    pub image_path: Option<PathBuf>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            hex_size: 10.0,
            orientation: Orientation::Flat,
            seed: 42,
            start_terrain: Terrain::Plain,
            settlements: true,
            snapshot_path: PathBuf::from("hex_grid.json"),
            image_path: Some(PathBuf::from("hex_grid.png")),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            size: self.hex_size,
            orientation: self.orientation,
            ..RenderConfig::default()
        }
    }
}
