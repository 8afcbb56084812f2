//! # World Settings
//!
//! Configuration for a world: its dimensions in chunks, the chunk edge
//! length, the noise seed, and the generation toggles. Settings are loaded
//! once (from a JSON file or defaults) and are immutable for the lifetime
//! of the world built from them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// How aggressively the structure placer stamps trees onto the terrain.
///
/// The variants map to the noise-gate threshold used by the placer; `None`
/// disables the pass entirely.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeDensity {
    /// No trees at all; the structure pass is skipped.
    None,
    /// The default scattering of trees.
    Some,
    /// A denser forest.
    Lots,
}

impl TreeDensity {
    /// The tree-placement noise threshold for this density, or `None` when
    /// the pass is disabled. A sample below the threshold plants a tree.
    pub fn threshold(self) -> Option<f32> {
        match self {
            TreeDensity::None => None,
            TreeDensity::Some => Some(0.35),
            TreeDensity::Lots => Some(0.40),
        }
    }
}

/// Immutable world-generation parameters.
///
/// # Examples
///
/// ```
/// use voxel_worldgen::settings::WorldSettings;
///
/// let settings = WorldSettings::default();
/// assert_eq!(settings.chunk_size, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Edge length of a cubic chunk, in blocks.
    pub chunk_size: usize,
    /// World size along X, in chunks.
    pub world_size_x: usize,
    /// World size along Y, in chunks.
    pub world_size_y: usize,
    /// World size along Z, in chunks.
    pub world_size_z: usize,
    /// Seed for every noise channel. Two worlds with identical settings
    /// generate identical block volumes.
    pub seed: u32,
    /// Tree placement density.
    pub tree_density: TreeDensity,
    /// Sea level, inclusive: columns whose surface lies below this height
    /// are filled with water up to it. `None` generates no water anywhere.
    pub water_level: Option<i32>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        WorldSettings {
            chunk_size: 16,
            world_size_x: 6,
            world_size_y: 6,
            world_size_z: 6,
            seed: 0,
            tree_density: TreeDensity::Some,
            water_level: Some(65),
        }
    }
}

impl WorldSettings {
    /// Loads settings from a JSON file.
    ///
    /// Missing fields fall back to their defaults, so a settings file only
    /// needs to name the values it overrides.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON settings file
    ///
    /// # Returns
    /// The parsed settings, or a [`WorldError`] if the file cannot be read
    /// or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WorldError> {
        let text = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&text)?;
        Ok(settings)
    }

    /// Total world size along X, in blocks.
    pub fn total_x(&self) -> usize {
        self.world_size_x * self.chunk_size
    }

    /// Total world size along Y, in blocks.
    pub fn total_y(&self) -> usize {
        self.world_size_y * self.chunk_size
    }

    /// Total world size along Z, in blocks.
    pub fn total_z(&self) -> usize {
        self.world_size_z * self.chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let parsed: WorldSettings =
            serde_json::from_str(r#"{ "chunk_size": 8, "seed": 7 }"#).unwrap();
        assert_eq!(parsed.chunk_size, 8);
        assert_eq!(parsed.seed, 7);
        assert_eq!(parsed.world_size_x, WorldSettings::default().world_size_x);
        assert_eq!(parsed.tree_density, TreeDensity::Some);
    }

    #[test]
    fn water_level_can_be_disabled() {
        let parsed: WorldSettings = serde_json::from_str(r#"{ "water_level": null }"#).unwrap();
        assert_eq!(parsed.water_level, None);
    }

    #[test]
    fn density_thresholds() {
        assert_eq!(TreeDensity::None.threshold(), None);
        assert_eq!(TreeDensity::Some.threshold(), Some(0.35));
        assert_eq!(TreeDensity::Lots.threshold(), Some(0.40));
    }
}
