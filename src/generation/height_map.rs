//! # Height Map Module
//!
//! Per-column terrain height synthesis. Every (x, z) column gets three
//! thresholds — the tops of the bedrock, stone and dirt layers — each from
//! its own fractal-noise channel. Columns are independent, so the full
//! table is computed as one parallel map with a join before classification
//! reads it.

use rayon::prelude::*;

use crate::generation::noise_field::NoiseField;
use crate::voxels::VolumeSize;

/// Tallest the dirt surface can reach.
const MAX_HEIGHT_DIRT: f32 = 90.0;
/// Sampling scale of the surface channel; bigger numbers sample the noise
/// function faster.
const SMOOTH_DIRT: f32 = 0.01;
/// Octaves of the surface channel; the surface carries the most detail.
const OCTAVES_DIRT: u32 = 3;
const PERSISTENCE_DIRT: f32 = 0.5;

/// Tallest the stone layer can reach.
const MAX_HEIGHT_STONE: f32 = 80.0;
const SMOOTH_STONE: f32 = 0.05;
const OCTAVES_STONE: u32 = 2;
const PERSISTENCE_STONE: f32 = 0.25;

/// Tallest the bedrock layer can reach.
const MAX_HEIGHT_BEDROCK: f32 = 15.0;
const SMOOTH_BEDROCK: f32 = 0.1;
const OCTAVES_BEDROCK: u32 = 1;
const PERSISTENCE_BEDROCK: f32 = 0.5;

/// The three layer thresholds of one (x, z) column.
///
/// Computed once per world generation and read-only thereafter. The layers
/// usually nest as bedrock ≤ stone ≤ dirt but nothing enforces it; the
/// classifier's branch order keeps the occasional overlap harmless.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeightData {
    /// Top of the bedrock layer.
    pub bedrock: i32,
    /// Top of the stone layer.
    pub stone: i32,
    /// Height of the dirt surface; the block exactly at this height grows
    /// grass.
    pub dirt: i32,
}

/// Linearly maps a [0, 1] noise value into [new_min, new_max].
fn map(new_min: f32, new_max: f32, value: f32) -> f32 {
    new_min + (new_max - new_min) * value.clamp(0.0, 1.0)
}

/// The bedrock-layer top for column (x, z).
pub fn bedrock_height(noise: &NoiseField, x: f32, z: f32) -> i32 {
    map(
        0.0,
        MAX_HEIGHT_BEDROCK,
        noise.fractal(
            x * SMOOTH_BEDROCK,
            z * SMOOTH_BEDROCK,
            OCTAVES_BEDROCK,
            PERSISTENCE_BEDROCK,
        ),
    ) as i32
}

/// The stone-layer top for column (x, z).
pub fn stone_height(noise: &NoiseField, x: f32, z: f32) -> i32 {
    map(
        0.0,
        MAX_HEIGHT_STONE,
        noise.fractal(
            x * SMOOTH_STONE,
            z * SMOOTH_STONE,
            OCTAVES_STONE,
            PERSISTENCE_STONE,
        ),
    ) as i32
}

/// The dirt-surface height for column (x, z).
pub fn dirt_height(noise: &NoiseField, x: f32, z: f32) -> i32 {
    map(
        0.0,
        MAX_HEIGHT_DIRT,
        noise.fractal(x * SMOOTH_DIRT, z * SMOOTH_DIRT, OCTAVES_DIRT, PERSISTENCE_DIRT),
    ) as i32
}

/// The full [`HeightData`] for column (x, z).
pub fn column_heights(noise: &NoiseField, x: f32, z: f32) -> HeightData {
    HeightData {
        bedrock: bedrock_height(noise, x, z),
        stone: stone_height(noise, x, z),
        dirt: dirt_height(noise, x, z),
    }
}

/// Synthesizes the height table for every column of the volume.
///
/// Pure per column, so the table is computed as a parallel map over the
/// column index range; the returned vector is indexed by
/// [`VolumeSize::column`].
pub fn synthesize(noise: &NoiseField, size: &VolumeSize) -> Vec<HeightData> {
    (0..size.columns())
        .into_par_iter()
        .map(|index| {
            let (x, z) = size.decolumn(index);
            column_heights(noise, x as f32, z as f32)
        })
        .collect()
}
