//! # Block Classifier Module
//!
//! Turns column heights plus the pseudo-3D noise channels into a material
//! for every cell of the volume. Classification of a cell never reads any
//! other cell's material, only the shared read-only height table, so the
//! full volume is classified as one parallel map.

use rayon::prelude::*;

use crate::generation::height_map::HeightData;
use crate::generation::noise_field::NoiseField;
use crate::voxels::block::block_material::Material;
use crate::voxels::block::Block;
use crate::voxels::VolumeSize;

// Caves should be erratic, so their channel runs at a higher probability
// and more octaves than the ores.
const CAVE_PROBABILITY: f32 = 0.44;
const CAVE_SMOOTH: f32 = 0.09;
const CAVE_OCTAVES: u32 = 3;

const DIAMOND_PROBABILITY: f32 = 0.38;
const DIAMOND_SMOOTH: f32 = 0.06;
const DIAMOND_OCTAVES: u32 = 1;
/// Diamond never spawns at or above this height.
const DIAMOND_MAX_HEIGHT: i32 = 80;

const REDSTONE_PROBABILITY: f32 = 0.36;
const REDSTONE_SMOOTH: f32 = 0.06;
const REDSTONE_OCTAVES: u32 = 1;
/// Redstone never spawns at or above this height.
const REDSTONE_MAX_HEIGHT: i32 = 50;

/// Classifies the cell at (x, y, z) given its column's heights.
///
/// The decision runs top-down through the layer thresholds:
/// 1. y = 0 is always bedrock — the world floor.
/// 2. Within the bedrock layer: bedrock.
/// 3. Within the stone layer: diamond, then redstone (diamond wins on
///    overlap), each gated by its own noise channel and height cutoff;
///    otherwise stone.
/// 4. Above the stone layer: grass exactly at the surface, dirt below it,
///    water at or below `water_level` (when sea level is enabled), air
///    otherwise.
///
/// Finally the cave channel may carve the result back to air; caves never
/// carve through water.
pub fn classify(
    noise: &NoiseField,
    heights: &HeightData,
    water_level: Option<i32>,
    x: i32,
    y: i32,
    z: i32,
) -> Material {
    if y == 0 {
        return Material::Bedrock;
    }

    let (xf, yf, zf) = (x as f32, y as f32, z as f32);

    let material = if y <= heights.bedrock {
        Material::Bedrock
    } else if y <= heights.stone {
        if noise.fractal3(xf, yf, zf, DIAMOND_SMOOTH, DIAMOND_OCTAVES) < DIAMOND_PROBABILITY
            && y < DIAMOND_MAX_HEIGHT
        {
            Material::Diamond
        } else if noise.fractal3(xf, yf, zf, REDSTONE_SMOOTH, REDSTONE_OCTAVES)
            < REDSTONE_PROBABILITY
            && y < REDSTONE_MAX_HEIGHT
        {
            Material::Redstone
        } else {
            Material::Stone
        }
    } else if y == heights.dirt {
        Material::Grass
    } else if y < heights.dirt {
        Material::Dirt
    } else if water_level.is_some_and(|level| y <= level) {
        Material::Water
    } else {
        Material::Air
    };

    if material != Material::Water
        && noise.fractal3(xf, yf, zf, CAVE_SMOOTH, CAVE_OCTAVES) < CAVE_PROBABILITY
    {
        return Material::Air;
    }

    material
}

/// Classifies the whole volume into pristine blocks.
///
/// Runs as a parallel map over the flattened cell range; the caller must
/// have gathered the complete height table first (the surface branch reads
/// it for every cell).
pub fn classify_volume(
    noise: &NoiseField,
    heights: &[HeightData],
    size: &VolumeSize,
    water_level: Option<i32>,
) -> Vec<Block> {
    (0..size.volume())
        .into_par_iter()
        .map(|index| {
            let (x, y, z) = size.deflatten(index);
            let column = &heights[size.column(x, z)];
            Block::new(classify(
                noise,
                column,
                water_level,
                x as i32,
                y as i32,
                z as i32,
            ))
        })
        .collect()
}
