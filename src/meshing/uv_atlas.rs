//! Texture-atlas lookup tables.
//!
//! Every opaque material maps to one 4-corner tile of the block atlas,
//! indexed by its material id. Grass is a double-tile material: its row
//! holds the top tile, its bottom reuses the dirt row, and its sides live
//! one row past the material set. The crack decals for the secondary UV
//! channel sit on their own strip, one tile per damage tier.

use cgmath::Vector2;

use crate::voxels::block::MaterialId;

/// Row index of the grass side tile, one past the last material row.
pub const GRASS_SIDE_ROW: usize = 11;

/// Rows the grass bottom tile sits below the grass row (it reuses dirt).
pub const GRASS_BOTTOM_OFFSET: usize = 10;

/// Atlas tiles per material row, corners ordered
/// left-bottom, right-bottom, left-top, right-top.
///
/// Rows 0..=10 are indexed by material id; row 11 is the grass side tile.
/// Air has no row — it never reaches the extractor.
// The tile sheet has a couple of overlapping tiles; the coordinates below
// match it as shipped.
const ATLAS: [[[f32; 2]; 4]; 12] = [
    // Dirt
    [[0.125, 0.9375], [0.1875, 0.9375], [0.125, 1.0], [0.1875, 1.0]],
    // Stone
    [[0.0, 0.875], [0.0625, 0.875], [0.0, 0.9375], [0.0625, 0.9375]],
    // Diamond
    [[0.125, 0.75], [0.1875, 0.75], [0.125, 0.8125], [0.1875, 0.81]],
    // Bedrock
    [[0.3125, 0.8125], [0.375, 0.8125], [0.3125, 0.875], [0.375, 0.875]],
    // Redstone
    [[0.1875, 0.75], [0.25, 0.75], [0.1875, 0.8125], [0.25, 0.8125]],
    // Sand
    [[0.125, 0.875], [0.1875, 0.875], [0.125, 0.9375], [0.1875, 0.9375]],
    // Leaves
    [[0.0625, 0.375], [0.125, 0.375], [0.0625, 0.4375], [0.125, 0.4375]],
    // Wood
    [[0.375, 0.625], [0.4375, 0.625], [0.375, 0.6875], [0.4375, 0.6875]],
    // WoodBase
    [[0.375, 0.625], [0.4375, 0.625], [0.375, 0.6875], [0.4375, 0.6875]],
    // Water
    [[0.875, 0.125], [0.9375, 0.125], [0.875, 0.1875], [0.9375, 0.1875]],
    // Grass top
    [[0.125, 0.375], [0.1875, 0.375], [0.125, 0.4375], [0.1875, 0.4375]],
    // Grass side
    [[0.1875, 0.9375], [0.25, 0.9375], [0.1875, 1.0], [0.25, 1.0]],
];

/// Edge length of one crack tile on the decal strip.
const CRACK_UNIT: f32 = 0.0625;

/// The atlas tile for a material row.
///
/// # Arguments
/// * `row` - A material id, or [`GRASS_SIDE_ROW`]
///
/// # Returns
/// The tile corners as [left-bottom, right-bottom, left-top, right-top].
pub fn tile(row: usize) -> [Vector2<f32>; 4] {
    let t = &ATLAS[row];
    [
        Vector2::new(t[0][0], t[0][1]),
        Vector2::new(t[1][0], t[1][1]),
        Vector2::new(t[2][0], t[2][1]),
        Vector2::new(t[3][0], t[3][1]),
    ]
}

/// The atlas tile for a material id.
pub fn material_tile(id: MaterialId) -> [Vector2<f32>; 4] {
    tile(id as usize)
}

/// The crack-decal tile for a damage tier.
///
/// Tier 0 is the blank no-crack tile; tiers 1..=10 step along the decal
/// strip at the bottom of the sheet.
///
/// # Returns
/// The tile corners as [left-bottom, right-bottom, left-top, right-top].
pub fn crack_tile(tier: u8) -> [Vector2<f32>; 4] {
    if tier == 0 {
        return [
            Vector2::new(0.6875, 0.0),
            Vector2::new(0.75, 0.0),
            Vector2::new(0.6875, CRACK_UNIT),
            Vector2::new(0.75, CRACK_UNIT),
        ];
    }
    let left = (f32::from(tier) - 1.0) * CRACK_UNIT;
    let right = f32::from(tier) * CRACK_UNIT;
    [
        Vector2::new(left, 0.0),
        Vector2::new(right, 0.0),
        Vector2::new(left, CRACK_UNIT),
        Vector2::new(right, CRACK_UNIT),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_material::Material;

    #[test]
    fn every_renderable_material_has_a_row() {
        for id in 0..=(Material::Grass as MaterialId) {
            let tile = material_tile(id);
            for corner in tile {
                assert!((0.0..=1.0).contains(&corner.x));
                assert!((0.0..=1.0).contains(&corner.y));
            }
        }
    }

    #[test]
    fn grass_indexes_three_distinct_tiles() {
        let top = material_tile(Material::Grass as MaterialId);
        let bottom = tile(Material::Grass as usize - GRASS_BOTTOM_OFFSET);
        let side = tile(GRASS_SIDE_ROW);
        assert_eq!(bottom, material_tile(Material::Dirt as MaterialId));
        assert_ne!(top, bottom);
        assert_ne!(top, side);
        assert_ne!(bottom, side);
    }

    #[test]
    fn crack_tiers_step_along_the_strip() {
        let blank = crack_tile(0);
        assert_eq!(blank[0], Vector2::new(0.6875, 0.0));

        for tier in 1..=10u8 {
            let tile = crack_tile(tier);
            assert_eq!(tile[0].x, (f32::from(tier) - 1.0) * CRACK_UNIT);
            assert_eq!(tile[1].x, f32::from(tier) * CRACK_UNIT);
            assert_eq!(tile[2].y, CRACK_UNIT);
        }
    }
}
