//! # Tree Placement Module
//!
//! Post-classification pass that stamps tree structures onto qualifying
//! grass blocks. Unlike height synthesis and classification this pass is
//! inherently sequential: the clearance check reads neighbor cells that
//! other columns may have already stamped.

use log::debug;

use crate::generation::noise_field::NoiseField;
use crate::settings::TreeDensity;
use crate::voxels::block::block_material::Material;
use crate::voxels::block::Block;
use crate::voxels::VolumeSize;

/// Total height of a stamped tree, trunk base to leaf cap.
pub const TREE_HEIGHT: usize = 6;

/// Vertical span that must be clear of non-air blocks around a candidate
/// trunk before a tree is planted.
const CLEARANCE_BAND: std::ops::Range<usize> = 2..7;

/// Lowest row the scan considers.
// TODO: derive the scan floor from the lowest grass in the height table
// instead of this constant.
const SCAN_FLOOR: usize = 50;

/// Columns skipped after a successful placement; trees never stand
/// shoulder to shoulder.
const SPACING_SKIP: usize = 2;

const WOODBASE_SMOOTH: f32 = 0.4;
const WOODBASE_OCTAVES: u32 = 1;

/// Scans the volume and stamps trees onto qualifying grass blocks.
///
/// A grass block qualifies when the eight columns around the trunk are all
/// air through the clearance band and the tree-placement channel samples
/// below the density threshold. The scan stops [`TREE_HEIGHT`] short of
/// the world top and one block short of the lateral edges, so a stamp can
/// never write out of bounds — insufficient headroom is a silent skip, not
/// an error.
pub fn place_trees(
    blocks: &mut [Block],
    size: &VolumeSize,
    noise: &NoiseField,
    density: TreeDensity,
) {
    let Some(threshold) = density.threshold() else {
        return;
    };
    if size.x < 3 || size.z < 3 || size.y <= SCAN_FLOOR + TREE_HEIGHT + 1 {
        return;
    }

    let mut planted = 0usize;
    let mut x = 1;
    while x < size.x - 1 {
        'column: for y in SCAN_FLOOR..size.y - TREE_HEIGHT - 1 {
            for z in 1..size.z - 1 {
                // the spacing skip below can advance x past the scan edge
                if x >= size.x - 1 {
                    break 'column;
                }
                if blocks[size.flatten(x, y, z)].material != Material::Grass as u8 {
                    continue;
                }
                if !has_space_for_tree(blocks, size, x, y, z) {
                    continue;
                }
                if noise.fractal3(x as f32, y as f32, z as f32, WOODBASE_SMOOTH, WOODBASE_OCTAVES)
                    < threshold
                {
                    build_tree(blocks, size, x, y, z);
                    planted += 1;
                    x += SPACING_SKIP;
                }
            }
        }
        x += 1;
    }

    debug!("tree pass planted {planted} trees");
}

/// Whether the eight columns around (x, y, z) are air through the
/// clearance band above the candidate trunk.
fn has_space_for_tree(
    blocks: &[Block],
    size: &VolumeSize,
    x: usize,
    y: usize,
    z: usize,
) -> bool {
    for i in CLEARANCE_BAND {
        let row = y + i;
        let ring = [
            (x + 1, z),
            (x - 1, z),
            (x, z + 1),
            (x, z - 1),
            (x + 1, z + 1),
            (x + 1, z - 1),
            (x - 1, z + 1),
            (x - 1, z - 1),
        ];
        if ring
            .iter()
            .any(|&(cx, cz)| blocks[size.flatten(cx, row, cz)].material != Material::Air as u8)
        {
            return false;
        }
    }
    true
}

/// Stamps one tree rooted at (x, y, z): a wood-base block, two trunk
/// segments, a 3x3 canopy over two rows and a single capping leaf.
pub(crate) fn build_tree(blocks: &mut [Block], size: &VolumeSize, x: usize, y: usize, z: usize) {
    blocks[size.flatten(x, y, z)] = Block::new(Material::WoodBase);
    blocks[size.flatten(x, y + 1, z)] = Block::new(Material::Wood);
    blocks[size.flatten(x, y + 2, z)] = Block::new(Material::Wood);

    for i in -1i32..=1 {
        for j in -1i32..=1 {
            for k in 3..=4 {
                let (cx, cz) = ((x as i32 + i) as usize, (z as i32 + j) as usize);
                blocks[size.flatten(cx, y + k, cz)] = Block::new(Material::Leaves);
            }
        }
    }

    blocks[size.flatten(x, y + 5, z)] = Block::new(Material::Leaves);
}
