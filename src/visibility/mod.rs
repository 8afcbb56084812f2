//! # Face Visibility Module
//!
//! Maintains the per-block face-exposure masks the mesh extractor consumes.
//!
//! The mask semantics form a small state machine per face:
//! - A solid block's face bit is set iff the neighbor in that direction is
//!   out of the volume or is air/water.
//! - A water block only ever exposes its top face, and only when the block
//!   directly above is air.
//! - The world boundary is a first-class case, never a bounds-checked read
//!   past the array: lateral world edges count as exposed for solid
//!   blocks, and the y extremes are forced for every block regardless of
//!   material — the top layer always faces open sky, the bottom layer
//!   always faces the floor.
//!
//! Three operations keep the masks true: a full-volume recompute, and two
//! single-block incremental updates (after a removal, after a placement)
//! touching at most seven blocks each. Applying any sequence of
//! incremental updates leaves exactly the mask array a full recompute of
//! the resulting materials would produce; tests pin that equivalence.

use log::debug;

use crate::voxels::block::block_face::FaceMask;
use crate::voxels::block::Block;
use crate::voxels::VolumeSize;

/// Recomputes every block's mask from the material array alone.
///
/// Two passes: an interior pass that inspects the six in-bounds neighbors
/// of every cell, then a corrective pass for the volume boundary (the
/// interior logic cannot see past the array edge).
pub fn compute_all(blocks: &mut [Block], size: &VolumeSize) {
    let started = std::time::Instant::now();

    for index in 0..blocks.len() {
        let (x, y, z) = size.deflatten(index);
        let mask = interior_mask(blocks, size, x, y, z);
        blocks[index].faces = mask;
    }
    apply_boundary_policy(blocks, size);

    debug!(
        "face visibility recomputed for {} blocks in {:?}",
        blocks.len(),
        started.elapsed()
    );
}

/// The mask of the cell at (x, y, z) considering in-bounds neighbors only.
fn interior_mask(blocks: &[Block], size: &VolumeSize, x: usize, y: usize, z: usize) -> FaceMask {
    let block = &blocks[size.flatten(x, y, z)];
    let mut mask = FaceMask::empty();

    if block.is_air() {
        return mask;
    }

    if block.is_water() {
        if y + 1 < size.y && blocks[size.flatten(x, y + 1, z)].is_air() {
            mask.set(FaceMask::TOP);
        }
        return mask;
    }

    let exposed = |nx: usize, ny: usize, nz: usize| !blocks[size.flatten(nx, ny, nz)].is_solid();

    if x + 1 < size.x && exposed(x + 1, y, z) {
        mask.set(FaceMask::RIGHT);
    }
    if x > 0 && exposed(x - 1, y, z) {
        mask.set(FaceMask::LEFT);
    }
    if y + 1 < size.y && exposed(x, y + 1, z) {
        mask.set(FaceMask::TOP);
    }
    if y > 0 && exposed(x, y - 1, z) {
        mask.set(FaceMask::BOTTOM);
    }
    if z + 1 < size.z && exposed(x, y, z + 1) {
        mask.set(FaceMask::FRONT);
    }
    if z > 0 && exposed(x, y, z - 1) {
        mask.set(FaceMask::BACK);
    }

    mask
}

/// Forces the boundary faces of the volume.
///
/// Lateral world edges expose solid blocks only; the top layer always
/// faces open sky and the bottom layer always faces the world floor, so
/// their bits are forced for every block regardless of material.
fn apply_boundary_policy(blocks: &mut [Block], size: &VolumeSize) {
    if size.volume() == 0 {
        return;
    }

    for y in 0..size.y {
        for z in 0..size.z {
            let right = size.flatten(size.x - 1, y, z);
            if blocks[right].is_solid() {
                blocks[right].faces.set(FaceMask::RIGHT);
            }
            let left = size.flatten(0, y, z);
            if blocks[left].is_solid() {
                blocks[left].faces.set(FaceMask::LEFT);
            }
        }
    }

    for y in 0..size.y {
        for x in 0..size.x {
            let front = size.flatten(x, y, size.z - 1);
            if blocks[front].is_solid() {
                blocks[front].faces.set(FaceMask::FRONT);
            }
            let back = size.flatten(x, y, 0);
            if blocks[back].is_solid() {
                blocks[back].faces.set(FaceMask::BACK);
            }
        }
    }

    for z in 0..size.z {
        for x in 0..size.x {
            // there is always sky above and floor below
            blocks[size.flatten(x, size.y - 1, z)].faces.set(FaceMask::TOP);
            blocks[size.flatten(x, 0, z)].faces.set(FaceMask::BOTTOM);
        }
    }
}

/// Updates masks after the block at (x, y, z) was removed (became air).
///
/// Clears the emptied cell's own mask (re-applying the y-extreme boundary
/// bits), then grants each surviving neighbor its face toward the now
/// traversable cell: solid neighbors on any side, and a water neighbor
/// directly below, whose surface just met open air.
pub fn update_after_destroy(blocks: &mut [Block], size: &VolumeSize, x: usize, y: usize, z: usize) {
    let index = size.flatten(x, y, z);
    blocks[index].faces.clear_all();
    if y == size.y - 1 {
        blocks[index].faces.set(FaceMask::TOP);
    }
    if y == 0 {
        blocks[index].faces.set(FaceMask::BOTTOM);
    }

    if x > 0 {
        let neighbor = size.flatten(x - 1, y, z);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.set(FaceMask::RIGHT);
        }
    }
    if x + 1 < size.x {
        let neighbor = size.flatten(x + 1, y, z);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.set(FaceMask::LEFT);
        }
    }
    if y > 0 {
        let neighbor = size.flatten(x, y - 1, z);
        if blocks[neighbor].is_solid() || blocks[neighbor].is_water() {
            blocks[neighbor].faces.set(FaceMask::TOP);
        }
    }
    if y + 1 < size.y {
        let neighbor = size.flatten(x, y + 1, z);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.set(FaceMask::BOTTOM);
        }
    }
    if z > 0 {
        let neighbor = size.flatten(x, y, z - 1);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.set(FaceMask::FRONT);
        }
    }
    if z + 1 < size.z {
        let neighbor = size.flatten(x, y, z + 1);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.set(FaceMask::BACK);
        }
    }
}

/// Updates masks after a block was placed at (x, y, z) into a previously
/// traversable cell.
///
/// For a solid block: each direction either exposes the new block's face
/// (world edge, or air/water neighbor) or occludes the solid neighbor's
/// face pointing back. A solid block placed over water also takes away the
/// water's open-sky top. For placed water: only the top face can show, and
/// only under open air; water stacked under more water loses its top.
pub fn update_after_build(blocks: &mut [Block], size: &VolumeSize, x: usize, y: usize, z: usize) {
    let index = size.flatten(x, y, z);

    if blocks[index].is_water() {
        let mut mask = FaceMask::empty();
        if y + 1 >= size.y || blocks[size.flatten(x, y + 1, z)].is_air() {
            mask.set(FaceMask::TOP);
        }
        if y == 0 {
            mask.set(FaceMask::BOTTOM);
        }
        blocks[index].faces = mask;
        if y > 0 {
            let below = size.flatten(x, y - 1, z);
            if blocks[below].is_water() {
                blocks[below].faces.clear(FaceMask::TOP);
            }
        }
        return;
    }

    let mut mask = FaceMask::empty();

    if x > 0 {
        let neighbor = size.flatten(x - 1, y, z);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.clear(FaceMask::RIGHT);
        } else {
            mask.set(FaceMask::LEFT);
        }
    } else {
        mask.set(FaceMask::LEFT);
    }

    if x + 1 < size.x {
        let neighbor = size.flatten(x + 1, y, z);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.clear(FaceMask::LEFT);
        } else {
            mask.set(FaceMask::RIGHT);
        }
    } else {
        mask.set(FaceMask::RIGHT);
    }

    if y > 0 {
        let neighbor = size.flatten(x, y - 1, z);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.clear(FaceMask::TOP);
        } else {
            if blocks[neighbor].is_water() {
                // the water below no longer meets open air
                blocks[neighbor].faces.clear(FaceMask::TOP);
            }
            mask.set(FaceMask::BOTTOM);
        }
    } else {
        mask.set(FaceMask::BOTTOM);
    }

    if y + 1 < size.y {
        let neighbor = size.flatten(x, y + 1, z);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.clear(FaceMask::BOTTOM);
        } else {
            mask.set(FaceMask::TOP);
        }
    } else {
        mask.set(FaceMask::TOP);
    }

    if z > 0 {
        let neighbor = size.flatten(x, y, z - 1);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.clear(FaceMask::FRONT);
        } else {
            mask.set(FaceMask::BACK);
        }
    } else {
        mask.set(FaceMask::BACK);
    }

    if z + 1 < size.z {
        let neighbor = size.flatten(x, y, z + 1);
        if blocks[neighbor].is_solid() {
            blocks[neighbor].faces.clear(FaceMask::BACK);
        } else {
            mask.set(FaceMask::FRONT);
        }
    } else {
        mask.set(FaceMask::FRONT);
    }

    blocks[index].faces = mask;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_material::Material;

    fn volume(size: &VolumeSize, fill: Material) -> Vec<Block> {
        vec![Block::new(fill); size.volume()]
    }

    fn opposite(bits: u8) -> u8 {
        match bits {
            FaceMask::RIGHT => FaceMask::LEFT,
            FaceMask::LEFT => FaceMask::RIGHT,
            FaceMask::TOP => FaceMask::BOTTOM,
            FaceMask::BOTTOM => FaceMask::TOP,
            FaceMask::FRONT => FaceMask::BACK,
            FaceMask::BACK => FaceMask::FRONT,
            _ => unreachable!(),
        }
    }

    /// The directed neighbor list: (bit, dx, dy, dz).
    const DIRECTIONS: [(u8, i32, i32, i32); 6] = [
        (FaceMask::RIGHT, 1, 0, 0),
        (FaceMask::LEFT, -1, 0, 0),
        (FaceMask::TOP, 0, 1, 0),
        (FaceMask::BOTTOM, 0, -1, 0),
        (FaceMask::FRONT, 0, 0, 1),
        (FaceMask::BACK, 0, 0, -1),
    ];

    fn assert_mask_symmetry(blocks: &[Block], size: &VolumeSize) {
        for z in 0..size.z {
            for y in 0..size.y {
                for x in 0..size.x {
                    let block = &blocks[size.flatten(x, y, z)];
                    for (bit, dx, dy, dz) in DIRECTIONS {
                        let (nx, ny, nz) =
                            (x as i32 + dx, y as i32 + dy, z as i32 + dz);
                        if nx < 0 || ny < 0 || nz < 0 {
                            continue;
                        }
                        let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
                        if !size.contains(nx, ny, nz) {
                            continue;
                        }
                        let neighbor = &blocks[size.flatten(nx, ny, nz)];
                        if block.is_solid() && !neighbor.is_solid() {
                            assert!(
                                block.faces.contains(bit),
                                "solid at ({x},{y},{z}) missing bit {bit} toward traversable neighbor"
                            );
                        }
                        if block.is_solid() && neighbor.is_solid() {
                            assert!(
                                !block.faces.contains(bit) && !neighbor.faces.contains(opposite(bit)),
                                "solid pair at ({x},{y},{z})/({nx},{ny},{nz}) expose each other"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn lone_block_exposes_all_six_faces() {
        let size = VolumeSize::new(3, 3, 3);
        let mut blocks = volume(&size, Material::Air);
        blocks[size.flatten(1, 1, 1)] = Block::new(Material::Stone);

        compute_all(&mut blocks, &size);

        assert_eq!(blocks[size.flatten(1, 1, 1)].faces.bits(), FaceMask::ALL);
        assert_mask_symmetry(&blocks, &size);
    }

    #[test]
    fn buried_block_exposes_nothing() {
        let size = VolumeSize::new(3, 3, 3);
        let mut blocks = volume(&size, Material::Stone);
        compute_all(&mut blocks, &size);
        assert!(blocks[size.flatten(1, 1, 1)].faces.is_empty());
    }

    #[test]
    fn boundary_policy_forces_the_y_extremes() {
        let size = VolumeSize::new(2, 3, 2);
        for fill in [Material::Air, Material::Water, Material::Stone] {
            let mut blocks = volume(&size, fill);
            compute_all(&mut blocks, &size);
            for z in 0..size.z {
                for x in 0..size.x {
                    assert!(
                        blocks[size.flatten(x, size.y - 1, z)].faces.contains(FaceMask::TOP),
                        "{fill:?} at the top layer must face open sky"
                    );
                    assert!(
                        blocks[size.flatten(x, 0, z)].faces.contains(FaceMask::BOTTOM),
                        "{fill:?} at the floor must face the world bottom"
                    );
                }
            }
        }
    }

    #[test]
    fn solid_volume_exposes_only_its_shell() {
        let size = VolumeSize::new(4, 4, 4);
        let mut blocks = volume(&size, Material::Dirt);
        compute_all(&mut blocks, &size);

        assert_eq!(
            blocks[size.flatten(0, 0, 0)].faces.bits(),
            FaceMask::LEFT | FaceMask::BOTTOM | FaceMask::BACK
        );
        assert_eq!(
            blocks[size.flatten(3, 3, 3)].faces.bits(),
            FaceMask::RIGHT | FaceMask::TOP | FaceMask::FRONT
        );
        assert!(blocks[size.flatten(1, 2, 1)].faces.is_empty());
    }

    #[test]
    fn water_exposes_only_its_top_under_air() {
        let size = VolumeSize::new(3, 3, 3);
        let mut blocks = volume(&size, Material::Stone);
        blocks[size.flatten(1, 1, 1)] = Block::new(Material::Water);
        blocks[size.flatten(1, 2, 1)] = Block::new(Material::Air);
        compute_all(&mut blocks, &size);

        assert_eq!(blocks[size.flatten(1, 1, 1)].faces.bits(), FaceMask::TOP);

        // submerged water shows nothing
        let mut blocks = volume(&size, Material::Stone);
        blocks[size.flatten(1, 1, 1)] = Block::new(Material::Water);
        compute_all(&mut blocks, &size);
        assert!(blocks[size.flatten(1, 1, 1)].faces.is_empty());
    }

    #[test]
    fn solid_faces_bordering_water_are_exposed() {
        let size = VolumeSize::new(3, 1, 1);
        let mut blocks = volume(&size, Material::Stone);
        blocks[size.flatten(1, 0, 0)] = Block::new(Material::Water);
        compute_all(&mut blocks, &size);

        assert!(blocks[size.flatten(0, 0, 0)].faces.contains(FaceMask::RIGHT));
        assert!(blocks[size.flatten(2, 0, 0)].faces.contains(FaceMask::LEFT));
    }

    #[test]
    fn destroy_grants_neighbors_their_new_faces() {
        // a stone at (1,1,1) with solid below and one solid side
        let size = VolumeSize::new(3, 3, 3);
        let mut blocks = volume(&size, Material::Air);
        blocks[size.flatten(1, 1, 1)] = Block::new(Material::Stone);
        blocks[size.flatten(1, 0, 1)] = Block::new(Material::Stone);
        blocks[size.flatten(0, 1, 1)] = Block::new(Material::Stone);
        compute_all(&mut blocks, &size);

        let below_before = blocks[size.flatten(1, 0, 1)].faces;
        let side_before = blocks[size.flatten(0, 1, 1)].faces;
        assert!(!below_before.contains(FaceMask::TOP));
        assert!(!side_before.contains(FaceMask::RIGHT));

        blocks[size.flatten(1, 1, 1)] = Block::new(Material::Air);
        update_after_destroy(&mut blocks, &size, 1, 1, 1);

        assert!(blocks[size.flatten(1, 1, 1)].faces.is_empty());
        let below = blocks[size.flatten(1, 0, 1)].faces;
        let side = blocks[size.flatten(0, 1, 1)].faces;
        assert_eq!(below.bits(), below_before.bits() | FaceMask::TOP);
        assert_eq!(side.bits(), side_before.bits() | FaceMask::RIGHT);
    }

    #[test]
    fn destroy_uncovers_water_below() {
        let size = VolumeSize::new(1, 3, 1);
        let mut blocks = volume(&size, Material::Air);
        blocks[size.flatten(0, 0, 0)] = Block::new(Material::Water);
        blocks[size.flatten(0, 1, 0)] = Block::new(Material::Stone);
        compute_all(&mut blocks, &size);
        assert!(!blocks[size.flatten(0, 0, 0)].faces.contains(FaceMask::TOP));

        blocks[size.flatten(0, 1, 0)] = Block::new(Material::Air);
        update_after_destroy(&mut blocks, &size, 0, 1, 0);
        assert!(blocks[size.flatten(0, 0, 0)].faces.contains(FaceMask::TOP));
    }

    #[test]
    fn build_occludes_solid_neighbors_and_covered_water() {
        let size = VolumeSize::new(3, 3, 3);
        let mut blocks = volume(&size, Material::Air);
        blocks[size.flatten(1, 0, 1)] = Block::new(Material::Water);
        blocks[size.flatten(0, 1, 1)] = Block::new(Material::Stone);
        compute_all(&mut blocks, &size);
        assert!(blocks[size.flatten(1, 0, 1)].faces.contains(FaceMask::TOP));
        assert!(blocks[size.flatten(0, 1, 1)].faces.contains(FaceMask::RIGHT));

        blocks[size.flatten(1, 1, 1)] = Block::new(Material::Stone);
        update_after_build(&mut blocks, &size, 1, 1, 1);

        // the new block faces air on four sides and water below
        assert_eq!(
            blocks[size.flatten(1, 1, 1)].faces.bits(),
            FaceMask::ALL & !FaceMask::LEFT
        );
        assert!(!blocks[size.flatten(1, 0, 1)].faces.contains(FaceMask::TOP));
        assert!(!blocks[size.flatten(0, 1, 1)].faces.contains(FaceMask::RIGHT));
    }

    #[test]
    fn incremental_updates_match_full_recompute() {
        let size = VolumeSize::new(6, 6, 6);
        let mut blocks = volume(&size, Material::Air);
        // a floor of stone, some water pooled on top
        for z in 0..size.z {
            for x in 0..size.x {
                for y in 0..2 {
                    blocks[size.flatten(x, y, z)] = Block::new(Material::Stone);
                }
            }
        }
        blocks[size.flatten(2, 2, 2)] = Block::new(Material::Water);
        blocks[size.flatten(3, 2, 2)] = Block::new(Material::Water);
        compute_all(&mut blocks, &size);

        let mut rng = fastrand::Rng::with_seed(9001);
        for _ in 0..200 {
            let (x, y, z) = (
                rng.usize(0..size.x),
                rng.usize(0..size.y),
                rng.usize(0..size.z),
            );
            let index = size.flatten(x, y, z);
            if blocks[index].is_air() {
                let material = if rng.bool() {
                    Material::Stone
                } else {
                    Material::Water
                };
                blocks[index] = Block::new(material);
                update_after_build(&mut blocks, &size, x, y, z);
            } else if blocks[index].material() != Material::Bedrock {
                blocks[index] = Block::new(Material::Air);
                update_after_destroy(&mut blocks, &size, x, y, z);
            }
        }

        let mut recomputed = blocks.clone();
        compute_all(&mut recomputed, &size);
        for index in 0..blocks.len() {
            assert_eq!(
                blocks[index].faces,
                recomputed[index].faces,
                "mask diverged at {:?}",
                size.deflatten(index)
            );
        }
        assert_mask_symmetry(&blocks, &size);
    }
}
