//! # Storage Module
//!
//! The persistence interface: the block volume travels to and from the
//! persistence collaborator as a verbatim byte array, four bytes per block
//! in the fixed field order `faces, material, hp, damage`. This crate
//! guarantees that order through the `#[repr(C)]` layout of
//! [`Block`](crate::voxels::block::Block) and makes no further assumption
//! about how the collaborator stores the bytes.
//!
//! Per-chunk coordinate metadata travels separately via
//! [`World::chunk_coords`](crate::voxels::world::World::chunk_coords).
//!
//! When a host wants periodic saving, it schedules the trigger itself and
//! calls [`snapshot`] from it; nothing in this crate depends on timing.

use log::info;

use crate::error::WorldError;
use crate::voxels::block::block_material::Material;
use crate::voxels::block::Block;
use crate::voxels::world::World;

/// Bytes one block occupies on the wire.
const BLOCK_STRIDE: usize = std::mem::size_of::<Block>();

/// Serializes the world's block volume into a verbatim byte array.
///
/// The result is `volume * 4` bytes; block order follows the volume's
/// flattening convention.
pub fn snapshot(world: &World) -> Vec<u8> {
    let bytes = bytemuck::cast_slice::<Block, u8>(world.blocks()).to_vec();
    info!("captured a {} byte world snapshot", bytes.len());
    bytes
}

/// Replaces the world's block volume with a previously captured snapshot.
///
/// The snapshot must match the current world's volume exactly, and every
/// material byte must belong to the closed material set; face masks, hp
/// and damage tiers are restored verbatim. Every chunk is marked dirty so
/// stale meshes cannot survive a restore.
///
/// # Errors
/// [`WorldError::SnapshotSize`] on a length mismatch,
/// [`WorldError::SnapshotMaterial`] on an unrecognized material byte. The
/// world is left untouched on error.
pub fn restore(world: &mut World, bytes: &[u8]) -> Result<(), WorldError> {
    let expected = world.blocks().len() * BLOCK_STRIDE;
    if bytes.len() != expected {
        return Err(WorldError::SnapshotSize {
            expected,
            actual: bytes.len(),
        });
    }

    let incoming = bytemuck::cast_slice::<u8, Block>(bytes);
    for (index, block) in incoming.iter().enumerate() {
        if Material::try_from_id(block.material).is_none() {
            return Err(WorldError::SnapshotMaterial {
                id: block.material,
                index,
            });
        }
    }

    world.blocks_mut().copy_from_slice(incoming);
    world.mark_all_dirty();
    info!("restored a {} byte world snapshot", bytes.len());
    Ok(())
}
