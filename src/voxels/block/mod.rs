//! # Block Module
//!
//! This module provides the per-voxel value type and its two supporting
//! vocabularies: the closed material set and the face-exposure mask.
//!
//! A [`Block`] is four bytes. The field order is load-bearing: persistence
//! snapshots are a verbatim byte image of the block volume, one block after
//! another as `faces, material, hp, damage`.

use block_face::FaceMask;
use block_material::Material;

pub mod block_face;
pub mod block_material;

/// The underlying integer type used to represent materials in memory.
/// This is used for compact storage and serialization of block data.
pub type MaterialId = u8;

/// The number of damage tiers a block moves through, including tier 0
/// (undamaged). Tier selects the crack decal in the secondary UV channel.
pub const DAMAGE_TIERS: u8 = 11;

/// A single voxel in the world volume.
///
/// Blocks are owned by the containing volume and mutated in place by
/// classification, structure placement, the visibility engine and edits;
/// they are never allocated individually.
///
/// # Memory Layout
/// `#[repr(C)]` pins the byte order to `faces, material, hp, damage`,
/// which is exactly the persistence wire order, so a block volume can be
/// snapshotted as one contiguous byte cast.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Block {
    /// Which faces border a traversable cell and need geometry.
    pub faces: FaceMask,
    /// The material, encoded as a `MaterialId` for compact storage.
    pub material: MaterialId,
    /// Remaining durability.
    pub hp: u8,
    /// Quantized damage tier, `0..DAMAGE_TIERS`; 0 means undamaged.
    pub damage: u8,
}

impl Block {
    /// Creates a pristine block of the given material: full durability, no
    /// damage, no exposed faces.
    pub fn new(material: Material) -> Self {
        Block {
            faces: FaceMask::empty(),
            material: material as MaterialId,
            hp: material.max_health(),
            damage: 0,
        }
    }

    /// The material of this block as the rich enum.
    pub fn material(&self) -> Material {
        Material::from_id(self.material)
    }

    /// Whether this block is air.
    pub fn is_air(&self) -> bool {
        self.material == Material::Air as MaterialId
    }

    /// Whether this block is water.
    pub fn is_water(&self) -> bool {
        self.material == Material::Water as MaterialId
    }

    /// Whether this block occludes its neighbors' faces.
    pub fn is_solid(&self) -> bool {
        !self.is_air() && !self.is_water()
    }

    /// Applies `power` points of damage and re-quantizes the damage tier.
    ///
    /// # Returns
    /// `true` if the block's durability is exhausted and it should be
    /// destroyed by the caller.
    pub fn apply_damage(&mut self, power: u8) -> bool {
        let max = self.material().max_health();
        if max == 0 {
            return false;
        }
        self.hp = self.hp.saturating_sub(power);
        self.damage = (u16::from(max - self.hp) * u16::from(DAMAGE_TIERS - 1) / u16::from(max)) as u8;
        self.hp == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_four_bytes_in_wire_order() {
        assert_eq!(std::mem::size_of::<Block>(), 4);

        let mut block = Block::new(Material::Stone);
        block.faces.set(FaceMask::TOP);
        block.hp = 2;
        block.damage = 5;
        let bytes: [u8; 4] = bytemuck::cast(block);
        assert_eq!(bytes, [FaceMask::TOP, Material::Stone as u8, 2, 5]);
    }

    #[test]
    fn new_block_is_pristine() {
        let block = Block::new(Material::Dirt);
        assert!(block.faces.is_empty());
        assert_eq!(block.hp, Material::Dirt.max_health());
        assert_eq!(block.damage, 0);
    }

    #[test]
    fn damage_quantizes_into_eleven_tiers() {
        let mut block = Block::new(Material::Stone); // max health 4
        assert_eq!(block.damage, 0);

        assert!(!block.apply_damage(1));
        assert_eq!(block.damage, 2); // 1/4 of the way -> tier 2 of 10

        assert!(!block.apply_damage(2));
        assert_eq!(block.damage, 7);

        assert!(block.apply_damage(1));
        assert_eq!(block.damage, 10);
        assert_eq!(block.hp, 0);
    }

    #[test]
    fn air_takes_no_damage() {
        let mut air = Block::new(Material::Air);
        assert!(!air.apply_damage(10));
        assert_eq!(air.damage, 0);
        assert_eq!(air.hp, 0);
    }
}
