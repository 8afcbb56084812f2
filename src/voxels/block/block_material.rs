//! # Block Material Module
//!
//! This module defines the closed set of materials a block can hold and the
//! conversions between the rich enum and its compact on-disk byte form.

use num_derive::FromPrimitive;

use super::MaterialId;

/// Enumerates every material a block in the world can be made of.
///
/// The discriminants are fixed: they are the byte written to persistence
/// snapshots and the row index into the texture-atlas table, so reordering
/// variants is a breaking change on both counts. `FromPrimitive` provides
/// the decode direction when restoring a snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum Material {
    /// Plain dirt, the filler between stone and the surface.
    Dirt = 0,

    /// Stone, the bulk of the underground.
    Stone = 1,

    /// Diamond ore, seeded into the stone band by its own noise channel.
    Diamond = 2,

    /// Bedrock, the indestructible world floor.
    Bedrock = 3,

    /// Redstone ore, seeded below diamond's height cutoff.
    Redstone = 4,

    /// Sand.
    Sand = 5,

    /// Tree canopy.
    Leaves = 6,

    /// Tree trunk.
    Wood = 7,

    /// The rooted bottom segment of a tree trunk.
    WoodBase = 8,

    /// Water. Transparent; only ever renders its top surface.
    Water = 9,

    /// A grass block with different textures on top, bottom and sides.
    /// The top is grass, the bottom is plain dirt, the sides are grass
    /// creeping over dirt.
    Grass = 10,

    /// An air block: no substance, no geometry.
    Air = 11,
}

/// Maximum durability per material, keyed by material id.
///
/// Bedrock is effectively indestructible; air and water have no durability
/// to lose.
static MAX_HEALTH: phf::Map<u8, u8> = phf::phf_map! {
    0u8 => 3,   // Dirt
    1u8 => 4,   // Stone
    2u8 => 4,   // Diamond
    3u8 => 255, // Bedrock
    4u8 => 4,   // Redstone
    5u8 => 3,   // Sand
    6u8 => 2,   // Leaves
    7u8 => 4,   // Wood
    8u8 => 4,   // WoodBase
    9u8 => 8,   // Water
    10u8 => 3,  // Grass
    11u8 => 0,  // Air
};

impl Material {
    /// Converts a `MaterialId` to a `Material`.
    ///
    /// This is used when reading back the compact storage format. Material
    /// ids inside a world volume are valid by construction.
    ///
    /// # Arguments
    /// * `id` - The material as a `MaterialId`
    ///
    /// # Returns
    /// The corresponding `Material`
    ///
    /// # Panics
    /// Panics if the id doesn't correspond to a valid `Material`.
    pub fn from_id(id: MaterialId) -> Self {
        let material = num::FromPrimitive::from_u8(id);
        material.unwrap()
    }

    /// Converts a `MaterialId` to a `Material`, returning `None` for bytes
    /// outside the closed set. Used to validate untrusted snapshot data.
    pub fn try_from_id(id: MaterialId) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }

    /// Whether this material is air.
    pub fn is_air(self) -> bool {
        self == Material::Air
    }

    /// Whether this material is water.
    pub fn is_water(self) -> bool {
        self == Material::Water
    }

    /// Whether this material occludes its neighbors' faces.
    ///
    /// Air and water are traversable: a face bordering either is exposed.
    pub fn is_solid(self) -> bool {
        !self.is_air() && !self.is_water()
    }

    /// The maximum durability of a block of this material.
    pub fn max_health(self) -> u8 {
        let health = MAX_HEALTH.get(&(self as MaterialId));
        *health.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for id in 0..12u8 {
            let material = Material::from_id(id);
            assert_eq!(material as MaterialId, id);
            assert_eq!(Material::try_from_id(id), Some(material));
        }
        assert_eq!(Material::try_from_id(12), None);
        assert_eq!(Material::try_from_id(255), None);
    }

    #[test]
    fn solidity_exempts_air_and_water() {
        assert!(!Material::Air.is_solid());
        assert!(!Material::Water.is_solid());
        assert!(Material::Stone.is_solid());
        assert!(Material::Grass.is_solid());
    }

    #[test]
    fn every_material_has_a_health_entry() {
        for id in 0..12u8 {
            // the lookup panics if an entry is missing
            let _ = Material::from_id(id).max_health();
        }
        assert_eq!(Material::Air.max_health(), 0);
        assert_eq!(Material::Bedrock.max_health(), 255);
    }
}
