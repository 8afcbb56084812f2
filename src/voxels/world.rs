//! # World Module
//!
//! This module provides the `World` struct which owns the dense block
//! volume and coordinates every stage that reads or mutates it.
//!
//! ## Architecture
//!
//! The volume is one contiguous allocation of `Block` covering
//! `total_x × total_y × total_z` cells; a chunk is a cubic addressing
//! window into it, never a separate allocation. Generation runs once, up
//! front: heights fan out per column, classification fans out per cell
//! after the full height table is gathered, then the tree pass and the
//! face-visibility pass run sequentially.
//!
//! ## Edits
//!
//! Single-block edits (place, destroy, damage) apply their visibility
//! update synchronously — the mask array is never stale between an edit
//! and the next mesh extraction. Each edit marks the owning chunk dirty,
//! plus any neighboring chunk whose boundary block changed mask; dirty
//! chunks drop out of the mesh cache and are re-extracted on demand.

use std::num::NonZeroUsize;
use std::time::Instant;

use bitvec::vec::BitVec;
use cgmath::Point3;
use log::{debug, info};
use lru::LruCache;

use crate::error::WorldError;
use crate::generation::height_map::{self, HeightData};
use crate::generation::noise_field::NoiseField;
use crate::generation::{classifier, trees};
use crate::meshing::{ChunkMeshes, MeshExtractor};
use crate::settings::WorldSettings;
use crate::visibility;
use crate::voxels::block::block_material::Material;
use crate::voxels::block::Block;
use crate::voxels::VolumeSize;

/// A fully generated voxel world.
///
/// Owns the block volume, the read-only height table, and the per-chunk
/// mesh bookkeeping. All mutation goes through the edit methods so the
/// face masks and dirty set stay synchronized with the materials.
pub struct World {
    settings: WorldSettings,
    size: VolumeSize,
    chunk_grid: VolumeSize,
    heights: Vec<HeightData>,
    blocks: Vec<Block>,
    dirty_chunks: BitVec,
    mesh_cache: LruCache<Point3<usize>, ChunkMeshes>,
}

impl World {
    /// Generates a world from the given settings.
    ///
    /// Runs the full pipeline: parallel height synthesis, a join, parallel
    /// classification against the complete height table, the sequential
    /// tree pass, and the full face-visibility pass. Every chunk starts
    /// dirty; meshes are extracted lazily or via
    /// [`rebuild_dirty`](Self::rebuild_dirty).
    pub fn generate(settings: WorldSettings) -> Self {
        let size = VolumeSize::new(settings.total_x(), settings.total_y(), settings.total_z());
        let chunk_grid = VolumeSize::new(
            settings.world_size_x,
            settings.world_size_y,
            settings.world_size_z,
        );
        let noise = NoiseField::new(settings.seed);

        info!(
            "generating {}x{}x{} world, seed {}",
            size.x, size.y, size.z, settings.seed
        );
        let started = Instant::now();

        let heights = height_map::synthesize(&noise, &size);
        debug!("height synthesis finished after {:?}", started.elapsed());

        // the height table is complete here; classification may read any column
        let mut blocks = classifier::classify_volume(&noise, &heights, &size, settings.water_level);
        debug!("classification finished after {:?}", started.elapsed());

        trees::place_trees(&mut blocks, &size, &noise, settings.tree_density);
        visibility::compute_all(&mut blocks, &size);

        info!("world generated in {:?}", started.elapsed());

        let chunk_count = chunk_grid.volume();
        World {
            settings,
            size,
            chunk_grid,
            heights,
            blocks,
            dirty_chunks: BitVec::repeat(true, chunk_count),
            mesh_cache: LruCache::new(NonZeroUsize::new(chunk_count.max(1)).unwrap()),
        }
    }

    /// The settings this world was generated from.
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// The world volume dimensions, in blocks.
    pub fn size(&self) -> VolumeSize {
        self.size
    }

    /// The chunk-grid dimensions, in chunks.
    pub fn chunk_grid(&self) -> VolumeSize {
        self.chunk_grid
    }

    /// The whole block volume, flattened per [`VolumeSize::flatten`].
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Mutable access to the volume for in-crate collaborators
    /// (persistence restore). Callers are responsible for leaving masks
    /// and dirty state consistent.
    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// The per-column height table, indexed by [`VolumeSize::column`].
    pub fn heights(&self) -> &[HeightData] {
        &self.heights
    }

    /// The block at `position`.
    ///
    /// # Returns
    /// A reference to the block, or [`WorldError::OutOfBounds`] when the
    /// coordinate lies outside the volume.
    pub fn block_at(&self, position: Point3<usize>) -> Result<&Block, WorldError> {
        let index = self.block_index(position)?;
        Ok(&self.blocks[index])
    }

    /// Every chunk coordinate of the grid, in the fixed x-then-z-then-y
    /// order the persistence collaborator expects.
    pub fn chunk_coords(&self) -> Vec<Point3<usize>> {
        let mut coords = Vec::with_capacity(self.chunk_grid.volume());
        for x in 0..self.chunk_grid.x {
            for z in 0..self.chunk_grid.z {
                for y in 0..self.chunk_grid.y {
                    coords.push(Point3::new(x, y, z));
                }
            }
        }
        coords
    }

    /// Whether the given chunk is awaiting mesh re-extraction.
    pub fn is_chunk_dirty(&self, chunk: Point3<usize>) -> bool {
        self.chunk_grid.contains(chunk.x, chunk.y, chunk.z)
            && self.dirty_chunks[self.chunk_grid.flatten(chunk.x, chunk.y, chunk.z)]
    }

    /// The terrain and water buffers of one chunk.
    ///
    /// Returns a cached mesh when the chunk is clean; otherwise extracts,
    /// caches and returns it. Buffers handed out here are always complete
    /// — a chunk is never exposed mid-extraction.
    pub fn mesh_for_chunk(&mut self, chunk: Point3<usize>) -> Result<&ChunkMeshes, WorldError> {
        if !self.chunk_grid.contains(chunk.x, chunk.y, chunk.z) {
            return Err(WorldError::ChunkOutOfBounds {
                x: chunk.x,
                y: chunk.y,
                z: chunk.z,
                size_x: self.chunk_grid.x,
                size_y: self.chunk_grid.y,
                size_z: self.chunk_grid.z,
            });
        }

        if !self.mesh_cache.contains(&chunk) {
            let meshes = self.extract_chunk(chunk);
            self.mesh_cache.put(chunk, meshes);
            let index = self.chunk_grid.flatten(chunk.x, chunk.y, chunk.z);
            self.dirty_chunks.set(index, false);
        }
        Ok(self.mesh_cache.get(&chunk).unwrap())
    }

    /// Re-extracts every dirty chunk and returns how many were rebuilt.
    pub fn rebuild_dirty(&mut self) -> usize {
        let dirty: Vec<usize> = self.dirty_chunks.iter_ones().collect();
        for &index in &dirty {
            let (x, y, z) = self.chunk_grid.deflatten(index);
            let chunk = Point3::new(x, y, z);
            let meshes = self.extract_chunk(chunk);
            self.mesh_cache.put(chunk, meshes);
            self.dirty_chunks.set(index, false);
        }
        if !dirty.is_empty() {
            debug!("rebuilt {} dirty chunk meshes", dirty.len());
        }
        dirty.len()
    }

    /// Removes the block at `position`, turning it to air.
    ///
    /// The visibility update runs synchronously with the edit; the owning
    /// chunk and any neighbor chunk whose boundary block changed mask are
    /// marked dirty.
    ///
    /// # Returns
    /// `true` if a block was removed, `false` if the cell already held air.
    pub fn destroy_block(&mut self, position: Point3<usize>) -> Result<bool, WorldError> {
        let index = self.block_index(position)?;
        if self.blocks[index].is_air() {
            return Ok(false);
        }

        let removed = self.blocks[index].material();
        self.blocks[index] = Block::new(Material::Air);
        visibility::update_after_destroy(
            &mut self.blocks,
            &self.size,
            position.x,
            position.y,
            position.z,
        );
        self.mark_edit_dirty(position);

        debug!("destroyed {removed:?} at {position:?}");
        Ok(true)
    }

    /// Places a block of `material` at `position`.
    ///
    /// Placement targets traversable cells: building into air or water
    /// succeeds, building into a solid block does not. Placing air is a
    /// removal and is refused here.
    ///
    /// # Returns
    /// `true` if the block was placed.
    pub fn place_block(
        &mut self,
        position: Point3<usize>,
        material: Material,
    ) -> Result<bool, WorldError> {
        let index = self.block_index(position)?;
        if material.is_air() || self.blocks[index].is_solid() {
            return Ok(false);
        }

        self.blocks[index] = Block::new(material);
        visibility::update_after_build(
            &mut self.blocks,
            &self.size,
            position.x,
            position.y,
            position.z,
        );
        self.mark_edit_dirty(position);

        debug!("placed {material:?} at {position:?}");
        Ok(true)
    }

    /// Applies `power` points of damage to the block at `position`,
    /// destroying it when its durability runs out.
    ///
    /// A surviving hit only moves the damage tier, which changes decals
    /// but no masks, so only the owning chunk is marked dirty.
    ///
    /// # Returns
    /// `true` if the block broke and was removed.
    pub fn damage_block(&mut self, position: Point3<usize>, power: u8) -> Result<bool, WorldError> {
        let index = self.block_index(position)?;
        if !self.blocks[index].is_solid() {
            return Ok(false);
        }

        if self.blocks[index].apply_damage(power) {
            return self.destroy_block(position);
        }
        self.mark_chunk_dirty_at(position);
        Ok(false)
    }

    /// Marks every chunk dirty and drops all cached meshes. Used after a
    /// wholesale volume replacement (persistence restore).
    pub(crate) fn mark_all_dirty(&mut self) {
        self.dirty_chunks.fill(true);
        self.mesh_cache.clear();
    }

    fn block_index(&self, position: Point3<usize>) -> Result<usize, WorldError> {
        if !self.size.contains(position.x, position.y, position.z) {
            return Err(WorldError::OutOfBounds {
                x: position.x,
                y: position.y,
                z: position.z,
                size_x: self.size.x,
                size_y: self.size.y,
                size_z: self.size.z,
            });
        }
        Ok(self.size.flatten(position.x, position.y, position.z))
    }

    fn extract_chunk(&self, chunk: Point3<usize>) -> ChunkMeshes {
        let chunk_size = self.settings.chunk_size;
        let origin = Point3::new(
            chunk.x * chunk_size,
            chunk.y * chunk_size,
            chunk.z * chunk_size,
        );
        MeshExtractor::new(self.size, chunk_size).extract_chunk(&self.blocks, origin)
    }

    /// Marks the chunk owning a block coordinate dirty.
    fn mark_chunk_dirty_at(&mut self, position: Point3<usize>) {
        let chunk_size = self.settings.chunk_size;
        let chunk = Point3::new(
            position.x / chunk_size,
            position.y / chunk_size,
            position.z / chunk_size,
        );
        let index = self.chunk_grid.flatten(chunk.x, chunk.y, chunk.z);
        self.dirty_chunks.set(index, true);
        self.mesh_cache.pop(&chunk);
    }

    /// Marks dirty every chunk touched by an edit at `position`: the
    /// owning chunk plus the chunks of all in-bounds neighbors, which
    /// covers boundary blocks whose masks changed.
    fn mark_edit_dirty(&mut self, position: Point3<usize>) {
        self.mark_chunk_dirty_at(position);

        let (x, y, z) = (position.x, position.y, position.z);
        if x > 0 {
            self.mark_chunk_dirty_at(Point3::new(x - 1, y, z));
        }
        if x + 1 < self.size.x {
            self.mark_chunk_dirty_at(Point3::new(x + 1, y, z));
        }
        if y > 0 {
            self.mark_chunk_dirty_at(Point3::new(x, y - 1, z));
        }
        if y + 1 < self.size.y {
            self.mark_chunk_dirty_at(Point3::new(x, y + 1, z));
        }
        if z > 0 {
            self.mark_chunk_dirty_at(Point3::new(x, y, z - 1));
        }
        if z + 1 < self.size.z {
            self.mark_chunk_dirty_at(Point3::new(x, y, z + 1));
        }
    }
}
