//! # Mesh Extractor Module
//!
//! Converts the face-visibility masks of one chunk into geometry buffers.
//!
//! Extraction is two-phase: a sizing pass counts four vertices for every
//! exposed face (water contributes only its top), then an emission pass
//! re-walks the same region in the same order and appends one quad per
//! exposed face into buffers pre-allocated to exactly the sized counts. A
//! mismatch between the passes is a programming error and asserts in test
//! builds.

use cgmath::{Point3, Vector2, Vector3};
use log::trace;

use crate::meshing::mesh_data::MeshData;
use crate::meshing::uv_atlas;
use crate::voxels::block::block_face::FaceMask;
use crate::voxels::block::block_material::Material;
use crate::voxels::block::{Block, MaterialId};
use crate::voxels::VolumeSize;

/// The two geometry buffers of one chunk.
///
/// Opaque terrain and transparent water render in different passes, so
/// they are extracted into separate buffers; a water block never
/// contributes to the terrain buffer.
#[derive(Clone, Debug, Default)]
pub struct ChunkMeshes {
    /// Geometry for every opaque block face.
    pub terrain: MeshData,
    /// Geometry for water surfaces (top quads only).
    pub water: MeshData,
}

/// The eight corners of a unit cube centered on a block, in the fixed
/// order the face tables below index into.
const CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, -0.5, -0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
];

/// Per-face quad data: the mask bit, the quad normal, and the four corner
/// indices in emission order.
const FACES: [(u8, [f32; 3], [usize; 4]); 6] = [
    (FaceMask::TOP, [0.0, 1.0, 0.0], [7, 6, 5, 4]),
    (FaceMask::BOTTOM, [0.0, -1.0, 0.0], [0, 1, 2, 3]),
    (FaceMask::LEFT, [-1.0, 0.0, 0.0], [7, 4, 0, 3]),
    (FaceMask::RIGHT, [1.0, 0.0, 0.0], [5, 6, 2, 1]),
    (FaceMask::FRONT, [0.0, 0.0, 1.0], [4, 5, 1, 0]),
    (FaceMask::BACK, [0.0, 0.0, -1.0], [6, 7, 3, 2]),
];

/// The four corner positions of a face, offset to a block's local center.
fn face_corners(corner_indices: [usize; 4], local: Point3<f32>) -> [Point3<f32>; 4] {
    corner_indices.map(|i| {
        Point3::new(
            local.x + CORNERS[i][0],
            local.y + CORNERS[i][1],
            local.z + CORNERS[i][2],
        )
    })
}

/// An atlas tile reordered for the quad's vertex layout.
fn tile_uvs(tile: [Vector2<f32>; 4]) -> [Vector2<f32>; 4] {
    // corners emit as lb, rb, rt, lt
    [tile[0], tile[1], tile[3], tile[2]]
}

/// The grass side tile, rotated for the side quads' vertex layout.
fn side_tile_uvs(tile: [Vector2<f32>; 4]) -> [Vector2<f32>; 4] {
    [tile[3], tile[2], tile[0], tile[1]]
}

/// A block's crack tile reordered for the quad's vertex layout.
fn damage_suvs(block: &Block) -> [Vector2<f32>; 4] {
    let crack = uv_atlas::crack_tile(block.damage);
    [crack[3], crack[2], crack[0], crack[1]]
}

/// Walks one chunk window of the shared volume and emits its geometry.
pub struct MeshExtractor {
    size: VolumeSize,
    chunk_size: usize,
}

impl MeshExtractor {
    /// Creates an extractor for a volume partitioned into cubic chunks of
    /// edge length `chunk_size`.
    pub fn new(size: VolumeSize, chunk_size: usize) -> Self {
        MeshExtractor { size, chunk_size }
    }

    /// Extracts the terrain and water buffers for the chunk whose lowest
    /// corner sits at `origin` (in block coordinates).
    ///
    /// The buffers are sized by a counting pass first, so emission never
    /// reallocates; both passes share one traversal order and one exposure
    /// predicate.
    pub fn extract_chunk(&self, blocks: &[Block], origin: Point3<usize>) -> ChunkMeshes {
        debug_assert!(
            self.size.contains(
                origin.x + self.chunk_size - 1,
                origin.y + self.chunk_size - 1,
                origin.z + self.chunk_size - 1,
            ),
            "chunk at {origin:?} overruns the volume"
        );

        let (terrain_vertices, water_vertices) = self.measure(blocks, origin);
        let mut terrain = MeshData::with_capacity(terrain_vertices);
        let mut water = MeshData::with_capacity(water_vertices);

        for x in 0..self.chunk_size {
            for y in 0..self.chunk_size {
                for z in 0..self.chunk_size {
                    let block =
                        &blocks[self.size.flatten(origin.x + x, origin.y + y, origin.z + z)];
                    if block.faces.is_empty() || block.is_air() {
                        continue;
                    }

                    let local = Point3::new(x as f32, y as f32, z as f32);
                    if block.is_water() {
                        self.emit_water(block, local, &mut water);
                    } else if block.material == Material::Grass as MaterialId {
                        emit_grass(block, local, &mut terrain);
                    } else {
                        emit_standard(block, local, &mut terrain);
                    }
                }
            }
        }

        debug_assert_eq!(
            terrain.vertex_count(),
            terrain_vertices,
            "terrain emission diverged from the sizing pass"
        );
        debug_assert_eq!(
            water.vertex_count(),
            water_vertices,
            "water emission diverged from the sizing pass"
        );

        trace!(
            "chunk at {:?}: {} terrain vertices, {} water vertices",
            origin,
            terrain.vertex_count(),
            water.vertex_count()
        );

        ChunkMeshes { terrain, water }
    }

    /// The sizing pass: exact vertex counts for the terrain and water
    /// buffers of the chunk at `origin`.
    fn measure(&self, blocks: &[Block], origin: Point3<usize>) -> (usize, usize) {
        let mut terrain = 0;
        let mut water = 0;

        for x in origin.x..origin.x + self.chunk_size {
            for y in origin.y..origin.y + self.chunk_size {
                for z in origin.z..origin.z + self.chunk_size {
                    let block = &blocks[self.size.flatten(x, y, z)];
                    if block.is_water() {
                        if block.faces.contains(FaceMask::TOP) {
                            water += 4;
                        }
                    } else if !block.is_air() {
                        terrain += 4 * block.faces.count() as usize;
                    }
                }
            }
        }

        (terrain, water)
    }

    /// Emits the top quad of a water block, UV-tiled over the chunk so the
    /// whole water plane reads as one texture.
    fn emit_water(&self, block: &Block, local: Point3<f32>, data: &mut MeshData) {
        if !block.faces.contains(FaceMask::TOP) {
            return;
        }

        let unit = 1.0 / self.chunk_size as f32;
        let uv00 = Vector2::new(unit * local.x, 1.0 - unit * local.z);
        let uv10 = Vector2::new(unit * (local.x + 1.0), 1.0 - unit * local.z);
        let uv01 = Vector2::new(unit * local.x, 1.0 - unit * (local.z + 1.0));
        let uv11 = Vector2::new(unit * (local.x + 1.0), 1.0 - unit * (local.z + 1.0));

        let (_, normal, corner_indices) = FACES[0];
        data.push_quad(
            Vector3::from(normal),
            face_corners(corner_indices, local),
            [uv00, uv10, uv11, uv01],
            damage_suvs(block),
        );
    }
}

/// Emits every exposed face of a single-tile block.
fn emit_standard(block: &Block, local: Point3<f32>, data: &mut MeshData) {
    let uvs = tile_uvs(uv_atlas::material_tile(block.material));
    for (bit, normal, corner_indices) in FACES {
        if block.faces.contains(bit) {
            data.push_quad(
                Vector3::from(normal),
                face_corners(corner_indices, local),
                uvs,
                damage_suvs(block),
            );
        }
    }
}

/// Emits every exposed face of a grass block, choosing among its three
/// tiles: the grass top, the dirt bottom, and the side tile one atlas row
/// past the material set.
fn emit_grass(block: &Block, local: Point3<f32>, data: &mut MeshData) {
    let row = block.material as usize;
    let top = tile_uvs(uv_atlas::tile(row));
    let bottom = tile_uvs(uv_atlas::tile(row - uv_atlas::GRASS_BOTTOM_OFFSET));
    let side = side_tile_uvs(uv_atlas::tile(uv_atlas::GRASS_SIDE_ROW));

    for (bit, normal, corner_indices) in FACES {
        if !block.faces.contains(bit) {
            continue;
        }
        let uvs = match bit {
            FaceMask::TOP => top,
            FaceMask::BOTTOM => bottom,
            _ => side,
        };
        data.push_quad(
            Vector3::from(normal),
            face_corners(corner_indices, local),
            uvs,
            damage_suvs(block),
        );
    }
}
