#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World Generator
//!
//! A procedural voxel world generator and surface mesher.
//!
//! This crate generates a dense three-dimensional block world from layered
//! noise and converts it into renderable surface geometry, sized exactly
//! to the visible surface.
//!
//! ## Key Modules
//!
//! * `generation` - Deterministic noise, column heights, block
//!   classification, and tree placement
//! * `visibility` - Per-block face-exposure masks with incremental
//!   maintenance under block edits
//! * `meshing` - Two-phase mesh extraction into exactly-sized buffers,
//!   with a separate water pass and a damage-decal UV channel
//! * `voxels` - The block value type and the dense world volume
//! * `storage` - The verbatim byte-array persistence interface
//!
//! ## Pipeline
//!
//! Generation flows one way: noise feeds per-column heights, the complete
//! height table feeds per-cell classification, the classified volume gets
//! trees stamped onto it, a full visibility pass marks every exposed face,
//! and the mesh extractor walks each chunk window. At runtime, single
//! block edits update the masks of at most seven blocks and dirty only the
//! chunks they touch.
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_worldgen::{World, WorldSettings};
//! use cgmath::Point3;
//!
//! let mut world = World::generate(WorldSettings::default());
//! world.rebuild_dirty();
//! let meshes = world.mesh_for_chunk(Point3::new(0, 0, 0)).unwrap();
//! println!("{} terrain vertices", meshes.terrain.vertex_count());
//! ```

use log::info;

pub mod error;
pub mod generation;
pub mod meshing;
pub mod settings;
pub mod storage;
pub mod visibility;
pub mod voxels;

pub use error::WorldError;
pub use meshing::{ChunkMeshes, MeshData, MeshExtractor};
pub use settings::{TreeDensity, WorldSettings};
pub use voxels::block::block_face::FaceMask;
pub use voxels::block::block_material::Material;
pub use voxels::block::Block;
pub use voxels::world::World;
pub use voxels::VolumeSize;

/// Generates a world from the settings file named on the command line (or
/// the defaults), extracts every chunk mesh, and logs a summary.
///
/// This is the demonstration driver behind the binary: it shows the whole
/// pipeline plus the snapshot call a host engine would schedule
/// periodically.
pub fn run() -> Result<(), WorldError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let settings = match std::env::args().nth(1) {
        Some(path) => WorldSettings::from_file(path)?,
        None => WorldSettings::default(),
    };

    let mut world = World::generate(settings);
    let rebuilt = world.rebuild_dirty();

    let mut terrain_vertices = 0;
    let mut water_vertices = 0;
    for chunk in world.chunk_coords() {
        let meshes = world.mesh_for_chunk(chunk)?;
        terrain_vertices += meshes.terrain.vertex_count();
        water_vertices += meshes.water.vertex_count();
    }
    info!(
        "{rebuilt} chunks meshed: {terrain_vertices} terrain vertices, {water_vertices} water vertices"
    );

    // the snapshot a host would capture on its save timer
    let snapshot = storage::snapshot(&world);
    info!("snapshot ready: {} bytes", snapshot.len());

    Ok(())
}
