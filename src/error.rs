//! Error types shared across the crate.

use thiserror::Error;

/// Errors produced by world construction, block access, and persistence.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The settings file could not be read from disk.
    #[error("failed to read settings file: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// The settings file is not valid JSON or is missing required fields.
    #[error("failed to parse settings file: {0}")]
    SettingsParse(#[from] serde_json::Error),

    /// A block coordinate fell outside the world volume.
    #[error("block coordinate ({x}, {y}, {z}) is outside the {size_x}x{size_y}x{size_z} world volume")]
    OutOfBounds {
        /// X coordinate of the offending access.
        x: usize,
        /// Y coordinate of the offending access.
        y: usize,
        /// Z coordinate of the offending access.
        z: usize,
        /// Total world size along X in blocks.
        size_x: usize,
        /// Total world size along Y in blocks.
        size_y: usize,
        /// Total world size along Z in blocks.
        size_z: usize,
    },

    /// A chunk coordinate fell outside the world's chunk grid.
    #[error("chunk coordinate ({x}, {y}, {z}) is outside the {size_x}x{size_y}x{size_z} chunk grid")]
    ChunkOutOfBounds {
        /// X coordinate of the offending chunk.
        x: usize,
        /// Y coordinate of the offending chunk.
        y: usize,
        /// Z coordinate of the offending chunk.
        z: usize,
        /// Chunk-grid extent along X.
        size_x: usize,
        /// Chunk-grid extent along Y.
        size_y: usize,
        /// Chunk-grid extent along Z.
        size_z: usize,
    },

    /// A restored snapshot does not have the byte length the volume requires.
    #[error("snapshot holds {actual} bytes but the world volume requires {expected}")]
    SnapshotSize {
        /// Byte length the current world volume requires.
        expected: usize,
        /// Byte length actually provided.
        actual: usize,
    },

    /// A restored snapshot contains a material byte outside the closed material set.
    #[error("snapshot contains invalid material id {id} at block index {index}")]
    SnapshotMaterial {
        /// The unrecognized material byte.
        id: u8,
        /// Flattened index of the block carrying it.
        index: usize,
    },
}
