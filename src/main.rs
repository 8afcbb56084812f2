//! # Voxel World Generator Entry Point
//!
//! Generates a world, meshes every chunk, and logs a summary. An optional
//! first argument names a JSON settings file; without it the default
//! settings are used.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release [settings.json]
//! ```

fn main() {
    if let Err(error) = voxel_worldgen::run() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
