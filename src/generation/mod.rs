//! # Generation Module
//!
//! The deterministic terrain pipeline: noise sampling, per-column height
//! synthesis, per-cell material classification, and the sequential tree
//! pass. The first three are pure functions of coordinates and the seed;
//! heights and classification fan out over rayon with a join barrier in
//! between (classification reads the complete height table).

pub mod classifier;
pub mod height_map;
pub mod noise_field;
pub mod trees;
