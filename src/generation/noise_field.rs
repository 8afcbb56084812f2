//! # Noise Field Module
//!
//! Deterministic scalar noise for every generation decision. The field sums
//! octaves of a 2D gradient-noise primitive into a fractal value in [0, 1],
//! and composes six 2D evaluations into a cheap pseudo-3D channel for caves
//! and ores.

use noise::{NoiseFn, Perlin};

/// Offset added to every input coordinate before sampling.
///
/// The gradient primitive is symmetric around the origin (its value at x
/// equals its value at -x), which mirrors terrain across the world origin.
/// A large offset keeps all practical inputs far away from the axis of
/// symmetry.
const SYMMETRY_OFFSET: f32 = 32_000.0;

/// A seeded fractal noise field.
///
/// Sampling is pure: for a fixed seed, the same inputs always produce the
/// same outputs, which makes the whole generation pipeline reproducible.
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Creates a noise field for the given seed.
    pub fn new(seed: u32) -> Self {
        NoiseField {
            perlin: Perlin::new(seed),
        }
    }

    /// One layer of the 2D primitive, remapped from [-1, 1] to [0, 1].
    fn layer(&self, x: f32, z: f32) -> f32 {
        (self.perlin.get([f64::from(x), f64::from(z)]) as f32 + 1.0) * 0.5
    }

    /// Samples 2D fractal noise at (x, z).
    ///
    /// Sums `octaves` layers of the primitive, doubling the frequency and
    /// scaling the amplitude by `persistence` each layer, then normalizes
    /// by the maximum attainable sum.
    ///
    /// # Arguments
    /// * `x`, `z` - Pre-scaled sample coordinates
    /// * `octaves` - Number of layers to sum
    /// * `persistence` - Per-layer amplitude falloff; below 1.0 each layer
    ///   contributes less than the previous one
    ///
    /// # Returns
    /// A value in [0, 1].
    pub fn fractal(&self, x: f32, z: f32, octaves: u32, persistence: f32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.layer(
                (x + SYMMETRY_OFFSET) * frequency,
                (z + SYMMETRY_OFFSET) * frequency,
            ) * amplitude;

            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        total / max_value
    }

    /// Samples the pseudo-3D channel at (x, y, z).
    ///
    /// Averages six 2D fractal evaluations over the (x,y), (y,z), (x,z)
    /// planes and their coordinate-swapped counterparts. Deliberately
    /// approximate: it is cheaper than true 3D noise and isotropic enough
    /// for cave carving and ore seeding.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - Unscaled block coordinates
    /// * `smooth` - Coordinate scale; bigger numbers sample the field faster
    /// * `octaves` - Layers per 2D evaluation
    ///
    /// # Returns
    /// A value in [0, 1].
    pub fn fractal3(&self, x: f32, y: f32, z: f32, smooth: f32, octaves: u32) -> f32 {
        let xy = self.fractal(x * smooth, y * smooth, octaves, 0.5);
        let yz = self.fractal(y * smooth, z * smooth, octaves, 0.5);
        let xz = self.fractal(x * smooth, z * smooth, octaves, 0.5);

        let yx = self.fractal(y * smooth, x * smooth, octaves, 0.5);
        let zy = self.fractal(z * smooth, y * smooth, octaves, 0.5);
        let zx = self.fractal(z * smooth, x * smooth, octaves, 0.5);

        (xy + yz + xz + yx + zy + zx) / 6.0
    }
}
