//! Mesh buffer structures for chunk geometry.
//!
//! A [`MeshData`] is a set of parallel arrays sized exactly to the visible
//! surface of one chunk. Buffers are rebuilt wholesale whenever any block
//! in the chunk changes visible-face state; they are never patched in
//! place.

use cgmath::{Point3, Vector2, Vector3};

/// Geometry buffers for one chunk, one material class (terrain or water).
///
/// Invariants, checked by the extractor after emission:
/// - `positions`, `normals`, `uvs` and `suvs` all have the same length;
/// - `indices.len() == positions.len() * 3 / 2` — each 4-vertex quad
///   contributes two triangles.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex positions, in chunk-local space (block centers at integer
    /// coordinates, corners offset by one half).
    pub positions: Vec<Point3<f32>>,
    /// Per-vertex normals; constant across each quad.
    pub normals: Vec<Vector3<f32>>,
    /// Primary texture coordinates: the material's atlas tile.
    pub uvs: Vec<Vector2<f32>>,
    /// Secondary texture coordinates: the damage-tier crack tile.
    pub suvs: Vec<Vector2<f32>>,
    /// Triangle indices, six per quad.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Creates buffers pre-allocated for exactly `vertex_count` vertices.
    ///
    /// The sizing pass computes the count before emission so the buffers
    /// never grow or over-allocate.
    pub fn with_capacity(vertex_count: usize) -> Self {
        MeshData {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            suvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(vertex_count * 3 / 2),
        }
    }

    /// The number of vertices emitted so far.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Appends one quad: four vertices sharing a normal, their texture
    /// coordinates, the quad's crack tile, and six indices forming two
    /// triangles that share the diagonal between corners 1 and 3.
    pub(crate) fn push_quad(
        &mut self,
        normal: Vector3<f32>,
        corners: [Point3<f32>; 4],
        uvs: [Vector2<f32>; 4],
        suvs: [Vector2<f32>; 4],
    ) {
        let base = self.positions.len() as u32;

        self.positions.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 4]);
        self.uvs.extend_from_slice(&uvs);
        self.suvs.extend_from_slice(&suvs);

        self.indices.extend_from_slice(&[
            base + 3,
            base + 1,
            base,
            base + 3,
            base + 2,
            base + 1,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_quad_keeps_the_arrays_parallel() {
        let mut data = MeshData::with_capacity(8);
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let uvs = [Vector2::new(0.0, 0.0); 4];
        for _ in 0..2 {
            data.push_quad(Vector3::unit_y(), corners, uvs, uvs);
        }

        assert_eq!(data.positions.len(), 8);
        assert_eq!(data.normals.len(), 8);
        assert_eq!(data.uvs.len(), 8);
        assert_eq!(data.suvs.len(), 8);
        assert_eq!(data.indices.len(), 12);
    }

    #[test]
    fn quads_share_the_one_three_diagonal() {
        let mut data = MeshData::default();
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let uvs = [Vector2::new(0.0, 0.0); 4];
        data.push_quad(Vector3::unit_y(), corners, uvs, uvs);

        assert_eq!(data.indices, vec![3, 1, 0, 3, 2, 1]);

        data.push_quad(Vector3::unit_y(), corners, uvs, uvs);
        assert_eq!(&data.indices[6..], &[7, 5, 4, 7, 6, 5]);
    }
}
