//! Static meshes for external renderers
//!
//! Every live unit is drawn with the same cube translated to the unit's
//! position; the head is a small inverted pyramid whose apex marks the
//! nozzle; the build plate is a flat square at z = 0.

use glam::{Mat4, Vec3};

use depositkit_core::constants::BUILD_PLATE_HALF_EXTENT;

/// Height and half-width of the head marker pyramid
const HEAD_MARKER_SIZE: f32 = 0.1;

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Axis-aligned bounds, or `None` for a mesh without vertices
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))),
        )
    }

    /// Flattened `[x, y, z, x, y, z, ...]` vertex data for upload
    pub fn positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }
}

/// Cube centred on the origin
pub fn unit_cube(half_extent: f32) -> Mesh {
    let h = half_extent;

    #[rustfmt::skip]
    let vertices = vec![
        Vec3::new(-h, -h, -h), Vec3::new( h, -h, -h),
        Vec3::new( h,  h, -h), Vec3::new(-h,  h, -h),
        Vec3::new(-h, -h,  h), Vec3::new( h, -h,  h),
        Vec3::new( h,  h,  h), Vec3::new(-h,  h,  h),
    ];

    #[rustfmt::skip]
    let indices = vec![
        // Bottom
        0, 2, 1,  0, 3, 2,
        // Top
        4, 5, 6,  4, 6, 7,
        // Front (Y-)
        0, 1, 5,  0, 5, 4,
        // Back (Y+)
        3, 7, 6,  3, 6, 2,
        // Left (X-)
        0, 4, 7,  0, 7, 3,
        // Right (X+)
        1, 2, 6,  1, 6, 5,
    ];

    Mesh::new(vertices, indices)
}

/// Inverted pyramid with its apex at the origin and its base above it
pub fn head_marker() -> Mesh {
    let s = HEAD_MARKER_SIZE;

    #[rustfmt::skip]
    let vertices = vec![
        Vec3::ZERO,
        Vec3::new(-s, -s, s), Vec3::new( s, -s, s),
        Vec3::new( s,  s, s), Vec3::new(-s,  s, s),
    ];

    #[rustfmt::skip]
    let indices = vec![
        // Sides
        0, 2, 1,  0, 3, 2,  0, 4, 3,  0, 1, 4,
        // Base
        1, 2, 3,  1, 3, 4,
    ];

    Mesh::new(vertices, indices)
}

/// Square build plate at z = 0
pub fn build_plate() -> Mesh {
    let e = BUILD_PLATE_HALF_EXTENT;

    #[rustfmt::skip]
    let vertices = vec![
        Vec3::new(-e, -e, 0.0), Vec3::new( e, -e, 0.0),
        Vec3::new( e,  e, 0.0), Vec3::new(-e,  e, 0.0),
    ];

    Mesh::new(vertices, vec![0, 1, 2, 0, 2, 3])
}

/// Model matrix placing a mesh at `position`
pub fn model_matrix(position: Vec3) -> Mat4 {
    Mat4::from_translation(position)
}
