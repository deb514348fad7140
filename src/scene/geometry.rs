//! Geometry descriptors and their tessellation into indexed triangle meshes.
//!
//! Vertices are generated ring by ring with `u` running around the major
//! axis and `v` from pole to pole, counter-clockwise front faces, so an
//! equirectangular moon map wraps without seams.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use rustc_hash::FxHashSet;

/// Interleaved vertex consumed by every mesh pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

/// Triangle mesh produced by tessellating a [`Geometry`].
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex list.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices (three per face).
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices covering every unique edge of the triangle list.
    ///
    /// Edges shared by two faces are emitted once, in first-seen order.
    #[must_use]
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
        let mut lines = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]
            {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    lines.extend_from_slice(&[a, b]);
                }
            }
        }
        lines
    }
}

/// Ring torus in the XY plane, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusGeometry {
    /// Distance from the torus centre to the tube centre.
    pub radius: f32,
    /// Tube radius.
    pub tube: f32,
    /// Segments around the tube cross-section.
    pub radial_segments: u32,
    /// Segments along the ring.
    pub tubular_segments: u32,
}

/// UV sphere centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    /// Sphere radius.
    pub radius: f32,
    /// Horizontal (longitude) segments.
    pub width_segments: u32,
    /// Vertical (latitude) segments.
    pub height_segments: u32,
}

/// Immutable shape description attached to a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Ring torus.
    Torus(TorusGeometry),
    /// UV sphere.
    Sphere(SphereGeometry),
}

impl TorusGeometry {
    /// Torus with the given radii and segment counts. Segment counts are
    /// clamped to the minimum that still encloses a volume.
    #[must_use]
    pub fn new(
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Self {
        Self {
            radius,
            tube,
            radial_segments: radial_segments.max(2),
            tubular_segments: tubular_segments.max(3),
        }
    }

    /// Tessellate into vertices and triangle indices.
    #[must_use]
    pub fn tessellate(&self) -> MeshData {
        let radial = self.radial_segments;
        let tubular = self.tubular_segments;
        let mut vertices =
            Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let ring = self.radius + self.tube * v.cos();
                let position =
                    Vec3::new(ring * u.cos(), ring * u.sin(), self.tube * v.sin());
                let centre =
                    Vec3::new(self.radius * u.cos(), self.radius * u.sin(), 0.0);
                let normal = (position - centre).normalize_or_zero();
                vertices.push(MeshVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    uv: [i as f32 / tubular as f32, j as f32 / radial as f32],
                });
            }
        }

        let stride = tubular + 1;
        let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        MeshData { vertices, indices }
    }
}

impl SphereGeometry {
    /// Sphere with the given radius and segment counts. Segment counts are
    /// clamped to the minimum that still encloses a volume.
    #[must_use]
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    /// Tessellate into vertices and triangle indices.
    ///
    /// The pole rows keep one vertex per segment (with a half-segment UV
    /// offset) and emit a single triangle per segment instead of a quad.
    #[must_use]
    pub fn tessellate(&self) -> MeshData {
        let width = self.width_segments;
        let height = self.height_segments;
        let mut vertices =
            Vec::with_capacity(((width + 1) * (height + 1)) as usize);
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height as usize + 1);

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            let u_offset = if iy == 0 {
                0.5 / width as f32
            } else if iy == height {
                -0.5 / width as f32
            } else {
                0.0
            };

            let mut row = Vec::with_capacity(width as usize + 1);
            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let (sin_theta, cos_theta) = (v * PI).sin_cos();
                let (sin_phi, cos_phi) = (u * TAU).sin_cos();
                let position = Vec3::new(
                    -self.radius * cos_phi * sin_theta,
                    self.radius * cos_theta,
                    self.radius * sin_phi * sin_theta,
                );
                row.push(vertices.len() as u32);
                vertices.push(MeshVertex {
                    position: position.to_array(),
                    normal: position.normalize_or_zero().to_array(),
                    uv: Vec2::new(u + u_offset, 1.0 - v).to_array(),
                });
            }
            grid.push(row);
        }

        let mut indices = Vec::new();
        for iy in 0..height as usize {
            for ix in 0..width as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        MeshData { vertices, indices }
    }
}

impl Geometry {
    /// Tessellate the described shape.
    #[must_use]
    pub fn tessellate(&self) -> MeshData {
        match self {
            Self::Torus(torus) => torus.tessellate(),
            Self::Sphere(sphere) => sphere.tessellate(),
        }
    }

    /// Short name used in GPU resource labels and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Torus(_) => "Torus",
            Self::Sphere(_) => "Sphere",
        }
    }
}

impl From<TorusGeometry> for Geometry {
    fn from(torus: TorusGeometry) -> Self {
        Self::Torus(torus)
    }
}

impl From<SphereGeometry> for Geometry {
    fn from(sphere: SphereGeometry) -> Self {
        Self::Sphere(sphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_counts_match_grid() {
        let mesh = TorusGeometry::new(10.0, 3.0, 16, 100).tessellate();
        assert_eq!(mesh.vertices.len(), 17 * 101);
        assert_eq!(mesh.triangle_count(), 16 * 100 * 2);
        let max = *mesh.indices.iter().max().unwrap_or(&0);
        assert!((max as usize) < mesh.vertices.len());
    }

    #[test]
    fn torus_vertices_lie_on_tube_surface() {
        let torus = TorusGeometry::new(10.0, 3.0, 16, 100);
        for v in torus.tessellate().vertices {
            let p = Vec3::from(v.position);
            let ring = Vec3::new(p.x, p.y, 0.0).normalize() * torus.radius;
            assert!(((p - ring).length() - torus.tube).abs() < 1e-3);
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_counts_skip_degenerate_pole_faces() {
        let mesh = SphereGeometry::new(8.0, 32, 32).tessellate();
        assert_eq!(mesh.vertices.len(), 33 * 33);
        // Two triangles per quad except one per segment on each pole row.
        assert_eq!(mesh.triangle_count(), 32 * 32 * 2 - 2 * 32);
    }

    #[test]
    fn sphere_vertices_at_radius() {
        let sphere = SphereGeometry::new(0.25, 24, 24);
        for v in sphere.tessellate().vertices {
            assert!((Vec3::from(v.position).length() - 0.25).abs() < 1e-5);
            assert!(v.uv[1] >= 0.0 && v.uv[1] <= 1.0);
        }
    }

    #[test]
    fn segment_counts_are_clamped() {
        let sphere = SphereGeometry::new(1.0, 0, 0);
        assert_eq!(sphere.width_segments, 3);
        assert_eq!(sphere.height_segments, 2);
        assert!(!sphere.tessellate().indices.is_empty());
    }

    #[test]
    fn wireframe_emits_each_edge_once() {
        // Two triangles sharing the 1-2 diagonal: five unique edges.
        let mesh = MeshData {
            vertices: vec![
                MeshVertex {
                    position: [0.0; 3],
                    normal: [0.0, 0.0, 1.0],
                    uv: [0.0; 2],
                };
                4
            ],
            indices: vec![0, 1, 2, 2, 1, 3],
        };
        let lines = mesh.wireframe_indices();
        assert_eq!(lines.len(), 5 * 2);

        let mut edges: Vec<(u32, u32)> = lines
            .chunks_exact(2)
            .map(|e| (e[0].min(e[1]), e[0].max(e[1])))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        assert_eq!(edges.len(), 5);
    }

    #[test]
    fn torus_wireframe_edge_count() {
        let (radial, tubular) = (4, 6);
        let mesh = TorusGeometry::new(10.0, 3.0, radial, tubular).tessellate();
        let edges = mesh.wireframe_indices().len() / 2;
        // One diagonal per quad, plus every grid row and column segment
        // (seam vertices are duplicated, so rows/columns do not wrap).
        let diagonals = radial * tubular;
        let rows = (radial + 1) * tubular;
        let columns = (tubular + 1) * radial;
        assert_eq!(edges as u32, diagonals + rows + columns);
    }
}
