//! Mesh building utilities for procedural 3D geometry.
//!
//! All meshes are triangle soups with position + normal + uv data.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Vertex with position, normal and texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Built mesh data ready for GPU upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
}

impl MeshData {
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// Fluent mesh builder for procedural geometry.
pub struct MeshBuilder {
    vertices: Vec<MeshVertex>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    fn push(&mut self, position: Vec3, normal: Vec3, uv: Vec2) {
        self.vertices.push(MeshVertex {
            position: position.into(),
            normal: normal.into(),
            uv: uv.into(),
        });
    }

    /// Add a triangle with automatic normal calculation.
    pub fn add_triangle(&mut self, p1: Vec3, p2: Vec3, p3: Vec3) -> &mut Self {
        // Normal from the cross product of the edges.
        let u = p2 - p1;
        let v = p3 - p1;
        let normal = u.cross(v).normalize_or_zero();

        self.push(p1, normal, Vec2::ZERO);
        self.push(p2, normal, Vec2::ZERO);
        self.push(p3, normal, Vec2::ZERO);
        self
    }

    /// Add a triangle with explicit normals and texture coordinates.
    #[allow(clippy::too_many_arguments)]
    pub fn add_triangle_full(
        &mut self,
        p1: Vec3,
        n1: Vec3,
        t1: Vec2,
        p2: Vec3,
        n2: Vec3,
        t2: Vec2,
        p3: Vec3,
        n3: Vec3,
        t3: Vec2,
    ) -> &mut Self {
        self.push(p1, n1, t1);
        self.push(p2, n2, t2);
        self.push(p3, n3, t3);
        self
    }

    /// Add a quad (two triangles) with automatic normal calculation.
    ///
    /// Vertices are counter-clockwise; texture coordinates run (0,0) at p1
    /// to (1,1) at p3.
    pub fn add_quad(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) -> &mut Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize_or_zero();
        let uv = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        self.add_triangle_full(p1, normal, uv[0], p2, normal, uv[1], p3, normal, uv[2]);
        self.add_triangle_full(p1, normal, uv[0], p3, normal, uv[2], p4, normal, uv[3]);
        self
    }

    /// Add a box centered at `center`.
    pub fn add_box_at(&mut self, center: Vec3, width: f32, height: f32, depth: f32) -> &mut Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let hd = depth / 2.0;
        let c = center;

        // Front (+Z)
        self.add_quad(
            c + Vec3::new(-hw, -hh, hd),
            c + Vec3::new(hw, -hh, hd),
            c + Vec3::new(hw, hh, hd),
            c + Vec3::new(-hw, hh, hd),
        );
        // Back (-Z)
        self.add_quad(
            c + Vec3::new(hw, -hh, -hd),
            c + Vec3::new(-hw, -hh, -hd),
            c + Vec3::new(-hw, hh, -hd),
            c + Vec3::new(hw, hh, -hd),
        );
        // Top (+Y)
        self.add_quad(
            c + Vec3::new(-hw, hh, hd),
            c + Vec3::new(hw, hh, hd),
            c + Vec3::new(hw, hh, -hd),
            c + Vec3::new(-hw, hh, -hd),
        );
        // Bottom (-Y)
        self.add_quad(
            c + Vec3::new(-hw, -hh, -hd),
            c + Vec3::new(hw, -hh, -hd),
            c + Vec3::new(hw, -hh, hd),
            c + Vec3::new(-hw, -hh, hd),
        );
        // Right (+X)
        self.add_quad(
            c + Vec3::new(hw, -hh, hd),
            c + Vec3::new(hw, -hh, -hd),
            c + Vec3::new(hw, hh, -hd),
            c + Vec3::new(hw, hh, hd),
        );
        // Left (-X)
        self.add_quad(
            c + Vec3::new(-hw, -hh, -hd),
            c + Vec3::new(-hw, -hh, hd),
            c + Vec3::new(-hw, hh, hd),
            c + Vec3::new(-hw, hh, -hd),
        );
        self
    }

    /// Add a box centered at the origin.
    pub fn add_box(&mut self, width: f32, height: f32, depth: f32) -> &mut Self {
        self.add_box_at(Vec3::ZERO, width, height, depth)
    }

    /// Add a flat plane in the XY plane, facing +Z.
    pub fn add_plane(&mut self, width: f32, height: f32) -> &mut Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        self.add_quad(
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        )
    }

    /// Add a UV sphere centered at the origin.
    pub fn add_sphere(&mut self, radius: f32, segments: u32, rings: u32) -> &mut Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let point = |seg: u32, ring: u32| {
            let u = seg as f32 / segments as f32;
            let v = ring as f32 / rings as f32;
            let theta = u * TAU;
            let phi = v * PI;
            let dir = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            (dir * radius, dir, Vec2::new(u, v))
        };

        for ring in 0..rings {
            for seg in 0..segments {
                let (p1, n1, t1) = point(seg, ring);
                let (p2, n2, t2) = point(seg + 1, ring);
                let (p3, n3, t3) = point(seg + 1, ring + 1);
                let (p4, n4, t4) = point(seg, ring + 1);

                self.add_triangle_full(p1, n1, t1, p3, n3, t3, p2, n2, t2);
                self.add_triangle_full(p1, n1, t1, p4, n4, t4, p3, n3, t3);
            }
        }
        self
    }

    /// Add a torus around the Y axis: `radius` to the tube center, `tube`
    /// the tube's own radius.
    pub fn add_torus(
        &mut self,
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> &mut Self {
        let radial_segments = radial_segments.max(3);
        let tubular_segments = tubular_segments.max(3);

        let point = |tub: u32, rad: u32| {
            let u = tub as f32 / tubular_segments as f32 * TAU;
            let v = rad as f32 / radial_segments as f32 * TAU;
            let ring_center = Vec3::new(u.cos() * radius, 0.0, u.sin() * radius);
            let normal = Vec3::new(u.cos() * v.cos(), v.sin(), u.sin() * v.cos());
            (
                ring_center + normal * tube,
                normal,
                Vec2::new(
                    tub as f32 / tubular_segments as f32,
                    rad as f32 / radial_segments as f32,
                ),
            )
        };

        for tub in 0..tubular_segments {
            for rad in 0..radial_segments {
                let (p1, n1, t1) = point(tub, rad);
                let (p2, n2, t2) = point(tub + 1, rad);
                let (p3, n3, t3) = point(tub + 1, rad + 1);
                let (p4, n4, t4) = point(tub, rad + 1);

                self.add_triangle_full(p1, n1, t1, p3, n3, t3, p2, n2, t2);
                self.add_triangle_full(p1, n1, t1, p4, n4, t4, p3, n3, t3);
            }
        }
        self
    }

    /// Add a cone along the Y axis, base at -height/2, apex at +height/2.
    pub fn add_cone(&mut self, radius: f32, height: f32, segments: u32) -> &mut Self {
        let segments = segments.max(3);
        let half = height / 2.0;
        let apex = Vec3::new(0.0, half, 0.0);

        for i in 0..segments {
            let a1 = i as f32 / segments as f32 * TAU;
            let a2 = (i + 1) as f32 / segments as f32 * TAU;
            let b1 = Vec3::new(a1.cos() * radius, -half, a1.sin() * radius);
            let b2 = Vec3::new(a2.cos() * radius, -half, a2.sin() * radius);

            // Side face
            self.add_triangle(b1, apex, b2);
            // Base cap
            self.add_triangle(Vec3::new(0.0, -half, 0.0), b2, b1);
        }
        self
    }

    /// Add a (p, q) torus knot tube.
    pub fn add_torus_knot(
        &mut self,
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    ) -> &mut Self {
        let tubular_segments = tubular_segments.max(3);
        let radial_segments = radial_segments.max(3);
        let p = p as f32;
        let q = q as f32;

        let curve = |t: f32| {
            let qt = q * t;
            let pt = p * t;
            let r = radius * 0.5 * (2.0 + qt.cos());
            Vec3::new(r * pt.cos(), r * pt.sin(), radius * 0.5 * qt.sin())
        };

        // Moving frame from neighbouring curve samples.
        let frame = |t: f32| {
            let delta = 0.001;
            let p1 = curve(t);
            let p2 = curve(t + delta);
            let tangent = p2 - p1;
            let n = p2 + p1;
            let bitangent = tangent.cross(n).normalize_or_zero();
            let normal = bitangent.cross(tangent).normalize_or_zero();
            (p1, normal, bitangent)
        };

        let point = |tub: u32, rad: u32| {
            let t = tub as f32 / tubular_segments as f32 * TAU;
            let (center, normal, bitangent) = frame(t);
            let angle = rad as f32 / radial_segments as f32 * TAU;
            let dir = normal * angle.cos() + bitangent * angle.sin();
            (
                center + dir * tube,
                dir,
                Vec2::new(
                    tub as f32 / tubular_segments as f32,
                    rad as f32 / radial_segments as f32,
                ),
            )
        };

        for tub in 0..tubular_segments {
            for rad in 0..radial_segments {
                let (p1, n1, t1) = point(tub, rad);
                let (p2, n2, t2) = point(tub + 1, rad);
                let (p3, n3, t3) = point(tub + 1, rad + 1);
                let (p4, n4, t4) = point(tub, rad + 1);

                self.add_triangle_full(p1, n1, t1, p3, n3, t3, p2, n2, t2);
                self.add_triangle_full(p1, n1, t1, p4, n4, t4, p3, n3, t3);
            }
        }
        self
    }

    /// Clear all vertices.
    pub fn clear(&mut self) -> &mut Self {
        self.vertices.clear();
        self
    }

    /// Get current vertex count.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Build the final mesh data.
    pub fn build(&self) -> MeshData {
        MeshData {
            vertices: self.vertices.clone(),
        }
    }

    /// Build and consume the builder.
    pub fn finish(self) -> MeshData {
        MeshData {
            vertices: self.vertices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_builder_triangle() {
        let mut builder = MeshBuilder::new();
        builder.add_triangle(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.5, 1.0, 0.0),
        );
        let mesh = builder.build();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_mesh_builder_box() {
        let mut builder = MeshBuilder::new();
        builder.add_box(1.0, 1.0, 1.0);
        let mesh = builder.build();
        // 6 faces * 2 triangles * 3 vertices = 36
        assert_eq!(mesh.vertex_count(), 36);
    }

    #[test]
    fn test_mesh_builder_plane() {
        let mut builder = MeshBuilder::new();
        builder.add_plane(2.0, 1.0);
        assert_eq!(builder.build().vertex_count(), 6);
    }

    #[test]
    fn test_mesh_builder_sphere() {
        let mut builder = MeshBuilder::new();
        builder.add_sphere(0.5, 16, 16);
        let mesh = builder.build();
        assert_eq!(mesh.vertex_count(), 16 * 16 * 6);

        // Every vertex sits on the sphere surface.
        for v in &mesh.vertices {
            let len = Vec3::from(v.position).length();
            assert!((len - 0.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_mesh_builder_torus() {
        let mut builder = MeshBuilder::new();
        builder.add_torus(0.3, 0.2, 16, 32);
        assert_eq!(builder.build().vertex_count(), 16 * 32 * 6);
    }

    #[test]
    fn test_mesh_builder_cone() {
        let mut builder = MeshBuilder::new();
        builder.add_cone(1.0, 2.0, 32);
        // 32 segments * (1 side + 1 cap triangle) * 3 vertices
        assert_eq!(builder.build().vertex_count(), 32 * 2 * 3);
    }

    #[test]
    fn test_mesh_builder_torus_knot() {
        let mut builder = MeshBuilder::new();
        builder.add_torus_knot(0.8, 0.35, 100, 16, 2, 3);
        let mesh = builder.build();
        assert_eq!(mesh.vertex_count(), 100 * 16 * 6);
        for v in &mesh.vertices {
            assert!(v.position.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mut builder = MeshBuilder::new();
        builder.add_sphere(1.0, 8, 8).add_torus(1.0, 0.3, 8, 8);
        for v in builder.build().vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-3);
        }
    }
}
