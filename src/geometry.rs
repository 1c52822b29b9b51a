use std::f32::consts::PI;

/// Mesh vertex: position + outward normal
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed UV sphere, rings of latitude by columns of longitude
pub struct SphereGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let mut vertices =
            Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * 2.0 * PI;

                let nx = -phi.cos() * theta.sin();
                let ny = theta.cos();
                let nz = phi.sin() * theta.sin();

                vertices.push(Vertex {
                    position: [nx * radius, ny * radius, nz * radius],
                    normal: [nx, ny, nz],
                });
            }
        }

        let columns = width_segments + 1;
        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * columns + ix + 1;
                let b = iy * columns + ix;
                let c = (iy + 1) * columns + ix;
                let d = (iy + 1) * columns + ix + 1;

                // Pole rows contribute one triangle per quad
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_sphere_vertex_count() {
        let sphere = SphereGeometry::new(0.5, 50, 50);
        assert_eq!(sphere.vertices.len(), 51 * 51);
    }

    #[test]
    fn test_sphere_triangle_count() {
        let sphere = SphereGeometry::new(0.5, 50, 50);
        // 2 triangles per quad minus 1 per pole-row quad
        let expected_triangles = 2 * 50 * 50 - 2 * 50;
        assert_eq!(sphere.indices.len(), expected_triangles * 3);
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let sphere = SphereGeometry::new(0.5, 8, 8);
        for vertex in &sphere.vertices {
            let r = Vec3::from_array(vertex.position).length();
            assert!((r - 0.5).abs() < 1e-5, "Vertex should lie on the sphere, got radius {}", r);
        }
    }

    #[test]
    fn test_sphere_normals_unit_and_outward() {
        let sphere = SphereGeometry::new(1.0, 8, 8);
        for vertex in &sphere.vertices {
            let normal = Vec3::from_array(vertex.normal);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            let position = Vec3::from_array(vertex.position);
            assert!(normal.dot(position) > 0.99, "Normal should point outward");
        }
    }

    #[test]
    fn test_sphere_poles() {
        let sphere = SphereGeometry::new(0.5, 8, 8);
        assert!((sphere.vertices[0].position[1] - 0.5).abs() < 1e-6, "First ring is the +Y pole");
        let last = sphere.vertices.last().unwrap();
        assert!((last.position[1] + 0.5).abs() < 1e-6, "Last ring is the -Y pole");
    }

    #[test]
    fn test_sphere_indices_in_bounds() {
        let sphere = SphereGeometry::new(0.5, 12, 12);
        let count = sphere.vertices.len() as u32;
        assert!(sphere.indices.iter().all(|&i| i < count));
    }
}
