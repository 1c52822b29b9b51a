use bytemuck::{Pod, Zeroable};

use crate::math::linear_from_hex;

const CENTER_LINE_HEX: u32 = 0x444444;
const GRID_LINE_HEX: u32 = 0x888888;

/// Vertex for the reference line overlays (grid and axes)
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct HelperVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl HelperVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<HelperVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Square grid of lines on the ground plane, centered at the origin
///
/// The two lines crossing the origin are darker than the rest. Vertices
/// come in pairs for a line-list draw.
pub fn grid_vertices(size: u32, divisions: u32) -> Vec<HelperVertex> {
    let center_color = linear_from_hex(CENTER_LINE_HEX);
    let grid_color = linear_from_hex(GRID_LINE_HEX);

    let half = size as f32 / 2.0;
    let step = size as f32 / divisions as f32;

    let mut vertices = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i * 2 == divisions {
            center_color
        } else {
            grid_color
        };

        vertices.push(HelperVertex { position: [-half, 0.0, k], color });
        vertices.push(HelperVertex { position: [half, 0.0, k], color });
        vertices.push(HelperVertex { position: [k, 0.0, -half], color });
        vertices.push(HelperVertex { position: [k, 0.0, half], color });
    }
    vertices
}

/// World axis lines from the origin: x red, y green, z blue, with the tip
/// tinted lighter than the root
pub fn axes_vertices(length: f32) -> Vec<HelperVertex> {
    vec![
        HelperVertex { position: [0.0, 0.0, 0.0], color: [1.0, 0.0, 0.0] },
        HelperVertex { position: [length, 0.0, 0.0], color: [1.0, 0.6, 0.0] },
        HelperVertex { position: [0.0, 0.0, 0.0], color: [0.0, 1.0, 0.0] },
        HelperVertex { position: [0.0, length, 0.0], color: [0.6, 1.0, 0.0] },
        HelperVertex { position: [0.0, 0.0, 0.0], color: [0.0, 0.0, 1.0] },
        HelperVertex { position: [0.0, 0.0, length], color: [0.0, 0.6, 1.0] },
    ]
}

/// Combined grid and axes lines, drawn with a single buffer
pub fn helper_vertices() -> Vec<HelperVertex> {
    let mut vertices = grid_vertices(12, 12);
    vertices.extend(axes_vertices(4.0));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_vertex_count() {
        // 13 lines per direction, 2 directions, 2 vertices per line
        let vertices = grid_vertices(12, 12);
        assert_eq!(vertices.len(), 13 * 2 * 2);
    }

    #[test]
    fn test_grid_stays_on_ground_plane() {
        for vertex in grid_vertices(12, 12) {
            assert_eq!(vertex.position[1], 0.0, "Grid lines must lie at y = 0");
            assert!(vertex.position[0].abs() <= 6.0);
            assert!(vertex.position[2].abs() <= 6.0);
        }
    }

    #[test]
    fn test_grid_center_lines_darker() {
        let vertices = grid_vertices(12, 12);
        let center = linear_from_hex(0x444444);
        let center_count = vertices
            .iter()
            .filter(|vertex| vertex.color == center)
            .count();
        // One x line and one z line through the origin, 2 vertices each
        assert_eq!(center_count, 4, "Exactly the origin lines use the darker color");
    }

    #[test]
    fn test_axes_reach_tip_length() {
        let vertices = axes_vertices(4.0);
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[1].position, [4.0, 0.0, 0.0]);
        assert_eq!(vertices[3].position, [0.0, 4.0, 0.0]);
        assert_eq!(vertices[5].position, [0.0, 0.0, 4.0]);
    }

    #[test]
    fn test_axes_colors_follow_axes() {
        let vertices = axes_vertices(4.0);
        assert_eq!(vertices[0].color[0], 1.0, "x axis is red");
        assert_eq!(vertices[2].color[1], 1.0, "y axis is green");
        assert_eq!(vertices[4].color[2], 1.0, "z axis is blue");
    }

    #[test]
    fn test_combined_helper_buffer() {
        let vertices = helper_vertices();
        assert_eq!(vertices.len(), 52 + 6);
        assert_eq!(vertices.len() % 2, 0, "Line lists need vertex pairs");
    }

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(HelperVertex::layout().array_stride, 24);
    }
}
