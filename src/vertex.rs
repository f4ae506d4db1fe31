use bytemuck::{Pod, Zeroable};

#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Canonical pyramid: apex plus four base corners, one color per vertex.
pub const PYRAMID_VERTICES: [Vertex; 5] = [
    Vertex {
        position: [0.0, 0.5, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.5],
        color: [0.0, 1.0, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.5],
        color: [0.0, 0.0, 1.0],
    },
    Vertex {
        position: [0.5, -0.5, -0.5],
        color: [1.0, 1.0, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, -0.5],
        color: [1.0, 0.0, 1.0],
    },
];

/// Six triangles: the four lateral faces, then the two halves of the quad base.
pub const PYRAMID_INDICES: [u32; 18] = [
    0, 1, 2, //
    0, 2, 3, //
    0, 3, 4, //
    0, 4, 1, //
    1, 2, 3, //
    1, 3, 4, //
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_buffer_forms_six_triangles_over_five_vertices() {
        assert_eq!(PYRAMID_INDICES.len(), 18);
        assert_eq!(PYRAMID_INDICES.chunks_exact(3).count(), 6);
        assert!(PYRAMID_INDICES
            .iter()
            .all(|&index| (index as usize) < PYRAMID_VERTICES.len()));
    }

    #[test]
    fn first_triangle_is_apex_and_two_adjacent_base_corners() {
        assert_eq!(&PYRAMID_INDICES[..3], &[0, 1, 2]);
    }

    #[test]
    fn apex_sits_above_a_flat_base() {
        let apex = PYRAMID_VERTICES[0];
        assert_eq!(apex.position[1], 0.5);
        for corner in &PYRAMID_VERTICES[1..] {
            assert_eq!(corner.position[1], -0.5);
        }
    }
}
