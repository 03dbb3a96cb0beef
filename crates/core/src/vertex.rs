//! Renderer-ready billboard vertex record.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Vertex format for billboard rendering
///
/// The vertex stage expands each anchor by the pixel offset stored in
/// `tex_coord[2..4]` to build the camera-facing quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BillboardVertex {
    /// Homogeneous model-space anchor position (x, y, z, 1)
    pub position: [f32; 4],
    /// Color (RGBA), copied unchanged from the source
    pub color: [f32; 4],
    /// (u, v, offset_x, offset_y)
    pub tex_coord: [f32; 4],
}

impl BillboardVertex {
    /// Size of one vertex in bytes, used as the buffer stride.
    pub const SIZE_IN_BYTES: usize = std::mem::size_of::<Self>();

    /// Assemble a vertex from source entries.
    pub fn new(position: Vec3, color: [f32; 4], uv: Vec2, offset: Vec2) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            color,
            tex_coord: [uv.x, uv.y, offset.x, offset.y],
        }
    }

    /// Pixel offset applied by the vertex stage.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.tex_coord[2], self.tex_coord[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(BillboardVertex::SIZE_IN_BYTES, 48);
        let vertices = [BillboardVertex::default(); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 144);
    }

    #[test]
    fn new_extends_position_and_packs_offsets() {
        let vertex = BillboardVertex::new(
            Vec3::new(1.0, 2.0, 3.0),
            [0.1, 0.2, 0.3, 0.4],
            Vec2::new(0.25, 0.75),
            Vec2::new(-8.0, 4.0),
        );
        assert_eq!(vertex.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(vertex.color, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(vertex.tex_coord, [0.25, 0.75, -8.0, 4.0]);
        assert_eq!(vertex.offset(), Vec2::new(-8.0, 4.0));
    }
}
