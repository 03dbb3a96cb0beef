//! Billboard sources
//!
//! Each source lays its content out as screen-space quads around one or more
//! anchors. Every quad is two triangles (six vertices) that share the anchor
//! position and differ only in texture coordinate and pixel offset.

pub mod billboard;
pub mod label;
pub mod text;

pub use billboard::BillboardImage;
pub use label::BillboardSingleText;
pub use text::{BillboardText, GlyphQuad, TextInfo};

use glam::{Vec2, Vec3};

/// Vertices emitted per quad.
pub const VERTICES_PER_QUAD: usize = 6;

/// Opaque white, the default tint.
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Per-vertex collections shared by all sources.
#[derive(Debug, Clone, Default)]
pub struct QuadBuffer {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) colors: Vec<[f32; 4]>,
    pub(crate) texture_coordinates: Vec<Vec2>,
    pub(crate) offsets: Vec<Vec2>,
}

impl QuadBuffer {
    /// Drop all vertices, keeping allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.texture_coordinates.clear();
        self.offsets.clear();
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no vertex has been emitted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Emit one quad anchored at `anchor`.
    ///
    /// Offsets are in pixels with y up; `uv_min` is the top-left texel corner.
    pub fn push_quad(
        &mut self,
        anchor: Vec3,
        color: [f32; 4],
        uv_min: Vec2,
        uv_max: Vec2,
        offset_min: Vec2,
        offset_max: Vec2,
    ) {
        let top_left = (Vec2::new(uv_min.x, uv_min.y), Vec2::new(offset_min.x, offset_max.y));
        let top_right = (Vec2::new(uv_max.x, uv_min.y), Vec2::new(offset_max.x, offset_max.y));
        let bottom_left = (Vec2::new(uv_min.x, uv_max.y), Vec2::new(offset_min.x, offset_min.y));
        let bottom_right = (Vec2::new(uv_max.x, uv_max.y), Vec2::new(offset_max.x, offset_min.y));

        let corners = [top_left, bottom_left, bottom_right, top_left, bottom_right, top_right];
        for (uv, offset) in corners {
            self.positions.push(anchor);
            self.colors.push(color);
            self.texture_coordinates.push(uv);
            self.offsets.push(offset);
        }
    }

    /// Emit a quad of `size` pixels centered on the anchor, textured with the full image.
    pub fn push_centered_quad(&mut self, anchor: Vec3, color: [f32; 4], size: Vec2) {
        let half = size * 0.5;
        self.push_quad(anchor, color, Vec2::ZERO, Vec2::ONE, -half, half);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_emits_two_triangles_around_anchor() {
        let mut quads = QuadBuffer::default();
        quads.push_centered_quad(Vec3::new(1.0, 2.0, 3.0), WHITE, Vec2::new(10.0, 4.0));

        assert_eq!(quads.len(), VERTICES_PER_QUAD);
        assert!(quads.positions.iter().all(|p| *p == Vec3::new(1.0, 2.0, 3.0)));
        // top-left, bottom-left, bottom-right, top-left, bottom-right, top-right
        assert_eq!(quads.offsets[0], Vec2::new(-5.0, 2.0));
        assert_eq!(quads.offsets[1], Vec2::new(-5.0, -2.0));
        assert_eq!(quads.offsets[2], Vec2::new(5.0, -2.0));
        assert_eq!(quads.offsets[5], Vec2::new(5.0, 2.0));
        assert_eq!(quads.texture_coordinates[0], Vec2::new(0.0, 0.0));
        assert_eq!(quads.texture_coordinates[2], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut quads = QuadBuffer::default();
        quads.push_centered_quad(Vec3::ZERO, WHITE, Vec2::ONE);
        quads.clear();
        assert!(quads.is_empty());
        assert!(quads.offsets.is_empty());
    }
}
