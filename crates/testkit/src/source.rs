//! Billboard source double with caller-controlled collections.

use billboard3d_core::{BillboardSource, ContentKind, TexturePayload};
use glam::{Vec2, Vec3};

/// Source whose collections are set directly, including mismatched lengths.
#[derive(Debug, Clone)]
pub struct StaticSource {
    /// Content kind reported by the source.
    pub kind: ContentKind,
    /// Anchor positions.
    pub positions: Vec<Vec3>,
    /// RGBA colors.
    pub colors: Vec<[f32; 4]>,
    /// Texture coordinates.
    pub texture_coordinates: Vec<Vec2>,
    /// Pixel offsets.
    pub offsets: Vec<Vec2>,
    /// Pixel width.
    pub width: f32,
    /// Pixel height.
    pub height: f32,
    /// Primary texture.
    pub texture: Option<TexturePayload>,
    /// Alpha texture.
    pub alpha_texture: Option<TexturePayload>,
    /// How often `prepare_offsets` ran.
    pub prepare_calls: u32,
}

impl StaticSource {
    /// `count` well-formed vertices along the X axis.
    ///
    /// Vertex `i` sits at `(i, 0, 0)` with offset `(i, -i)`.
    pub fn with_vertices(kind: ContentKind, count: usize) -> Self {
        Self {
            kind,
            positions: (0..count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect(),
            colors: (0..count).map(|i| [i as f32 / 10.0, 0.5, 1.0, 1.0]).collect(),
            texture_coordinates: (0..count).map(|i| Vec2::new(i as f32 * 0.1, 0.25)).collect(),
            offsets: (0..count).map(|i| Vec2::new(i as f32, -(i as f32))).collect(),
            width: 10.0,
            height: 10.0,
            texture: None,
            alpha_texture: None,
            prepare_calls: 0,
        }
    }

    /// One anchor of the given pixel size, as the hit tester sees it.
    pub fn single_anchor(position: Vec3, width: f32, height: f32) -> Self {
        Self {
            positions: vec![position],
            width,
            height,
            ..Self::with_vertices(ContentKind::SingleImage, 1)
        }
    }

    /// Builder: attach a primary texture.
    pub fn with_texture(mut self, bytes: Vec<u8>) -> Self {
        self.texture = Some(TexturePayload::from_bytes(bytes));
        self
    }

    /// Builder: attach an alpha texture.
    pub fn with_alpha_texture(mut self, bytes: Vec<u8>) -> Self {
        self.alpha_texture = Some(TexturePayload::from_bytes(bytes));
        self
    }
}

impl BillboardSource for StaticSource {
    fn kind(&self) -> ContentKind {
        self.kind
    }

    fn prepare_offsets(&mut self) {
        self.prepare_calls += 1;
    }

    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    fn texture_coordinates(&self) -> &[Vec2] {
        &self.texture_coordinates
    }

    fn texture_offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn texture(&self) -> Option<&TexturePayload> {
        self.texture.as_ref()
    }

    fn alpha_texture(&self) -> Option<&TexturePayload> {
        self.alpha_texture.as_ref()
    }
}
