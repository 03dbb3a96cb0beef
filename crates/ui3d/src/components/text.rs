//! Multi-text billboard - many independent labels sharing one glyph atlas

use super::{QuadBuffer, WHITE};
use billboard3d_core::{BillboardSource, ContentKind, TexturePayload};
use glam::{Vec2, Vec3};

/// One glyph already placed relative to its label anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Top-left texture coordinate in the atlas
    pub uv_min: Vec2,
    /// Bottom-right texture coordinate in the atlas
    pub uv_max: Vec2,
    /// Bottom-left corner in pixels relative to the anchor (y up)
    pub offset_min: Vec2,
    /// Top-right corner in pixels relative to the anchor (y up)
    pub offset_max: Vec2,
}

impl GlyphQuad {
    /// Create a glyph quad.
    pub fn new(uv_min: Vec2, uv_max: Vec2, offset_min: Vec2, offset_max: Vec2) -> Self {
        Self {
            uv_min,
            uv_max,
            offset_min,
            offset_max,
        }
    }
}

/// A label: anchor, color and its laid-out glyphs.
#[derive(Debug, Clone)]
pub struct TextInfo {
    /// Label text, kept for diagnostics
    pub text: String,
    /// World anchor
    pub position: Vec3,
    /// Text color (RGBA)
    pub color: [f32; 4],
    /// Glyph placement
    pub glyphs: Vec<GlyphQuad>,
}

impl TextInfo {
    /// Create a label with no glyphs yet.
    pub fn new(text: impl Into<String>, position: Vec3) -> Self {
        Self {
            text: text.into(),
            position,
            color: WHITE,
            glyphs: Vec::new(),
        }
    }

    /// Builder: Set color
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// Builder: Append a glyph
    pub fn with_glyph(mut self, glyph: GlyphQuad) -> Self {
        self.glyphs.push(glyph);
        self
    }
}

/// A collection of labels drawn in one foreground pass.
#[derive(Debug, Clone, Default)]
pub struct BillboardText {
    /// Labels in draw order
    pub items: Vec<TextInfo>,

    /// Glyph atlas
    pub texture: Option<TexturePayload>,

    /// Optional atlas mask
    pub alpha_texture: Option<TexturePayload>,

    quads: QuadBuffer,
}

impl BillboardText {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set glyph atlas
    pub fn with_texture(mut self, texture: TexturePayload) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Builder: Set atlas mask
    pub fn with_alpha_texture(mut self, texture: TexturePayload) -> Self {
        self.alpha_texture = Some(texture);
        self
    }

    /// Append a label and re-run layout
    pub fn push(&mut self, item: TextInfo) {
        self.items.push(item);
        self.layout();
    }

    /// Pixel bounds of all glyphs relative to their anchors, as (min, max).
    pub fn glyph_extents(&self) -> Option<(Vec2, Vec2)> {
        self.items
            .iter()
            .flat_map(|item| item.glyphs.iter())
            .fold(None, |acc, glyph| match acc {
                None => Some((glyph.offset_min, glyph.offset_max)),
                Some((min, max)) => Some((min.min(glyph.offset_min), max.max(glyph.offset_max))),
            })
    }

    fn layout(&mut self) {
        self.quads.clear();
        for item in &self.items {
            for glyph in &item.glyphs {
                self.quads.push_quad(
                    item.position,
                    item.color,
                    glyph.uv_min,
                    glyph.uv_max,
                    glyph.offset_min,
                    glyph.offset_max,
                );
            }
        }
    }

    fn extent(&self) -> Vec2 {
        self.glyph_extents().map_or(Vec2::ZERO, |(min, max)| max - min)
    }
}

impl BillboardSource for BillboardText {
    fn kind(&self) -> ContentKind {
        ContentKind::MultiText
    }

    fn prepare_offsets(&mut self) {
        self.layout();
    }

    fn positions(&self) -> &[Vec3] {
        &self.quads.positions
    }

    fn colors(&self) -> &[[f32; 4]] {
        &self.quads.colors
    }

    fn texture_coordinates(&self) -> &[Vec2] {
        &self.quads.texture_coordinates
    }

    fn texture_offsets(&self) -> &[Vec2] {
        &self.quads.offsets
    }

    fn width(&self) -> f32 {
        self.extent().x
    }

    fn height(&self) -> f32 {
        self.extent().y
    }

    fn texture(&self) -> Option<&TexturePayload> {
        self.texture.as_ref()
    }

    fn alpha_texture(&self) -> Option<&TexturePayload> {
        self.alpha_texture.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(x: f32, width: f32) -> GlyphQuad {
        GlyphQuad::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.1, 0.1),
            Vec2::new(x, -4.0),
            Vec2::new(x + width, 4.0),
        )
    }

    #[test]
    fn every_glyph_becomes_a_quad() {
        let mut text = BillboardText::new();
        text.push(
            TextInfo::new("ab", Vec3::ZERO)
                .with_glyph(glyph(0.0, 5.0))
                .with_glyph(glyph(5.0, 5.0)),
        );
        text.push(
            TextInfo::new("c", Vec3::new(0.0, 2.0, 0.0))
                .with_color([1.0, 0.0, 0.0, 1.0])
                .with_glyph(glyph(-3.0, 6.0)),
        );

        assert_eq!(text.kind(), ContentKind::MultiText);
        assert_eq!(text.positions().len(), 18);
        assert_eq!(text.positions()[12], Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(text.colors()[17], [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn extents_cover_all_glyphs() {
        let mut text = BillboardText::new();
        text.push(
            TextInfo::new("ab", Vec3::ZERO)
                .with_glyph(glyph(-3.0, 5.0))
                .with_glyph(glyph(2.0, 10.0)),
        );
        assert_eq!(text.width(), 15.0);
        assert_eq!(text.height(), 8.0);
    }

    #[test]
    fn empty_collection_has_no_extent() {
        let text = BillboardText::new();
        assert!(text.glyph_extents().is_none());
        assert_eq!(text.width(), 0.0);
        assert!(text.positions().is_empty());
    }

    #[test]
    fn direct_edits_apply_after_prepare() {
        let mut text = BillboardText::new();
        text.items.push(TextInfo::new("x", Vec3::ONE).with_glyph(glyph(0.0, 1.0)));
        assert!(text.positions().is_empty());
        text.prepare_offsets();
        assert_eq!(text.positions().len(), 6);
    }
}
