//! Image billboard - one textured marker facing the camera

use super::{QuadBuffer, WHITE};
use billboard3d_core::{BillboardSource, ContentKind, TexturePayload};
use glam::{Vec2, Vec3};

/// A single image drawn at a fixed pixel size around an anchor
///
/// Useful for:
/// - Icons and markers in 3D space
/// - Sprite-based pick targets
#[derive(Debug, Clone)]
pub struct BillboardImage {
    /// World anchor
    pub position: Vec3,

    /// Size of the image (width, height) in pixels
    pub size: Vec2,

    /// Color tint (RGBA)
    pub color: [f32; 4],

    /// Encoded image
    pub texture: Option<TexturePayload>,

    /// Optional mask
    pub alpha_texture: Option<TexturePayload>,

    quads: QuadBuffer,
}

impl BillboardImage {
    /// Create a new image billboard at the given position
    pub fn new(position: Vec3, width: f32, height: f32) -> Self {
        let mut image = Self {
            position,
            size: Vec2::new(width, height),
            color: WHITE,
            texture: None,
            alpha_texture: None,
            quads: QuadBuffer::default(),
        };
        image.layout();
        image
    }

    /// Builder: Set color tint
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self.layout();
        self
    }

    /// Builder: Set image
    pub fn with_texture(mut self, texture: TexturePayload) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Builder: Set mask
    pub fn with_alpha_texture(mut self, texture: TexturePayload) -> Self {
        self.alpha_texture = Some(texture);
        self
    }

    fn layout(&mut self) {
        self.quads.clear();
        self.quads.push_centered_quad(self.position, self.color, self.size);
    }
}

impl BillboardSource for BillboardImage {
    fn kind(&self) -> ContentKind {
        ContentKind::SingleImage
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
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
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

    #[test]
    fn test_image_layout() {
        let image = BillboardImage::new(Vec3::new(0.0, 10.0, 0.0), 32.0, 16.0);
        assert_eq!(image.kind(), ContentKind::SingleImage);
        assert_eq!(image.positions().len(), 6);
        assert_eq!(image.positions()[0], Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(image.width(), 32.0);
        assert_eq!(image.height(), 16.0);
        assert!(image.texture_offsets().iter().all(|o| o.x.abs() == 16.0 && o.y.abs() == 8.0));
    }

    #[test]
    fn prepare_picks_up_moved_anchor() {
        let mut image = BillboardImage::new(Vec3::ZERO, 8.0, 8.0).with_color([1.0, 0.0, 0.0, 0.5]);
        image.position = Vec3::new(5.0, 0.0, 0.0);
        image.prepare_offsets();
        assert!(image.positions().iter().all(|p| *p == Vec3::new(5.0, 0.0, 0.0)));
        assert!(image.colors().iter().all(|c| *c == [1.0, 0.0, 0.0, 0.5]));
    }

    #[test]
    fn textures_are_optional() {
        let image = BillboardImage::new(Vec3::ZERO, 1.0, 1.0);
        assert!(image.texture().is_none());
        let image = image
            .with_texture(TexturePayload::from_bytes(vec![1u8]))
            .with_alpha_texture(TexturePayload::from_bytes(vec![2u8]));
        assert_eq!(image.texture().unwrap().bytes(), &[1]);
        assert_eq!(image.alpha_texture().unwrap().bytes(), &[2]);
    }
}
