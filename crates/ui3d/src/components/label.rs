//! Single-text billboard - one label with a background panel

use super::{QuadBuffer, WHITE};
use billboard3d_core::{BillboardSource, ContentKind, TexturePayload};
use glam::{Vec2, Vec3};

/// A floating label for nameplates and tooltips
///
/// The text arrives pre-rendered in `texture`. Layout always yields twelve
/// vertices: the foreground quad first, then the background quad grown by
/// `padding` on every side.
#[derive(Debug, Clone)]
pub struct BillboardSingleText {
    /// Label text, kept for diagnostics
    pub text: String,

    /// World anchor
    pub position: Vec3,

    /// Size of the rendered text in pixels
    pub text_size: Vec2,

    /// Text color (RGBA)
    pub foreground: [f32; 4],

    /// Background color (RGBA)
    pub background: [f32; 4],

    /// Padding around text (in pixels)
    pub padding: f32,

    /// Pre-rendered text image
    pub texture: Option<TexturePayload>,

    /// Optional mask applied to the text
    pub alpha_texture: Option<TexturePayload>,

    quads: QuadBuffer,
}

impl BillboardSingleText {
    /// Create a new label at the given position
    pub fn new(position: Vec3, text: impl Into<String>, width: f32, height: f32) -> Self {
        let mut label = Self {
            text: text.into(),
            position,
            text_size: Vec2::new(width, height),
            foreground: WHITE,
            background: [0.0, 0.0, 0.0, 0.7],
            padding: 2.0,
            texture: None,
            alpha_texture: None,
            quads: QuadBuffer::default(),
        };
        label.layout();
        label
    }

    /// Builder: Set text color
    pub fn with_foreground(mut self, color: [f32; 4]) -> Self {
        self.foreground = color;
        self.layout();
        self
    }

    /// Builder: Set background color
    pub fn with_background(mut self, color: [f32; 4]) -> Self {
        self.background = color;
        self.layout();
        self
    }

    /// Builder: Set padding
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self.layout();
        self
    }

    /// Builder: Set pre-rendered text image
    pub fn with_texture(mut self, texture: TexturePayload) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Builder: Set text mask
    pub fn with_alpha_texture(mut self, texture: TexturePayload) -> Self {
        self.alpha_texture = Some(texture);
        self
    }

    /// Outer size including padding.
    pub fn panel_size(&self) -> Vec2 {
        self.text_size + Vec2::splat(self.padding * 2.0)
    }

    fn layout(&mut self) {
        self.quads.clear();
        self.quads
            .push_centered_quad(self.position, self.foreground, self.text_size);
        self.quads
            .push_centered_quad(self.position, self.background, self.panel_size());
    }
}

impl BillboardSource for BillboardSingleText {
    fn kind(&self) -> ContentKind {
        ContentKind::SingleText
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
        self.panel_size().x
    }

    fn height(&self) -> f32 {
        self.panel_size().y
    }

    fn texture(&self) -> Option<&TexturePayload> {
        self.texture.as_ref()
    }

    fn alpha_texture(&self) -> Option<&TexturePayload> {
        self.alpha_texture.as_ref()
    }
}
