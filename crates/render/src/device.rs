//! Graphics device capability consumed by billboard rendering.

use billboard3d_core::{BillboardVertex, DeviceError, TexturePayload};

/// Shader pass of the billboard technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderPass {
    /// Text glyphs and label foregrounds.
    Foreground,
    /// Label background quads.
    Background,
    /// Image billboards.
    Image,
}

impl ShaderPass {
    /// Pass index inside the billboard technique.
    pub fn index(self) -> u32 {
        match self {
            ShaderPass::Foreground => 0,
            ShaderPass::Background => 1,
            ShaderPass::Image => 2,
        }
    }
}

/// Boolean shader variable toggled every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderFlag {
    /// A primary billboard texture is bound.
    HasTexture,
    /// A secondary alpha/mask texture is bound.
    HasAlphaTexture,
}

/// Texture resource slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Primary billboard texture.
    Billboard,
    /// Secondary alpha/mask texture.
    Alpha,
}

impl TextureSlot {
    /// Flag reporting whether this slot is populated.
    pub fn flag(self) -> ShaderFlag {
        match self {
            TextureSlot::Billboard => ShaderFlag::HasTexture,
            TextureSlot::Alpha => ShaderFlag::HasAlphaTexture,
        }
    }
}

/// Device that owns GPU buffers, textures and the billboard shader technique.
///
/// Handles are released when dropped, so a component holding them releases
/// its device state by dropping the holder.
pub trait GraphicsDevice {
    /// Vertex buffer handle.
    type Buffer;
    /// Shader resource view of a decoded texture.
    type Texture;

    /// Create a vertex buffer initialised with `vertices`.
    fn create_vertex_buffer(
        &mut self,
        vertices: &[BillboardVertex],
    ) -> Result<Self::Buffer, DeviceError>;

    /// Replace the contents of `buffer`; the device may grow it.
    fn write_vertex_buffer(
        &mut self,
        buffer: &mut Self::Buffer,
        vertices: &[BillboardVertex],
    ) -> Result<(), DeviceError>;

    /// Decode and upload an encoded texture for `slot`.
    fn load_texture(
        &mut self,
        slot: TextureSlot,
        payload: &TexturePayload,
    ) -> Result<Self::Texture, DeviceError>;

    /// Bind `buffer` as vertex stream 0 with a [`BillboardVertex`] stride.
    fn bind_vertex_buffer(&mut self, buffer: &Self::Buffer);

    /// Apply a pass of the billboard technique.
    fn apply_pass(&mut self, pass: ShaderPass);

    /// Set a boolean shader variable.
    fn set_flag(&mut self, flag: ShaderFlag, value: bool);

    /// Bind a texture view to `slot`.
    fn bind_texture(&mut self, slot: TextureSlot, texture: &Self::Texture);

    /// Draw `vertex_count` vertices of the bound buffer starting at `start_vertex`.
    fn draw(&mut self, vertex_count: u32, start_vertex: u32);
}
