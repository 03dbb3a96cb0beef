//! Vertex buffer and texture views held between attach and detach

use billboard3d_core::{BillboardError, BillboardSource, BillboardVertex, TexturePayload};
use billboard3d_render::{FrameTextures, GraphicsDevice, TextureSlot};
use tracing::trace;

/// Device resources of one attached billboard.
///
/// Dropping the value releases the vertex buffer and both texture views.
pub struct BillboardResources<D: GraphicsDevice> {
    /// Vertex buffer holding the latest build.
    pub vertex_buffer: D::Buffer,
    /// Primary texture view.
    pub texture: Option<D::Texture>,
    /// Alpha/mask texture view.
    pub alpha_texture: Option<D::Texture>,

    texture_payload: Option<TexturePayload>,
    alpha_payload: Option<TexturePayload>,
}

impl<D: GraphicsDevice> BillboardResources<D> {
    /// Create the vertex buffer and load every texture the source provides.
    ///
    /// On failure nothing acquired so far is kept: handles created before the
    /// error are dropped on the way out.
    pub fn acquire(
        device: &mut D,
        vertices: &[BillboardVertex],
        source: &dyn BillboardSource,
    ) -> Result<Self, BillboardError> {
        let vertex_buffer = device.create_vertex_buffer(vertices)?;
        let texture = source
            .texture()
            .map(|payload| device.load_texture(TextureSlot::Billboard, payload))
            .transpose()?;
        let alpha_texture = source
            .alpha_texture()
            .map(|payload| device.load_texture(TextureSlot::Alpha, payload))
            .transpose()?;

        trace!(
            vertices = vertices.len(),
            texture = texture.is_some(),
            alpha_texture = alpha_texture.is_some(),
            "acquired billboard resources"
        );

        Ok(Self {
            vertex_buffer,
            texture,
            alpha_texture,
            texture_payload: source.texture().cloned(),
            alpha_payload: source.alpha_texture().cloned(),
        })
    }

    /// Bring both texture views in line with what `source` supplies now.
    ///
    /// A slot is reloaded when the source's payload differs from the one the
    /// view was created from, and released when the source no longer has one.
    pub fn sync_textures(
        &mut self,
        device: &mut D,
        source: &dyn BillboardSource,
    ) -> Result<(), BillboardError> {
        sync_slot(
            device,
            TextureSlot::Billboard,
            source.texture(),
            &mut self.texture,
            &mut self.texture_payload,
        )?;
        sync_slot(
            device,
            TextureSlot::Alpha,
            source.alpha_texture(),
            &mut self.alpha_texture,
            &mut self.alpha_payload,
        )
    }

    /// Texture views to bind this frame.
    pub fn frame_textures(&self) -> FrameTextures<'_, D::Texture> {
        FrameTextures {
            texture: self.texture.as_ref(),
            alpha_texture: self.alpha_texture.as_ref(),
        }
    }
}

fn sync_slot<D: GraphicsDevice>(
    device: &mut D,
    slot: TextureSlot,
    wanted: Option<&TexturePayload>,
    view: &mut Option<D::Texture>,
    loaded: &mut Option<TexturePayload>,
) -> Result<(), BillboardError> {
    if wanted == loaded.as_ref() {
        return Ok(());
    }
    // Release first so a failed reload leaves the slot empty
    *view = None;
    *loaded = None;
    if let Some(payload) = wanted {
        *view = Some(device.load_texture(slot, payload)?);
        *loaded = Some(payload.clone());
    }
    trace!(?slot, present = view.is_some(), "texture slot updated");
    Ok(())
}

impl<D: GraphicsDevice> Drop for BillboardResources<D> {
    fn drop(&mut self) {
        trace!("releasing billboard resources");
    }
}
