//! Per-frame draw selection by content kind.

use crate::device::{GraphicsDevice, ShaderFlag, ShaderPass, TextureSlot};
use billboard3d_core::ContentKind;
use tracing::debug;

/// Vertex count of single-text geometry: foreground quad then background quad.
pub const SINGLE_TEXT_VERTEX_COUNT: u32 = 12;

/// One draw of a contiguous vertex range under a shader pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    /// Pass applied before drawing.
    pub pass: ShaderPass,
    /// Number of vertices drawn.
    pub vertex_count: u32,
    /// First vertex drawn.
    pub start_vertex: u32,
}

/// Ordered draws issued for one billboard in one frame (at most two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawPlan {
    calls: [Option<DrawCall>; 2],
}

impl DrawPlan {
    fn single(call: DrawCall) -> Self {
        Self {
            calls: [Some(call), None],
        }
    }

    fn pair(first: DrawCall, second: DrawCall) -> Self {
        Self {
            calls: [Some(first), Some(second)],
        }
    }

    /// Draws in issue order.
    pub fn calls(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls.iter().flatten()
    }

    /// Number of draws.
    pub fn len(&self) -> usize {
        self.calls().count()
    }

    /// Whether nothing is drawn this frame.
    pub fn is_empty(&self) -> bool {
        self.calls[0].is_none()
    }
}

/// Decide which draws a billboard of `kind` with `vertex_count` vertices needs.
///
/// Single-text geometry is drawn background first: the background occupies
/// the second half of the vertices and is drawn with the background pass,
/// then the first half with the foreground pass. Any other single-text vertex
/// count draws nothing.
///
/// A zero vertex count issues no draw for any kind. Multi-text and image
/// billboards would otherwise get a single empty `draw(0, 0)`.
pub fn plan_draws(kind: ContentKind, vertex_count: u32) -> DrawPlan {
    if vertex_count == 0 {
        return DrawPlan::default();
    }

    match kind {
        ContentKind::MultiText => DrawPlan::single(DrawCall {
            pass: ShaderPass::Foreground,
            vertex_count,
            start_vertex: 0,
        }),
        ContentKind::SingleText => {
            if vertex_count != SINGLE_TEXT_VERTEX_COUNT {
                debug!(vertex_count, "skipping single-text billboard with unexpected vertex count");
                return DrawPlan::default();
            }
            let half = vertex_count / 2;
            DrawPlan::pair(
                DrawCall {
                    pass: ShaderPass::Background,
                    vertex_count: half,
                    start_vertex: half,
                },
                DrawCall {
                    pass: ShaderPass::Foreground,
                    vertex_count: half,
                    start_vertex: 0,
                },
            )
        }
        ContentKind::SingleImage => DrawPlan::single(DrawCall {
            pass: ShaderPass::Image,
            vertex_count,
            start_vertex: 0,
        }),
    }
}

/// Texture views available to the current frame.
#[derive(Debug)]
pub struct FrameTextures<'a, T> {
    /// Primary billboard texture.
    pub texture: Option<&'a T>,
    /// Secondary alpha/mask texture.
    pub alpha_texture: Option<&'a T>,
}

impl<T> Clone for FrameTextures<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FrameTextures<'_, T> {}

impl<T> Default for FrameTextures<'_, T> {
    fn default() -> Self {
        Self {
            texture: None,
            alpha_texture: None,
        }
    }
}

/// Set texture state and issue the draws for one billboard.
///
/// Both presence flags are written every frame before any draw, and each
/// texture is bound only when present. Returns the plan that was executed.
pub fn dispatch<D>(
    device: &mut D,
    kind: ContentKind,
    vertex_count: u32,
    textures: FrameTextures<'_, D::Texture>,
) -> DrawPlan
where
    D: GraphicsDevice + ?Sized,
{
    bind_slot(device, TextureSlot::Billboard, textures.texture);
    bind_slot(device, TextureSlot::Alpha, textures.alpha_texture);

    let plan = plan_draws(kind, vertex_count);
    for call in plan.calls() {
        device.apply_pass(call.pass);
        device.draw(call.vertex_count, call.start_vertex);
    }
    plan
}

fn bind_slot<D>(device: &mut D, slot: TextureSlot, texture: Option<&D::Texture>)
where
    D: GraphicsDevice + ?Sized,
{
    device.set_flag(slot.flag(), texture.is_some());
    if let Some(texture) = texture {
        device.bind_texture(slot, texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billboard3d_core::{BillboardVertex, DeviceError, TexturePayload};

    #[derive(Debug, PartialEq)]
    enum Op {
        Pass(u32),
        Flag(ShaderFlag, bool),
        Bind(TextureSlot),
        Draw(u32, u32),
    }

    #[derive(Default)]
    struct OpLog(Vec<Op>);

    impl GraphicsDevice for OpLog {
        type Buffer = ();
        type Texture = ();

        fn create_vertex_buffer(&mut self, _: &[BillboardVertex]) -> Result<(), DeviceError> {
            Ok(())
        }
        fn write_vertex_buffer(
            &mut self,
            _: &mut (),
            _: &[BillboardVertex],
        ) -> Result<(), DeviceError> {
            Ok(())
        }
        fn load_texture(&mut self, _: TextureSlot, _: &TexturePayload) -> Result<(), DeviceError> {
            Ok(())
        }
        fn bind_vertex_buffer(&mut self, _: &()) {}
        fn apply_pass(&mut self, pass: ShaderPass) {
            self.0.push(Op::Pass(pass.index()));
        }
        fn set_flag(&mut self, flag: ShaderFlag, value: bool) {
            self.0.push(Op::Flag(flag, value));
        }
        fn bind_texture(&mut self, slot: TextureSlot, _: &()) {
            self.0.push(Op::Bind(slot));
        }
        fn draw(&mut self, vertex_count: u32, start_vertex: u32) {
            self.0.push(Op::Draw(vertex_count, start_vertex));
        }
    }

    #[test]
    fn single_text_draws_background_then_foreground() {
        let plan = plan_draws(ContentKind::SingleText, 12);
        let calls: Vec<DrawCall> = plan.calls().copied().collect();
        assert_eq!(
            calls,
            vec![
                DrawCall {
                    pass: ShaderPass::Background,
                    vertex_count: 6,
                    start_vertex: 6,
                },
                DrawCall {
                    pass: ShaderPass::Foreground,
                    vertex_count: 6,
                    start_vertex: 0,
                },
            ]
        );
    }

    #[test]
    fn single_text_with_odd_count_draws_nothing() {
        assert!(plan_draws(ContentKind::SingleText, 7).is_empty());
        assert!(plan_draws(ContentKind::SingleText, 6).is_empty());
    }

    #[test]
    fn empty_geometry_draws_nothing() {
        assert!(plan_draws(ContentKind::MultiText, 0).is_empty());
        assert!(plan_draws(ContentKind::SingleImage, 0).is_empty());
    }

    #[test]
    fn image_uses_image_pass() {
        let plan = plan_draws(ContentKind::SingleImage, 6);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.calls().next().unwrap().pass, ShaderPass::Image);
    }

    #[test]
    fn flags_precede_draws_even_without_textures() {
        let mut log = OpLog::default();
        dispatch(&mut log, ContentKind::MultiText, 5, FrameTextures::default());
        assert_eq!(
            log.0,
            vec![
                Op::Flag(ShaderFlag::HasTexture, false),
                Op::Flag(ShaderFlag::HasAlphaTexture, false),
                Op::Pass(0),
                Op::Draw(5, 0),
            ]
        );
    }

    #[test]
    fn present_textures_are_bound() {
        let mut log = OpLog::default();
        let texture = ();
        let textures = FrameTextures {
            texture: Some(&texture),
            alpha_texture: None,
        };
        dispatch(&mut log, ContentKind::SingleText, 7, textures);
        assert_eq!(
            log.0,
            vec![
                Op::Flag(ShaderFlag::HasTexture, true),
                Op::Bind(TextureSlot::Billboard),
                Op::Flag(ShaderFlag::HasAlphaTexture, false),
            ]
        );
    }
}
