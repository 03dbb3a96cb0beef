#![warn(missing_docs)]
//! Billboard rendering: device capability, vertex building and draw dispatch.

mod arena;
mod device;
mod dispatch;

pub use arena::VertexArena;
pub use device::{GraphicsDevice, ShaderFlag, ShaderPass, TextureSlot};
pub use dispatch::{
    dispatch, plan_draws, DrawCall, DrawPlan, FrameTextures, SINGLE_TEXT_VERTEX_COUNT,
};
