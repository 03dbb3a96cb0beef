//! Camera-facing billboards placed in a 3D scene
//!
//! This crate turns billboard sources (labels, images, glyph runs) into scene
//! models that can be attached to a graphics device, drawn every frame and
//! picked with world-space rays.
//!
//! # Features
//!
//! - **Sources**: multi-label text, single label with background, images
//! - **Models**: attach/detach lifecycle with device resources released on drop
//! - **Picking**: screen-space hit testing against the pixel footprint
//! - **Scenes**: many models with hits sorted nearest first
//!
//! # Example
//!
//! ```rust,ignore
//! use billboard3d_ui3d::{BillboardImage, BillboardModel, BillboardScene, Geometry};
//! use glam::Vec3;
//!
//! let mut scene = BillboardScene::new();
//! scene.add(BillboardModel::new(Geometry::billboard(
//!     BillboardImage::new(Vec3::ZERO, 32.0, 32.0),
//! )));
//!
//! scene.attach_all(&mut device);
//! // In your render loop:
//! scene.render(&mut device)?;
//! let hits = scene.hit_test(&ray, Some(&viewport));
//! ```

pub mod components;
pub mod geometry;
pub mod interaction;
pub mod manager;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use components::{BillboardImage, BillboardSingleText, BillboardText, GlyphQuad, TextInfo};
pub use geometry::{Geometry, MeshGeometry};
pub use interaction::{BillboardHit, ScreenSpaceHitTester};
pub use manager::{BillboardScene, ModelError, RenderReport};
pub use model::{BillboardModel, Visibility};
pub use render::BillboardResources;
