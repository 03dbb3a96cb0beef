//! Billboard data provider contract.

use crate::ContentKind;
use glam::{Vec2, Vec3};
use std::{fs, io, path::Path, sync::Arc};

/// Encoded texture bytes (PNG, JPEG, ...) handed to the device for decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePayload {
    bytes: Arc<[u8]>,
}

impl TexturePayload {
    /// Wrap already-encoded image bytes.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Read an encoded image from disk.
    pub fn load_file(path: &Path) -> io::Result<Self> {
        Ok(Self::from_bytes(fs::read(path)?))
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload carries no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Per-frame billboard data consumed by the vertex builder, hit tester and dispatcher.
///
/// All four per-vertex collections are expected to have the same length once
/// [`BillboardSource::prepare_offsets`] has run. Sources are read by a single
/// render thread; nothing else may mutate them during a build.
pub trait BillboardSource {
    /// Rendering requirements of this source.
    fn kind(&self) -> ContentKind;

    /// Recompute texture offsets (and any vertex data derived from the source's layout).
    ///
    /// Called by the vertex builder before offsets are read. Must be idempotent
    /// within a frame.
    fn prepare_offsets(&mut self);

    /// Anchor positions, one per vertex.
    fn positions(&self) -> &[Vec3];

    /// RGBA colors, one per vertex.
    fn colors(&self) -> &[[f32; 4]];

    /// Normalized texture coordinates, one per vertex.
    fn texture_coordinates(&self) -> &[Vec2];

    /// Screen-space pixel offsets, one per vertex.
    fn texture_offsets(&self) -> &[Vec2];

    /// Overall billboard width in pixels.
    fn width(&self) -> f32;

    /// Overall billboard height in pixels.
    fn height(&self) -> f32;

    /// Primary texture, if any.
    fn texture(&self) -> Option<&TexturePayload>;

    /// Secondary (alpha/mask) texture, if any.
    fn alpha_texture(&self) -> Option<&TexturePayload> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shares_bytes_between_clones() {
        let payload = TexturePayload::from_bytes(vec![1u8, 2, 3]);
        let clone = payload.clone();
        assert_eq!(clone.bytes(), &[1, 2, 3]);
        assert_eq!(clone.len(), 3);
        assert!(!payload.is_empty());
        assert!(std::ptr::eq(payload.bytes().as_ptr(), clone.bytes().as_ptr()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("billboard3d-definitely-missing.png");
        assert!(TexturePayload::load_file(&path).is_err());
    }
}
