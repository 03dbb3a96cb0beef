#![warn(missing_docs)]
//! Core primitives shared across the billboard workspace.

pub mod error;
pub mod math;
pub mod source;
pub mod vertex;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use error::{BillboardError, DeviceError};
pub use math::{Aabb, Ray};
pub use source::{BillboardSource, TexturePayload};
pub use vertex::BillboardVertex;

/// Classification of a billboard's rendering requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Many independent label billboards, all drawn with the foreground pass.
    MultiText,
    /// One label with a background quad stored in the second half of the vertices.
    SingleText,
    /// One image billboard drawn with the image pass.
    SingleImage,
}

impl ContentKind {
    /// Short label used in logs and frame records.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::MultiText => "multi_text",
            ContentKind::SingleText => "single_text",
            ContentKind::SingleImage => "single_image",
        }
    }
}

/// Identifier of a billboard model inside a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ModelId(pub u64);

/// Result of a successful pick against a billboard model.
///
/// Scene-wide aggregators sort these by ascending [`HitResult::distance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitResult {
    /// Model that was hit.
    pub model: ModelId,
    /// Whether the record describes an actual hit.
    pub is_valid: bool,
    /// World-space hit point (`origin + direction * distance`).
    pub point_hit: glam::Vec3,
    /// Distance along the ray to the hit point.
    pub distance: f32,
}

/// Sort hit results nearest first.
pub fn sort_hits(hits: &mut [HitResult]) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn hit(model: u64, distance: f32) -> HitResult {
        HitResult {
            model: ModelId(model),
            is_valid: true,
            point_hit: Vec3::ZERO,
            distance,
        }
    }

    #[test]
    fn hits_sort_nearest_first() {
        let mut hits = vec![hit(1, 7.5), hit(2, 0.5), hit(3, 3.0)];
        sort_hits(&mut hits);
        let order: Vec<u64> = hits.iter().map(|h| h.model.0).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn content_kind_labels_are_snake_case() {
        assert_eq!(ContentKind::MultiText.label(), "multi_text");
        assert_eq!(ContentKind::SingleText.label(), "single_text");
        assert_eq!(ContentKind::SingleImage.label(), "single_image");
    }
}
