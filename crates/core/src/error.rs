//! Error types for billboard building and device resource acquisition.

use thiserror::Error;

/// Failure reported by a graphics device implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Vertex buffer could not be created or written.
    #[error("failed to allocate vertex buffer: {0}")]
    Buffer(String),
    /// Texture bytes could not be decoded or uploaded.
    #[error("failed to load texture: {0}")]
    Texture(String),
}

/// Structural errors surfaced to the caller; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillboardError {
    /// Source collections have mismatched lengths.
    #[error(
        "malformed billboard source: {positions} positions, {colors} colors, \
         {texture_coordinates} texture coordinates, {offsets} offsets"
    )]
    MalformedSource {
        /// Number of anchor positions.
        positions: usize,
        /// Number of colors.
        colors: usize,
        /// Number of texture coordinates.
        texture_coordinates: usize,
        /// Number of texture offsets.
        offsets: usize,
    },
    /// Geometry attached to a billboard model carries no billboard data.
    #[error("geometry `{geometry}` does not provide billboard data")]
    MissingCapability {
        /// Name of the geometry variant that was supplied.
        geometry: &'static str,
    },
    /// Device resource creation failed.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_source_message_lists_lengths() {
        let err = BillboardError::MalformedSource {
            positions: 2,
            colors: 1,
            texture_coordinates: 2,
            offsets: 2,
        };
        assert_eq!(
            err.to_string(),
            "malformed billboard source: 2 positions, 1 colors, 2 texture coordinates, 2 offsets"
        );
    }

    #[test]
    fn device_errors_convert() {
        let err: BillboardError = DeviceError::Texture("bad png".into()).into();
        assert_eq!(err.to_string(), "failed to load texture: bad png");
    }
}
