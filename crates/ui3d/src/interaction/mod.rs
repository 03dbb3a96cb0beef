//! Billboard picking
//!
//! Rays are tested against the billboard's on-screen rectangle reprojected
//! into world space, so picking works on the pixel footprint the user sees.

pub mod raycaster;

pub use raycaster::{BillboardHit, ScreenSpaceHitTester};
