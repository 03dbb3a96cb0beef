//! Device state owned by attached billboards

pub mod resources;

pub use resources::BillboardResources;
