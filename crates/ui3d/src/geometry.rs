//! Geometry attached to scene models

use billboard3d_core::BillboardSource;
use glam::Vec3;

/// Plain triangle mesh. Carries no billboard data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

/// Geometry a model can be given.
///
/// Billboard models only render and pick the [`Geometry::Billboard`] variant;
/// anything else is refused at attach time.
pub enum Geometry {
    /// Billboard data source
    Billboard(Box<dyn BillboardSource>),
    /// Regular mesh
    Mesh(MeshGeometry),
}

impl Geometry {
    /// Wrap a billboard source.
    pub fn billboard(source: impl BillboardSource + 'static) -> Self {
        Geometry::Billboard(Box::new(source))
    }

    /// Variant name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Billboard(_) => "billboard",
            Geometry::Mesh(_) => "mesh",
        }
    }

    /// The billboard source, if this geometry has one.
    pub fn as_billboard_source(&self) -> Option<&dyn BillboardSource> {
        match self {
            Geometry::Billboard(source) => Some(&**source),
            Geometry::Mesh(_) => None,
        }
    }

    /// Mutable access to the billboard source, if this geometry has one.
    pub fn as_billboard_source_mut(&mut self) -> Option<&mut dyn BillboardSource> {
        match self {
            Geometry::Billboard(source) => Some(&mut **source),
            Geometry::Mesh(_) => None,
        }
    }
}

impl std::fmt::Debug for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Geometry::Billboard(source) => f
                .debug_struct("Billboard")
                .field("kind", &source.kind())
                .field("vertices", &source.positions().len())
                .finish(),
            Geometry::Mesh(mesh) => f.debug_tuple("Mesh").field(mesh).finish(),
        }
    }
}
