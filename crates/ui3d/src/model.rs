//! Scene model that renders and picks billboard geometry

use crate::geometry::Geometry;
use crate::interaction::ScreenSpaceHitTester;
use crate::render::BillboardResources;
use billboard3d_camera::CameraContext;
use billboard3d_core::{BillboardError, ContentKind, HitResult, ModelId, Ray};
use billboard3d_render::{dispatch, DrawPlan, GraphicsDevice, VertexArena};
use tracing::{debug, info};

/// Visibility state of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Rendered and pickable
    #[default]
    Visible,
    /// Not rendered, keeps its layout slot
    Hidden,
    /// Not rendered, takes no space
    Collapsed,
}

impl Visibility {
    /// Whether the model is drawn at all.
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// A billboard placed in a scene.
///
/// Device state only exists between [`attach`](Self::attach) and
/// [`detach`](Self::detach); dropping the model releases it as well.
pub struct BillboardModel<D: GraphicsDevice> {
    pub(crate) id: ModelId,
    geometry: Geometry,

    /// Whether the model is drawn and picked
    pub visibility: Visibility,

    /// Whether the model takes part in hit testing
    pub hit_test_visible: bool,

    /// Reuse vertex storage between frames when it is large enough
    pub reuse_vertex_buffer: bool,

    /// Picking parameters
    pub hit_tester: ScreenSpaceHitTester,

    arena: VertexArena,
    kind: Option<ContentKind>,
    resources: Option<BillboardResources<D>>,
}

impl<D: GraphicsDevice> BillboardModel<D> {
    /// Create a detached model.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: ModelId::default(),
            geometry,
            visibility: Visibility::Visible,
            hit_test_visible: true,
            reuse_vertex_buffer: true,
            hit_tester: ScreenSpaceHitTester::default(),
            arena: VertexArena::new(),
            kind: None,
            resources: None,
        }
    }

    /// Builder: Set hit-test height scale
    pub fn with_height_scale(mut self, height_scale: f32) -> Self {
        self.hit_tester.height_scale = height_scale;
        self
    }

    /// Builder: Set vertex storage reuse
    pub fn with_reuse_vertex_buffer(mut self, reuse: bool) -> Self {
        self.reuse_vertex_buffer = reuse;
        self
    }

    /// Identifier assigned by the owning scene.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Attached geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Mutable geometry. Vertices and textures are picked up by the next render.
    pub fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    /// Replace the geometry. The model is detached and must be attached again.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.detach();
        self.geometry = geometry;
    }

    /// Content kind of the latest build.
    pub fn kind(&self) -> Option<ContentKind> {
        self.kind
    }

    /// Valid vertices of the latest build.
    pub fn vertex_count(&self) -> u32 {
        self.arena.vertex_count()
    }

    /// Vertex storage of the model.
    pub fn arena(&self) -> &VertexArena {
        &self.arena
    }

    /// Whether device resources are held.
    pub fn is_attached(&self) -> bool {
        self.resources.is_some()
    }

    /// Build vertices and acquire device resources.
    ///
    /// Resources from an earlier attach are released first. On error the
    /// model stays detached and holds no device state.
    pub fn attach(&mut self, device: &mut D) -> Result<(), BillboardError> {
        self.resources = None;
        self.kind = None;

        let geometry = self.geometry.name();
        let source = self
            .geometry
            .as_billboard_source_mut()
            .ok_or(BillboardError::MissingCapability { geometry })?;

        let kind = self.arena.build(&mut *source, self.reuse_vertex_buffer)?;
        let resources = BillboardResources::acquire(device, self.arena.vertices(), &*source)?;

        info!(
            model = self.id.0,
            kind = kind.label(),
            vertices = self.arena.len(),
            "attached billboard"
        );
        self.kind = Some(kind);
        self.resources = Some(resources);
        Ok(())
    }

    /// Release device resources. Vertex storage is kept for the next attach.
    pub fn detach(&mut self) {
        if self.resources.take().is_some() {
            debug!(model = self.id.0, "detached billboard");
        }
    }

    /// Rebuild, upload and draw the model for one frame.
    ///
    /// Returns `Ok(None)` when the model is not visible or not attached.
    pub fn render(&mut self, device: &mut D) -> Result<Option<DrawPlan>, BillboardError> {
        if !self.visibility.is_visible() {
            return Ok(None);
        }
        let Some(resources) = self.resources.as_mut() else {
            return Ok(None);
        };
        let Some(source) = self.geometry.as_billboard_source_mut() else {
            return Ok(None);
        };

        let kind = self.arena.build(&mut *source, self.reuse_vertex_buffer)?;
        self.kind = Some(kind);
        resources.sync_textures(device, &*source)?;

        device.write_vertex_buffer(&mut resources.vertex_buffer, self.arena.vertices())?;
        device.bind_vertex_buffer(&resources.vertex_buffer);

        let plan = dispatch(
            device,
            kind,
            self.arena.vertex_count(),
            resources.frame_textures(),
        );
        Ok(Some(plan))
    }

    /// Pick the model with `ray`, appending a result to `hits` on success.
    ///
    /// Without a camera there is nothing to project against, so nothing is hit.
    pub fn hit_test(
        &self,
        ray: &Ray,
        camera: Option<&dyn CameraContext>,
        hits: &mut Vec<HitResult>,
    ) -> bool {
        if !self.visibility.is_visible() || !self.hit_test_visible {
            return false;
        }
        let Some(camera) = camera else {
            return false;
        };
        let Some(source) = self.geometry.as_billboard_source() else {
            return false;
        };
        let Some(hit) = self.hit_tester.test(ray, source, camera) else {
            return false;
        };

        hits.push(HitResult {
            model: self.id,
            is_valid: true,
            point_hit: hit.point,
            distance: hit.distance,
        });
        true
    }
}

impl<D: GraphicsDevice> std::fmt::Debug for BillboardModel<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillboardModel")
            .field("id", &self.id)
            .field("geometry", &self.geometry)
            .field("visibility", &self.visibility)
            .field("hit_test_visible", &self.hit_test_visible)
            .field("kind", &self.kind)
            .field("attached", &self.is_attached())
            .finish()
    }
}
