//! Billboard scene - owns every billboard model and aggregates picks

use crate::model::BillboardModel;
use billboard3d_camera::CameraContext;
use billboard3d_core::{sort_hits, BillboardError, ContentKind, HitResult, ModelId, Ray};
use billboard3d_render::{DrawPlan, GraphicsDevice};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// A model-level failure, tagged with the model that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("billboard model {} failed: {source}", .model.0)]
pub struct ModelError {
    /// Model that failed
    pub model: ModelId,
    /// Underlying error
    #[source]
    pub source: BillboardError,
}

/// What one model drew in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderReport {
    /// Rendered model
    pub model: ModelId,
    /// Content kind of the frame's build
    pub kind: ContentKind,
    /// Valid vertices uploaded
    pub vertex_count: u32,
    /// Draws issued
    pub plan: DrawPlan,
}

/// All billboards of a scene, iterated in insertion order.
pub struct BillboardScene<D: GraphicsDevice> {
    models: BTreeMap<ModelId, BillboardModel<D>>,
    next_id: u64,
}

impl<D: GraphicsDevice> Default for BillboardScene<D> {
    fn default() -> Self {
        Self {
            models: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<D: GraphicsDevice> BillboardScene<D> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model and return its id.
    pub fn add(&mut self, mut model: BillboardModel<D>) -> ModelId {
        let id = ModelId(self.next_id);
        self.next_id += 1;
        model.id = id;
        self.models.insert(id, model);
        id
    }

    /// Remove a model. Its device resources are released.
    pub fn remove(&mut self, id: ModelId) -> Option<BillboardModel<D>> {
        self.models.remove(&id).map(|mut model| {
            model.detach();
            model
        })
    }

    /// Look up a model.
    pub fn get(&self, id: ModelId) -> Option<&BillboardModel<D>> {
        self.models.get(&id)
    }

    /// Look up a model mutably.
    pub fn get_mut(&mut self, id: ModelId) -> Option<&mut BillboardModel<D>> {
        self.models.get_mut(&id)
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the scene has no models.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate over models in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BillboardModel<D>> + '_ {
        self.models.values()
    }

    /// Attach every model. Failing models stay detached; the rest attach.
    pub fn attach_all(&mut self, device: &mut D) -> Vec<ModelError> {
        let mut errors = Vec::new();
        for (id, model) in &mut self.models {
            if let Err(source) = model.attach(device) {
                warn!(model = id.0, error = %source, "billboard failed to attach");
                errors.push(ModelError { model: *id, source });
            }
        }
        errors
    }

    /// Release the device resources of every model.
    pub fn detach_all(&mut self) {
        for model in self.models.values_mut() {
            model.detach();
        }
    }

    /// Render one frame of every visible, attached model.
    ///
    /// Stops at the first model whose build or upload fails.
    pub fn render(&mut self, device: &mut D) -> Result<Vec<RenderReport>, ModelError> {
        let mut reports = Vec::with_capacity(self.models.len());
        for (id, model) in &mut self.models {
            let plan = model
                .render(device)
                .map_err(|source| ModelError { model: *id, source })?;
            if let (Some(plan), Some(kind)) = (plan, model.kind()) {
                reports.push(RenderReport {
                    model: *id,
                    kind,
                    vertex_count: model.vertex_count(),
                    plan,
                });
            }
        }
        Ok(reports)
    }

    /// Pick every model with `ray`; results are sorted nearest first.
    pub fn hit_test(&self, ray: &Ray, camera: Option<&dyn CameraContext>) -> Vec<HitResult> {
        let mut hits = Vec::new();
        for model in self.models.values() {
            model.hit_test(ray, camera, &mut hits);
        }
        sort_hits(&mut hits);
        hits
    }

    /// Nearest hit along `ray`, if any.
    pub fn closest_hit(&self, ray: &Ray, camera: Option<&dyn CameraContext>) -> Option<HitResult> {
        self.hit_test(ray, camera).into_iter().next()
    }
}
