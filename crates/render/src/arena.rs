//! Vertex buffer builder with grow-only backing storage.

use billboard3d_core::{BillboardError, BillboardSource, BillboardVertex, ContentKind};

/// Backing storage for billboard vertices, rebuilt every frame.
///
/// Storage is allocated with exactly the required length and kept across
/// builds while it is large enough; only the first [`VertexArena::len`]
/// entries are valid after a build.
#[derive(Debug, Default)]
pub struct VertexArena {
    storage: Option<Box<[BillboardVertex]>>,
    len: usize,
    allocations: u64,
}

impl VertexArena {
    /// Create an arena without storage; the first build allocates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the arena from `source`.
    ///
    /// Runs the source's offset preparation, validates the per-vertex
    /// collections and writes one vertex per anchor. With `reuse` set the
    /// existing storage is overwritten in place whenever it is large enough.
    pub fn build<S>(&mut self, source: &mut S, reuse: bool) -> Result<ContentKind, BillboardError>
    where
        S: BillboardSource + ?Sized,
    {
        source.prepare_offsets();

        let positions = source.positions();
        let colors = source.colors();
        let texture_coordinates = source.texture_coordinates();
        let offsets = source.texture_offsets();
        let required = positions.len();

        if colors.len() != required
            || texture_coordinates.len() != required
            || offsets.len() != required
        {
            // Nothing valid is left behind for upload
            self.len = 0;
            return Err(BillboardError::MalformedSource {
                positions: required,
                colors: colors.len(),
                texture_coordinates: texture_coordinates.len(),
                offsets: offsets.len(),
            });
        }

        let storage = match self.storage.take() {
            Some(existing) if reuse && existing.len() >= required => existing,
            _ => {
                self.allocations += 1;
                vec![BillboardVertex::default(); required].into_boxed_slice()
            }
        };
        let storage = self.storage.insert(storage);

        for (i, vertex) in storage[..required].iter_mut().enumerate() {
            *vertex = BillboardVertex::new(
                positions[i],
                colors[i],
                texture_coordinates[i],
                offsets[i],
            );
        }
        self.len = required;

        Ok(source.kind())
    }

    /// Valid vertices of the last successful build.
    pub fn vertices(&self) -> &[BillboardVertex] {
        match &self.storage {
            Some(storage) => &storage[..self.len],
            None => &[],
        }
    }

    /// Valid vertices as raw bytes, ready for a device upload.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices())
    }

    /// Number of valid vertices.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no valid vertices are held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Valid vertex count as a draw argument.
    pub fn vertex_count(&self) -> u32 {
        u32::try_from(self.len).unwrap_or(u32::MAX)
    }

    /// Number of vertices the current storage can hold.
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().map_or(0, |storage| storage.len())
    }

    /// How many times storage has been (re)allocated.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Address of the backing storage, for identity checks.
    pub fn storage_ptr(&self) -> Option<*const BillboardVertex> {
        self.storage.as_ref().map(|storage| storage.as_ptr())
    }
}
