//! Graphics device double that records every call.

use billboard3d_core::{BillboardVertex, DeviceError, TexturePayload};
use billboard3d_render::{GraphicsDevice, ShaderFlag, ShaderPass, TextureSlot};
use std::cell::Cell;
use std::rc::Rc;

/// A call made against [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Vertex buffer created with `len` vertices.
    CreateBuffer {
        /// Buffer id.
        id: u64,
        /// Vertex count.
        len: usize,
    },
    /// Vertex buffer contents replaced with `len` vertices.
    WriteBuffer {
        /// Buffer id.
        id: u64,
        /// Vertex count.
        len: usize,
    },
    /// Texture uploaded into `slot`.
    LoadTexture {
        /// Target slot.
        slot: TextureSlot,
        /// Texture id.
        id: u64,
    },
    /// Vertex buffer bound.
    BindVertexBuffer {
        /// Buffer id.
        id: u64,
    },
    /// Technique pass applied.
    ApplyPass(u32),
    /// Boolean shader variable written.
    SetFlag(ShaderFlag, bool),
    /// Texture bound to `slot`.
    BindTexture {
        /// Target slot.
        slot: TextureSlot,
        /// Texture id.
        id: u64,
    },
    /// Draw issued.
    Draw {
        /// Vertices drawn.
        vertex_count: u32,
        /// First vertex.
        start_vertex: u32,
    },
}

/// Decrements the live-resource counter when its handle is dropped.
#[derive(Debug)]
struct LiveGuard(Rc<Cell<usize>>);

impl LiveGuard {
    fn acquire(counter: &Rc<Cell<usize>>) -> Self {
        counter.set(counter.get() + 1);
        Self(Rc::clone(counter))
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Buffer handle of the recording device.
#[derive(Debug)]
pub struct RecordedBuffer {
    /// Buffer id.
    pub id: u64,
    /// Vertices currently stored.
    pub len: usize,
    _guard: LiveGuard,
}

/// Texture handle of the recording device.
#[derive(Debug)]
pub struct RecordedTexture {
    /// Texture id.
    pub id: u64,
    /// Slot the texture was loaded for.
    pub slot: TextureSlot,
    _guard: LiveGuard,
}

/// Device that records commands instead of talking to a GPU.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    commands: Vec<DeviceCommand>,
    next_id: u64,
    live: Rc<Cell<usize>>,
    last_upload: Vec<BillboardVertex>,
    fail_textures: bool,
    fail_buffers: bool,
}

impl RecordingDevice {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every texture load fail.
    pub fn fail_texture_loads(mut self) -> Self {
        self.fail_textures = true;
        self
    }

    /// Make every buffer creation fail.
    pub fn fail_buffer_creation(mut self) -> Self {
        self.fail_buffers = true;
        self
    }

    /// All recorded commands in order.
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Forget recorded commands (live resources are unaffected).
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// `(vertex_count, start_vertex)` of every draw, in order.
    pub fn draws(&self) -> Vec<(u32, u32)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DeviceCommand::Draw {
                    vertex_count,
                    start_vertex,
                } => Some((*vertex_count, *start_vertex)),
                _ => None,
            })
            .collect()
    }

    /// Indices of every applied pass, in order.
    pub fn passes(&self) -> Vec<u32> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DeviceCommand::ApplyPass(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Buffers and textures created and not yet dropped.
    pub fn live_resources(&self) -> usize {
        self.live.get()
    }

    /// Vertices passed to the most recent create or write.
    pub fn last_upload(&self) -> &[BillboardVertex] {
        &self.last_upload
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsDevice for RecordingDevice {
    type Buffer = RecordedBuffer;
    type Texture = RecordedTexture;

    fn create_vertex_buffer(
        &mut self,
        vertices: &[BillboardVertex],
    ) -> Result<RecordedBuffer, DeviceError> {
        if self.fail_buffers {
            return Err(DeviceError::Buffer("buffer creation disabled".into()));
        }
        let id = self.next_id();
        self.commands.push(DeviceCommand::CreateBuffer {
            id,
            len: vertices.len(),
        });
        self.last_upload = vertices.to_vec();
        Ok(RecordedBuffer {
            id,
            len: vertices.len(),
            _guard: LiveGuard::acquire(&self.live),
        })
    }

    fn write_vertex_buffer(
        &mut self,
        buffer: &mut RecordedBuffer,
        vertices: &[BillboardVertex],
    ) -> Result<(), DeviceError> {
        buffer.len = vertices.len();
        self.commands.push(DeviceCommand::WriteBuffer {
            id: buffer.id,
            len: vertices.len(),
        });
        self.last_upload = vertices.to_vec();
        Ok(())
    }

    fn load_texture(
        &mut self,
        slot: TextureSlot,
        payload: &TexturePayload,
    ) -> Result<RecordedTexture, DeviceError> {
        if self.fail_textures {
            return Err(DeviceError::Texture("texture loading disabled".into()));
        }
        if payload.is_empty() {
            return Err(DeviceError::Texture("empty texture payload".into()));
        }
        let id = self.next_id();
        self.commands.push(DeviceCommand::LoadTexture { slot, id });
        Ok(RecordedTexture {
            id,
            slot,
            _guard: LiveGuard::acquire(&self.live),
        })
    }

    fn bind_vertex_buffer(&mut self, buffer: &RecordedBuffer) {
        self.commands
            .push(DeviceCommand::BindVertexBuffer { id: buffer.id });
    }

    fn apply_pass(&mut self, pass: ShaderPass) {
        self.commands.push(DeviceCommand::ApplyPass(pass.index()));
    }

    fn set_flag(&mut self, flag: ShaderFlag, value: bool) {
        self.commands.push(DeviceCommand::SetFlag(flag, value));
    }

    fn bind_texture(&mut self, slot: TextureSlot, texture: &RecordedTexture) {
        self.commands.push(DeviceCommand::BindTexture {
            slot,
            id: texture.id,
        });
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) {
        self.commands.push(DeviceCommand::Draw {
            vertex_count,
            start_vertex,
        });
    }
}
