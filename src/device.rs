//! Headless graphics device that logs every call instead of touching a GPU.

use billboard3d_core::{BillboardVertex, DeviceError, TexturePayload};
use billboard3d_render::{GraphicsDevice, ShaderFlag, ShaderPass, TextureSlot};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct TracingBuffer {
    id: u64,
    capacity: usize,
}

impl Drop for TracingBuffer {
    fn drop(&mut self) {
        trace!(buffer = self.id, capacity = self.capacity, "vertex buffer released");
    }
}

#[derive(Debug)]
pub struct TracingTexture {
    id: u64,
    slot: TextureSlot,
    width: u32,
    height: u32,
}

impl Drop for TracingTexture {
    fn drop(&mut self) {
        trace!(texture = self.id, slot = ?self.slot, "texture released");
    }
}

/// Running totals of what the device was asked to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    pub buffers_created: u64,
    pub buffer_growths: u64,
    pub bytes_uploaded: u64,
    pub textures_loaded: u64,
    pub draws: u64,
    pub vertices_drawn: u64,
}

#[derive(Debug, Default)]
pub struct TracingDevice {
    next_id: u64,
    stats: DeviceStats,
}

impl TracingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DeviceStats {
        self.stats
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn upload(&mut self, vertices: &[BillboardVertex]) {
        self.stats.bytes_uploaded += (vertices.len() * BillboardVertex::SIZE_IN_BYTES) as u64;
    }
}

impl GraphicsDevice for TracingDevice {
    type Buffer = TracingBuffer;
    type Texture = TracingTexture;

    fn create_vertex_buffer(
        &mut self,
        vertices: &[BillboardVertex],
    ) -> Result<TracingBuffer, DeviceError> {
        let id = self.next_id();
        self.stats.buffers_created += 1;
        self.upload(vertices);
        debug!(buffer = id, vertices = vertices.len(), "vertex buffer created");
        Ok(TracingBuffer {
            id,
            capacity: vertices.len(),
        })
    }

    fn write_vertex_buffer(
        &mut self,
        buffer: &mut TracingBuffer,
        vertices: &[BillboardVertex],
    ) -> Result<(), DeviceError> {
        if vertices.len() > buffer.capacity {
            // Grow to the new size, the old contents are replaced anyway
            self.stats.buffer_growths += 1;
            debug!(
                buffer = buffer.id,
                from = buffer.capacity,
                to = vertices.len(),
                "vertex buffer grown"
            );
            buffer.capacity = vertices.len();
        }
        self.upload(vertices);
        trace!(buffer = buffer.id, vertices = vertices.len(), "vertex buffer written");
        Ok(())
    }

    fn load_texture(
        &mut self,
        slot: TextureSlot,
        payload: &TexturePayload,
    ) -> Result<TracingTexture, DeviceError> {
        let image = image::load_from_memory(payload.bytes())
            .map_err(|err| DeviceError::Texture(err.to_string()))?;
        let id = self.next_id();
        self.stats.textures_loaded += 1;
        debug!(
            texture = id,
            ?slot,
            width = image.width(),
            height = image.height(),
            "texture loaded"
        );
        Ok(TracingTexture {
            id,
            slot,
            width: image.width(),
            height: image.height(),
        })
    }

    fn bind_vertex_buffer(&mut self, buffer: &TracingBuffer) {
        trace!(buffer = buffer.id, stride = BillboardVertex::SIZE_IN_BYTES, "bind vertex buffer");
    }

    fn apply_pass(&mut self, pass: ShaderPass) {
        trace!(pass = pass.index(), "apply pass");
    }

    fn set_flag(&mut self, flag: ShaderFlag, value: bool) {
        trace!(?flag, value, "set flag");
    }

    fn bind_texture(&mut self, slot: TextureSlot, texture: &TracingTexture) {
        trace!(
            ?slot,
            texture = texture.id,
            width = texture.width,
            height = texture.height,
            "bind texture"
        );
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) {
        self.stats.draws += 1;
        self.stats.vertices_drawn += u64::from(vertex_count);
        debug!(vertex_count, start_vertex, "draw");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_png_payloads() {
        let mut device = TracingDevice::new();
        let texture = device
            .load_texture(TextureSlot::Billboard, &TexturePayload::from_bytes(png(4, 2)))
            .unwrap();
        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(device.stats().textures_loaded, 1);
    }

    #[test]
    fn rejects_garbage_bytes() {
        let mut device = TracingDevice::new();
        let err = device
            .load_texture(TextureSlot::Alpha, &TexturePayload::from_bytes(vec![1u8, 2, 3]))
            .unwrap_err();
        assert!(matches!(err, DeviceError::Texture(_)));
    }

    #[test]
    fn writes_grow_buffers_on_demand() {
        let mut device = TracingDevice::new();
        let vertices = vec![BillboardVertex::default(); 4];
        let mut buffer = device.create_vertex_buffer(&vertices[..2]).unwrap();
        device.write_vertex_buffer(&mut buffer, &vertices[..1]).unwrap();
        device.write_vertex_buffer(&mut buffer, &vertices).unwrap();

        assert_eq!(buffer.capacity, 4);
        assert_eq!(device.stats().buffer_growths, 1);
        assert_eq!(device.stats().bytes_uploaded, 7 * 48);
    }
}
