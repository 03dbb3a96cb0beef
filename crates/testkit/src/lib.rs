#![warn(missing_docs)]
//! Test doubles and recording surfaces for billboard rendering.

mod device;
mod source;

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use device::{DeviceCommand, RecordedBuffer, RecordedTexture, RecordingDevice};
pub use source::StaticSource;

/// What one billboard model did during one frame.
#[derive(Debug, Serialize)]
pub struct FrameRecord<'a> {
    /// Frame index, starting at zero.
    pub frame: u64,
    /// Model identifier inside the scene.
    pub model: u64,
    /// Content kind label.
    pub kind: &'a str,
    /// Valid vertices uploaded this frame.
    pub vertex_count: u32,
    /// Draw calls issued this frame.
    pub draws: usize,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append one record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
