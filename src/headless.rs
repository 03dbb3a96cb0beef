use crate::config::SceneConfig;
use crate::device::{DeviceStats, TracingDevice};
use anyhow::{Context, Result};
use billboard3d_camera::screen_to_ray;
use billboard3d_core::HitResult;
use billboard3d_testkit::{FrameRecord, JsonlSink};
use billboard3d_ui3d::BillboardScene;
use glam::Vec2;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct HeadlessConfig {
    pub scene: SceneConfig,
    /// Directory relative texture paths resolve against.
    pub base_dir: PathBuf,
    pub frames: u64,
    pub probes: Vec<Vec2>,
    pub frame_log: Option<PathBuf>,
}

/// One probe result printed as a JSON line.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub x: f32,
    pub y: f32,
    pub hits: Vec<HitResult>,
}

#[derive(Debug)]
pub struct HeadlessSummary {
    pub models: usize,
    pub attach_failures: usize,
    pub frames: u64,
    pub probes: Vec<ProbeReport>,
    pub device: DeviceStats,
}

/// Attach the scene, render the requested frames and run every probe.
pub fn run(cfg: HeadlessConfig) -> Result<HeadlessSummary> {
    let mut device = TracingDevice::new();
    let view = cfg.scene.scene_viewport();

    let mut scene: BillboardScene<TracingDevice> = BillboardScene::new();
    for model in cfg.scene.build_models(&cfg.base_dir)? {
        scene.add(model);
    }

    let errors = scene.attach_all(&mut device);
    for err in &errors {
        warn!("{err:#}");
    }

    let mut sink = cfg
        .frame_log
        .as_ref()
        .map(|path| {
            JsonlSink::create(path)
                .with_context(|| format!("failed to create frame log {}", path.display()))
        })
        .transpose()?;

    for frame in 0..cfg.frames {
        let reports = scene
            .render(&mut device)
            .with_context(|| format!("frame {frame} failed"))?;
        if let Some(sink) = sink.as_mut() {
            for report in &reports {
                sink.write(&FrameRecord {
                    frame,
                    model: report.model.0,
                    kind: report.kind.label(),
                    vertex_count: report.vertex_count,
                    draws: report.plan.len(),
                })?;
            }
        }
    }

    let probes = cfg
        .probes
        .iter()
        .map(|pixel| {
            let hits = match screen_to_ray(*pixel, &view) {
                Some(ray) => scene.hit_test(&ray, Some(&view)),
                None => {
                    warn!(x = pixel.x, y = pixel.y, "probe does not map to a ray");
                    Vec::new()
                }
            };
            ProbeReport {
                x: pixel.x,
                y: pixel.y,
                hits,
            }
        })
        .collect();

    let summary = HeadlessSummary {
        models: scene.len(),
        attach_failures: errors.len(),
        frames: cfg.frames,
        probes,
        device: device.stats(),
    };
    scene.detach_all();

    info!(
        models = summary.models,
        attach_failures = summary.attach_failures,
        frames = summary.frames,
        draws = summary.device.draws,
        bytes_uploaded = summary.device.bytes_uploaded,
        "headless run finished"
    );
    Ok(summary)
}

/// Print probe results, one JSON object per line.
pub fn print_probes<W: Write>(out: &mut W, probes: &[ProbeReport]) -> Result<()> {
    for probe in probes {
        serde_json::to_writer(&mut *out, probe)?;
        writeln!(out)?;
    }
    Ok(())
}
