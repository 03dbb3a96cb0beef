//! billboard3d - camera-facing labels and markers with screen-space picking
//!
//! Runs a billboard scene headlessly against a logging device and prints
//! probe picks as JSON lines.

mod config;
mod device;
mod headless;

use anyhow::{Context, Result};
use config::{SceneConfig, DEFAULT_SCENE_PATH};
use glam::Vec2;
use headless::HeadlessConfig;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting billboard3d v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));

    if let Some(path) = cli.write_default_scene.as_deref() {
        if cli.scene.is_some() {
            anyhow::bail!("--write-default-scene cannot be combined with --scene");
        }
        SceneConfig::default()
            .save_to_path(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote demo scene");
        return Ok(());
    }

    let scene = match cli.scene.as_deref() {
        Some(path) => SceneConfig::load_from_path(path),
        None => SceneConfig::load(),
    };
    let scene_path = cli
        .scene
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENE_PATH));
    let base_dir = scene_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let frames = cli.frames.unwrap_or(scene.frames);
    let probes = if cli.probes.is_empty() {
        scene.probe_points()
    } else {
        cli.probes.clone()
    };

    let summary = headless::run(HeadlessConfig {
        scene,
        base_dir,
        frames,
        probes,
        frame_log: cli.frame_log.clone(),
    })?;

    let stdout = std::io::stdout();
    headless::print_probes(&mut stdout.lock(), &summary.probes)?;

    info!("billboard3d shutting down");
    Ok(())
}

#[derive(Clone, Default)]
struct CliOptions {
    scene: Option<PathBuf>,
    frames: Option<u64>,
    probes: Vec<Vec2>,
    frame_log: Option<PathBuf>,
    write_default_scene: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scene" => {
                    if let Some(path) = args.next() {
                        opts.scene = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--scene requires a file path");
                    }
                }
                "--frames" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.frames = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--frames must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--frames requires an integer");
                    }
                }
                "--probe" => {
                    if let Some(raw) = args.next() {
                        match parse_probe(&raw) {
                            Some(pixel) => opts.probes.push(pixel),
                            None => {
                                tracing::error!(value = %raw, "--probe must be like 400,300");
                            }
                        }
                    } else {
                        tracing::error!("--probe requires a value like 400,300");
                    }
                }
                "--frame-log" => {
                    if let Some(path) = args.next() {
                        opts.frame_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--frame-log requires a file path");
                    }
                }
                "--write-default-scene" => {
                    if let Some(path) = args.next() {
                        opts.write_default_scene = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--write-default-scene requires a file path");
                    }
                }
                other => {
                    tracing::warn!(arg = other, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}

fn parse_probe(raw: &str) -> Option<Vec2> {
    let (x, y) = raw.split_once(',')?;
    let x = x.trim().parse::<f32>().ok()?;
    let y = y.trim().parse::<f32>().ok()?;
    (x.is_finite() && y.is_finite()).then(|| Vec2::new(x, y))
}
