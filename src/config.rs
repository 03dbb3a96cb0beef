use anyhow::{Context, Result};
use billboard3d_camera::{Camera, SceneViewport, Viewport};
use billboard3d_core::TexturePayload;
use billboard3d_render::GraphicsDevice;
use billboard3d_ui3d::{
    BillboardImage, BillboardModel, BillboardSingleText, BillboardText, Geometry, GlyphQuad,
    TextInfo,
};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_SCENE_PATH: &str = "config/scene.toml";

/// Glyph cells per row of the ASCII atlas used by `labels` billboards.
const ATLAS_COLUMNS: u32 = 16;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Frames rendered before probing.
    pub frames: u64,
    /// Reuse vertex storage between frames.
    pub reuse_vertex_buffer: bool,
    /// Vertical stretch of the pick rectangle.
    pub height_scale: f32,
    /// Pixel positions picked after the last frame.
    pub probes: Vec<[f32; 2]>,
    pub camera: CameraConfig,
    pub viewport: Viewport,
    pub billboards: Vec<BillboardConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BillboardConfig {
    Image {
        position: [f32; 3],
        width: f32,
        height: f32,
        #[serde(default = "white")]
        color: [f32; 4],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        texture: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alpha_texture: Option<PathBuf>,
    },
    Label {
        position: [f32; 3],
        text: String,
        width: f32,
        height: f32,
        #[serde(default = "white")]
        foreground: [f32; 4],
        #[serde(default = "panel_background")]
        background: [f32; 4],
        #[serde(default = "default_padding")]
        padding: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        texture: Option<PathBuf>,
    },
    Labels {
        /// Pixel size of one glyph cell.
        glyph_size: [f32; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        atlas: Option<PathBuf>,
        items: Vec<LabelItem>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LabelItem {
    pub text: String,
    pub position: [f32; 3],
    #[serde(default = "white")]
    pub color: [f32; 4],
}

fn white() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

fn panel_background() -> [f32; 4] {
    [0.0, 0.0, 0.0, 0.7]
}

fn default_padding() -> f32 {
    2.0
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            frames: 3,
            reuse_vertex_buffer: true,
            height_scale: 1.0,
            probes: vec![[400.0, 300.0], [10.0, 10.0]],
            camera: CameraConfig::default(),
            viewport: Viewport::new(800.0, 600.0),
            billboards: vec![
                BillboardConfig::Image {
                    position: [0.0, 0.0, 0.0],
                    width: 32.0,
                    height: 32.0,
                    color: white(),
                    texture: None,
                    alpha_texture: None,
                },
                BillboardConfig::Label {
                    position: [2.0, 1.0, -2.0],
                    text: "Spawn".to_string(),
                    width: 48.0,
                    height: 16.0,
                    foreground: [1.0, 1.0, 0.0, 1.0],
                    background: panel_background(),
                    padding: default_padding(),
                    texture: None,
                },
                BillboardConfig::Labels {
                    glyph_size: [8.0, 12.0],
                    atlas: None,
                    items: vec![
                        LabelItem {
                            text: "north".to_string(),
                            position: [0.0, 3.0, -5.0],
                            color: white(),
                        },
                        LabelItem {
                            text: "east".to_string(),
                            position: [4.0, 0.0, -5.0],
                            color: [0.6, 0.8, 1.0, 1.0],
                        },
                    ],
                },
            ],
        }
    }
}

impl SceneConfig {
    /// Load the scene from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_SCENE_PATH))
    }

    /// Load a scene from an explicit path, falling back to the demo scene on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SceneConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using demo scene", path.display());
                    SceneConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_SCENE_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using demo scene", path.display());
                } else {
                    warn!("Scene config not found at {}. Using demo scene", path.display());
                }
                SceneConfig::default()
            }
        }
    }

    /// Save the scene to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Camera and viewport described by the config.
    pub fn scene_viewport(&self) -> SceneViewport {
        let mut camera = Camera::look_at(
            Vec3::from_array(self.camera.position),
            Vec3::from_array(self.camera.target),
        );
        camera.fov = self.camera.fov_degrees.to_radians();
        camera.near = self.camera.near;
        camera.far = self.camera.far;
        SceneViewport::new(camera, self.viewport)
    }

    /// Pick positions in pixels.
    pub fn probe_points(&self) -> Vec<Vec2> {
        self.probes.iter().map(|p| Vec2::from_array(*p)).collect()
    }

    /// Build one detached model per configured billboard.
    ///
    /// Relative texture paths resolve against `base_dir`.
    pub fn build_models<D: GraphicsDevice>(
        &self,
        base_dir: &Path,
    ) -> Result<Vec<BillboardModel<D>>> {
        self.billboards
            .iter()
            .map(|billboard| {
                let geometry = billboard.geometry(base_dir)?;
                Ok(BillboardModel::new(geometry)
                    .with_height_scale(self.height_scale)
                    .with_reuse_vertex_buffer(self.reuse_vertex_buffer))
            })
            .collect()
    }
}

impl BillboardConfig {
    fn geometry(&self, base_dir: &Path) -> Result<Geometry> {
        let geometry = match self {
            BillboardConfig::Image {
                position,
                width,
                height,
                color,
                texture,
                alpha_texture,
            } => {
                let mut image = BillboardImage::new(Vec3::from_array(*position), *width, *height)
                    .with_color(*color);
                if let Some(path) = texture {
                    image = image.with_texture(load_texture(base_dir, path)?);
                }
                if let Some(path) = alpha_texture {
                    image = image.with_alpha_texture(load_texture(base_dir, path)?);
                }
                Geometry::billboard(image)
            }
            BillboardConfig::Label {
                position,
                text,
                width,
                height,
                foreground,
                background,
                padding,
                texture,
            } => {
                let mut label = BillboardSingleText::new(
                    Vec3::from_array(*position),
                    text.as_str(),
                    *width,
                    *height,
                )
                .with_foreground(*foreground)
                .with_background(*background)
                .with_padding(*padding);
                if let Some(path) = texture {
                    label = label.with_texture(load_texture(base_dir, path)?);
                }
                Geometry::billboard(label)
            }
            BillboardConfig::Labels {
                glyph_size,
                atlas,
                items,
            } => {
                let mut text = BillboardText::new();
                if let Some(path) = atlas {
                    text = text.with_texture(load_texture(base_dir, path)?);
                }
                for item in items {
                    text.push(lay_out_label(item, Vec2::from_array(*glyph_size)));
                }
                Geometry::billboard(text)
            }
        };
        Ok(geometry)
    }
}

/// Monospace layout over a 16x16 ASCII atlas, centered on the anchor.
fn lay_out_label(item: &LabelItem, glyph_size: Vec2) -> TextInfo {
    let cell = 1.0 / ATLAS_COLUMNS as f32;
    let count = item.text.chars().count() as f32;
    let left = -count * glyph_size.x / 2.0;
    let bottom = -glyph_size.y / 2.0;

    let mut info = TextInfo::new(item.text.clone(), Vec3::from_array(item.position))
        .with_color(item.color);
    for (i, ch) in item.text.chars().enumerate() {
        let code = u32::from(ch).min(255);
        let uv_min = Vec2::new(
            (code % ATLAS_COLUMNS) as f32 * cell,
            (code / ATLAS_COLUMNS) as f32 * cell,
        );
        let offset_min = Vec2::new(left + i as f32 * glyph_size.x, bottom);
        info = info.with_glyph(GlyphQuad::new(
            uv_min,
            uv_min + Vec2::splat(cell),
            offset_min,
            offset_min + glyph_size,
        ));
    }
    info
}

fn load_texture(base_dir: &Path, path: &Path) -> Result<TexturePayload> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    TexturePayload::load_file(&resolved)
        .with_context(|| format!("failed to read texture {}", resolved.display()))
}
