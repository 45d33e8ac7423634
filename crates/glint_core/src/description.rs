//! JSON scene description files.
//!
//! A description names its materials once and refers to them from spheres:
//!
//! ```json
//! {
//!   "width": 1024,
//!   "height": 768,
//!   "background": { "color": [0.2, 0.7, 0.8] },
//!   "materials": {
//!     "ivory": { "color": [0.4, 0.4, 0.3], "albedo": [0.6, 0.3, 0.0], "specular_exponent": 50.0 }
//!   },
//!   "spheres": [ { "center": [-3.0, 0.0, -16.0], "radius": 2.0, "material": "ivory" } ],
//!   "lights": [ { "position": [-20.0, 20.0, 20.0], "intensity": 1.5 } ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{Light, Material, Scene, Sphere};

/// Errors from reading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Material '{name}' has negative specular exponent {exponent}")]
    InvalidExponent { name: String, exponent: f32 },

    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// How the shading stage turns a hit into a color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingModel {
    /// Base material color, lights ignored.
    Flat,
    /// Diffuse + specular from every light.
    #[default]
    Phong,
}

/// What a ray that misses every sphere sees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundDesc {
    Color([f32; 3]),
    Image(PathBuf),
}

impl Default for BackgroundDesc {
    fn default() -> Self {
        BackgroundDesc::Color(DEFAULT_BACKGROUND)
    }
}

/// Flat background used when nothing else is configured.
pub const DEFAULT_BACKGROUND: [f32; 3] = [0.02, 0.02, 0.02];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub color: [f32; 3],
    #[serde(default = "default_albedo")]
    pub albedo: [f32; 3],
    #[serde(default)]
    pub specular_exponent: f32,
}

fn default_albedo() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDesc {
    pub position: [f32; 3],
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

fn default_intensity() -> f32 {
    1.0
}

fn default_width() -> usize {
    1024
}

fn default_height() -> usize {
    768
}

/// A scene plus the render settings stored alongside it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default)]
    pub shading: ShadingModel,
    #[serde(default)]
    pub background: BackgroundDesc,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,

    /// Directory of the file this was loaded from, for relative paths.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl SceneDescription {
    /// Parse a description from a JSON string.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let desc: SceneDescription = serde_json::from_str(json)?;
        if desc.width == 0 || desc.height == 0 {
            return Err(SceneError::InvalidDimensions {
                width: desc.width,
                height: desc.height,
            });
        }
        Ok(desc)
    }

    /// Read and parse a description file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut desc = Self::from_json(&json)?;
        desc.base_dir = path.parent().map(Path::to_path_buf);

        log::info!(
            "Loaded scene {}: {} spheres, {} lights",
            path.display(),
            desc.spheres.len(),
            desc.lights.len()
        );
        Ok(desc)
    }

    /// Path of the background image, resolved against the file's directory.
    pub fn background_image_path(&self) -> Option<PathBuf> {
        match &self.background {
            BackgroundDesc::Color(_) => None,
            BackgroundDesc::Image(path) => Some(self.resolve_path(path)),
        }
    }

    /// Flat background color, if the description uses one.
    pub fn background_color(&self) -> Option<Vec3> {
        match self.background {
            BackgroundDesc::Color(c) => Some(Vec3::from_array(c)),
            BackgroundDesc::Image(_) => None,
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Validate and build the scene.
    pub fn to_scene(&self) -> SceneResult<Scene> {
        let mut materials = BTreeMap::new();
        for (name, m) in &self.materials {
            if m.specular_exponent < 0.0 || m.specular_exponent.is_nan() {
                return Err(SceneError::InvalidExponent {
                    name: name.clone(),
                    exponent: m.specular_exponent,
                });
            }
            let material = Material::new(
                Vec3::from_array(m.color),
                Vec3::from_array(m.albedo),
                m.specular_exponent,
            );
            materials.insert(name.as_str(), material);
        }

        let mut spheres = Vec::with_capacity(self.spheres.len());
        for (index, s) in self.spheres.iter().enumerate() {
            // Checked here so Sphere::new's assertion never fires on user input
            if !(s.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: s.radius,
                });
            }
            let material = *materials.get(s.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    index,
                    name: s.material.clone(),
                }
            })?;
            spheres.push(Sphere::new(Vec3::from_array(s.center), s.radius, material));
        }

        let lights = self
            .lights
            .iter()
            .map(|l| Light::new(Vec3::from_array(l.position), l.intensity))
            .collect();

        Ok(Scene::new(spheres, lights))
    }
}
