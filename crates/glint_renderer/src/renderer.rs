//! Row-parallel renderer.
//!
//! Every row of the image is an independent task. Tasks share the scene
//! read-only and each one writes only its own row of the framebuffer, so the
//! result does not depend on how rayon schedules them.

use std::sync::Arc;
use std::time::Instant;

use glint_core::{
    load_image, Framebuffer, ImageIoError, Light, Scene, SceneDescription, SceneError,
    ShadingModel, Sphere,
};
use glint_math::Color;
use rayon::prelude::*;
use thiserror::Error;

use crate::camera::Camera;
use crate::shading::{cast_ray, Background};

/// Problems found before rendering starts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be non-zero and fit in memory, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Sphere {index} is invalid: center {center:?}, radius {radius}")]
    InvalidSphere {
        index: usize,
        center: [f32; 3],
        radius: f32,
    },

    #[error("Sphere {index} has an invalid specular exponent {specular_exponent}")]
    InvalidMaterial { index: usize, specular_exponent: f32 },

    #[error("Light {index} is invalid: position {position:?}, intensity {intensity}")]
    InvalidLight {
        index: usize,
        position: [f32; 3],
        intensity: f32,
    },

    #[error("Background image could not be loaded: {0}")]
    Background(#[from] ImageIoError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: usize,
    /// Output height in pixels
    pub height: usize,
    /// What rays that miss every sphere see
    pub background: Background,
    /// Flat color or full Phong lighting
    pub shading: ShadingModel,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            background: Background::default(),
            shading: ShadingModel::default(),
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Set the shading model.
    pub fn with_shading(mut self, shading: ShadingModel) -> Self {
        self.shading = shading;
        self
    }

    /// Build a config from a scene description.
    ///
    /// A background image is loaded here, so a missing or unreadable file is
    /// reported before any pixel is traced.
    pub fn from_description(desc: &SceneDescription) -> RenderResult<Self> {
        let background = match (desc.background_color(), desc.background_image_path()) {
            (Some(color), _) => Background::Color(color),
            (None, Some(path)) => Background::Image(Arc::new(load_image(path)?)),
            (None, None) => Background::default(),
        };

        Ok(Self {
            width: desc.width,
            height: desc.height,
            background,
            shading: desc.shading,
        })
    }
}

/// Everything one row needs to render itself.
#[derive(Clone, Copy)]
pub struct RowTask<'a> {
    pub spheres: &'a [Sphere],
    pub lights: &'a [Light],
    pub camera: &'a Camera,
    pub background: &'a Background,
    pub shading: ShadingModel,
    pub row: usize,
}

/// Render one row into `out`, left to right.
///
/// `out` must be exactly one row wide.
pub fn render_row(task: &RowTask, out: &mut [Color]) {
    debug_assert_eq!(out.len(), task.camera.image_width);

    for (col, pixel) in out.iter_mut().enumerate() {
        let ray = task.camera.ray_for_pixel(task.row, col);
        *pixel = cast_ray(&ray, task.spheres, task.lights, task.background, task.shading);
    }
}

/// Check the scene and config before rendering.
pub fn validate(spheres: &[Sphere], lights: &[Light], width: usize, height: usize) -> RenderResult<()> {
    if width == 0 || height == 0 || width.checked_mul(height).is_none() {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    for (index, sphere) in spheres.iter().enumerate() {
        if !(sphere.radius > 0.0) || !sphere.center.is_finite() {
            return Err(RenderError::InvalidSphere {
                index,
                center: sphere.center.to_array(),
                radius: sphere.radius,
            });
        }
        let specular_exponent = sphere.material.specular_exponent;
        if !(specular_exponent >= 0.0) {
            return Err(RenderError::InvalidMaterial {
                index,
                specular_exponent,
            });
        }
    }

    for (index, light) in lights.iter().enumerate() {
        if !light.position.is_finite() || !light.intensity.is_finite() {
            return Err(RenderError::InvalidLight {
                index,
                position: light.position.to_array(),
                intensity: light.intensity,
            });
        }
    }

    Ok(())
}

/// Render the scene in parallel, one rayon task per row.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<Framebuffer> {
    render_rows(&scene.spheres, &scene.lights, config, true)
}

/// Render the scene on the calling thread, rows top to bottom.
///
/// Produces exactly the same pixels as [`render`].
pub fn render_serial(scene: &Scene, config: &RenderConfig) -> RenderResult<Framebuffer> {
    render_rows(&scene.spheres, &scene.lights, config, false)
}

/// Render spheres and lights at `width`x`height`.
///
/// Without a background image the default flat background is used.
pub fn render_with(
    spheres: &[Sphere],
    lights: &[Light],
    height: usize,
    width: usize,
    background: Option<Arc<Framebuffer>>,
) -> RenderResult<Framebuffer> {
    let background = background.map(Background::Image).unwrap_or_default();
    let config = RenderConfig::default()
        .with_resolution(width, height)
        .with_background(background);

    render_rows(spheres, lights, &config, true)
}

fn render_rows(
    spheres: &[Sphere],
    lights: &[Light],
    config: &RenderConfig,
    parallel: bool,
) -> RenderResult<Framebuffer> {
    validate(spheres, lights, config.width, config.height)?;

    let camera = Camera::new(config.width, config.height);
    let mut image = Framebuffer::new(config.height, config.width);

    log::info!(
        "Rendering {}x{} ({} spheres, {} lights, {:?} shading)",
        config.width,
        config.height,
        spheres.len(),
        lights.len(),
        config.shading
    );
    let start = Instant::now();

    let task_for_row = |row: usize| RowTask {
        spheres,
        lights,
        camera: &camera,
        background: &config.background,
        shading: config.shading,
        row,
    };

    if parallel {
        log::debug!("Splitting {} rows across {} threads", config.height, rayon::current_num_threads());
        image
            .pixels_mut()
            .par_chunks_mut(config.width)
            .enumerate()
            .for_each(|(row, out)| render_row(&task_for_row(row), out));
    } else {
        for (row, out) in image.rows_mut().enumerate() {
            render_row(&task_for_row(row), out);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Material;
    use glint_math::Vec3;

    fn small_scene() -> Scene {
        Scene::builder()
            .sphere(
                Vec3::new(0.0, 0.0, -5.0),
                1.0,
                Material::new(Color::new(0.8, 0.2, 0.2), Vec3::new(0.9, 0.1, 0.0), 10.0),
            )
            .light(Vec3::new(-5.0, 5.0, 5.0), 1.2)
            .build()
    }

    #[test]
    fn test_render_dimensions() {
        let config = RenderConfig::default().with_resolution(8, 6);
        let image = render(&small_scene(), &config).unwrap();
        assert_eq!(image.width(), 8);
        assert_eq!(image.height(), 6);
    }

    #[test]
    fn test_render_row_matches_full_render() {
        let scene = small_scene();
        let config = RenderConfig::default().with_resolution(16, 12);
        let image = render(&scene, &config).unwrap();

        let camera = Camera::new(16, 12);
        let task = RowTask {
            spheres: &scene.spheres,
            lights: &scene.lights,
            camera: &camera,
            background: &config.background,
            shading: config.shading,
            row: 6,
        };
        let mut row = vec![Color::ZERO; 16];
        render_row(&task, &mut row);

        assert_eq!(row.as_slice(), image.row(6));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = RenderConfig::default().with_resolution(0, 10);
        let err = render(&small_scene(), &config).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { width: 0, height: 10 }));
    }

    #[test]
    fn test_invalid_sphere_rejected() {
        let mut scene = small_scene();
        // Fields are public, so this bypasses Sphere::new
        scene.spheres[0].radius = -1.0;
        let config = RenderConfig::default().with_resolution(4, 4);
        let err = render(&scene, &config).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSphere { index: 0, .. }));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let config = RenderConfig::default().with_resolution(usize::MAX, 2);
        let err = render(&Scene::default(), &config).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { height: 2, .. }));
    }

    #[test]
    fn test_negative_exponent_rejected() {
        let mut scene = small_scene();
        scene.spheres[0].material.specular_exponent = -1.0;
        let config = RenderConfig::default().with_resolution(32, 24);
        let err = render(&scene, &config).unwrap_err();
        assert!(matches!(err, RenderError::InvalidMaterial { index: 0, .. }));

        scene.spheres[0].material.specular_exponent = f32::NAN;
        assert!(matches!(
            render_serial(&scene, &config),
            Err(RenderError::InvalidMaterial { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_light_rejected() {
        let mut scene = small_scene();
        scene.lights.push(Light::new(Vec3::new(0.0, f32::NAN, 0.0), 1.0));
        let config = RenderConfig::default().with_resolution(4, 4);
        let err = render(&scene, &config).unwrap_err();
        assert!(matches!(err, RenderError::InvalidLight { index: 1, .. }));
    }

    #[test]
    fn test_render_with_background_image() {
        let mut bg = Framebuffer::new(2, 2);
        for row in 0..2 {
            for col in 0..2 {
                bg.set(row, col, Color::new(0.0, 0.0, 0.9));
            }
        }
        let image = render_with(&[], &[], 3, 4, Some(Arc::new(bg))).unwrap();
        assert!(image.pixels().iter().all(|p| *p == Color::new(0.0, 0.0, 0.9)));
    }

    #[test]
    fn test_from_description_color_background() {
        let desc = SceneDescription::from_json(
            r#"{ "width": 32, "height": 16, "shading": "flat",
                 "background": { "color": [0.1, 0.2, 0.3] }, "spheres": [] }"#,
        )
        .unwrap();
        let config = RenderConfig::from_description(&desc).unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 16);
        assert_eq!(config.shading, ShadingModel::Flat);
        assert_eq!(config.background, Background::Color(Color::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn test_from_description_missing_image_fails_early() {
        let desc = SceneDescription::from_json(
            r#"{ "background": { "image": "/no/such/background.png" }, "spheres": [] }"#,
        )
        .unwrap();
        let err = RenderConfig::from_description(&desc).unwrap_err();
        assert!(matches!(err, RenderError::Background(_)));
    }
}
