//! Local illumination and background lookup.
//!
//! Hits are shaded with a Lambert diffuse term plus a Phong highlight summed
//! over every point light. Misses fall through to the background.

use std::sync::Arc;

use glint_core::{Framebuffer, Light, ShadingModel, Sphere, DEFAULT_BACKGROUND};
use glint_math::{reflect, Color, Ray, Vec3, Vec3Ext};

use crate::hittable::{scene_intersect, HitRecord};

/// What a ray sees when it misses every sphere.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    /// A constant color.
    Color(Color),
    /// An image indexed by the ray direction's x and y components.
    Image(Arc<Framebuffer>),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Color::from_array(DEFAULT_BACKGROUND))
    }
}

impl Background {
    /// Background color seen along `direction`.
    pub fn sample(&self, direction: Vec3) -> Color {
        match self {
            Background::Color(color) => *color,
            Background::Image(image) => image.sample_direction(direction.x, direction.y),
        }
    }
}

/// Diffuse and specular intensity at a hit, summed over all lights.
///
/// Returned as `(diffuse, specular)` before material weights are applied.
pub fn light_intensity(hit: &HitRecord, view_dir: Vec3, lights: &[Light]) -> (f32, f32) {
    let mut diffuse = 0.0;
    let mut specular = 0.0;

    for light in lights {
        let light_dir = (light.position - hit.p).normalize();

        diffuse += light.intensity * light_dir.dot(hit.normal).max(0.0);

        let highlight = (-reflect(-light_dir, hit.normal)).dot(view_dir).max(0.0);
        specular += light.intensity * highlight.powf(hit.material.specular_exponent);
    }

    (diffuse, specular)
}

/// Phong color at a hit, tone mapped.
pub fn shade(hit: &HitRecord, view_dir: Vec3, lights: &[Light]) -> Color {
    let (diffuse, specular) = light_intensity(hit, view_dir, lights);
    let material = hit.material;

    let color = material.color * diffuse * material.diffuse_weight()
        + Color::ONE * specular * material.specular_weight();

    tone_map(color)
}

/// Scale a color down so its brightest channel is at most 1.
///
/// Preserves hue, unlike a per-channel clamp. Colors already in range are
/// returned unchanged.
#[inline]
pub fn tone_map(color: Color) -> Color {
    let max = color.max_component();
    if max > 1.0 {
        color * (1.0 / max)
    } else {
        color
    }
}

/// Trace one primary ray and return its color.
pub fn cast_ray(
    ray: &Ray,
    spheres: &[Sphere],
    lights: &[Light],
    background: &Background,
    shading: ShadingModel,
) -> Color {
    match scene_intersect(spheres, ray) {
        Some(hit) => match shading {
            ShadingModel::Flat => tone_map(hit.material.color),
            ShadingModel::Phong => shade(&hit, ray.direction(), lights),
        },
        None => background.sample(ray.direction()),
    }
}
