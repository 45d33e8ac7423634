//! Glint Renderer - CPU sphere ray tracing
//!
//! Casts one ray per pixel from a pinhole camera, finds the nearest sphere,
//! and shades it with Lambert diffuse plus a Phong highlight. Rays that miss
//! everything see a flat color or a background image. Rows are rendered in
//! parallel with rayon.

mod camera;
mod hittable;
mod renderer;
mod shading;

pub use camera::Camera;
pub use hittable::{scene_intersect, HitRecord, Hittable};
pub use renderer::{
    render, render_row, render_serial, render_with, validate, RenderConfig, RenderError,
    RenderResult, RowTask,
};
pub use shading::{cast_ray, light_intensity, shade, tone_map, Background};

/// Re-export the scene types renders are built from
pub use glint_core::{Framebuffer, Light, Material, Scene, ShadingModel, Sphere};
pub use glint_math::{Color, Ray, Vec3};
