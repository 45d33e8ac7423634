//! The built-in demo scene: four spheres lit by three point lights.

use glint_math::{Color, Vec3};

use crate::scene::{Material, Scene};

pub fn ivory() -> Material {
    Material::new(Color::new(0.4, 0.4, 0.3), Vec3::new(0.6, 0.3, 0.0), 50.0)
}

pub fn red_rubber() -> Material {
    Material::new(Color::new(0.3, 0.1, 0.1), Vec3::new(0.9, 0.1, 0.0), 10.0)
}

/// Mostly specular. Without reflection rays this reads as a very tight
/// highlight on a dark body.
pub fn mirror() -> Material {
    Material::new(Color::ONE, Vec3::new(0.0, 10.0, 0.8), 1425.0)
}

pub fn demo_scene() -> Scene {
    Scene::builder()
        .sphere(Vec3::new(-3.0, 0.0, -16.0), 2.0, ivory())
        .sphere(Vec3::new(-1.0, -1.5, -12.0), 2.0, mirror())
        .sphere(Vec3::new(1.5, -0.5, -18.0), 3.0, red_rubber())
        .sphere(Vec3::new(7.0, 5.0, -18.0), 4.0, mirror())
        .light(Vec3::new(-20.0, 20.0, 20.0), 1.5)
        .light(Vec3::new(30.0, 50.0, -25.0), 1.8)
        .light(Vec3::new(30.0, 20.0, 30.0), 1.7)
        .build()
}
