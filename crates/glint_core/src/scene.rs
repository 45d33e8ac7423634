//! Scene types for Glint.
//!
//! A scene is an ordered list of spheres and an ordered list of point
//! lights. Both are built once and are read-only while a render runs.

use glint_math::{Color, Vec3};

/// A Phong-style surface description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base (diffuse) color (RGB, 0-1)
    pub color: Color,

    /// Blend weights: `x` scales the diffuse term, `y` the specular term.
    /// `z` is reserved.
    pub albedo: Vec3,

    /// Phong exponent for the specular highlight (>= 0)
    pub specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::new(0.5, 0.5, 0.5), // Grey default
            albedo: Vec3::new(1.0, 0.0, 0.0),
            specular_exponent: 0.0,
        }
    }
}

impl Material {
    /// Create a new material.
    ///
    /// # Panics
    ///
    /// Panics if `specular_exponent` is negative or NaN.
    pub fn new(color: Color, albedo: Vec3, specular_exponent: f32) -> Self {
        assert!(
            specular_exponent >= 0.0,
            "specular exponent must be non-negative, got {specular_exponent}"
        );
        Self {
            color,
            albedo,
            specular_exponent,
        }
    }

    /// A purely diffuse material with no highlight.
    pub fn flat(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Weight applied to the accumulated diffuse intensity.
    #[inline]
    pub fn diffuse_weight(&self) -> f32 {
        self.albedo.x
    }

    /// Weight applied to the accumulated specular intensity.
    #[inline]
    pub fn specular_weight(&self) -> f32 {
        self.albedo.y
    }
}

/// A sphere primitive with an embedded material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not strictly positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self {
            center,
            radius,
            material,
        }
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// Spheres and lights to render.
///
/// Sphere order only matters for exact distance ties (the earlier sphere
/// wins). Light contributions are summed, so their order does not matter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create a scene from already-built sequences.
    pub fn new(spheres: Vec<Sphere>, lights: Vec<Light>) -> Self {
        Self { spheres, lights }
    }

    /// Start building a scene.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Check if the scene has nothing to hit.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

/// Builder for [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
}

impl SceneBuilder {
    /// Add a sphere. Spheres keep their insertion order.
    pub fn sphere(mut self, center: Vec3, radius: f32, material: Material) -> Self {
        self.spheres.push(Sphere::new(center, radius, material));
        self
    }

    /// Add a point light.
    pub fn light(mut self, position: Vec3, intensity: f32) -> Self {
        self.lights.push(Light::new(position, intensity));
        self
    }

    pub fn build(self) -> Scene {
        Scene {
            spheres: self.spheres,
            lights: self.lights,
        }
    }
}
