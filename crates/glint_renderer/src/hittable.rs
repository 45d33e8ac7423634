//! Hittable trait and HitRecord for ray-object intersection.

use glint_core::{Material, Sphere};
use glint_math::{Ray, Vec3};

/// Record of a ray-sphere intersection.
#[derive(Clone, Copy, Debug)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit normal of the sphere at `p`
    pub normal: Vec3,
    /// Material of the sphere that was hit
    pub material: &'a Material,
    /// Distance along the ray
    pub t: f32,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Distance along `ray` to the surface, if the ray hits it.
    fn intersect(&self, ray: &Ray) -> Option<f32>;
}

impl Hittable for Sphere {
    /// Solves `|o + t*d - c|² = r²` for `t`.
    ///
    /// The nearer non-negative root wins. When the discriminant is exactly
    /// zero the single root is returned as-is, even if it lies behind the
    /// origin.
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let l = ray.origin() - self.center;
        let d = ray.direction();
        let a = d.dot(d);
        let b = 2.0 * d.dot(l);
        let c = l.dot(l) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        if discriminant == 0.0 {
            return Some(-b / (2.0 * a));
        }

        // Pick the root that avoids catastrophic cancellation, derive the other
        let sign = if b < 0.0 { -1.0 } else { 1.0 };
        let q = -0.5 * (b + sign * discriminant.sqrt());
        let t0 = q / a;
        let t1 = c / q;
        let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };

        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            // Entirely behind the origin
            None
        }
    }
}

/// Find the nearest sphere hit along `ray`.
///
/// Spheres are scanned in order and a later sphere only replaces the current
/// best when it is strictly closer, so exact ties go to the earlier sphere.
pub fn scene_intersect<'a>(spheres: &'a [Sphere], ray: &Ray) -> Option<HitRecord<'a>> {
    let mut closest_so_far = f32::INFINITY;
    let mut nearest: Option<&Sphere> = None;

    for sphere in spheres {
        if let Some(t) = sphere.intersect(ray) {
            if t < closest_so_far {
                closest_so_far = t;
                nearest = Some(sphere);
            }
        }
    }

    nearest.map(|sphere| {
        let p = ray.at(closest_so_far);
        HitRecord {
            p,
            normal: (p - sphere.center).normalize(),
            material: &sphere.material,
            t: closest_so_far,
        }
    })
}
