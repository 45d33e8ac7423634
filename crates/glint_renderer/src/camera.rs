//! Pinhole camera for primary ray generation.

use glint_math::{Ray, Vec3};

/// A fixed pinhole camera at the origin looking down -Z.
///
/// The image plane sits at unit distance and spans [-1, 1] vertically
/// (a 90 degree vertical field of view). Horizontal extent is scaled by the
/// aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub image_width: usize,
    pub image_height: usize,
    aspect_ratio: f32,
}

impl Camera {
    /// Create a camera for an image of the given size.
    pub fn new(image_width: usize, image_height: usize) -> Self {
        Self {
            image_width,
            image_height,
            aspect_ratio: image_width as f32 / image_height as f32,
        }
    }

    /// Camera position.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Screen-space coordinates of the center of pixel (row, col).
    ///
    /// Row 0 is the top of the image, so `y` decreases as `row` grows.
    #[inline]
    pub fn screen_coords(&self, row: usize, col: usize) -> (f32, f32) {
        let x = ((2.0 * col as f32 + 1.0) / self.image_width as f32 - 1.0) * self.aspect_ratio;
        let y = -((2.0 * row as f32 + 1.0) / self.image_height as f32 - 1.0);
        (x, y)
    }

    /// Generate the primary ray through the center of pixel (row, col).
    pub fn ray_for_pixel(&self, row: usize, col: usize) -> Ray {
        let (x, y) = self.screen_coords(row, col);
        Ray::new(self.origin(), Vec3::new(x, y, -1.0).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_down_negative_z() {
        // Odd dimensions put a pixel center exactly on the axis
        let camera = Camera::new(101, 51);
        let ray = camera.ray_for_pixel(25, 50);

        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_row_zero_is_top() {
        let camera = Camera::new(4, 4);
        let top = camera.ray_for_pixel(0, 0);
        let bottom = camera.ray_for_pixel(3, 0);

        assert!(top.direction().y > 0.0);
        assert!(bottom.direction().y < 0.0);
        assert!(top.direction().x < 0.0);
    }

    #[test]
    fn test_aspect_ratio_scales_x() {
        let camera = Camera::new(200, 100);
        let (x, y) = camera.screen_coords(0, 199);
        // Half a pixel in from the right edge, which sits at x = 2
        assert!((x - 1.99).abs() < 1e-5);
        assert!((y - 0.99).abs() < 1e-5);
    }

    #[test]
    fn test_rays_are_normalized() {
        let camera = Camera::new(16, 9);
        for row in 0..9 {
            for col in 0..16 {
                let d = camera.ray_for_pixel(row, col).direction();
                assert!((d.length() - 1.0).abs() < 1e-5);
            }
        }
    }
}
