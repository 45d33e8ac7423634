//! Image loading and saving.
//!
//! Decodes image files into [`Framebuffer`]s (used as render backgrounds)
//! and encodes rendered framebuffers back to 8-bit images. Values are
//! mapped linearly between bytes and floats; no gamma curve is applied in
//! either direction.

use std::path::Path;

use glint_math::Color;
use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::framebuffer::{Framebuffer, FramebufferError};

/// Errors that can occur while reading or writing images.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("Failed to load image {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save image {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Image {0} has no pixels")]
    Empty(String),

    #[error(transparent)]
    Framebuffer(#[from] FramebufferError),
}

pub type ImageIoResult<T> = Result<T, ImageIoError>;

/// Load an image file into a framebuffer.
pub fn load_image(path: impl AsRef<Path>) -> ImageIoResult<Framebuffer> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| ImageIoError::Load {
        path: path.display().to_string(),
        source,
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageIoError::Empty(path.display().to_string()));
    }

    let fb = from_rgb8(&rgb)?;
    log::debug!(
        "Loaded image: {} ({}x{}, {:.1} KB)",
        path.display(),
        width,
        height,
        (fb.pixels().len() * std::mem::size_of::<Color>()) as f32 / 1024.0
    );

    Ok(fb)
}

/// Convert an 8-bit RGB image to a framebuffer.
pub fn from_rgb8(img: &RgbImage) -> ImageIoResult<Framebuffer> {
    let (width, height) = img.dimensions();
    let pixels: Vec<Color> = img
        .pixels()
        .map(|p| Color::new(byte_to_unit(p[0]), byte_to_unit(p[1]), byte_to_unit(p[2])))
        .collect();

    Ok(Framebuffer::from_pixels(
        height as usize,
        width as usize,
        pixels,
    )?)
}

/// Convert a framebuffer to an 8-bit RGB image.
pub fn to_rgb8(fb: &Framebuffer) -> RgbImage {
    let mut img = RgbImage::new(fb.width() as u32, fb.height() as u32);
    for (dst, src) in img.pixels_mut().zip(fb.pixels()) {
        *dst = Rgb([unit_to_byte(src.x), unit_to_byte(src.y), unit_to_byte(src.z)]);
    }
    img
}

/// Encode a framebuffer as PNG.
pub fn save_png(fb: &Framebuffer, path: impl AsRef<Path>) -> ImageIoResult<()> {
    let path = path.as_ref();
    to_rgb8(fb)
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ImageIoError::Save {
            path: path.display().to_string(),
            source,
        })?;

    log::debug!("Saved {}x{} image to {}", fb.width(), fb.height(), path.display());
    Ok(())
}

#[inline]
fn byte_to_unit(value: u8) -> f32 {
    value as f32 / 255.0
}

#[inline]
fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_byte_conversions() {
        assert_eq!(byte_to_unit(0), 0.0);
        assert_eq!(byte_to_unit(255), 1.0);
        assert_eq!(unit_to_byte(0.0), 0);
        assert_eq!(unit_to_byte(1.0), 255);
        assert_eq!(unit_to_byte(0.5), 128);
        // Out of range values saturate
        assert_eq!(unit_to_byte(-0.3), 0);
        assert_eq!(unit_to_byte(7.0), 255);
    }

    #[test]
    fn test_rgb8_orientation() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([255, 0, 51]));

        let fb = from_rgb8(&img).unwrap();
        assert_eq!(fb.width(), 3);
        assert_eq!(fb.height(), 2);
        assert_eq!(fb.get(1, 2), Color::new(1.0, 0.0, 0.2));
        assert_eq!(fb.get(0, 0), Color::ZERO);

        let back = to_rgb8(&fb);
        assert_eq!(back, img);
    }

    #[test]
    fn test_png_round_trip() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut fb = Framebuffer::new(4, 6);
        fb.set(0, 0, Color::new(1.0, 0.0, 0.0));
        fb.set(3, 5, Color::new(0.0, 0.0, 1.0));
        save_png(&fb, &path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.width(), 6);
        assert_eq!(loaded.height(), 4);
        assert_eq!(loaded.get(0, 0), Color::new(1.0, 0.0, 0.0));
        assert_eq!(loaded.get(3, 5), Color::new(0.0, 0.0, 1.0));
        assert_eq!(loaded.get(2, 2), Color::ZERO);
    }

    #[test]
    fn test_load_missing_file() {
        init_logging();
        let err = load_image("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, ImageIoError::Load { .. }));
        assert!(err.to_string().contains("here.png"));
    }
}
