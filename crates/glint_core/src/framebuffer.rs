//! Framebuffer for storing render output and background images.
//!
//! Pixels are linear RGB stored row-major, row 0 at the top. A framebuffer
//! has a single owner: the renderer fills one and moves it out to the caller.
//! Wrap it in an `Arc` when it has to be shared (e.g. as a background).

use glint_math::Color;
use thiserror::Error;

/// Errors from building a framebuffer out of existing pixel data.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FramebufferError {
    #[error("Framebuffer dimensions must be non-zero, got {width}x{height}")]
    ZeroSize { width: usize, height: usize },

    #[error("Framebuffer of {width}x{height} pixels is too large")]
    TooLarge { width: usize, height: usize },

    #[error("Expected {expected} pixels for {width}x{height}, got {actual}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

pub type FramebufferResult<T> = Result<T, FramebufferError>;

/// A 2D grid of colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or `width * height` overflows.
    pub fn new(height: usize, width: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "framebuffer dimensions must be non-zero, got {width}x{height}"
        );
        let Some(len) = width.checked_mul(height) else {
            panic!("framebuffer of {width}x{height} pixels is too large");
        };
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; len],
        }
    }

    /// Wrap existing row-major pixel data.
    pub fn from_pixels(height: usize, width: usize, pixels: Vec<Color>) -> FramebufferResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramebufferError::ZeroSize { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(FramebufferError::TooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(FramebufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of range for {}x{} framebuffer",
            self.width,
            self.height
        );
        row * self.width + col
    }

    /// Get the pixel at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Color {
        self.pixels[self.index(row, col)]
    }

    /// Set the pixel at (row, col).
    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        let idx = self.index(row, col);
        self.pixels[idx] = color;
    }

    /// One row of pixels, left to right.
    pub fn row(&self, row: usize) -> &[Color] {
        let start = self.index(row, 0);
        &self.pixels[start..start + self.width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width)
    }

    /// Iterate rows top to bottom, mutably. Each row is a disjoint slice.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Color]> {
        self.pixels.chunks_exact_mut(self.width)
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable access to the raw pixels, row-major.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Look up the pixel a view direction maps to.
    ///
    /// `x` and `y` are direction components in [-1, 1]:
    /// `col = round((1 + x) / 2 * (w - 1))`, `row = round((1 + y) / 2 * (h - 1))`.
    /// Out-of-range results are clamped to the nearest edge pixel.
    pub fn sample_direction(&self, x: f32, y: f32) -> Color {
        let col = direction_to_index(x, self.width);
        let row = direction_to_index(y, self.height);
        self.pixels[row * self.width + col]
    }
}

fn direction_to_index(component: f32, extent: usize) -> usize {
    let max = (extent - 1) as f32;
    let pos = ((1.0 + component) * 0.5 * max).round();
    // NaN falls through to 0 via the saturating cast.
    pos.clamp(0.0, max) as usize
}
