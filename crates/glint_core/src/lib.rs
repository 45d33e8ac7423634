//! Glint Core - scene data, framebuffers and image IO.
//!
//! This crate provides:
//!
//! - **Scene types**: `Material`, `Sphere`, `Light`, `Scene`
//! - **Framebuffer**: the row-major color grid renders are written into
//! - **Image IO**: decoding backgrounds and encoding render output
//! - **Scene descriptions**: JSON scene files
//!
//! # Example
//!
//! ```ignore
//! use glint_core::SceneDescription;
//!
//! let desc = SceneDescription::load("scene.json")?;
//! let scene = desc.to_scene()?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.sphere_count(),
//!     scene.light_count());
//! ```

pub mod demo;
pub mod description;
pub mod framebuffer;
pub mod image_io;
pub mod scene;

// Re-export commonly used types
pub use description::{BackgroundDesc, SceneDescription, SceneError, ShadingModel, DEFAULT_BACKGROUND};
pub use framebuffer::{Framebuffer, FramebufferError};
pub use image_io::{load_image, save_png, ImageIoError};
pub use scene::{Light, Material, Scene, SceneBuilder, Sphere};

pub use glint_math::{Color, Vec3};
