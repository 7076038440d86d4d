//! Ember Core - renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Descriptors**: `Material` and `AreaLight`, shared with the renderer
//! - **Scene description**: named material table, surfaces, lights, camera
//! - **Presets and JSON loading**: the built-in scenes and a file format
//!
//! # Example
//!
//! ```ignore
//! use ember_core::SceneDescription;
//!
//! let scene = SceneDescription::preset("hex-room")?;
//! println!("{}: {} surfaces, {} lights",
//!     scene.name,
//!     scene.surfaces.len(),
//!     scene.lights.len());
//! ```

pub mod light;
pub mod loader;
pub mod material;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use light::AreaLight;
pub use loader::{load_scene, SceneError, SceneResult};
pub use material::Material;
pub use scene::{CameraDesc, LightDesc, SceneDescription, Shape, SurfaceDesc};
