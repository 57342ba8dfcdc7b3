//! # Kiln Core
//!
//! Block-texture compositing and cloud-volume generation on top of the
//! `kiln-utils` noise primitives.

/// Pixel colors and color fields.
pub mod color;
/// The material catalog.
pub mod material;
/// Per-material pattern compositors.
pub mod pattern;
/// The incremental texture batch driver.
pub mod texture_batch;
/// The cloud noise volume and its `CN3D` file format.
pub mod volume;

/// Side length of every generated block texture.
pub const TEXTURE_SIZE: usize = 32;
