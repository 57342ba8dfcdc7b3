//! Noise generation utilities for the block-texture and cloud-volume assets.
//!
//! The 3D primitives mirror the renderer's runtime cloud noise, so their
//! arithmetic is kept operation-for-operation identical to it.

mod field;
mod hash;
mod math;
mod smooth_noise;
mod value_noise;
mod worley;

pub use field::{NoiseField2D, NoiseField3D};
pub use hash::hash;
pub use math::{cosine_interpolate, floor, mix, smoothstep};
pub use smooth_noise::perlin_noise_3d;
pub use value_noise::{FLAT_FIELD_VALUE, perlin_noise_2d};
pub use worley::worley_noise_3d;
