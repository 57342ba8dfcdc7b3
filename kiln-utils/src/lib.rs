//! # Kiln Utils
//!
//! Noise primitives and seeded random sources shared by the texture and
//! cloud-volume generators.

pub mod noise;
pub mod random;
