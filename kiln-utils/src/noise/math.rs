//! Math utilities for noise generation.
//!
//! The blend forms here are written as `a * (1 - t) + b * t` rather than
//! `a + t * (b - a)`; the two differ in the last bit and the renderer uses the
//! former.

use std::f64::consts::PI;

/// Cubic Hermite smoothstep.
/// Formula: t²(3 - 2t)
#[inline]
#[must_use]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Blend between two values with weight `t` on `b`.
#[inline]
#[must_use]
pub fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Cosine interpolation between two values.
/// Formula: f = (1 - cos(πt)) / 2, then `mix(a, b, f)`.
#[inline]
#[must_use]
pub fn cosine_interpolate(a: f64, b: f64, t: f64) -> f64 {
    let f = (1.0 - (t * PI).cos()) * 0.5;
    mix(a, b, f)
}

/// Floor function returning i32.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i32 {
    let i = value as i32;
    if value < f64::from(i) { i - 1 } else { i }
}
