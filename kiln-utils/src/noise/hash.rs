/// Scalar hash used as a cheap pseudo-random lattice value source.
///
/// `|sin(v * 12.9898 + 78.233) * 43758.5453| mod 1.0`, evaluated in that exact
/// order so the cloud volume matches the renderer's runtime noise bit for bit.
/// Not suitable for anything beyond noise.
#[inline]
#[must_use]
pub fn hash(value: f64) -> f64 {
    ((value * 12.9898 + 78.233).sin() * 43758.5453).abs() % 1.0
}
