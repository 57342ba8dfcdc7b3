use kiln_utils::noise::perlin_noise_2d;
use kiln_utils::random::Random;

use crate::color::ColorField;
use crate::material::MaterialDescriptor;

use super::{DEFAULT_SPREAD, noise_shift, shade};

const OCTAVES: u32 = 6;
/// Upper bound of the per-pixel grain added on top of the noise.
const GRAIN_STRENGTH: f64 = 0.2;

/// Sand, gravel and snow: the default law over noise plus unstructured grain.
///
/// The grain is drawn per pixel straight from the random source, after the
/// noise field, so it carries no spatial coherence.
pub fn grainy<R: Random>(
    material: &MaterialDescriptor,
    width: usize,
    height: usize,
    random: &mut R,
) -> ColorField {
    let noise = perlin_noise_2d(random, width, height, material.noise_scale, OCTAVES);
    let grain: Vec<f64> = (0..width * height)
        .map(|_| random.next_f64() * GRAIN_STRENGTH)
        .collect();

    ColorField::from_fn(width, height, |x, y| {
        let n = noise.get(x, y) + grain[x + y * width];
        shade(
            material.base_color,
            1.0,
            noise_shift(n, material.variation, DEFAULT_SPREAD),
        )
    })
}
