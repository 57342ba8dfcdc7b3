use kiln_utils::noise::perlin_noise_2d;
use kiln_utils::random::Random;

use crate::color::ColorField;
use crate::material::MaterialDescriptor;

use super::{DEFAULT_SPREAD, noise_shift, shade};

const OCTAVES: u32 = 5;
const CRACK_SCALE: f64 = 0.5;
const CRACK_OCTAVES: u32 = 2;
/// Crack-field level above which a pixel is a crack.
const CRACK_THRESHOLD: f64 = 0.85;
/// Base-color multiplier inside a crack.
const CRACK_DARKNESS: f64 = 0.3;

/// Stone with dark hairline cracks from a second, high-frequency field.
pub fn rocky<R: Random>(
    material: &MaterialDescriptor,
    width: usize,
    height: usize,
    random: &mut R,
) -> ColorField {
    let noise = perlin_noise_2d(random, width, height, material.noise_scale, OCTAVES);
    let cracks = perlin_noise_2d(random, width, height, CRACK_SCALE, CRACK_OCTAVES);

    ColorField::from_fn(width, height, |x, y| {
        let n = noise.get(x, y);
        let darkness = if cracks.get(x, y) > CRACK_THRESHOLD {
            CRACK_DARKNESS
        } else {
            1.0
        };
        shade(
            material.base_color,
            darkness,
            noise_shift(n, material.variation, DEFAULT_SPREAD),
        )
    })
}
