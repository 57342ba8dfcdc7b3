use kiln_utils::noise::perlin_noise_2d;
use kiln_utils::random::Random;

use crate::color::ColorField;
use crate::material::MaterialDescriptor;

use super::{SHADED_SPREAD, noise_shift, shade};

const OCTAVES: u32 = 4;
const WAVE_SCALE: f64 = 0.4;
const WAVE_OCTAVES: u32 = 2;

/// Brightness of a fluid pixel from its noise and wave samples.
#[inline]
#[must_use]
pub fn fluid_brightness(glow: bool, n: f64, wave: f64) -> f64 {
    if glow {
        0.8 + wave * 0.5 + n * 0.3
    } else {
        0.9 + wave * 0.3
    }
}

/// Water and lava: a rippling brightness from a low-frequency wave field.
///
/// `glow` selects the molten variant, which also brightens with the primary
/// noise.
pub fn fluid<R: Random>(
    material: &MaterialDescriptor,
    glow: bool,
    width: usize,
    height: usize,
    random: &mut R,
) -> ColorField {
    let noise = perlin_noise_2d(random, width, height, material.noise_scale, OCTAVES);
    let waves = perlin_noise_2d(random, width, height, WAVE_SCALE, WAVE_OCTAVES);

    ColorField::from_fn(width, height, |x, y| {
        let n = noise.get(x, y);
        shade(
            material.base_color,
            fluid_brightness(glow, n, waves.get(x, y)),
            noise_shift(n, material.variation, SHADED_SPREAD),
        )
    })
}
