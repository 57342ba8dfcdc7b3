use kiln_utils::noise::perlin_noise_2d;
use kiln_utils::random::Random;

use crate::color::ColorField;
use crate::material::MaterialDescriptor;

use super::shade;

const OCTAVES: u32 = 3;
/// Brightness of a sparkling pixel.
pub const SPARKLE_BRIGHTNESS: f64 = 1.8;
/// Draws above this value sparkle (5% of pixels).
const SPARKLE_THRESHOLD: f64 = 0.95;

/// Facet brightness for a noise sample.
#[inline]
#[must_use]
pub fn facet_brightness(n: f64) -> f64 {
    if n > 0.7 {
        1.3
    } else if n > 0.4 {
        1.0
    } else {
        0.8
    }
}

/// Ice, gems and salt: three hard brightness tiers with no additive swing.
///
/// With `sparkle` set, each pixel independently has a 5% chance of flashing to
/// [`SPARKLE_BRIGHTNESS`], whatever its tier.
pub fn crystalline<R: Random>(
    material: &MaterialDescriptor,
    sparkle: bool,
    width: usize,
    height: usize,
    random: &mut R,
) -> ColorField {
    let noise = perlin_noise_2d(random, width, height, material.noise_scale, OCTAVES);

    ColorField::from_fn(width, height, |x, y| {
        let mut brightness = facet_brightness(noise.get(x, y));
        if sparkle && random.next_f64() > SPARKLE_THRESHOLD {
            brightness = SPARKLE_BRIGHTNESS;
        }
        shade(material.base_color, brightness, 0.0)
    })
}
