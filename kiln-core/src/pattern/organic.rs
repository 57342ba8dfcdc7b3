use kiln_utils::noise::perlin_noise_2d;
use kiln_utils::random::Random;

use crate::color::ColorField;
use crate::material::MaterialDescriptor;

use super::{DEFAULT_SPREAD, noise_shift, shade};

const OCTAVES: u32 = 4;

/// Smooth natural surfaces (grass, dirt, clay): the default color law over one field.
pub fn organic<R: Random>(
    material: &MaterialDescriptor,
    width: usize,
    height: usize,
    random: &mut R,
) -> ColorField {
    let noise = perlin_noise_2d(random, width, height, material.noise_scale, OCTAVES);

    ColorField::from_fn(width, height, |x, y| {
        let n = noise.get(x, y);
        shade(
            material.base_color,
            1.0,
            noise_shift(n, material.variation, DEFAULT_SPREAD),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::material::Pattern;
    use crate::pattern::test_support::{material, within};
    use kiln_utils::random::xoroshiro::Xoroshiro;

    #[test]
    fn test_organic_stays_around_base() {
        let grass = material(Rgb::new(60, 120, 40), 30.0, 0.3, Pattern::Organic);
        let field = organic(&grass, 32, 32, &mut Xoroshiro::from_seed(11));

        for pixel in field.pixels() {
            for (channel, base) in pixel.0.into_iter().zip(grass.base_color.0) {
                assert!(within(channel, base, 30.0), "{channel} too far from {base}");
            }
        }
    }

    #[test]
    fn test_organic_channels_move_together() {
        // One field drives all three channels, so gaps between them never change
        let grey = material(Rgb::new(100, 110, 120), 20.0, 0.3, Pattern::Organic);
        let field = organic(&grey, 32, 32, &mut Xoroshiro::from_seed(4));
        for Rgb([r, g, b]) in field.pixels().iter().copied() {
            assert!(g.abs_diff(r) <= 11 && g.abs_diff(r) >= 9);
            assert!(b.abs_diff(g) <= 11 && b.abs_diff(g) >= 9);
        }
    }
}
