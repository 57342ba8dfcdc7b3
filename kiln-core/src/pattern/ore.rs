use kiln_utils::noise::perlin_noise_2d;
use kiln_utils::random::Random;

use crate::color::{ColorField, Rgb};
use crate::material::MaterialDescriptor;

use super::{DEFAULT_SPREAD, noise_shift, shade};

const OCTAVES: u32 = 4;

/// Dense mineral deposits such as coal: the default law around `ore_color`.
///
/// The base color is never read.
pub fn ore<R: Random>(
    material: &MaterialDescriptor,
    ore_color: Rgb,
    width: usize,
    height: usize,
    random: &mut R,
) -> ColorField {
    let noise = perlin_noise_2d(random, width, height, material.noise_scale, OCTAVES);

    ColorField::from_fn(width, height, |x, y| {
        let n = noise.get(x, y);
        shade(
            ore_color,
            1.0,
            noise_shift(n, material.variation, DEFAULT_SPREAD),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Pattern;
    use crate::pattern::test_support::{material, within};
    use kiln_utils::random::xoroshiro::Xoroshiro;

    #[test]
    fn test_ore_ignores_base_color() {
        let ore_color = Rgb::new(10, 10, 10);
        let coal = material(Rgb::new(30, 30, 30), 15.0, 0.2, Pattern::Ore { ore_color });

        for seed in 0..4 {
            let field = ore(&coal, ore_color, 32, 32, &mut Xoroshiro::from_seed(seed));
            for pixel in field.pixels() {
                for channel in pixel.0 {
                    assert!(within(channel, 10, 15.0), "{channel} outside 10 ± 15");
                }
            }
        }
    }

    #[test]
    fn test_ore_is_independent_of_base() {
        let ore_color = Rgb::new(90, 60, 40);
        let a = material(Rgb::new(0, 0, 0), 20.0, 0.2, Pattern::Ore { ore_color });
        let b = material(Rgb::new(255, 255, 255), 20.0, 0.2, Pattern::Ore { ore_color });
        assert_eq!(
            ore(&a, ore_color, 32, 32, &mut Xoroshiro::from_seed(6)),
            ore(&b, ore_color, 32, 32, &mut Xoroshiro::from_seed(6))
        );
    }
}
