use kiln_utils::noise::perlin_noise_2d;
use kiln_utils::random::Random;

use crate::color::{ColorField, Rgb};
use crate::material::MaterialDescriptor;

use super::{SHADED_SPREAD, noise_shift, shade};

const OCTAVES: u32 = 3;
const VEIN_SCALE: f64 = 0.15;
const VEIN_OCTAVES: u32 = 2;
/// Vein-field level above which a pixel shows the ore color.
const VEIN_THRESHOLD: f64 = 0.6;

/// Metallic shine for a noise sample.
#[inline]
fn shine(n: f64) -> f64 {
    if n > 0.6 { 1.2 } else { 0.9 }
}

/// Metal blocks: shiny base metal crossed by broad veins of `ore_color`.
///
/// Vein pixels take the ore color scaled by the shine only; the rest use the
/// shaded law on the base color.
pub fn metallic<R: Random>(
    material: &MaterialDescriptor,
    ore_color: Rgb,
    width: usize,
    height: usize,
    random: &mut R,
) -> ColorField {
    let noise = perlin_noise_2d(random, width, height, material.noise_scale, OCTAVES);
    let veins = perlin_noise_2d(random, width, height, VEIN_SCALE, VEIN_OCTAVES);

    ColorField::from_fn(width, height, |x, y| {
        let n = noise.get(x, y);
        let brightness = shine(n);
        if veins.get(x, y) > VEIN_THRESHOLD {
            shade(ore_color, brightness, 0.0)
        } else {
            shade(
                material.base_color,
                brightness,
                noise_shift(n, material.variation, SHADED_SPREAD),
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Pattern;
    use crate::pattern::test_support::material;
    use kiln_utils::random::xoroshiro::Xoroshiro;

    #[test]
    fn test_metallic_veins_use_ore_color() {
        let ore_color = Rgb::new(20, 200, 20);
        let iron = material(
            Rgb::new(200, 20, 20),
            0.0,
            0.15,
            Pattern::Metallic { ore_color },
        );
        let field = metallic(&iron, ore_color, 32, 32, &mut Xoroshiro::from_seed(9));

        let vein_tints = [0.9, 1.2].map(|b| ore_color.map_channels(|c| c * b));
        let base_tints = [0.9, 1.2].map(|b| iron.base_color.map_channels(|c| c * b));

        let mut veins = 0;
        for pixel in field.pixels() {
            if vein_tints.contains(pixel) {
                veins += 1;
            } else {
                assert!(base_tints.contains(pixel), "unexpected pixel {pixel:?}");
            }
        }
        assert!(veins > 0, "expected at least one vein pixel");
    }

    #[test]
    fn test_shine_tiers() {
        assert_eq!(shine(0.61).to_bits(), 1.2_f64.to_bits());
        assert_eq!(shine(0.6).to_bits(), 0.9_f64.to_bits());
    }
}
