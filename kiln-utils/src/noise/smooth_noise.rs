//! 3D value noise matching the renderer's runtime cloud shader.

// Noise code uses mathematical single-letter variables (x, y, z, u, v, w)
#![allow(clippy::many_single_char_names)]

use super::{floor, hash, mix, smoothstep};

const Y_STEP: i32 = 57;
const Z_STEP: i32 = 113;

/// Hash of the lattice corner `(x, y, z)`, cells wrapped to `0..256`.
#[inline]
fn corner(x: i32, y: i32, z: i32) -> f64 {
    hash(f64::from(x + y * Y_STEP + z * Z_STEP))
}

/// Samples 3D value noise at the given coordinates.
///
/// Lattice values come from [`hash`] and are blended with a cubic smoothstep,
/// along x first, then y, then z. The result lies in `[0, 1]`.
#[must_use]
pub fn perlin_noise_3d(x: f64, y: f64, z: f64) -> f64 {
    let fx = floor(x);
    let fy = floor(y);
    let fz = floor(z);

    let xi = fx & 255;
    let yi = fy & 255;
    let zi = fz & 255;

    let u = smoothstep(x - f64::from(fx));
    let v = smoothstep(y - f64::from(fy));
    let w = smoothstep(z - f64::from(fz));

    let n000 = corner(xi, yi, zi);
    let n001 = corner(xi, yi, zi + 1);
    let n010 = corner(xi, yi + 1, zi);
    let n011 = corner(xi, yi + 1, zi + 1);
    let n100 = corner(xi + 1, yi, zi);
    let n101 = corner(xi + 1, yi, zi + 1);
    let n110 = corner(xi + 1, yi + 1, zi);
    let n111 = corner(xi + 1, yi + 1, zi + 1);

    let nx00 = mix(n000, n100, u);
    let nx01 = mix(n001, n101, u);
    let nx10 = mix(n010, n110, u);
    let nx11 = mix(n011, n111, u);

    let nxy0 = mix(nx00, nx10, v);
    let nxy1 = mix(nx01, nx11, v);

    mix(nxy0, nxy1, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_noise_at_lattice_points() {
        // Integer coordinates reduce to the corner hash exactly
        for (x, y, z) in [(0, 0, 0), (1, 2, 3), (3, 0, 1)] {
            let expected = hash(f64::from(x + y * 57 + z * 113));
            let value = perlin_noise_3d(f64::from(x), f64::from(y), f64::from(z));
            assert_eq!(value.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn test_smooth_noise_range() {
        for x in 0..12 {
            for y in 0..12 {
                for z in 0..12 {
                    let value = perlin_noise_3d(
                        f64::from(x) * 0.37,
                        f64::from(y) * 0.37,
                        f64::from(z) * 0.37,
                    );
                    assert!((0.0..=1.0).contains(&value), "Value out of range: {value}");
                }
            }
        }
    }

    #[test]
    fn test_smooth_noise_wraps_every_256_cells() {
        let a = perlin_noise_3d(0.25, 1.5, 2.75);
        let b = perlin_noise_3d(256.25, 1.5, 2.75);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_smooth_noise_continuity() {
        let step = 0.001;
        let base = perlin_noise_3d(0.5, 0.5, 0.5);
        let nearby = perlin_noise_3d(0.5 + step, 0.5, 0.5);
        assert!(
            (base - nearby).abs() < 0.01,
            "Noise not continuous: {base} vs {nearby}"
        );
    }

    #[test]
    fn test_smooth_noise_deterministic() {
        assert_eq!(
            perlin_noise_3d(1.23, 4.56, 7.89).to_bits(),
            perlin_noise_3d(1.23, 4.56, 7.89).to_bits()
        );
    }
}
