//! 3D cellular (Worley) noise matching the renderer's runtime cloud shader.

use super::hash;

const PRIME_X: f64 = 374_761_393.0;
const PRIME_Y: f64 = 668_265_263.0;
const PRIME_Z: f64 = 1_274_126_177.0;

/// Feature point of the cell whose minimum corner is `(cx, cy, cz)`.
#[inline]
fn feature_point(cx: f64, cy: f64, cz: f64) -> [f64; 3] {
    let h = hash(cx * PRIME_X + cy * PRIME_Y + cz * PRIME_Z);
    [cx + h, cy + hash(h * 2.0), cz + hash(h * 3.0)]
}

/// Samples inverted Worley noise at the given coordinates.
///
/// Searches the 27 cells around the sample for the nearest feature point and
/// returns `1 - distance`, with the distance capped at 1. Dense clusters of
/// feature points read as "more solid". The result lies in `[0, 1]`.
#[must_use]
pub fn worley_noise_3d(x: f64, y: f64, z: f64) -> f64 {
    let cell_x = x.floor();
    let cell_y = y.floor();
    let cell_z = z.floor();

    let mut min_dist = 1.0_f64;

    for dz in [-1.0, 0.0, 1.0] {
        for dy in [-1.0, 0.0, 1.0] {
            for dx in [-1.0, 0.0, 1.0] {
                let [fx, fy, fz] = feature_point(cell_x + dx, cell_y + dy, cell_z + dz);

                let diff_x = fx - x;
                let diff_y = fy - y;
                let diff_z = fz - z;
                let dist = (diff_x * diff_x + diff_y * diff_y + diff_z * diff_z).sqrt();

                min_dist = min_dist.min(dist);
            }
        }
    }

    1.0 - min_dist
}
