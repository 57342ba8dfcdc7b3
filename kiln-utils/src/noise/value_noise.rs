//! Multi-octave 2D value noise used by the texture compositors.

use crate::random::Random;

use super::{NoiseField2D, cosine_interpolate};

/// Value returned everywhere when a field has no range to normalize over.
pub const FLAT_FIELD_VALUE: f64 = 0.5;

/// Lattice of random values in `[-1, 1)` for a single octave.
struct GradientGrid {
    stride: usize,
    values: Vec<f64>,
}

impl GradientGrid {
    /// Draws a `(cells + 2)²` lattice row by row.
    fn new<R: Random>(random: &mut R, cells: usize) -> Self {
        let stride = cells + 2;
        let values = (0..stride * stride)
            .map(|_| random.next_f64() * 2.0 - 1.0)
            .collect();
        Self { stride, values }
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> f64 {
        self.values[x + y * self.stride]
    }
}

/// Number of lattice cells per axis for one octave.
fn cells_for_octave(width: usize, scale: f64, octave: u32) -> usize {
    let frequency = 2.0_f64.powi(octave as i32);
    let cells = (width as f64 / (10.0 * scale * frequency)) as usize;
    cells.max(2)
}

/// Generates a `width × height` field of summed value-noise octaves normalized to `[0, 1]`.
///
/// Each octave doubles the lattice frequency and halves the amplitude; lattice
/// values are drawn from `random`, so a fixed seed reproduces the field. A
/// field without any spread (for example a single pixel) comes back filled
/// with [`FLAT_FIELD_VALUE`].
pub fn perlin_noise_2d<R: Random>(
    random: &mut R,
    width: usize,
    height: usize,
    scale: f64,
    octaves: u32,
) -> NoiseField2D {
    let mut field = NoiseField2D::filled(width, height, 0.0);
    if width == 0 || height == 0 {
        return field;
    }

    for octave in 0..octaves {
        let amplitude = 0.5_f64.powi(octave as i32);
        let cells = cells_for_octave(width, scale, octave);
        let grid = GradientGrid::new(random, cells);

        let values = field.values_mut();
        for y in 0..height {
            let grid_y = y as f64 / height as f64 * cells as f64;
            let y0 = grid_y as usize;
            let sy = grid_y - y0 as f64;

            for x in 0..width {
                let grid_x = x as f64 / width as f64 * cells as f64;
                let x0 = grid_x as usize;
                let sx = grid_x - x0 as f64;

                let top = cosine_interpolate(grid.at(x0, y0), grid.at(x0 + 1, y0), sx);
                let bottom = cosine_interpolate(grid.at(x0, y0 + 1), grid.at(x0 + 1, y0 + 1), sx);
                values[x + y * width] += cosine_interpolate(top, bottom, sy) * amplitude;
            }
        }
    }

    normalize(&mut field);
    field
}

/// Rescales the field to `[0, 1]` in place.
fn normalize(field: &mut NoiseField2D) {
    let (min, max) = field
        .values()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    let values = field.values_mut();
    if range <= 0.0 || !range.is_finite() {
        values.fill(FLAT_FIELD_VALUE);
        return;
    }

    let rcp_range = 1.0 / range;
    for v in values {
        *v = ((*v - min) * rcp_range).clamp(0.0, 1.0);
    }
}
