//! Cloud noise volume.
//!
//! A Perlin-Worley hybrid sampled on a `size³` lattice and quantized to
//! bytes. The renderer uploads the result as a 3D texture, so the sampling
//! arithmetic follows its runtime noise exactly.

mod format;

pub use format::{CN3D_MAGIC, CorruptVolumeFile, HEADER_SIZE, VolumeFileError};

use std::time::Instant;

use kiln_utils::noise::{NoiseField3D, perlin_noise_3d, worley_noise_3d};

/// Side length of the volume the renderer expects.
pub const CLOUD_VOLUME_SIZE: usize = 128;

const PERLIN_FREQUENCY: f64 = 4.0;
const WORLEY_FREQUENCY: f64 = 2.0;
const PERLIN_WEIGHT: f64 = 0.6;
const WORLEY_WEIGHT: f64 = 0.4;
/// Progress is logged every `1 / PROGRESS_STEPS` of the voxels.
const PROGRESS_STEPS: usize = 20;

/// Cloud density at lattice point `(x, y, z)` of a `size³` volume, in `[0, 1]`.
#[must_use]
pub fn cloud_density(x: usize, y: usize, z: usize, size: usize) -> f64 {
    let size = size as f64;
    let (nx, ny, nz) = (x as f64 / size, y as f64 / size, z as f64 / size);

    let perlin = perlin_noise_3d(
        nx * PERLIN_FREQUENCY,
        ny * PERLIN_FREQUENCY,
        nz * PERLIN_FREQUENCY,
    );
    let worley = worley_noise_3d(
        nx * WORLEY_FREQUENCY,
        ny * WORLEY_FREQUENCY,
        nz * WORLEY_FREQUENCY,
    );

    (perlin * PERLIN_WEIGHT + worley * WORLEY_WEIGHT).clamp(0.0, 1.0)
}

/// Converts a density in `[0, 1]` to a voxel byte.
#[inline]
#[must_use]
pub fn quantize_density(density: f64) -> u8 {
    (density * 255.0) as u8
}

/// Generates the `size³` cloud volume.
///
/// Voxels are produced z-major, then y, then x, and progress is logged every
/// 5% of the way.
#[must_use]
pub fn generate_cloud_volume(size: usize) -> VoxelVolume {
    log::info!("Generating {size}³ cloud noise volume");
    let start = Instant::now();

    let total = size * size * size;
    let interval = (total / PROGRESS_STEPS).max(1);
    let mut index = 0;

    let field = NoiseField3D::from_fn(size, |x, y, z| {
        if index % interval == 0 {
            log::info!("Progress: {:.0}%", index as f64 / total as f64 * 100.0);
        }
        index += 1;
        cloud_density(x, y, z, size)
    });

    let voxels = field.values().iter().copied().map(quantize_density).collect();
    log::info!("Cloud volume generated in {:?}", start.elapsed());

    VoxelVolume { size, voxels }
}

/// Summary of a volume's intensities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeStats {
    /// Darkest voxel.
    pub min: u8,
    /// Brightest voxel.
    pub max: u8,
    /// Mean intensity.
    pub mean: f64,
}

/// A cube of 8-bit intensities stored z-major, then y, then x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelVolume {
    size: usize,
    voxels: Vec<u8>,
}

impl VoxelVolume {
    /// Wraps `voxels` as a `size³` volume.
    pub fn from_voxels(size: usize, voxels: Vec<u8>) -> Result<Self, CorruptVolumeFile> {
        let expected = size
            .checked_mul(size)
            .and_then(|square| square.checked_mul(size))
            .ok_or(CorruptVolumeFile::SizeOverflow { size: size as u64 })?;
        if voxels.len() != expected {
            return Err(CorruptVolumeFile::LengthMismatch {
                expected,
                actual: voxels.len(),
            });
        }
        Ok(Self { size, voxels })
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the voxel at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the cube.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> u8 {
        self.voxels[x + y * self.size + z * self.size * self.size]
    }

    /// The voxels in storage order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.voxels
    }

    /// Minimum, maximum and mean intensity. All zero for an empty volume.
    #[must_use]
    pub fn stats(&self) -> VolumeStats {
        let Some(&first) = self.voxels.first() else {
            return VolumeStats {
                min: 0,
                max: 0,
                mean: 0.0,
            };
        };

        let (min, max, sum) = self
            .voxels
            .iter()
            .fold((first, first, 0u64), |(min, max, sum), &v| {
                (min.min(v), max.max(v), sum + u64::from(v))
            });

        VolumeStats {
            min,
            max,
            mean: sum as f64 / self.voxels.len() as f64,
        }
    }
}
