//! Dense scalar fields produced by the noise primitives.

/// A `width × height` grid of scalars stored row-major (`x + y * width`).
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField2D {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl NoiseField2D {
    /// Creates a field with every sample set to `value`.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Width in samples.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in samples.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the sample at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the field.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[x + y * self.width]
    }

    /// All samples in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// A cube of scalars stored z-major, then y, then x.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField3D {
    size: usize,
    data: Vec<f64>,
}

impl NoiseField3D {
    /// Samples `sampler` at every lattice point of a `size³` cube.
    ///
    /// The sampler receives integer coordinates and is called in storage order.
    pub fn from_fn(size: usize, mut sampler: impl FnMut(usize, usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(size * size * size);
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    data.push(sampler(x, y, z));
                }
            }
        }
        Self { size, data }
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the sample at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the cube.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f64 {
        self.data[x + y * self.size + z * self.size * self.size]
    }

    /// All samples in storage order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.data
    }
}
