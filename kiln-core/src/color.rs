use serde::Deserialize;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Builds a color by mapping each channel of `self` through `f`.
    ///
    /// The mapped value is clamped to `[0, 255]` and truncated.
    #[inline]
    #[must_use]
    pub fn map_channels(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self(self.0.map(|c| quantize_channel(f(f64::from(c)))))
    }
}

/// Clamps a channel value to `[0, 255]` and truncates it to a byte.
#[inline]
#[must_use]
pub fn quantize_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// A `width × height` grid of colors stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorField {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl ColorField {
    /// Builds a field by evaluating `f` at every pixel in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the field.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[x + y * self.width]
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Packed `RGBRGB...` bytes, the layout image encoders expect.
    #[must_use]
    pub fn to_raw_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.0).collect()
    }
}
