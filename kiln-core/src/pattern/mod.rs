//! Pattern compositors: noise fields in, block texture colors out.
//!
//! Every compositor builds its noise fields from the supplied random source in
//! a fixed order, so a material's texture is a pure function of its descriptor
//! and its seed. Most follow the same color law: shift each channel of the base
//! color by `(n - 0.5) * variation * spread`, where `n` is the noise sample.

mod crystalline;
mod fluid;
mod grainy;
mod metallic;
mod ore;
mod organic;
mod rocky;

pub use crystalline::crystalline;
pub use fluid::fluid;
pub use grainy::grainy;
pub use metallic::metallic;
pub use ore::ore;
pub use organic::organic;
pub use rocky::rocky;

use kiln_utils::random::Random;

use crate::color::{ColorField, Rgb};
use crate::material::{MaterialDescriptor, Pattern};

/// Spread of the default color law: the full `variation` on either side of the base.
pub const DEFAULT_SPREAD: f64 = 2.0;
/// Spread used by the brightness-shaded kinds (metallic and fluid).
pub const SHADED_SPREAD: f64 = 1.0;

/// Renders `material` into a `width × height` color field.
pub fn compose<R: Random>(
    material: &MaterialDescriptor,
    width: usize,
    height: usize,
    random: &mut R,
) -> ColorField {
    match material.pattern {
        Pattern::Organic => organic(material, width, height, random),
        Pattern::Rocky => rocky(material, width, height, random),
        Pattern::Grainy => grainy(material, width, height, random),
        Pattern::Crystalline { sparkle } => crystalline(material, sparkle, width, height, random),
        Pattern::Metallic { ore_color } => metallic(material, ore_color, width, height, random),
        Pattern::Ore { ore_color } => ore(material, ore_color, width, height, random),
        Pattern::Fluid { glow } => fluid(material, glow, width, height, random),
    }
}

/// Channel offset for noise sample `n`.
#[inline]
fn noise_shift(n: f64, variation: f64, spread: f64) -> f64 {
    (n - 0.5) * variation * spread
}

/// `channel * brightness + shift` on every channel, clamped and truncated.
#[inline]
fn shade(color: Rgb, brightness: f64, shift: f64) -> Rgb {
    color.map_channels(|c| c * brightness + shift)
}
