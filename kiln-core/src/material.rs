//! Material descriptors and the block catalog.
//!
//! The catalog is read from a JSON5 list of flat rows ([`MaterialEntry`]) and
//! checked row by row into [`MaterialDescriptor`]s, whose [`Pattern`] carries
//! exactly the options its kind uses. A row that names an ore color, sparkle
//! or glow on the wrong kind fails the whole load.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::color::Rgb;

const BUILTIN_CATALOG: &str = include_str!("../../package-content/materials.json5");

/// Errors raised while loading a material catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid JSON5 or does not match the row schema.
    #[error("failed to parse material catalog: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A `metallic` or `ore` material has no ore color.
    #[error("material `{name}` uses the {pattern} pattern but has no ore_color")]
    MissingOreColor {
        /// Material name.
        name: String,
        /// Pattern kind that needs the color.
        pattern: PatternKind,
    },
    /// An ore color was given to a kind that never reads it.
    #[error("material `{name}` sets ore_color but its pattern does not use one")]
    UnexpectedOreColor {
        /// Material name.
        name: String,
    },
    /// `sparkle` or `glow` was given to a kind that never reads it.
    #[error("material `{name}` sets `{flag}` but its pattern does not use it")]
    UnexpectedFlag {
        /// Material name.
        name: String,
        /// The misplaced flag.
        flag: &'static str,
    },
    /// Two rows share a name.
    #[error("material `{0}` is defined more than once")]
    DuplicateName(String),
    /// A numeric field is out of range.
    #[error("material `{name}` has an invalid {field}")]
    InvalidNumber {
        /// Material name.
        name: String,
        /// Offending field.
        field: &'static str,
    },
}

/// The compositor families, without their options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Smooth natural surfaces such as grass and dirt.
    Organic,
    /// Stone with dark cracks.
    Rocky,
    /// Sand-like surfaces with fine per-pixel grain.
    Grainy,
    /// Faceted crystals with three brightness tiers.
    Crystalline,
    /// Metal blocks streaked with ore veins.
    Metallic,
    /// Dense uniform mineral deposits.
    Ore,
    /// Water and lava.
    Fluid,
}

impl PatternKind {
    /// Parses a catalog pattern name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "organic" => Some(Self::Organic),
            "rocky" => Some(Self::Rocky),
            "grainy" => Some(Self::Grainy),
            "crystalline" => Some(Self::Crystalline),
            "metallic" => Some(Self::Metallic),
            "ore" => Some(Self::Ore),
            "fluid" => Some(Self::Fluid),
            _ => None,
        }
    }

    /// The catalog name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Organic => "organic",
            Self::Rocky => "rocky",
            Self::Grainy => "grainy",
            Self::Crystalline => "crystalline",
            Self::Metallic => "metallic",
            Self::Ore => "ore",
            Self::Fluid => "fluid",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compositor family together with the options it reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    /// See [`PatternKind::Organic`].
    Organic,
    /// See [`PatternKind::Rocky`].
    Rocky,
    /// See [`PatternKind::Grainy`].
    Grainy,
    /// See [`PatternKind::Crystalline`].
    Crystalline {
        /// Randomly flash single pixels to full brightness.
        sparkle: bool,
    },
    /// See [`PatternKind::Metallic`].
    Metallic {
        /// Color of the veins.
        ore_color: Rgb,
    },
    /// See [`PatternKind::Ore`].
    Ore {
        /// Color of the deposit; replaces the base color entirely.
        ore_color: Rgb,
    },
    /// See [`PatternKind::Fluid`].
    Fluid {
        /// Lava-style emissive brightness instead of water ripples.
        glow: bool,
    },
}

impl Pattern {
    /// The family of this pattern.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Organic => PatternKind::Organic,
            Self::Rocky => PatternKind::Rocky,
            Self::Grainy => PatternKind::Grainy,
            Self::Crystalline { .. } => PatternKind::Crystalline,
            Self::Metallic { .. } => PatternKind::Metallic,
            Self::Ore { .. } => PatternKind::Ore,
            Self::Fluid { .. } => PatternKind::Fluid,
        }
    }
}

/// One block type's texture recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDescriptor {
    /// Block name; also the output file stem.
    pub name: String,
    /// Mean surface color.
    pub base_color: Rgb,
    /// Amplitude of the noise-driven color swing.
    pub variation: f64,
    /// Feature size of the primary noise field; smaller means larger blotches.
    pub noise_scale: f64,
    /// Compositor and its options.
    pub pattern: Pattern,
    /// Free-form note describing the material.
    pub recipe: String,
}

/// A catalog row as written in the JSON5 file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialEntry {
    /// Block name.
    pub name: String,
    /// Mean surface color.
    pub base_color: Rgb,
    /// Amplitude of the color swing.
    pub variation: f64,
    /// Feature size of the primary noise field.
    pub noise_scale: f64,
    /// Pattern name; unknown names fall back to `organic`.
    pub pattern: String,
    /// Vein or deposit color, for `metallic` and `ore`.
    #[serde(default)]
    pub ore_color: Option<Rgb>,
    /// Sparkle flag, for `crystalline`.
    #[serde(default)]
    pub sparkle: Option<bool>,
    /// Glow flag, for `fluid`.
    #[serde(default)]
    pub glow: Option<bool>,
    /// Free-form note.
    #[serde(default)]
    pub recipe: String,
}

impl TryFrom<MaterialEntry> for MaterialDescriptor {
    type Error = CatalogError;

    fn try_from(entry: MaterialEntry) -> Result<Self, Self::Error> {
        let name = entry.name;

        if !entry.noise_scale.is_finite() || entry.noise_scale <= 0.0 {
            return Err(CatalogError::InvalidNumber {
                name,
                field: "noise_scale",
            });
        }
        if !entry.variation.is_finite() || entry.variation < 0.0 {
            return Err(CatalogError::InvalidNumber {
                name,
                field: "variation",
            });
        }

        let kind = PatternKind::from_name(&entry.pattern).unwrap_or_else(|| {
            log::warn!(
                "Material `{name}` has unknown pattern `{}`, using organic",
                entry.pattern
            );
            PatternKind::Organic
        });

        let uses_ore_color = matches!(kind, PatternKind::Metallic | PatternKind::Ore);
        if !uses_ore_color && entry.ore_color.is_some() {
            return Err(CatalogError::UnexpectedOreColor { name });
        }
        if kind != PatternKind::Crystalline && entry.sparkle.is_some() {
            return Err(CatalogError::UnexpectedFlag {
                name,
                flag: "sparkle",
            });
        }
        if kind != PatternKind::Fluid && entry.glow.is_some() {
            return Err(CatalogError::UnexpectedFlag { name, flag: "glow" });
        }

        let pattern = match kind {
            PatternKind::Organic => Pattern::Organic,
            PatternKind::Rocky => Pattern::Rocky,
            PatternKind::Grainy => Pattern::Grainy,
            PatternKind::Crystalline => Pattern::Crystalline {
                sparkle: entry.sparkle.unwrap_or(false),
            },
            PatternKind::Metallic | PatternKind::Ore => {
                let Some(ore_color) = entry.ore_color else {
                    return Err(CatalogError::MissingOreColor {
                        name,
                        pattern: kind,
                    });
                };
                if kind == PatternKind::Metallic {
                    Pattern::Metallic { ore_color }
                } else {
                    Pattern::Ore { ore_color }
                }
            }
            PatternKind::Fluid => Pattern::Fluid {
                glow: entry.glow.unwrap_or(false),
            },
        };

        Ok(Self {
            name,
            base_color: entry.base_color,
            variation: entry.variation,
            noise_scale: entry.noise_scale,
            pattern,
            recipe: entry.recipe,
        })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    materials: Vec<MaterialEntry>,
}

/// An ordered, validated list of materials.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    materials: Vec<MaterialDescriptor>,
}

impl Catalog {
    /// Loads the catalog shipped with the generator.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json5(BUILTIN_CATALOG)
    }

    /// Parses and validates a JSON5 catalog document.
    pub fn from_json5(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json5::from_str(source)?;
        Self::from_entries(file.materials)
    }

    /// Validates raw rows, keeping their order.
    pub fn from_entries(entries: Vec<MaterialEntry>) -> Result<Self, CatalogError> {
        let mut seen = FxHashSet::default();
        let mut materials = Vec::with_capacity(entries.len());

        for entry in entries {
            if !seen.insert(entry.name.clone()) {
                return Err(CatalogError::DuplicateName(entry.name));
            }
            materials.push(MaterialDescriptor::try_from(entry)?);
        }

        Ok(Self { materials })
    }

    /// Number of materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns `true` if the catalog holds no materials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Looks a material up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MaterialDescriptor> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Materials in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, MaterialDescriptor> {
        self.materials.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MaterialDescriptor;
    type IntoIter = std::slice::Iter<'a, MaterialDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.materials.iter()
    }
}
