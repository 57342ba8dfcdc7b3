//! Incremental generation of the block texture set.
//!
//! The driver walks the catalog in order and renders every material whose
//! output is missing from the [`TextureStore`]. Existing outputs are never
//! rewritten, so running the batch twice over the same store writes nothing
//! the second time.

use std::fmt;
use std::io;
use std::time::Instant;

use kiln_utils::random::PositionalRandom;
use kiln_utils::random::xoroshiro::XoroshiroSplitter;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::TEXTURE_SIZE;
use crate::color::ColorField;
use crate::material::{Catalog, MaterialDescriptor};
use crate::pattern::compose;

/// Failure to persist one texture.
#[derive(Debug, Error)]
pub enum TextureStoreError {
    /// The underlying file or device failed.
    #[error("texture I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The image codec rejected the texture.
    #[error("texture encoding failed: {0}")]
    Encode(String),
}

/// Where generated textures go.
///
/// The presence of a texture is the only "already generated" signal the
/// batch consults.
pub trait TextureStore {
    /// Whether a texture named `name` already exists.
    fn exists(&self, name: &str) -> bool;

    /// Persists `texture` under `name`.
    fn save(&mut self, name: &str, texture: &ColorField) -> Result<(), TextureStoreError>;
}

/// A [`TextureStore`] that keeps textures in memory.
#[derive(Debug, Default)]
pub struct MemoryTextureStore {
    textures: FxHashMap<String, ColorField>,
    writes: usize,
}

impl MemoryTextureStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColorField> {
        self.textures.get(name)
    }

    /// Number of stored textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the store holds no textures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Total number of [`TextureStore::save`] calls that succeeded.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TextureStore for MemoryTextureStore {
    fn exists(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    fn save(&mut self, name: &str, texture: &ColorField) -> Result<(), TextureStoreError> {
        self.textures.insert(name.to_owned(), texture.clone());
        self.writes += 1;
        Ok(())
    }
}

/// Outcome of one [`TextureBatch::run`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Materials rendered and saved this run.
    pub generated: usize,
    /// Materials whose texture already existed.
    pub skipped: usize,
    /// Materials whose save failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    /// Whether every material either exists or was generated.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} generated, {} skipped, {} failed",
            self.generated,
            self.skipped,
            self.failed.len()
        )
    }
}

/// Renders missing catalog textures into a [`TextureStore`].
pub struct TextureBatch {
    splitter: XoroshiroSplitter,
    size: usize,
}

impl TextureBatch {
    /// Creates a batch whose per-material streams derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            splitter: XoroshiroSplitter::from_seed(seed),
            size: TEXTURE_SIZE,
        }
    }

    /// Renders one material at the batch texture size.
    ///
    /// The material's random stream is keyed by its name, so the result does
    /// not depend on its position in the catalog.
    #[must_use]
    pub fn render(&self, material: &MaterialDescriptor) -> ColorField {
        let mut random = self.splitter.with_hash_of(&material.name);
        compose(material, self.size, self.size, &mut random)
    }

    /// Generates every catalog texture the store does not have yet.
    ///
    /// A failed save is logged and recorded in the report; the batch carries
    /// on with the next material.
    pub fn run(&self, catalog: &Catalog, store: &mut impl TextureStore) -> BatchReport {
        let start = Instant::now();
        let mut report = BatchReport::default();

        for material in catalog {
            if store.exists(&material.name) {
                log::debug!("Skipping {}: texture exists", material.name);
                report.skipped += 1;
                continue;
            }

            let texture = self.render(material);
            match store.save(&material.name, &texture) {
                Ok(()) => {
                    log::info!("Generated {} ({})", material.name, material.pattern.kind());
                    report.generated += 1;
                }
                Err(err) => {
                    log::error!("Failed to save {}: {err}", material.name);
                    report.failed.push((material.name.clone(), err.to_string()));
                }
            }
        }

        log::info!("Texture batch finished in {:?}: {report}", start.elapsed());
        report
    }
}
