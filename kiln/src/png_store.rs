use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use kiln_core::color::ColorField;
use kiln_core::texture_batch::{TextureStore, TextureStoreError};

/// A [`TextureStore`] writing `<dir>/<name>.png` files.
pub struct PngTextureStore {
    dir: PathBuf,
}

impl PngTextureStore {
    /// Creates a store rooted at `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, TextureStoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Output path of the texture named `name`.
    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }

    /// The output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TextureStore for PngTextureStore {
    fn exists(&self, name: &str) -> bool {
        self.path_of(name).exists()
    }

    fn save(&mut self, name: &str, texture: &ColorField) -> Result<(), TextureStoreError> {
        let (Ok(width), Ok(height)) = (
            u32::try_from(texture.width()),
            u32::try_from(texture.height()),
        ) else {
            return Err(TextureStoreError::Encode(format!(
                "{}x{} texture is too large",
                texture.width(),
                texture.height()
            )));
        };
        let image = RgbImage::from_raw(width, height, texture.to_raw_rgb()).ok_or_else(|| {
            TextureStoreError::Encode("pixel buffer does not match dimensions".to_owned())
        })?;

        let mut encoded = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .map_err(|err| match err {
                image::ImageError::IoError(io) => TextureStoreError::Io(io),
                other => TextureStoreError::Encode(other.to_string()),
            })?;

        // Only a complete file may appear under the final name
        let path = self.path_of(name);
        let partial = path.with_extension("png.tmp");
        if let Err(err) = fs::write(&partial, &encoded).and_then(|()| fs::rename(&partial, &path)) {
            let _ = fs::remove_file(&partial);
            return Err(err.into());
        }
        Ok(())
    }
}
