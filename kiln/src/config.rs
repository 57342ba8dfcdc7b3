use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../../package-content/kiln_config.json5");

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "kiln_config.json5";

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or the default could not be written.
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON5 or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Generator settings read from `kiln_config.json5`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KilnConfig {
    /// Directory receiving `<material>.png` textures.
    pub texture_dir: PathBuf,
    /// Output path of the cloud volume.
    pub cloud_volume_path: PathBuf,
    /// Custom material catalog; the built-in one is used when absent.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Fixed generation seed; a fresh one is drawn per run when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl KilnConfig {
    /// Loads the config at `path`, writing the embedded default there first
    /// if the file does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let config_str = fs::read_to_string(path)?;
            Self::from_json5(&config_str)?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, DEFAULT_CONFIG)?;
            log::info!("Wrote default config to {}", path.display());
            Self::embedded()?
        };
        config.validate()?;
        Ok(config)
    }

    /// The config shipped with the generator.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json5(DEFAULT_CONFIG)
    }

    /// Parses a config document without validating it.
    pub fn from_json5(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json5::from_str(source)?)
    }

    /// Rejects empty output and catalog paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.texture_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("texture_dir must not be empty"));
        }
        if self.cloud_volume_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("cloud_volume_path must not be empty"));
        }
        if self
            .catalog_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid("catalog_path must not be empty when set"));
        }
        Ok(())
    }

    /// The seed for this run: `cli` if given, then the configured seed, then
    /// a random one.
    #[must_use]
    pub fn resolve_seed(&self, cli: Option<u64>) -> u64 {
        cli.or(self.seed).unwrap_or_else(|| {
            let seed = rand::random();
            log::info!("No seed configured, using {seed}");
            seed
        })
    }
}
