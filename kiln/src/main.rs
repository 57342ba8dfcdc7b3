//! # Kiln
//!
//! Offline generator for the engine's block textures and 3D cloud noise.
//!
//! Usage:
//!   kiln [--config PATH] [--seed N] textures
//!   kiln [--config PATH] clouds [--force]
//!   kiln [--config PATH] [--seed N] all [--force]
//!   kiln inspect FILE

mod config;
mod logger;
mod png_store;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kiln_core::material::Catalog;
use kiln_core::texture_batch::TextureBatch;
use kiln_core::volume::{CLOUD_VOLUME_SIZE, VoxelVolume, generate_cloud_volume};

use crate::config::{DEFAULT_CONFIG_PATH, KilnConfig};
use crate::png_store::PngTextureStore;

/// Procedural block-texture and cloud-volume generator
#[derive(Parser)]
#[command(name = "kiln", version, long_about = None)]
struct Cli {
    /// Config file; created with defaults if missing
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Generation seed, overriding the config
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate missing block textures
    Textures,

    /// Generate the 3D cloud noise volume
    Clouds {
        /// Regenerate even if the volume file exists
        #[arg(long)]
        force: bool,
    },

    /// Generate textures and the cloud volume
    All {
        /// Regenerate the cloud volume even if it exists
        #[arg(long)]
        force: bool,
    },

    /// Print size and intensity statistics of a CN3D file
    Inspect {
        /// Volume file path
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Textures => {
            let config = load_config(&cli.config)?;
            let catalog = load_catalog(&config)?;
            let store = open_texture_store(&config)?;
            textures(&catalog, store, config.resolve_seed(cli.seed))
        }
        Commands::Clouds { force } => {
            let config = load_config(&cli.config)?;
            ensure_parent_dir(&config.cloud_volume_path)?;
            clouds(&config.cloud_volume_path, force, CLOUD_VOLUME_SIZE)
        }
        Commands::All { force } => {
            let config = load_config(&cli.config)?;
            let catalog = load_catalog(&config)?;
            let store = open_texture_store(&config)?;
            ensure_parent_dir(&config.cloud_volume_path)?;

            all(
                &catalog,
                store,
                config.resolve_seed(cli.seed),
                &config.cloud_volume_path,
                force,
                CLOUD_VOLUME_SIZE,
            )
        }
        Commands::Inspect { file } => inspect(&file),
    }
}

fn load_config(path: &Path) -> Result<KilnConfig> {
    KilnConfig::load_or_create(path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn load_catalog(config: &KilnConfig) -> Result<Catalog> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            Catalog::from_json5(&source)
                .with_context(|| format!("invalid catalog {}", path.display()))?
        }
        None => Catalog::builtin().context("built-in catalog is invalid")?,
    };
    log::info!("Loaded {} materials", catalog.len());
    Ok(catalog)
}

fn open_texture_store(config: &KilnConfig) -> Result<PngTextureStore> {
    PngTextureStore::new(&config.texture_dir).with_context(|| {
        format!(
            "cannot create texture directory {}",
            config.texture_dir.display()
        )
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create output directory {}", parent.display()))?;
    }
    Ok(())
}

fn textures(catalog: &Catalog, mut store: PngTextureStore, seed: u64) -> Result<()> {
    let _span = tracing::info_span!("textures").entered();
    log::info!(
        "Generating textures into {} with seed {seed}",
        store.dir().display()
    );

    let report = TextureBatch::new(seed).run(catalog, &mut store);
    if !report.is_success() {
        let names: Vec<&str> = report.failed.iter().map(|(name, _)| name.as_str()).collect();
        bail!("failed to save {} texture(s): {}", names.len(), names.join(", "));
    }
    Ok(())
}

/// Textures then the volume. The volume is generated even when some
/// textures failed to save; those failures are reported afterwards.
fn all(
    catalog: &Catalog,
    store: PngTextureStore,
    seed: u64,
    volume_path: &Path,
    force: bool,
    volume_size: usize,
) -> Result<()> {
    let texture_result = textures(catalog, store, seed);
    clouds(volume_path, force, volume_size)?;
    texture_result
}

fn clouds(path: &Path, force: bool, size: usize) -> Result<()> {
    let _span = tracing::info_span!("clouds").entered();
    if path.exists() && !force {
        log::info!(
            "Cloud volume {} exists, skipping (use --force to regenerate)",
            path.display()
        );
        return Ok(());
    }

    let volume = generate_cloud_volume(size);
    volume
        .save(path)
        .with_context(|| format!("failed to write cloud volume {}", path.display()))
}

fn inspect(path: &Path) -> Result<()> {
    let volume = VoxelVolume::load(path)
        .with_context(|| format!("failed to read volume {}", path.display()))?;
    let stats = volume.stats();
    log::info!(
        "{}: {}³ voxels, min {}, max {}, mean {:.2}",
        path.display(),
        volume.size(),
        stats.min,
        stats.max,
        stats.mean
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_writes_volume_despite_texture_failure() {
        let dir = std::env::temp_dir().join(format!("kiln-all-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let store = PngTextureStore::new(dir.join("textures")).expect("creates dir");
        fs::create_dir(dir.join("textures").join("grass.png.tmp")).expect("creates blocker");

        let catalog = Catalog::from_json5(
            r#"{ materials: [ { name: "grass", base_color: [60, 120, 40], variation: 30, noise_scale: 0.3, pattern: "organic" } ] }"#,
        )
        .expect("catalog parses");
        let volume_path = dir.join("cloud_noise_3d.bin");

        let result = all(&catalog, store, 1, &volume_path, false, 4);
        assert!(result.is_err());
        assert_eq!(VoxelVolume::load(&volume_path).expect("volume written").size(), 4);

        fs::remove_dir_all(&dir).expect("cleans up");
    }
}
