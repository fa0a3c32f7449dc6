use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use zoetrope::atlas::pack_frames;
use zoetrope::cli::{CliArgs, CompressionLevel};
use zoetrope::config::{CompressConfig, LoadedConfig};
use zoetrope::error::ZoetropeError;
use zoetrope::frame::{LoadOptions, load_frames};
use zoetrope::output::{save_atlas_image, write_manifest};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(&cli)?;

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Zoetrope atlas packer v{}", env!("CARGO_PKG_VERSION"));

    if merged.input.is_empty() {
        anyhow::bail!("no animation source directories given");
    }

    // Create output directory if it doesn't exist
    if let Some(output) = &merged.output
        && !output.exists()
    {
        fs::create_dir_all(output)?;
    }

    // Each animation is packed independently; a failure skips to the next
    // one, except a strict-mode decode failure which aborts the batch.
    let mut failures = 0usize;
    for dir in &merged.input {
        if let Err(e) = process_animation(dir, &merged) {
            if merged.strict && is_decode_error(&e) {
                return Err(e);
            }
            error!("Skipping animation {}: {:#}", dir.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} animations failed", failures, merged.input.len());
    }

    info!("Done!");

    Ok(())
}

/// Pack one animation directory into an atlas image plus manifest.
fn process_animation(dir: &Path, merged: &MergedConfig) -> Result<()> {
    let name = animation_name(dir)?;

    let frames = load_frames(
        dir,
        LoadOptions {
            alpha_threshold: merged.alpha_threshold,
            strict: merged.strict,
        },
    )?;
    info!("Loaded {} frames for animation '{}'", frames.len(), name);

    let atlas = pack_frames(&frames);

    // Outputs default to sitting next to the source directory
    let output_dir = merged
        .output
        .clone()
        .unwrap_or_else(|| dir.parent().unwrap_or(Path::new(".")).to_path_buf());

    let atlas_filename = format!("{}_animation.png", name);
    let atlas_path = output_dir.join(&atlas_filename);
    save_atlas_image(&atlas, &atlas_path, merged.compress)?;
    info!("Saved {}", atlas_path.display());

    let manifest_path = atlas_path.with_extension("sprite");
    write_manifest(&atlas.placements, &atlas_filename, &manifest_path)?;
    info!("Saved {}", manifest_path.display());

    Ok(())
}

fn animation_name(dir: &Path) -> Result<String> {
    dir.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
        .ok_or_else(|| anyhow::anyhow!("cannot derive animation name from {}", dir.display()))
}

/// Malformed frame metadata only surfaces as an error in strict mode;
/// everywhere else it is skipped with a warning inside the loader.
fn is_decode_error(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<ZoetropeError>(),
        Some(ZoetropeError::MalformedFilename { .. })
    )
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: Vec<PathBuf>,
    output: Option<PathBuf>,
    alpha_threshold: u8,
    strict: bool,
    compress: Option<CompressionLevel>,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CliArgs) -> Result<MergedConfig> {
    // Load config if specified
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine input directories: CLI args override config
    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.resolve_inputs()
            .context("failed to resolve input directories from config")?
    } else {
        // This shouldn't happen due to clap's required_unless_present
        Vec::new()
    };

    // Output directory: CLI > config > next to each source directory
    let output = args
        .output
        .clone()
        .or_else(|| loaded_config.as_ref().and_then(|lc| lc.resolve_output_dir()));

    let alpha_threshold = args.alpha_threshold.unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.alpha_threshold)
            .unwrap_or(0)
    });

    // Boolean flag: CLI presence sets it to true, otherwise use config
    let strict = if args.strict {
        true
    } else if let Some(ref lc) = loaded_config {
        lc.config.strict
    } else {
        false
    };

    // Compress: CLI option overrides config
    let compress = if args.compress.is_some() {
        args.compress
    } else if let Some(ref lc) = loaded_config {
        lc.config.compress.as_ref().map(|c| match c {
            CompressConfig::Level(n) => CompressionLevel::Preset(*n),
            CompressConfig::Max(_) => CompressionLevel::Max,
        })
    } else {
        None
    };

    Ok(MergedConfig {
        input,
        output,
        alpha_threshold,
        strict,
        compress,
        verbose: args.verbose,
    })
}
