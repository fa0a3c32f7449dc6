use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::warn;

use super::types::ZoetropeConfig;

/// A parsed config file plus the directory it was loaded from.
///
/// Every path inside the file is interpreted relative to that directory,
/// so a config can travel with the asset tree it describes.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: ZoetropeConfig,
    /// Anchor for all relative paths in the config
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: ZoetropeConfig = serde_json::from_str(&content)
            .with_context(|| format!("{} is not a valid config file", path.display()))?;

        let config_dir = match path.parent() {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        };

        Ok(Self { config, config_dir })
    }

    /// Expand the configured inputs into animation directories.
    ///
    /// Every entry is treated as a glob pattern; a literal path is just a
    /// pattern without metacharacters. Matches that are not directories are
    /// skipped with a warning, since only directories can hold an
    /// animation's frames. A pattern matching nothing at all is an error:
    /// it usually means a typo in the config.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();

        for pattern in &self.config.input {
            let anchored = self.config_dir.join(pattern);
            let matches = glob::glob(&anchored.to_string_lossy())
                .with_context(|| format!("bad input pattern '{}'", pattern))?;

            let mut matched_any = false;
            for entry in matches {
                let path = entry.with_context(|| format!("while expanding '{}'", pattern))?;
                matched_any = true;
                if path.is_dir() {
                    dirs.push(path);
                } else {
                    warn!("Ignoring {}: not an animation directory", path.display());
                }
            }

            if !matched_any {
                bail!(
                    "input '{}' matches nothing under {}",
                    pattern,
                    self.config_dir.display()
                );
            }
        }

        Ok(dirs)
    }

    /// Output directory, anchored to the config location. `None` keeps the
    /// default of writing next to each source directory.
    pub fn resolve_output_dir(&self) -> Option<PathBuf> {
        let dir = self.config.output_dir.as_deref()?;
        Some(self.config_dir.join(dir))
    }
}
