use serde::{Deserialize, Serialize};

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Zoetrope configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoetropeConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Animation source directories or glob patterns
    pub input: Vec<String>,
    /// Output directory; omit to write next to each source directory
    pub output_dir: Option<String>,
    /// Alpha values strictly below this are forced to 0; 0 disables
    pub alpha_threshold: u8,
    /// Abort the batch on malformed frame metadata
    pub strict: bool,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for ZoetropeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: Vec::new(),
            output_dir: None,
            alpha_threshold: 0,
            strict: false,
            compress: None,
        }
    }
}
