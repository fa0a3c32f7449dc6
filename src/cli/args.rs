use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "zoetrope")]
#[command(version, about = "Per-angle animation frame atlas packer", long_about = None)]
pub struct CliArgs {
    /// Animation source directories (one atlas + manifest per directory)
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory [default: next to each source directory]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Zero out alpha values strictly below this threshold [default: 0 = off]
    #[arg(long, value_name = "LEVEL")]
    pub alpha_threshold: Option<u8>,

    /// Abort the whole batch on malformed frame metadata instead of skipping
    #[arg(long)]
    pub strict: bool,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG recompression effort: an oxipng preset or full effort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Preset 0 (fastest) through [`CompressionLevel::MAX_PRESET`]
    Preset(u8),
    /// Maximum compression, slowest
    Max,
}

impl CompressionLevel {
    /// Highest preset oxipng defines before `max` takes over
    pub const MAX_PRESET: u8 = 6;
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "max" => Ok(Self::Max),
            level => match level.parse::<u8>() {
                Ok(n) if n <= Self::MAX_PRESET => Ok(Self::Preset(n)),
                _ => Err(format!(
                    "expected a level between 0 and {} or 'max', not '{}'",
                    Self::MAX_PRESET,
                    s
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_level_parsing() {
        assert_eq!("0".parse(), Ok(CompressionLevel::Preset(0)));
        assert_eq!("6".parse(), Ok(CompressionLevel::Preset(6)));
        assert_eq!("max".parse(), Ok(CompressionLevel::Max));
        assert_eq!("MAX".parse(), Ok(CompressionLevel::Max));

        assert!("7".parse::<CompressionLevel>().is_err());
        assert!("-1".parse::<CompressionLevel>().is_err());
        assert!("fast".parse::<CompressionLevel>().is_err());
    }
}
