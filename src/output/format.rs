use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::ImageFormat;

use crate::atlas::Atlas;
use crate::cli::CompressionLevel;
use crate::error::ZoetropeError;

/// Write the atlas canvas to `path` as PNG.
///
/// The image is encoded in memory first, so an encoder failure never
/// leaves a truncated file behind; the file itself is written in one shot.
pub fn save_atlas_image(
    atlas: &Atlas,
    path: &Path,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    let mut encoded = Vec::new();
    atlas
        .image
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .map_err(|e| ZoetropeError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

    if let Some(level) = compress {
        encoded = recompress_png(encoded, level, path)?;
    }

    fs::write(path, encoded).map_err(|e| ZoetropeError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Run an encoded PNG through oxipng at the requested effort.
fn recompress_png(data: Vec<u8>, level: CompressionLevel, path: &Path) -> Result<Vec<u8>> {
    let options = match level {
        CompressionLevel::Preset(n) => oxipng::Options::from_preset(n),
        CompressionLevel::Max => oxipng::Options::max_compression(),
    };

    let optimized =
        oxipng::optimize_from_memory(&data, &options).map_err(|e| ZoetropeError::PngCompress {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(optimized)
}
