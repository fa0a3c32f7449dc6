use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageReader;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::meta::{FrameIndex, decode_frame_meta};
use super::{CroppedFrame, FrameMeta, crop_frame, locate_hotspot, sanitize_alpha};
use crate::error::ZoetropeError;

const FRAME_EXTENSION: &str = "png";

/// Options controlling frame ingestion
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Alpha values strictly below this are forced to 0; 0 disables
    pub alpha_threshold: u8,
    /// Abort on malformed frame metadata instead of skipping the frame
    pub strict: bool,
}

/// Load, sanitize and crop every frame of one animation directory.
///
/// Frames are returned in filename order, which the zero-padded naming
/// scheme makes frame-major with the angle fastest-varying, the order the
/// column packer expects.
pub fn load_frames(dir: &Path, options: LoadOptions) -> Result<Vec<CroppedFrame>> {
    if !dir.is_dir() {
        return Err(ZoetropeError::InputNotFound(dir.to_path_buf()).into());
    }

    let index = FrameIndex::load(dir)?;
    if index.is_some() {
        debug!("Using frame index for {}", dir.display());
    }

    let entries = decode_entries(collect_frame_paths(dir)?, index.as_ref(), options.strict)?;

    info!("Loading {} frames from {}", entries.len(), dir.display());

    let frames: Result<Vec<_>> = entries
        .par_iter()
        .map(|(path, meta)| load_single_frame(path, *meta, options.alpha_threshold))
        .collect();
    let frames: Vec<CroppedFrame> = frames?.into_iter().flatten().collect();

    if frames.is_empty() {
        return Err(ZoetropeError::NoFrames(dir.to_path_buf()).into());
    }

    Ok(frames)
}

fn collect_frame_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_frame_image(&path) {
            paths.push(path);
        }
    }

    // Directory iteration order is platform-dependent; sorting restores the
    // frame-major order encoded in the zero-padded filenames.
    paths.sort();

    Ok(paths)
}

fn is_frame_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(FRAME_EXTENSION))
        .unwrap_or(false)
}

/// Decode metadata for each collected frame path. Undecodable frames are
/// skipped with a warning, or abort the run in strict mode.
fn decode_entries(
    paths: Vec<PathBuf>,
    index: Option<&FrameIndex>,
    strict: bool,
) -> Result<Vec<(PathBuf, FrameMeta)>> {
    let mut entries = Vec::with_capacity(paths.len());

    for path in paths {
        match decode_frame_meta(&path, index) {
            Ok(meta) => entries.push((path, meta)),
            Err(e) if strict => return Err(e.into()),
            Err(e) => warn!("Skipping frame: {e}"),
        }
    }

    Ok(entries)
}

fn load_single_frame(
    path: &Path,
    meta: FrameMeta,
    alpha_threshold: u8,
) -> Result<Option<CroppedFrame>> {
    let mut img = ImageReader::open(path)
        .map_err(|e| ZoetropeError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| ZoetropeError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    sanitize_alpha(&mut img, alpha_threshold);

    let (width, height) = img.dimensions();
    let cropped = if width == 0 || height == 0 {
        None
    } else {
        crop_frame(&img, locate_hotspot(width, height))
    };

    match cropped {
        Some((image, hotspot)) => Ok(Some(CroppedFrame {
            path: path.to_path_buf(),
            meta,
            image,
            hotspot,
        })),
        None => {
            // Degenerate input from the upstream renderer; leave a gap in
            // the animation rather than failing the whole directory.
            warn!(
                "{}",
                ZoetropeError::EmptyFrame {
                    path: path.to_path_buf(),
                }
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_frame_image() {
        assert!(is_frame_image(Path::new("001_run_000.png")));
        assert!(is_frame_image(Path::new("001_run_000.PNG")));
        assert!(!is_frame_image(Path::new("001_run_000.jpg")));
        assert!(!is_frame_image(Path::new("frames.json")));
        assert!(!is_frame_image(Path::new("notes")));
    }
}
