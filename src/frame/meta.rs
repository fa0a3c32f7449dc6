use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use serde::Deserialize;

use super::FrameMeta;
use crate::error::ZoetropeError;

/// Fixed-width fields of the legacy renderer filename scheme
/// `<frame (3 digits)>_<track>_<angle (3 digits)>.png`.
const FRAME_FIELD: Range<usize> = 0..3;
const ANGLE_FIELD: Range<usize> = 8..11;

/// Structured metadata side-channel, checked before falling back to the
/// legacy filename grammar
pub const INDEX_FILENAME: &str = "frames.json";

/// Decode `(frame_index, angle)` from a legacy renderer filename.
///
/// Only the two fixed-width digit fields are read; everything in between is
/// free-form and ignored.
pub fn decode_filename(path: &Path) -> Result<FrameMeta, ZoetropeError> {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    let field = |range: Range<usize>| name.get(range).and_then(|s| s.parse::<u32>().ok());

    match (field(FRAME_FIELD), field(ANGLE_FIELD)) {
        (Some(frame_index), Some(angle)) => Ok(FrameMeta { frame_index, angle }),
        _ => Err(ZoetropeError::MalformedFilename {
            path: path.to_path_buf(),
        }),
    }
}

/// Frame metadata index loaded from a `frames.json` file.
///
/// When present in an animation directory, the index is authoritative for
/// every frame image in that directory.
#[derive(Debug, Deserialize)]
pub struct FrameIndex {
    #[serde(default)]
    pub version: u32,
    frames: HashMap<String, FrameMeta>,
}

impl FrameIndex {
    /// Load the index for an animation directory, if one exists.
    pub fn load(dir: &Path) -> Result<Option<Self>, ZoetropeError> {
        let path = dir.join(INDEX_FILENAME);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ZoetropeError::FrameIndex {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let index = serde_json::from_str(&content).map_err(|e| ZoetropeError::FrameIndex {
            path,
            message: e.to_string(),
        })?;

        Ok(Some(index))
    }

    /// Look up a frame image by filename. A listed image missing from the
    /// index follows the same skip/strict policy as an unparseable filename.
    pub fn lookup(&self, path: &Path) -> Result<FrameMeta, ZoetropeError> {
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        self.frames
            .get(name)
            .copied()
            .ok_or_else(|| ZoetropeError::MalformedFilename {
                path: path.to_path_buf(),
            })
    }
}

/// Decode metadata for one frame image, preferring the directory's index
/// file over the legacy filename grammar.
pub fn decode_frame_meta(
    path: &Path,
    index: Option<&FrameIndex>,
) -> Result<FrameMeta, ZoetropeError> {
    match index {
        Some(index) => index.lookup(path),
        None => decode_filename(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_decode_filename() {
        let meta = decode_filename(Path::new("001_run_000.png")).unwrap();
        assert_eq!(meta.frame_index, 1);
        assert_eq!(meta.angle, 0);

        let meta = decode_filename(Path::new("007_run_180.png")).unwrap();
        assert_eq!(meta.frame_index, 7);
        assert_eq!(meta.angle, 180);
    }

    #[test]
    fn test_decode_filename_ignores_directory() {
        let meta = decode_filename(Path::new("units/archer/012_atk_270.png")).unwrap();
        assert_eq!(meta.frame_index, 12);
        assert_eq!(meta.angle, 270);
    }

    #[test]
    fn test_decode_filename_malformed() {
        // Non-digit frame field
        assert!(decode_filename(Path::new("abc_run_000.png")).is_err());
        // Non-digit angle field
        assert!(decode_filename(Path::new("001_run_xyz.png")).is_err());
        // Too short to hold the angle field
        assert!(decode_filename(Path::new("001.png")).is_err());
        assert!(decode_filename(Path::new("")).is_err());
    }

    #[test]
    fn test_index_lookup() {
        let json = r#"{
            "version": 1,
            "frames": {
                "dash.png": { "frame": 3, "angle": 90 }
            }
        }"#;
        let index: FrameIndex = serde_json::from_str(json).unwrap();

        let meta = index.lookup(Path::new("dash.png")).unwrap();
        assert_eq!(meta.frame_index, 3);
        assert_eq!(meta.angle, 90);

        let missing = index.lookup(Path::new("other.png"));
        assert!(matches!(
            missing,
            Err(ZoetropeError::MalformedFilename { .. })
        ));
    }

    #[test]
    fn test_index_overrides_filename_grammar() {
        let json = r#"{ "frames": { "001_run_000.png": { "frame": 42, "angle": 315 } } }"#;
        let index: FrameIndex = serde_json::from_str(json).unwrap();
        let path = PathBuf::from("001_run_000.png");

        let meta = decode_frame_meta(&path, Some(&index)).unwrap();
        assert_eq!(meta.frame_index, 42);
        assert_eq!(meta.angle, 315);

        let meta = decode_frame_meta(&path, None).unwrap();
        assert_eq!(meta.frame_index, 1);
        assert_eq!(meta.angle, 0);
    }
}
