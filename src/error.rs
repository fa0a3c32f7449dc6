use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoetropeError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Cannot decode frame metadata from '{path}'")]
    MalformedFilename { path: PathBuf },

    #[error("Frame '{path}' has no opaque pixels")]
    EmptyFrame { path: PathBuf },

    #[error("No usable frames found in '{0}'")]
    NoFrames(PathBuf),

    #[error("Failed to read frame index '{path}': {message}")]
    FrameIndex { path: PathBuf, message: String },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),
}
