use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-frame metadata decoded from the filename or the frame index file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMeta {
    /// Animation time-step
    #[serde(rename = "frame")]
    pub frame_index: u32,
    /// Camera angle in degrees
    pub angle: u32,
}

/// Anchor pixel that must align across all frames of one animation.
///
/// Stored in original-frame coordinates by the locator, then re-expressed
/// relative to the crop origin once a frame has been cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotspot {
    pub x: u32,
    pub y: u32,
}

/// A frame tightened to its opaque content, ready for packing
#[derive(Debug, Clone)]
pub struct CroppedFrame {
    /// Original file path
    pub path: PathBuf,
    /// Decoded frame metadata
    pub meta: FrameMeta,
    /// Cropped pixel data
    pub image: RgbaImage,
    /// Hotspot relative to the crop origin, always inside the crop
    pub hotspot: Hotspot,
}

impl CroppedFrame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
