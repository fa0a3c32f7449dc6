mod cropper;
mod frame;
mod hotspot;
mod loader;
mod meta;
mod sanitizer;

pub use cropper::crop_frame;
pub use frame::{CroppedFrame, FrameMeta, Hotspot};
pub use hotspot::locate_hotspot;
pub use loader::{LoadOptions, load_frames};
pub use meta::{FrameIndex, INDEX_FILENAME, decode_filename};
pub use sanitizer::sanitize_alpha;
