mod format;
mod manifest;

pub use format::save_atlas_image;
pub use manifest::{FORMAT_VERSION, render_manifest, write_manifest};
