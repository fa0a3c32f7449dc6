use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::atlas::Placement;
use crate::error::ZoetropeError;

/// Manifest format version understood by the engine loader
pub const FORMAT_VERSION: u32 = 2;

/// Render the manifest text for one animation.
///
/// Records are emitted angle-major: packing order is frame-major for column
/// reuse, but playback iterates angles as the outer key. One `angle` header
/// per distinct angle, ascending, each followed by its frames in ascending
/// frame index order. The two literal `0` fields of every `frame` line are
/// the reserved image and layer indices; this writer emits a single
/// image/single layer.
pub fn render_manifest(atlas_filename: &str, placements: &[Placement]) -> String {
    let mut records: Vec<&Placement> = placements.iter().collect();
    records.sort_by_key(|p| (p.angle, p.frame_index));

    let mut out = String::new();
    out.push_str("# This file was automatically generated\n");
    out.push_str(&format!("version {}\n\n", FORMAT_VERSION));
    out.push_str("# Image file reference\n");
    out.push_str(&format!("imagefile 0 {}\n\n", atlas_filename));
    out.push_str("# Layer definitions\n");
    out.push_str("layer 0 mode=off position=default\n\n");
    out.push_str("# Angle definitions\n");

    let mut current_angle = None;
    for p in records {
        if current_angle != Some(p.angle) {
            out.push_str(&format!("angle {}\n", p.angle));
            current_angle = Some(p.angle);
        }
        out.push_str(&format!(
            "frame 0 0 {} {} {} {} {} {}\n",
            p.x, p.y, p.width, p.height, p.hotspot_x, p.hotspot_y
        ));
    }

    out
}

/// Write the manifest next to the atlas image it references
pub fn write_manifest(placements: &[Placement], atlas_filename: &str, path: &Path) -> Result<()> {
    let content = render_manifest(atlas_filename, placements);

    fs::write(path, content).map_err(|e| ZoetropeError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
