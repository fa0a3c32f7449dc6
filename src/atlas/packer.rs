use image::{RgbaImage, imageops};
use log::info;

use super::{Atlas, Placement};
use crate::frame::CroppedFrame;

/// Vertical strip of the atlas being filled; holds all angle variants of
/// one animation frame index.
struct Column {
    origin_x: u32,
    width: u32,
    cursor_y: u32,
}

impl Column {
    /// Finish this column and open the next one to its right.
    fn close(self) -> Column {
        Column {
            origin_x: self.origin_x + self.width,
            width: 0,
            cursor_y: 0,
        }
    }
}

/// Pack cropped frames into a single atlas by greedy column stacking.
///
/// Frames must arrive in decode order: frame-major, angle fastest-varying.
/// An angle wrapping back to 0 closes the open column, so one full
/// revolution of angles occupies one column. Greedy, not a bin packer;
/// the layout is kept stable for output compatibility.
pub fn pack_frames(frames: &[CroppedFrame]) -> Atlas {
    let mut placements = Vec::with_capacity(frames.len());
    let mut column = Column {
        origin_x: 0,
        width: 0,
        cursor_y: 0,
    };
    let mut atlas_height = 0u32;

    for (i, frame) in frames.iter().enumerate() {
        if i > 0 && frame.meta.angle == 0 {
            column = column.close();
        }

        column.width = column.width.max(frame.width());

        placements.push(Placement {
            angle: frame.meta.angle,
            frame_index: frame.meta.frame_index,
            x: column.origin_x,
            y: column.cursor_y,
            width: frame.width(),
            height: frame.height(),
            hotspot_x: column.origin_x + frame.hotspot.x,
            hotspot_y: column.cursor_y + frame.hotspot.y,
        });

        column.cursor_y += frame.height();
        atlas_height = atlas_height.max(column.cursor_y);
    }

    let atlas_width = column.origin_x + column.width;

    let mut image = RgbaImage::new(atlas_width, atlas_height);
    for (frame, placement) in frames.iter().zip(&placements) {
        imageops::overlay(
            &mut image,
            &frame.image,
            i64::from(placement.x),
            i64::from(placement.y),
        );
    }

    info!(
        "Packed {} frames into {}x{} atlas",
        frames.len(),
        atlas_width,
        atlas_height
    );

    Atlas {
        width: atlas_width,
        height: atlas_height,
        image,
        placements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameMeta, Hotspot};
    use image::Rgba;
    use std::path::PathBuf;

    fn opaque_frame(frame_index: u32, angle: u32, width: u32, height: u32) -> CroppedFrame {
        let mut image = RgbaImage::new(width, height);
        for pixel in image.pixels_mut() {
            *pixel = Rgba([frame_index as u8, angle as u8, 0, 255]);
        }
        CroppedFrame {
            path: PathBuf::from(format!("{:03}_test_{:03}.png", frame_index, angle)),
            meta: FrameMeta { frame_index, angle },
            image,
            hotspot: Hotspot {
                x: (width - 1) / 2,
                y: (height - 1) / 2,
            },
        }
    }

    fn overlaps(a: &Placement, b: &Placement) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[test]
    fn test_single_frame_atlas() {
        let frames = vec![opaque_frame(0, 0, 7, 9)];

        let atlas = pack_frames(&frames);

        assert_eq!(atlas.width, 7);
        assert_eq!(atlas.height, 9);
        assert_eq!(atlas.placements.len(), 1);
        assert_eq!(atlas.placements[0].x, 0);
        assert_eq!(atlas.placements[0].y, 0);
    }

    #[test]
    fn test_two_frames_four_angles() {
        // 2 frame indices x 4 angles of fully opaque 10x10 squares must
        // yield two 10-wide columns of four stacked frames each.
        let mut frames = Vec::new();
        for frame_index in 0..2 {
            for angle in [0, 90, 180, 270] {
                frames.push(opaque_frame(frame_index, angle, 10, 10));
            }
        }

        let atlas = pack_frames(&frames);

        assert_eq!(atlas.width, 20);
        assert_eq!(atlas.height, 40);
        assert_eq!(atlas.placements.len(), 8);

        for (i, placement) in atlas.placements.iter().enumerate() {
            let expected_x = (i / 4) as u32 * 10;
            let expected_y = (i % 4) as u32 * 10;
            assert_eq!(placement.x, expected_x);
            assert_eq!(placement.y, expected_y);
        }
    }

    #[test]
    fn test_column_takes_widest_frame() {
        let frames = vec![
            opaque_frame(0, 0, 4, 5),
            opaque_frame(0, 180, 12, 5),
            opaque_frame(1, 0, 6, 5),
        ];

        let atlas = pack_frames(&frames);

        // First column is as wide as its widest frame
        assert_eq!(atlas.placements[2].x, 12);
        assert_eq!(atlas.width, 18);
        assert_eq!(atlas.height, 10);
    }

    #[test]
    fn test_placements_in_bounds_and_disjoint() {
        let mut frames = Vec::new();
        for frame_index in 0..3 {
            for (i, angle) in [0u32, 45, 90, 135, 180].iter().enumerate() {
                let w = 4 + (i as u32 * 3) % 7;
                let h = 3 + (frame_index + i as u32) % 5;
                frames.push(opaque_frame(frame_index, *angle, w, h));
            }
        }

        let atlas = pack_frames(&frames);

        for p in &atlas.placements {
            assert!(p.x + p.width <= atlas.width);
            assert!(p.y + p.height <= atlas.height);
        }
        for (i, a) in atlas.placements.iter().enumerate() {
            for b in &atlas.placements[i + 1..] {
                assert!(!overlaps(a, b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_hotspot_in_atlas_coordinates() {
        let frames = vec![opaque_frame(0, 0, 10, 10), opaque_frame(1, 0, 10, 10)];

        let atlas = pack_frames(&frames);

        // Second frame opens a new column at x=10; its 10x10 hotspot (4,4)
        // lands at atlas (14, 4).
        assert_eq!(atlas.placements[1].hotspot_x, 14);
        assert_eq!(atlas.placements[1].hotspot_y, 4);
    }

    #[test]
    fn test_blits_frame_pixels() {
        let frames = vec![opaque_frame(0, 0, 2, 2), opaque_frame(0, 90, 2, 2)];

        let atlas = pack_frames(&frames);

        // Frame (0,0) fills rows 0-1, frame (0,90) rows 2-3
        assert_eq!(atlas.image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(atlas.image.get_pixel(0, 2), &Rgba([0, 90, 0, 255]));
    }
}
