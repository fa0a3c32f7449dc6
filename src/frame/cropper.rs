use image::{RgbaImage, imageops};

use super::Hotspot;

/// Inclusive pixel rectangle in original-frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

/// Smallest rectangle enclosing all pixels with nonzero alpha, or `None`
/// for a fully transparent image.
fn opaque_bounds(image: &RgbaImage) -> Option<Bounds> {
    let (width, height) = image.dimensions();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for y in 0..height {
        for x in 0..width {
            if image.get_pixel(x, y)[3] > 0 {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }

    if min_x > max_x || min_y > max_y {
        return None;
    }

    Some(Bounds {
        left: min_x,
        top: min_y,
        right: max_x,
        bottom: max_y,
    })
}

/// Rectangle extended (never shrunk) so that `hotspot` falls inside it.
fn include_hotspot(bounds: Bounds, hotspot: Hotspot) -> Bounds {
    Bounds {
        left: bounds.left.min(hotspot.x),
        top: bounds.top.min(hotspot.y),
        right: bounds.right.max(hotspot.x),
        bottom: bounds.bottom.max(hotspot.y),
    }
}

/// Crop a frame to its opaque content, keeping the hotspot inside the crop.
///
/// `hotspot` is in original-frame coordinates; the returned hotspot is the
/// same point relative to the crop origin. Hotspot alignment surviving
/// independent per-frame cropping is the invariant the whole atlas depends
/// on. Returns `None` when the frame has zero opaque pixels.
pub fn crop_frame(image: &RgbaImage, hotspot: Hotspot) -> Option<(RgbaImage, Hotspot)> {
    let bounds = include_hotspot(opaque_bounds(image)?, hotspot);

    let width = bounds.right - bounds.left + 1;
    let height = bounds.bottom - bounds.top + 1;
    let cropped = imageops::crop_imm(image, bounds.left, bounds.top, width, height).to_image();

    let offset = Hotspot {
        x: hotspot.x - bounds.left,
        y: hotspot.y - bounds.top,
    };

    Some((cropped, offset))
}
