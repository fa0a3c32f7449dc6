use image::RgbaImage;

/// Force alpha values strictly below `threshold` to fully transparent.
///
/// RGB channels are left untouched. A threshold of 0 disables sanitization.
/// Idempotent: reapplying with the same or a lower threshold changes nothing.
pub fn sanitize_alpha(image: &mut RgbaImage, threshold: u8) {
    if threshold == 0 {
        return;
    }

    for pixel in image.pixels_mut() {
        if pixel[3] < threshold {
            pixel[3] = 0;
        }
    }
}
