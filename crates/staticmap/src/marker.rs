//! Marker symbol drawing.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};

/// Marker fill, the red point used on the report maps.
pub const MARKER_FILL: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Outline ring around the fill.
pub const MARKER_OUTLINE: Rgba<u8> = Rgba([139, 0, 0, 255]);

/// Draw a filled circular marker centered at (cx, cy).
///
/// Coordinates outside the canvas are fine; imageproc clips per pixel, so a
/// marker near an edge is drawn partially.
pub fn draw_marker(canvas: &mut RgbaImage, cx: i32, cy: i32, radius: i32) {
    draw_filled_circle_mut(canvas, (cx, cy), radius, MARKER_FILL);
    draw_hollow_circle_mut(canvas, (cx, cy), radius, MARKER_OUTLINE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_fills_center() {
        let mut canvas = RgbaImage::from_pixel(50, 50, Rgba([0, 0, 0, 255]));
        draw_marker(&mut canvas, 25, 25, 6);

        assert_eq!(*canvas.get_pixel(25, 25), MARKER_FILL);
        // Inside the radius
        assert_eq!(*canvas.get_pixel(28, 25), MARKER_FILL);
        // Corner untouched
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(49, 49), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_marker_clips_at_edge() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        draw_marker(&mut canvas, 0, 0, 5);
        assert_eq!(*canvas.get_pixel(0, 0), MARKER_FILL);
        assert_eq!(*canvas.get_pixel(19, 19), Rgba([0, 0, 0, 255]));
    }
}
