use image::imageops;
use image::GrayImage;

/// A rectangle in absolute pixel coordinates within a caption band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl BandRect {
    /// Build a rect from inclusive pixel bounds.
    pub fn from_bounds(left: u32, top: u32, right: u32, bottom: u32) -> BandRect {
        assert!(left <= right && top <= bottom, "inverted rect bounds");
        BandRect {
            x: left,
            y: top,
            w: right - left + 1,
            h: bottom - top + 1,
        }
    }

    /// Copy this region out of `image`.
    pub fn extract(&self, image: &GrayImage) -> GrayImage {
        assert!(
            self.x + self.w <= image.width() && self.y + self.h <= image.height(),
            "rect exceeds image bounds"
        );
        imageops::crop_imm(image, self.x, self.y, self.w, self.h).to_image()
    }
}
