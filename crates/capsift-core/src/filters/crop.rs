use image::GrayImage;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::rect::BandRect;

/// Bounding box of everything darker than background minus the crop
/// tolerance, or `None` for an empty band.
pub fn text_bounds(image: &GrayImage, config: &PipelineConfig) -> Option<BandRect> {
    let (w, h) = image.dimensions();
    let content_max = 255u8.saturating_sub(config.crop_tolerance);

    let mut left = None;
    let mut right = 0;
    let mut top = None;
    let mut bottom = 0;

    for y in 0..h {
        for x in 0..w {
            if image.get_pixel(x, y)[0] >= content_max {
                continue;
            }
            if left.map_or(true, |l| x < l) {
                left = Some(x);
            }
            right = right.max(x);
            if top.is_none() {
                top = Some(y);
            }
            bottom = y;
        }
    }

    let (left, top) = (left?, top?);
    Some(BandRect::from_bounds(left, top, right, bottom))
}

/// Genuine text spans multiple glyph rows; a thin box is a noise line.
pub fn is_text_tall_enough(bounds: BandRect, config: &PipelineConfig) -> bool {
    let keep = bounds.h >= config.min_text_height;
    debug!(crop_h = bounds.h, crop_w = bounds.w, keep, "text crop check");
    keep
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn config(min_text_height: u32) -> PipelineConfig {
        PipelineConfig {
            min_text_height,
            ..PipelineConfig::default()
        }
    }

    fn band_with_block(y0: u32, rows: u32) -> GrayImage {
        let mut img = GrayImage::from_pixel(80, 50, Luma([255]));
        for y in y0..y0 + rows {
            for x in 20..60 {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        img
    }

    #[test]
    fn bounds_hug_content() {
        let img = band_with_block(10, 20);
        let bounds = text_bounds(&img, &config(14)).unwrap();
        assert_eq!(bounds, BandRect::from_bounds(20, 10, 59, 29));
    }

    #[test]
    fn empty_band_has_no_bounds() {
        let img = GrayImage::from_pixel(80, 50, Luma([255]));
        assert!(text_bounds(&img, &config(14)).is_none());
    }

    #[test]
    fn short_crop_rejects() {
        let img = band_with_block(10, 10);
        let bounds = text_bounds(&img, &config(14)).unwrap();
        assert_eq!(bounds.h, 10);
        assert!(!is_text_tall_enough(bounds, &config(14)));
    }

    #[test]
    fn tall_crop_keeps() {
        let img = band_with_block(10, 14);
        let bounds = text_bounds(&img, &config(14)).unwrap();
        assert!(is_text_tall_enough(bounds, &config(14)));
    }

    #[test]
    fn near_white_pixels_do_not_stretch_bounds() {
        let mut img = band_with_block(10, 20);
        img.put_pixel(0, 0, Luma([240])); // within crop tolerance of white
        let bounds = text_bounds(&img, &config(14)).unwrap();
        assert_eq!(bounds.x, 20);
        assert_eq!(bounds.y, 10);
    }
}
