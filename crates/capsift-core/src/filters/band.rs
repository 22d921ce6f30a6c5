use image::GrayImage;
use tracing::debug;

use crate::config::PipelineConfig;

/// Pixel tallies behind the band verdict, split out for logging.
#[derive(Debug, Clone, Copy)]
pub struct BandCounts {
    /// Non-background pixels across the top and bottom margins.
    pub margin_content: usize,
    /// Near-black pixels in the interior between the margins.
    pub interior_ink: usize,
}

pub fn band_counts(image: &GrayImage, config: &PipelineConfig) -> BandCounts {
    let (w, h) = image.dimensions();
    let e = config.margin_height;

    let mut margin_content = 0usize;
    let mut interior_ink = 0usize;

    for y in 0..h {
        let in_margin = y < e || y >= h.saturating_sub(e);
        for x in 0..w {
            let luma = image.get_pixel(x, y)[0];
            if in_margin {
                if luma < config.white_min {
                    margin_content += 1;
                }
            } else if luma <= config.black_max {
                interior_ink += 1;
            }
        }
    }

    BandCounts {
        margin_content,
        interior_ink,
    }
}

/// Band verdict: genuine captions sit inset from the band edges with clean
/// margins and carry substantial ink in the interior. Noise frames either
/// touch the margins or carry too little ink.
pub fn is_caption_band(image: &GrayImage, config: &PipelineConfig) -> bool {
    if image.height() <= config.margin_height * 2 {
        return false;
    }

    let counts = band_counts(image, config);
    let keep = counts.margin_content <= config.margin_tolerance
        && counts.interior_ink >= config.min_interior_ink;

    debug!(
        margin_content = counts.margin_content,
        interior_ink = counts.interior_ink,
        keep,
        "band classification"
    );

    keep
}
