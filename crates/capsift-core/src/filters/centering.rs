use image::GrayImage;
use tracing::debug;

use crate::config::PipelineConfig;

/// Inked horizontal extent of a band: first and last columns containing
/// any near-black pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkSpan {
    pub left: u32,
    pub right: u32,
}

/// Scan columns for the inked extent, or `None` when the band carries no
/// ink at all (the caller treats that as rejection).
pub fn ink_span(image: &GrayImage, config: &PipelineConfig) -> Option<InkSpan> {
    let (w, h) = image.dimensions();

    let column_has_ink =
        |x: u32| (0..h).any(|y| image.get_pixel(x, y)[0] <= config.black_max);

    let left = (0..w).find(|&x| column_has_ink(x))?;
    let right = (0..w).rev().find(|&x| column_has_ink(x))?;

    Some(InkSpan { left, right })
}

/// Symmetry score of the band content: `|W - left - right|`. Zero means
/// the left and right margins match exactly.
pub fn off_center_factor(width: u32, span: InkSpan) -> u32 {
    (width as i64 - span.left as i64 - span.right as i64).unsigned_abs() as u32
}

/// A fully-visible caption is horizontally centered; a cut-off or
/// transitioning caption is not. Equal-to-tolerance keeps.
pub fn is_centered(image: &GrayImage, span: InkSpan, config: &PipelineConfig) -> bool {
    let factor = off_center_factor(image.width(), span);
    let keep = factor <= config.centering_tolerance;
    debug!(left = span.left, right = span.right, factor, keep, "centering check");
    keep
}
