use image::GrayImage;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::frames::Frame;

/// Count positions whose dark/light classification differs between two
/// equally-sized bands.
pub fn dark_diff_count(a: &GrayImage, b: &GrayImage, dark_max: u8) -> usize {
    debug_assert_eq!(a.dimensions(), b.dimensions(), "band dimensions differ");
    a.pixels()
        .zip(b.pixels())
        .filter(|(pa, pb)| (pa[0] < dark_max) != (pb[0] < dark_max))
        .count()
}

/// Suppress consecutive frames showing the same caption.
///
/// Each frame is compared against the previous surviving frame; it stays
/// only if at least `min_dedup_diff` pixel positions changed classification
/// (equal-to-threshold keeps). The first frame is always a survivor.
///
/// A frame rejected here is released on the spot: comparison is always
/// against the previous survivor, so a rejected frame can never be a
/// comparison baseline later. Survivors keep their buffers for recognition.
pub fn dedup_pass(frames: Vec<Frame>, config: &PipelineConfig) -> Vec<Frame> {
    let total = frames.len();
    let mut survivors: Vec<Frame> = Vec::new();

    for mut frame in frames {
        let diff = survivors
            .last()
            .map(|prev| dark_diff_count(prev.image(), frame.image(), config.dedup_dark_max));

        match diff {
            Some(d) if d < config.min_dedup_diff => {
                debug!(index = frame.index, diff = d, "duplicate caption dropped");
                frame.release();
            }
            _ => {
                debug!(index = frame.index, diff = ?diff, "caption kept");
                survivors.push(frame);
            }
        }
    }

    info!(
        total,
        kept = survivors.len(),
        "dedup pass complete"
    );
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use std::path::Path;

    fn config(min_dedup_diff: usize) -> PipelineConfig {
        PipelineConfig {
            min_dedup_diff,
            ..PipelineConfig::default()
        }
    }

    /// Band with `dark` leading dark pixels, the rest light.
    fn band(dark: usize) -> GrayImage {
        let mut img = GrayImage::from_pixel(20, 10, Luma([255]));
        for i in 0..dark {
            img.put_pixel((i % 20) as u32, (i / 20) as u32, Luma([0]));
        }
        img
    }

    fn frame(dir: &Path, index: u32, dark: usize) -> Frame {
        let path = dir.join(format!("{index:06}.bmp"));
        std::fs::write(&path, b"stub").unwrap();
        Frame::new(index, path, band(dark))
    }

    #[test]
    fn diff_counts_classification_changes() {
        assert_eq!(dark_diff_count(&band(0), &band(7), 128), 7);
        assert_eq!(dark_diff_count(&band(5), &band(5), 128), 0);
    }

    #[test]
    fn first_frame_is_always_kept() {
        let dir = tempfile::tempdir().unwrap();
        let survivors = dedup_pass(vec![frame(dir.path(), 1, 0)], &config(100));
        assert_eq!(survivors.len(), 1);
    }

    #[test]
    fn identical_adjacent_frame_is_dropped_and_released() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![frame(dir.path(), 1, 50), frame(dir.path(), 2, 50)];
        let survivors = dedup_pass(frames, &config(10));

        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].index, 1);
        assert!(!survivors[0].is_released());
        assert!(!dir.path().join("000002.bmp").exists());
    }

    #[test]
    fn diff_exactly_at_threshold_keeps() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![frame(dir.path(), 1, 0), frame(dir.path(), 2, 10)];
        let survivors = dedup_pass(frames, &config(10));
        assert_eq!(survivors.len(), 2);
    }

    #[test]
    fn diff_one_below_threshold_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![frame(dir.path(), 1, 0), frame(dir.path(), 2, 9)];
        let survivors = dedup_pass(frames, &config(10));
        assert_eq!(survivors.len(), 1);
    }

    #[test]
    fn comparison_baseline_is_previous_survivor() {
        // Frame 2 duplicates frame 1 and is dropped; frame 3 must be
        // compared against frame 1, not the dropped frame 2.
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![
            frame(dir.path(), 1, 0),
            frame(dir.path(), 2, 5),
            frame(dir.path(), 3, 5),
        ];
        let survivors = dedup_pass(frames, &config(10));
        assert_eq!(survivors.len(), 1, "3 differs from 1 by only 5");
    }

    #[test]
    fn rejected_last_frame_is_released() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![frame(dir.path(), 1, 0), frame(dir.path(), 2, 0)];
        let survivors = dedup_pass(frames, &config(10));
        assert_eq!(survivors.len(), 1);
        assert!(!dir.path().join("000002.bmp").exists());
        assert!(dir.path().join("000001.bmp").exists());
    }
}
