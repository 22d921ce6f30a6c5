use std::path::PathBuf;

/// Tunable thresholds for the caption pipeline.
///
/// Defaults are tuned for one fixed band layout and do not generalize to
/// arbitrary aspect ratios or font styles.
pub struct PipelineConfig {
    /// Height E of the top and bottom band margins, in rows.
    pub margin_height: u32,
    /// Maximum non-background pixels tolerated across both margins.
    pub margin_tolerance: usize,
    /// Minimum near-black pixels required in the band interior.
    pub min_interior_ink: usize,
    /// Luma at or above this is background (near-white).
    pub white_min: u8,
    /// Luma at or below this is ink (near-black).
    pub black_max: u8,
    /// Maximum off-center factor |W - left - right| tolerated.
    pub centering_tolerance: u32,
    /// Background slack for the text crop: luma below `255 - crop_tolerance`
    /// counts as content.
    pub crop_tolerance: u8,
    /// Minimum cropped text height, in rows. Thinner boxes are noise lines.
    pub min_text_height: u32,
    /// Luma below this counts as "dark" in the dedup comparison.
    pub dedup_dark_max: u8,
    /// Minimum dark/light classification differences for a frame to count
    /// as a new caption (equal keeps).
    pub min_dedup_diff: usize,
    /// Lag compensation subtracted from raw timecodes, in seconds.
    pub lag_seconds: u64,
    /// Integer upsample factor applied to the text crop before recognition.
    pub upsample_scale: u32,
    /// Directory for the upsampled crop images handed to the engine.
    pub work_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            margin_height: 6,
            margin_tolerance: 20,
            min_interior_ink: 300,
            white_min: 200,
            black_max: 96,
            centering_tolerance: 50,
            crop_tolerance: 32,
            min_text_height: 14,
            dedup_dark_max: 128,
            min_dedup_diff: 400,
            lag_seconds: 60,
            upsample_scale: 4,
            work_dir: std::env::temp_dir().join("capsift"),
        }
    }
}
