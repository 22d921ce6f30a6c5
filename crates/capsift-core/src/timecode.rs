/// Correct a raw decode timecode for display lag. Captions cannot predate
/// the video start, so the result clamps at zero.
pub fn align_timestamp(raw_seconds: u64, lag_seconds: u64) -> u64 {
    raw_seconds.saturating_sub(lag_seconds)
}

/// Render seconds as zero-padded `HH:MM:SS`.
pub fn format_timestamp(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
