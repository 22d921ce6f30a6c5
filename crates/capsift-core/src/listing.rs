use tracing::info;
use url::Url;

use crate::frames::Frame;
use crate::timecode::format_timestamp;

const LISTING_HEADER: &str = "Captions detected in this video:\n\n| Caption | Time |\n| --- | --- |";
const LISTING_FOOTER: &str = "\n\n^(Timestamps are lag-corrected and may be a few seconds off.)";

/// Render the surviving, readable captions as a markdown table with one
/// deep-linked timestamp per row.
pub fn build_listing(frames: &[Frame], video_url: &Url) -> String {
    let mut listing = String::from(LISTING_HEADER);
    let mut rows = 0usize;

    for frame in frames {
        if frame.unreadable {
            continue;
        }
        let text = frame.text.as_deref().unwrap_or_default();
        let seconds = frame.timestamp.unwrap_or(0);

        listing.push_str(&format!(
            "\n| {} | [{}]({}) |",
            escape_cell(text),
            format_timestamp(seconds),
            deep_link(video_url, seconds),
        ));
        rows += 1;
    }

    listing.push_str(LISTING_FOOTER);
    info!(rows, "caption listing built");
    listing
}

/// Link into the video at `seconds`. Any query parameters already on the
/// URL are discarded, not merged.
pub fn deep_link(video_url: &Url, seconds: u64) -> Url {
    let mut link = video_url.clone();
    link.set_query(Some(&format!("t={seconds}")));
    link
}

/// Keep OCR output from breaking the table: collapse line breaks and
/// escape the cell delimiter.
fn escape_cell(text: &str) -> String {
    text.replace(['\r', '\n'], " ").replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::path::PathBuf;

    fn caption_frame(index: u32, text: &str, timestamp: u64) -> Frame {
        let mut frame = Frame::new(
            index,
            PathBuf::from("unused.bmp"),
            GrayImage::from_pixel(1, 1, Luma([255])),
        );
        frame.text = Some(text.to_string());
        frame.timestamp = Some(timestamp);
        frame
    }

    fn video_url() -> Url {
        Url::parse("https://videos.example/watch?v=abc123&list=pl9").unwrap()
    }

    #[test]
    fn deep_link_replaces_existing_query() {
        let link = deep_link(&video_url(), 550);
        assert_eq!(link.as_str(), "https://videos.example/watch?t=550");
    }

    #[test]
    fn listing_has_header_rows_and_footer() {
        let frames = vec![caption_frame(1, "FIRST", 10), caption_frame(2, "SECOND", 95)];
        let listing = build_listing(&frames, &video_url());

        assert!(listing.starts_with(LISTING_HEADER));
        assert!(listing.ends_with(LISTING_FOOTER));
        assert!(listing.contains("| FIRST | [00:00:10](https://videos.example/watch?t=10) |"));
        assert!(listing.contains("| SECOND | [00:01:35](https://videos.example/watch?t=95) |"));
    }

    #[test]
    fn unreadable_frames_are_excluded() {
        let mut bad = caption_frame(2, "", 30);
        bad.text = None;
        bad.unreadable = true;
        let frames = vec![caption_frame(1, "KEPT", 10), bad];

        let listing = build_listing(&frames, &video_url());
        assert!(listing.contains("KEPT"));
        assert!(!listing.contains("t=30"));
    }

    #[test]
    fn rows_follow_frame_order() {
        let frames = vec![caption_frame(1, "A", 10), caption_frame(5, "B", 40)];
        let listing = build_listing(&frames, &video_url());
        let a = listing.find("| A |").unwrap();
        let b = listing.find("| B |").unwrap();
        assert!(a < b);
    }

    #[test]
    fn cell_delimiters_and_newlines_are_neutralized() {
        let frames = vec![caption_frame(1, "A|B\nC", 0)];
        let listing = build_listing(&frames, &video_url());
        assert!(listing.contains("| A\\|B C |"));
    }
}
