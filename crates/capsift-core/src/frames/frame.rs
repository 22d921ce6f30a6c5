use std::path::PathBuf;

use image::GrayImage;
use tracing::{debug, warn};

use crate::rect::BandRect;

/// A single sampled caption-band frame with metadata.
///
/// Owns its decoded band buffer and the bitmap file backing it. Filter
/// stages fill in the derived fields; the first stage that rejects the
/// frame (or the recognition step, for survivors) calls [`Frame::release`].
#[derive(Debug)]
pub struct Frame {
    /// Sequence number from the decode step (1-based). Matches the
    /// timecode log line-for-line.
    pub index: u32,
    path: PathBuf,
    image: Option<GrayImage>,
    /// Leftmost band column containing ink, set by the centering filter.
    pub left: Option<u32>,
    /// Rightmost band column containing ink, set by the centering filter.
    pub right: Option<u32>,
    /// Auto-cropped text region, set by the crop filter.
    pub crop: Option<BandRect>,
    /// Recognized caption text, set by the recognition step.
    pub text: Option<String>,
    /// Set when the recognition output artifact could not be read.
    pub unreadable: bool,
    /// Aligned video timestamp in seconds, set by the timecode aligner.
    pub timestamp: Option<u64>,
    released: bool,
}

impl Frame {
    pub fn new(index: u32, path: PathBuf, image: GrayImage) -> Frame {
        Frame {
            index,
            path,
            image: Some(image),
            left: None,
            right: None,
            crop: None,
            text: None,
            unreadable: false,
            timestamp: None,
            released: false,
        }
    }

    /// The band buffer. Panics if the frame has been released; stages only
    /// see frames whose lifecycle has not ended.
    pub fn image(&self) -> &GrayImage {
        self.image.as_ref().expect("frame already released")
    }

    pub fn image_mut(&mut self) -> &mut GrayImage {
        self.image.as_mut().expect("frame already released")
    }

    /// End this frame's lifecycle: drop the band buffer and delete the
    /// backing bitmap file. Each frame is released exactly once, on the
    /// first stage that rejects it or after recognition has run.
    pub fn release(&mut self) {
        debug_assert!(!self.released, "frame {} released twice", self.index);
        if self.released {
            return;
        }
        self.released = true;
        self.image = None;
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(index = self.index, path = ?self.path, %e, "failed to delete backing bitmap");
        } else {
            debug!(index = self.index, "frame released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}
