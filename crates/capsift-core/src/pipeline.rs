use std::path::Path;

use tracing::{debug, info};
use url::Url;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::filters::{band, centering, crop, dedup, despeckle};
use crate::frames::{Frame, FrameSource};
use crate::listing::build_listing;
use crate::recognize::{recognize_survivors, Recognizer};
use crate::store::ListingStore;
use crate::timecode::align_timestamp;

/// Idempotent entry point: return the cached listing for `video_id` if the
/// store has one, otherwise run the full pipeline and cache the result.
///
/// The listing is persisted only after every surviving frame has been
/// through recognition; an aborted run leaves no partial state behind.
pub fn get_or_build_listing(
    video_id: &str,
    video_url: &Url,
    frames_dir: &Path,
    config: &PipelineConfig,
    store: &dyn ListingStore,
    recognizer: &dyn Recognizer,
) -> Result<String> {
    if let Some(cached) = store.get(video_id)? {
        info!(video_id, "returning cached listing");
        return Ok(cached);
    }

    let listing = run_pipeline(frames_dir, video_url, config, recognizer)?;
    store.put(video_id, &listing)?;
    Ok(listing)
}

/// Run every stage over the sampled frames, in order. Each stage is a
/// batch pass over the whole ordered collection; a rejecting stage
/// releases the frame's backing bitmap before the next stage begins.
pub fn run_pipeline(
    frames_dir: &Path,
    video_url: &Url,
    config: &PipelineConfig,
    recognizer: &dyn Recognizer,
) -> Result<String> {
    info!(?frames_dir, "pipeline starting");

    let source = FrameSource::load(frames_dir)?;
    let timecodes = source.timecodes;

    let mut frames = classify_pass(source.frames, config);
    despeckle_pass(&mut frames, config);
    let frames = centering_pass(frames, config);
    let frames = crop_pass(frames, config);
    let mut frames = dedup::dedup_pass(frames, config);

    align_pass(&mut frames, &timecodes, config);
    recognize_survivors(&mut frames, config, recognizer)?;

    let listing = build_listing(&frames, video_url);
    info!(survivors = frames.len(), "pipeline complete");
    Ok(listing)
}

/// Drop frames whose band does not look like a caption at all.
fn classify_pass(frames: Vec<Frame>, config: &PipelineConfig) -> Vec<Frame> {
    let total = frames.len();
    let mut kept = Vec::new();

    for mut frame in frames {
        if band::is_caption_band(frame.image(), config) {
            kept.push(frame);
        } else {
            debug!(index = frame.index, "band rejected");
            frame.release();
        }
    }

    info!(total, kept = kept.len(), "band classification complete");
    kept
}

fn despeckle_pass(frames: &mut [Frame], config: &PipelineConfig) {
    for frame in frames.iter_mut() {
        despeckle::despeckle(frame.image_mut(), config);
    }
    info!(count = frames.len(), "despeckle complete");
}

/// Drop cut-off or transitioning captions. A band left with no ink after
/// despeckling has no span and is rejected outright.
fn centering_pass(frames: Vec<Frame>, config: &PipelineConfig) -> Vec<Frame> {
    let total = frames.len();
    let mut kept = Vec::new();

    for mut frame in frames {
        match centering::ink_span(frame.image(), config) {
            Some(span) if centering::is_centered(frame.image(), span, config) => {
                frame.left = Some(span.left);
                frame.right = Some(span.right);
                kept.push(frame);
            }
            Some(_) => {
                debug!(index = frame.index, "off-center caption rejected");
                frame.release();
            }
            None => {
                debug!(index = frame.index, "inkless band rejected");
                frame.release();
            }
        }
    }

    info!(total, kept = kept.len(), "centering pass complete");
    kept
}

/// Drop frames whose cropped text region is too short to be real text;
/// survivors carry their crop rect forward for recognition.
fn crop_pass(frames: Vec<Frame>, config: &PipelineConfig) -> Vec<Frame> {
    let total = frames.len();
    let mut kept = Vec::new();

    for mut frame in frames {
        match crop::text_bounds(frame.image(), config) {
            Some(bounds) if crop::is_text_tall_enough(bounds, config) => {
                frame.crop = Some(bounds);
                kept.push(frame);
            }
            _ => {
                debug!(index = frame.index, "text crop rejected");
                frame.release();
            }
        }
    }

    info!(total, kept = kept.len(), "text crop pass complete");
    kept
}

/// Look up each survivor's raw timecode by its original decode index and
/// correct it for display lag.
fn align_pass(frames: &mut [Frame], timecodes: &[u64], config: &PipelineConfig) {
    for frame in frames.iter_mut() {
        let raw = timecodes[(frame.index - 1) as usize];
        let aligned = align_timestamp(raw, config.lag_seconds);
        debug!(index = frame.index, raw, aligned, "timecode aligned");
        frame.timestamp = Some(aligned);
    }
}
