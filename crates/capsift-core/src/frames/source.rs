use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PipelineError, Result};

use super::frame::Frame;

/// Name of the companion timecode log inside the frames directory.
const TIMECODE_LOG: &str = "timecodes.txt";

/// Zero-padded width of the numbered bitmap file names.
const INDEX_WIDTH: usize = 6;

/// The decode step's output: an ordered run of caption-band bitmaps plus
/// the parallel timecode log (one raw integer timestamp per decode event).
#[derive(Debug)]
pub struct FrameSource {
    pub frames: Vec<Frame>,
    pub timecodes: Vec<u64>,
    pub width: u32,
    pub height: u32,
}

impl FrameSource {
    /// Load every numbered bitmap (`000001.bmp`, `000002.bmp`, ...) from
    /// `dir` along with the timecode log. All frames must share the first
    /// frame's dimensions and every frame must have a log line.
    pub fn load(dir: &Path) -> Result<FrameSource> {
        if !dir.is_dir() {
            return Err(PipelineError::MissingSource(format!(
                "frames directory does not exist: {}",
                dir.display()
            )));
        }

        let timecodes = read_timecodes(&dir.join(TIMECODE_LOG))?;

        let mut frames = Vec::new();
        let mut dims: Option<(u32, u32)> = None;

        loop {
            let index = frames.len() as u32 + 1;
            let path = frame_path(dir, index);
            if !path.exists() {
                break;
            }

            let image = image::open(&path)?.into_luma8();
            match dims {
                None => dims = Some(image.dimensions()),
                Some(d) if d != image.dimensions() => {
                    return Err(PipelineError::MissingSource(format!(
                        "frame {} is {}x{}, expected {}x{}",
                        index,
                        image.width(),
                        image.height(),
                        d.0,
                        d.1
                    )));
                }
                Some(_) => {}
            }

            debug!(index, path = ?path, "loaded frame");
            frames.push(Frame::new(index, path, image));
        }

        let Some((width, height)) = dims else {
            return Err(PipelineError::MissingSource(format!(
                "no numbered bitmaps found in {}",
                dir.display()
            )));
        };

        if timecodes.len() < frames.len() {
            return Err(PipelineError::MissingSource(format!(
                "timecode log has {} lines for {} frames",
                timecodes.len(),
                frames.len()
            )));
        }

        info!(
            frame_count = frames.len(),
            width, height, "frame source loaded"
        );

        Ok(FrameSource {
            frames,
            timecodes,
            width,
            height,
        })
    }
}

fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("{:0width$}.bmp", index, width = INDEX_WIDTH))
}

fn read_timecodes(path: &Path) -> Result<Vec<u64>> {
    if !path.exists() {
        return Err(PipelineError::MissingSource(format!(
            "timecode log does not exist: {}",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(path)?;
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    // Line N maps to frame N; a blank line mid-log would silently shift
    // every later timestamp, so only trailing blanks are tolerated.
    let mut timecodes = Vec::new();
    for (line_no, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            return Err(PipelineError::MissingSource(format!(
                "blank line {} in {}",
                line_no + 1,
                path.display()
            )));
        }
        let raw: u64 = line.parse().map_err(|_| {
            PipelineError::MissingSource(format!(
                "bad timecode on line {} of {}: {line:?}",
                line_no + 1,
                path.display()
            ))
        })?;
        timecodes.push(raw);
    }

    debug!(count = timecodes.len(), path = ?path, "timecode log read");
    Ok(timecodes)
}
