use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort processing of the current video.
///
/// Per-frame recognition misses are not errors; they set the frame's
/// `unreadable` flag and the pipeline continues.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The external recognition engine exited abnormally.
    #[error("recognition engine failed on {image}: {detail}")]
    ExternalTool { image: PathBuf, detail: String },

    /// No usable frame source (missing frames, missing or short timecode log).
    #[error("no usable frame source: {0}")]
    MissingSource(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
