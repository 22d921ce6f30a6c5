//! Recovers timestamped captions burnt into a video's picture from a
//! directory of pre-decoded caption-band bitmaps, via a chain of
//! pixel-level filters, sequential external text recognition, and a
//! markdown listing builder.

pub mod config;
pub mod error;
pub mod filters;
pub mod frames;
pub mod listing;
pub mod pipeline;
pub mod recognize;
pub mod rect;
pub mod store;
pub mod timecode;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
