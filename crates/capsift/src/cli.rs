use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "capsift", about = "Burnt-in caption extractor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the caption listing for one video's sampled frames.
    Scan {
        /// Directory of numbered caption-band bitmaps plus timecodes.txt.
        #[arg(short, long)]
        frames: PathBuf,

        /// Stable video identifier used as the cache key.
        #[arg(long)]
        video_id: String,

        /// Source video URL used for the deep links.
        #[arg(long)]
        video_url: String,

        /// Directory holding finished listings.
        #[arg(long)]
        cache_dir: PathBuf,

        /// Recognition engine command; the image path is appended and the
        /// engine must write a sibling .txt artifact.
        #[arg(long)]
        engine: String,

        /// Extra arguments passed to the engine before the image path.
        #[arg(long)]
        engine_arg: Vec<String>,

        /// Lag compensation in seconds subtracted from raw timecodes.
        #[arg(long, default_value_t = 60)]
        lag: u64,

        /// Path to write the listing to, in addition to the cache.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
