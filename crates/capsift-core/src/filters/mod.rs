pub mod band;
pub mod centering;
pub mod crop;
pub mod dedup;
pub mod despeckle;
