pub mod frame;
pub mod source;

pub use frame::Frame;
pub use source::FrameSource;
