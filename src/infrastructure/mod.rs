pub mod cache;
pub mod completion;
pub mod error;
pub mod video;
