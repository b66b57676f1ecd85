//! Software pixel buffers and the chunk-grid viewport they are drawn for.
#![forbid(unsafe_code)]

pub mod bitmap;
pub mod buffer;
pub mod view;

pub use bitmap::Bitmap;
pub use buffer::{ChunkIter, Font, MapBuffer};
pub use view::ChunkView;
