//! Block ids, names, and map colors.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::BlockRegistry;
pub use types::{Block, BlockType};
