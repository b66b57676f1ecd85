//! In-memory world, chunk tiles, and the per-chunk map renderers.
#![forbid(unsafe_code)]

pub mod chunk;
pub mod flat;
pub mod selection;
pub mod tile;
pub mod world;

pub use chunk::{CHUNK_HEIGHT, Chunk};
pub use flat::FlatWorldBuilder;
pub use selection::ChunkSelectionTracker;
pub use tile::{ChunkRenderer, LayerRenderer, RenderMode, SurfaceRenderer};
pub use world::World;
