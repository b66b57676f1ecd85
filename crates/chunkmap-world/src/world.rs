use std::sync::Arc;

use chunkmap_geom::{ChunkPos, Vec3};
use hashbrown::HashMap;

use crate::chunk::{CHUNK_HEIGHT, Chunk};

/// Loaded chunks plus the player and spawn markers shown on the map.
#[derive(Debug)]
pub struct World {
    chunks: HashMap<ChunkPos, Arc<Chunk>>,
    missing: Chunk,
    player: Option<Vec3>,
    spawn: Option<Vec3>,
    current_layer: i32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
            missing: Chunk::empty(ChunkPos::default()),
            player: None,
            spawn: None,
            current_layer: 64,
        }
    }

    /// True while no chunk has been loaded.
    #[inline]
    pub fn is_empty_world(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk at `pos`, or the empty placeholder when it is not loaded.
    #[inline]
    pub fn get_chunk(&self, pos: ChunkPos) -> &Chunk {
        self.chunks.get(&pos).map(|c| c.as_ref()).unwrap_or(&self.missing)
    }

    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Arc<Chunk>> {
        let pos = chunk.pos;
        self.chunks.insert(pos, Arc::new(chunk))
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn player_pos(&self) -> Option<Vec3> {
        self.player
    }

    pub fn set_player_pos(&mut self, pos: Option<Vec3>) {
        self.player = pos;
    }

    /// Block Y the player stands in.
    #[inline]
    pub fn player_loc_y(&self) -> Option<i32> {
        self.player.map(Vec3::block_y)
    }

    #[inline]
    pub fn have_spawn_pos(&self) -> bool {
        self.spawn.is_some()
    }

    #[inline]
    pub fn spawn_pos(&self) -> Option<Vec3> {
        self.spawn
    }

    pub fn set_spawn_pos(&mut self, pos: Option<Vec3>) {
        self.spawn = pos;
    }

    pub fn spawn_pos_x(&self) -> f64 {
        self.spawn.map(|p| p.x).unwrap_or(0.0)
    }

    pub fn spawn_pos_y(&self) -> i32 {
        self.spawn.map(Vec3::block_y).unwrap_or(-1)
    }

    pub fn spawn_pos_z(&self) -> f64 {
        self.spawn.map(|p| p.z).unwrap_or(0.0)
    }

    #[inline]
    pub fn current_layer(&self) -> i32 {
        self.current_layer
    }

    pub fn set_current_layer(&mut self, layer: i32) {
        self.current_layer = layer.clamp(0, CHUNK_HEIGHT - 1);
    }
}
