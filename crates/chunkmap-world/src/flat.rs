use chunkmap_blocks::Block;
use chunkmap_geom::{CHUNK_WIDTH, ChunkPos, Vec3};

use crate::chunk::{CHUNK_HEIGHT, Chunk};
use crate::world::World;

/// Largest radius the builder accepts; `(2r + 1)²` chunks stays well inside `i32`.
pub const MAX_RADIUS: i32 = 1024;

/// Builds a square of identical layered chunks, then applies single-block
/// placements on top.
#[derive(Clone, Debug)]
pub struct FlatWorldBuilder {
    radius: i32,
    layers: Vec<(Block, i32)>,
    placements: Vec<(i32, i32, i32, Block)>,
    player: Option<Vec3>,
    spawn: Option<Vec3>,
    current_layer: Option<i32>,
}

impl Default for FlatWorldBuilder {
    fn default() -> Self {
        Self {
            radius: 4,
            layers: vec![
                (Block::BEDROCK, 1),
                (Block::STONE, 59),
                (Block::DIRT, 3),
                (Block::GRASS, 1),
            ],
            placements: Vec::new(),
            player: None,
            spawn: None,
            current_layer: None,
        }
    }
}

impl FlatWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks from `-radius..=radius` on both axes, clamped to `0..=MAX_RADIUS`.
    pub fn radius(mut self, radius: i32) -> Self {
        self.radius = radius.clamp(0, MAX_RADIUS);
        self
    }

    /// Bottom-up `(block, thickness)` layers, replacing the defaults.
    pub fn layers(mut self, layers: Vec<(Block, i32)>) -> Self {
        self.layers = layers;
        self
    }

    /// Set a block at world coordinates after layering.
    pub fn place(mut self, x: i32, y: i32, z: i32, block: Block) -> Self {
        self.placements.push((x, y, z, block));
        self
    }

    pub fn player(mut self, pos: Vec3) -> Self {
        self.player = Some(pos);
        self
    }

    pub fn spawn(mut self, pos: Vec3) -> Self {
        self.spawn = Some(pos);
        self
    }

    pub fn current_layer(mut self, layer: i32) -> Self {
        self.current_layer = Some(layer);
        self
    }

    /// Height of the top layer surface.
    pub fn surface_y(&self) -> i32 {
        let total: i32 = self.layers.iter().map(|(_, d)| (*d).max(0)).sum();
        (total - 1).min(CHUNK_HEIGHT - 1)
    }

    /// Number of chunks `build` produces.
    pub fn chunk_count(&self) -> usize {
        let side = 2 * self.radius as usize + 1;
        side * side
    }

    pub fn chunk_positions(&self) -> Vec<ChunkPos> {
        let r = self.radius;
        let mut out = Vec::with_capacity(self.chunk_count());
        for z in -r..=r {
            for x in -r..=r {
                out.push(ChunkPos::new(x, z));
            }
        }
        out
    }

    pub fn build_chunk(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new(pos);
        let mut y = 0;
        for &(block, depth) in &self.layers {
            for _ in 0..depth.max(0) {
                if y >= CHUNK_HEIGHT {
                    break;
                }
                for z in 0..CHUNK_WIDTH {
                    for x in 0..CHUNK_WIDTH {
                        chunk.set_block(x, y, z, block);
                    }
                }
                y += 1;
            }
        }
        let (ox, oz) = pos.origin_block();
        for &(wx, wy, wz, block) in &self.placements {
            if ChunkPos::from_block(wx, wz) == pos {
                chunk.set_block(wx - ox, wy, wz - oz, block);
            }
        }
        chunk
    }

    /// World with markers and layer set but no chunks loaded yet.
    pub fn build_markers(&self) -> World {
        let mut world = World::new();
        world.set_player_pos(self.player);
        world.set_spawn_pos(self.spawn);
        world.set_current_layer(self.current_layer.unwrap_or_else(|| self.surface_y()));
        world
    }

    pub fn build(&self) -> World {
        let mut world = self.build_markers();
        for pos in self.chunk_positions() {
            world.insert_chunk(self.build_chunk(pos));
        }
        log::debug!(
            target: "world",
            "built flat world: {} chunks, surface at y={}",
            world.chunk_count(),
            self.surface_y()
        );
        world
    }
}
