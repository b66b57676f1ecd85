use std::sync::Arc;

use chunkmap_blocks::BlockRegistry;
use chunkmap_buffer::MapBuffer;
use chunkmap_geom::Argb;

use crate::chunk::{CHUNK_HEIGHT, Chunk, spans};

/// Cell color for positions the world has no data for.
pub const UNLOADED_COLOR: Argb = Argb(0xFF2A_2A2A);
/// Layer-mode color for air.
pub const VOID_COLOR: Argb = Argb(0xFF10_1018);

const SEA_LEVEL: i32 = 63;

/// What a chunk renderer shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Topmost block of every column.
    Surface,
    /// A single horizontal slice at the given Y.
    Layer(i32),
}

impl RenderMode {
    /// Whether something standing at block height `y` is on the displayed layer.
    /// Surface views show every height.
    #[inline]
    pub fn same_layer(self, y: i32) -> bool {
        match self {
            RenderMode::Surface => true,
            RenderMode::Layer(layer) => layer == y,
        }
    }

    pub fn label(self) -> String {
        match self {
            RenderMode::Surface => "surface".to_string(),
            RenderMode::Layer(y) => format!("layer {y}"),
        }
    }
}

/// Draws one chunk into its cell of a map buffer.
pub trait ChunkRenderer: Send + Sync {
    fn mode(&self) -> RenderMode;

    /// Draw `chunk` into the cell of chunk position `(x, z)`.
    fn render(&self, chunk: &Chunk, buffer: &mut MapBuffer, x: i32, z: i32);
}

fn render_columns(
    chunk: &Chunk,
    buffer: &mut MapBuffer,
    x: i32,
    z: i32,
    mut color_of: impl FnMut(&Chunk, i32, i32) -> Argb,
) {
    let (cx, cz) = buffer.cell_origin(x, z);
    let cs = buffer.view().chunk_scale;
    if chunk.is_empty() {
        buffer.fill_rect(cx, cz, cs, cs, UNLOADED_COLOR);
        return;
    }
    for sz in spans(cs) {
        for sx in spans(cs) {
            let color = color_of(chunk, sx.block, sz.block);
            buffer.fill_rect(cx + sx.offset, cz + sz.offset, sx.len, sz.len, color);
        }
    }
}

/// Height-tinted top-down view.
#[derive(Clone, Debug)]
pub struct SurfaceRenderer {
    registry: Arc<BlockRegistry>,
}

impl SurfaceRenderer {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self { registry }
    }

    /// Brightness factor for a surface at height `y`.
    #[inline]
    pub fn height_tint(y: i32) -> f32 {
        (1.0 + (y - SEA_LEVEL) as f32 / 192.0).clamp(0.5, 1.25)
    }
}

impl ChunkRenderer for SurfaceRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Surface
    }

    fn render(&self, chunk: &Chunk, buffer: &mut MapBuffer, x: i32, z: i32) {
        render_columns(chunk, buffer, x, z, |c, bx, bz| match c.top_block(bx, bz) {
            Some((block, y)) => self.registry.color(block).shade(Self::height_tint(y)),
            None => VOID_COLOR,
        });
    }
}

/// Horizontal slice at a fixed Y.
#[derive(Clone, Debug)]
pub struct LayerRenderer {
    registry: Arc<BlockRegistry>,
    layer: i32,
}

impl LayerRenderer {
    pub fn new(registry: Arc<BlockRegistry>, layer: i32) -> Self {
        Self {
            registry,
            layer: layer.clamp(0, CHUNK_HEIGHT - 1),
        }
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }
}

impl ChunkRenderer for LayerRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Layer(self.layer)
    }

    fn render(&self, chunk: &Chunk, buffer: &mut MapBuffer, x: i32, z: i32) {
        let layer = self.layer;
        render_columns(chunk, buffer, x, z, |c, bx, bz| {
            let block = c.block_at(bx, layer, bz);
            if block.is_air() {
                VOID_COLOR
            } else {
                self.registry.color(block)
            }
        });
    }
}

/// Renderer for `mode`.
pub fn renderer_for(mode: RenderMode, registry: Arc<BlockRegistry>) -> Box<dyn ChunkRenderer> {
    match mode {
        RenderMode::Surface => Box::new(SurfaceRenderer::new(registry)),
        RenderMode::Layer(y) => Box::new(LayerRenderer::new(registry, y)),
    }
}
