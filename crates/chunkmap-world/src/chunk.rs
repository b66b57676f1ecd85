use chunkmap_blocks::Block;
use chunkmap_buffer::MapBuffer;
use chunkmap_geom::{Argb, CHUNK_WIDTH, ChunkPos};

pub const CHUNK_HEIGHT: i32 = 256;

const W: usize = CHUNK_WIDTH as usize;
const H: usize = CHUNK_HEIGHT as usize;
const COLUMNS: usize = W * W;

/// Horizontal pixel span covered by one block column inside a chunk cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub block: i32,
    pub offset: i32,
    pub len: i32,
}

/// Split a `chunk_scale`-pixel cell edge into per-block spans.
///
/// At 16 px per chunk or more each block gets `chunk_scale / 16` pixels and
/// the last block absorbs the remainder. Below that, each pixel samples the
/// block under it.
pub(crate) fn spans(chunk_scale: i32) -> impl Iterator<Item = Span> + Clone {
    let cs = chunk_scale.max(1);
    let wide = cs >= CHUNK_WIDTH;
    let n = if wide { CHUNK_WIDTH } else { cs };
    (0..n).map(move |i| {
        if wide {
            let bs = cs / CHUNK_WIDTH;
            let len = if i == CHUNK_WIDTH - 1 { cs - bs * i } else { bs };
            Span {
                block: i,
                offset: i * bs,
                len,
            }
        } else {
            Span {
                block: i * CHUNK_WIDTH / cs,
                offset: i,
                len: 1,
            }
        }
    })
}

/// One 16 × 256 × 16 column of blocks.
///
/// A chunk with no block storage is the placeholder the world hands out for
/// positions it has not loaded.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub pos: ChunkPos,
    blocks: Vec<Block>,
    heights: Vec<i32>,
}

impl Chunk {
    /// All-air chunk with storage allocated.
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: vec![Block::AIR; COLUMNS * H],
            heights: vec![-1; COLUMNS],
        }
    }

    /// Placeholder for a position with no loaded data.
    pub fn empty(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: Vec::new(),
            heights: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    fn idx(x: i32, y: i32, z: i32) -> usize {
        (y as usize * W + z as usize) * W + x as usize
    }

    #[inline]
    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_WIDTH).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_WIDTH).contains(&z)
    }

    /// Block at local coordinates; air outside the chunk or for placeholders.
    #[inline]
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Block {
        if self.is_empty() || !Self::in_bounds(x, y, z) {
            return Block::AIR;
        }
        self.blocks[Self::idx(x, y, z)]
    }

    /// Y of the topmost non-air block in column `(x, z)`.
    #[inline]
    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        if self.is_empty() || !Self::in_bounds(x, 0, z) {
            return None;
        }
        let h = self.heights[z as usize * W + x as usize];
        (h >= 0).then_some(h)
    }

    /// Topmost non-air block of column `(x, z)` and its height.
    pub fn top_block(&self, x: i32, z: i32) -> Option<(Block, i32)> {
        let y = self.height_at(x, z)?;
        Some((self.block_at(x, y, z), y))
    }

    /// Returns `false` when the write is ignored (placeholder or out of range).
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) -> bool {
        if self.is_empty() || !Self::in_bounds(x, y, z) {
            return false;
        }
        self.blocks[Self::idx(x, y, z)] = block;
        let col = z as usize * W + x as usize;
        let h = self.heights[col];
        if !block.is_air() {
            if y > h {
                self.heights[col] = y;
            }
        } else if y == h {
            self.heights[col] = (0..y)
                .rev()
                .find(|&yy| !self.blocks[Self::idx(x, yy, z)].is_air())
                .unwrap_or(-1);
        }
        true
    }

    pub fn column_contains(&self, x: i32, z: i32, block: Block) -> bool {
        let Some(top) = self.height_at(x, z) else {
            return block.is_air() && !self.is_empty();
        };
        if block.is_air() && top < CHUNK_HEIGHT - 1 {
            return true;
        }
        (0..=top).any(|y| self.blocks[Self::idx(x, y, z)] == block)
    }

    /// Tint every block column of this chunk's cell that contains `block`.
    ///
    /// `(x, z)` is the chunk position the cell is drawn for.
    pub fn render_highlight(
        &self,
        buffer: &mut MapBuffer,
        x: i32,
        z: i32,
        block: Block,
        color: Argb,
    ) {
        if self.is_empty() {
            return;
        }
        let (cx, cz) = buffer.cell_origin(x, z);
        let cs = buffer.view().chunk_scale;
        for sz in spans(cs) {
            for sx in spans(cs) {
                if self.column_contains(sx.block, sz.block, block) {
                    buffer.fill_rect_alpha(cx + sx.offset, cz + sz.offset, sx.len, sz.len, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_cover_cell_exactly() {
        for cs in [1, 5, 15, 16, 17, 31, 48, 100] {
            let spans: Vec<Span> = spans(cs).collect();
            let total: i32 = spans.iter().map(|s| s.len).sum();
            assert_eq!(total, cs, "chunk_scale {cs}");
            let mut next = 0;
            for s in &spans {
                assert_eq!(s.offset, next);
                assert!((0..CHUNK_WIDTH).contains(&s.block));
                next += s.len;
            }
        }
    }

    #[test]
    fn heightmap_tracks_edits() {
        let mut c = Chunk::new(ChunkPos::new(0, 0));
        assert_eq!(c.height_at(3, 4), None);
        assert!(c.set_block(3, 10, 4, Block::STONE));
        assert!(c.set_block(3, 20, 4, Block::GRASS));
        assert_eq!(c.top_block(3, 4), Some((Block::GRASS, 20)));
        c.set_block(3, 20, 4, Block::AIR);
        assert_eq!(c.top_block(3, 4), Some((Block::STONE, 10)));
        c.set_block(3, 10, 4, Block::AIR);
        assert_eq!(c.height_at(3, 4), None);
    }

    #[test]
    fn placeholder_ignores_writes() {
        let mut c = Chunk::empty(ChunkPos::new(1, 1));
        assert!(c.is_empty());
        assert!(!c.set_block(0, 0, 0, Block::STONE));
        assert_eq!(c.block_at(0, 0, 0), Block::AIR);
        assert!(!c.column_contains(0, 0, Block::STONE));
    }

    #[test]
    fn out_of_range_reads_are_air() {
        let c = Chunk::new(ChunkPos::new(0, 0));
        assert_eq!(c.block_at(-1, 0, 0), Block::AIR);
        assert_eq!(c.block_at(0, CHUNK_HEIGHT, 0), Block::AIR);
    }
}
