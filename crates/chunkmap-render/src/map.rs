use chunkmap_buffer::{Font, MapBuffer};
use chunkmap_geom::Argb;
use chunkmap_world::{ChunkRenderer, ChunkSelectionTracker, World};

use crate::state::WorldRenderer;

/// Translucent red drawn over selected chunks.
pub const SELECTION_COLOR: Argb = Argb(0x75FF_0000);
/// Fill used when the world has nothing to show.
pub const BACKGROUND_COLOR: Argb = Argb::WHITE;

pub fn placeholder_font() -> Font {
    Font::new("Sans serif", true, 11)
}

/// What one `render` call drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub empty_world: bool,
    pub chunks: usize,
    pub highlighted: usize,
    pub selected: usize,
}

impl WorldRenderer {
    fn render_empty(buffer: &mut MapBuffer) {
        buffer.fill(BACKGROUND_COLOR);
        buffer.set_font(placeholder_font());
    }

    /// Redraw every visible chunk of `buffer`.
    ///
    /// Chunks are visited in the buffer's own order. Each is drawn by
    /// `renderer`, then tinted for the highlighted block type when
    /// highlighting is on, then covered with [`SELECTION_COLOR`] when
    /// selected. An empty world only clears the buffer.
    pub fn render(
        &self,
        world: &World,
        buffer: &mut MapBuffer,
        renderer: &dyn ChunkRenderer,
        selection: &ChunkSelectionTracker,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        if world.is_empty_world() {
            Self::render_empty(buffer);
            stats.empty_world = true;
        } else {
            let highlight = self.highlight();
            let view = *buffer.view();
            for pos in buffer.chunks() {
                let (x, z) = (pos.x, pos.z);
                let chunk = world.get_chunk(pos);
                renderer.render(chunk, buffer, x, z);
                stats.chunks += 1;
                if highlight.enabled {
                    chunk.render_highlight(buffer, x, z, highlight.block, highlight.color);
                    stats.highlighted += 1;
                }
                if selection.is_selected(pos) {
                    buffer.fill_rect_alpha(
                        view.chunk_scale * (x - view.px0),
                        view.chunk_scale * (z - view.pz0),
                        view.chunk_scale,
                        view.chunk_scale,
                        SELECTION_COLOR,
                    );
                    stats.selected += 1;
                }
            }
        }
        let update = self.post_map_update();
        log::trace!(
            target: "map",
            "frame {} mode={} chunks={} highlighted={} selected={}{}",
            update.frame,
            renderer.mode().label(),
            stats.chunks,
            stats.highlighted,
            stats.selected,
            if stats.empty_world { " (empty world)" } else { "" }
        );
        stats
    }
}
