use std::sync::{Mutex, MutexGuard, PoisonError};

use chunkmap_blocks::Block;
use chunkmap_geom::Argb;

/// Block highlighting settings read once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighlightConfig {
    pub enabled: bool,
    pub block: Block,
    pub color: Argb,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            block: Block::DIAMOND_ORE,
            color: Argb::RED,
        }
    }
}

/// Notice that the map buffer was redrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapUpdate {
    /// Number of render calls completed when this update was posted.
    pub frame: u64,
}

#[derive(Debug, Default)]
struct Shared {
    highlight: HighlightConfig,
    // single slot: a newer update replaces an unread one
    pending: Option<MapUpdate>,
    frames: u64,
}

/// Map renderer and the state shared between the render thread and
/// whoever configures it.
///
/// All accessors go through one lock, so a reader never observes a
/// partially applied change.
#[derive(Debug, Default)]
pub struct WorldRenderer {
    shared: Mutex<Shared>,
}

impl WorldRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_highlight(highlight: HighlightConfig) -> Self {
        let r = Self::new();
        r.set_highlight(highlight);
        r
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_highlight_enabled(&self, value: bool) {
        self.lock().highlight.enabled = value;
    }

    pub fn is_highlight_enabled(&self) -> bool {
        self.lock().highlight.enabled
    }

    /// Set the highlighted block type.
    pub fn highlight_block(&self, block: Block) {
        self.lock().highlight.block = block;
    }

    pub fn highlighted_block(&self) -> Block {
        self.lock().highlight.block
    }

    pub fn set_highlight_color(&self, color: Argb) {
        self.lock().highlight.color = color;
    }

    pub fn highlight_color(&self) -> Argb {
        self.lock().highlight.color
    }

    /// Consistent snapshot of all highlight settings.
    pub fn highlight(&self) -> HighlightConfig {
        self.lock().highlight
    }

    /// Replace all highlight settings at once.
    pub fn set_highlight(&self, highlight: HighlightConfig) {
        self.lock().highlight = highlight;
    }

    /// Toggle highlighting; returns the new state.
    pub fn toggle_highlight(&self) -> bool {
        let mut s = self.lock();
        s.highlight.enabled = !s.highlight.enabled;
        s.highlight.enabled
    }

    pub(crate) fn post_map_update(&self) -> MapUpdate {
        let mut s = self.lock();
        s.frames += 1;
        let update = MapUpdate { frame: s.frames };
        s.pending = Some(update);
        update
    }

    /// Take the pending update, if any. Each update is handed out once.
    pub fn take_map_update(&self) -> Option<MapUpdate> {
        self.lock().pending.take()
    }

    /// `true` if the map was redrawn since the last call.
    pub fn map_updated(&self) -> bool {
        self.take_map_update().is_some()
    }

    /// Total render calls so far.
    pub fn frames_rendered(&self) -> u64 {
        self.lock().frames
    }
}
