use std::sync::{Mutex, MutexGuard, PoisonError};

use chunkmap_geom::ChunkPos;
use hashbrown::HashSet;

/// Set of chunks the user has selected on the map.
#[derive(Debug, Default)]
pub struct ChunkSelectionTracker {
    selected: Mutex<HashSet<ChunkPos>>,
}

impl ChunkSelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<ChunkPos>> {
        self.selected.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn is_selected(&self, pos: ChunkPos) -> bool {
        self.lock().contains(&pos)
    }

    pub fn select(&self, pos: ChunkPos) -> bool {
        self.lock().insert(pos)
    }

    pub fn deselect(&self, pos: ChunkPos) -> bool {
        self.lock().remove(&pos)
    }

    /// Flip the selection state of `pos`; returns the new state.
    pub fn toggle(&self, pos: ChunkPos) -> bool {
        let mut set = self.lock();
        let now = if set.remove(&pos) {
            false
        } else {
            set.insert(pos);
            true
        };
        log::debug!(target: "selection", "chunk {} {}", pos, if now { "selected" } else { "deselected" });
        now
    }

    /// Select every chunk in the inclusive rectangle spanned by `a` and `b`.
    pub fn select_region(&self, a: ChunkPos, b: ChunkPos) -> usize {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (z0, z1) = (a.z.min(b.z), a.z.max(b.z));
        let mut set = self.lock();
        let mut added = 0;
        for z in z0..=z1 {
            for x in x0..=x1 {
                if set.insert(ChunkPos::new(x, z)) {
                    added += 1;
                }
            }
        }
        added
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Selected positions in sorted order.
    pub fn selected(&self) -> Vec<ChunkPos> {
        let mut v: Vec<ChunkPos> = self.lock().iter().copied().collect();
        v.sort();
        v
    }
}
