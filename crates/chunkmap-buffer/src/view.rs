use chunkmap_geom::ChunkPos;

pub const MIN_SCALE: i32 = 1;
pub const MAX_SCALE: i32 = 256;
pub const DEFAULT_SCALE: i32 = 16;

/// Visible window onto the chunk grid.
///
/// `scale` is the number of screen pixels per chunk, so one block spans
/// `scale / 16` pixels. `x0..x1` and `z0..z1` are the visible extent in
/// chunk units; `px0..=px1` and `pz0..=pz1` are the chunk columns and rows
/// that intersect it. Map buffers are laid out on the integer chunk grid
/// starting at `(px0, pz0)`, each chunk occupying `chunk_scale` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkView {
    pub x: f64,
    pub z: f64,
    pub width: i32,
    pub height: i32,
    pub scale: i32,
    pub chunk_scale: i32,
    pub x0: f64,
    pub z0: f64,
    pub x1: f64,
    pub z1: f64,
    pub px0: i32,
    pub pz0: i32,
    pub px1: i32,
    pub pz1: i32,
}

impl Default for ChunkView {
    fn default() -> Self {
        ChunkView::new(0.0, 0.0, 400, 400, DEFAULT_SCALE)
    }
}

impl ChunkView {
    /// View of `width × height` screen pixels centered on chunk coordinate `(x, z)`.
    pub fn new(x: f64, z: f64, width: i32, height: i32, scale: i32) -> Self {
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        let width = width.max(1);
        let height = height.max(1);
        let half_w = width as f64 / (2.0 * scale as f64);
        let half_h = height as f64 / (2.0 * scale as f64);
        let x0 = x - half_w;
        let x1 = x + half_w;
        let z0 = z - half_h;
        let z1 = z + half_h;
        ChunkView {
            x,
            z,
            width,
            height,
            scale,
            chunk_scale: scale,
            x0,
            z0,
            x1,
            z1,
            px0: x0.floor() as i32,
            pz0: z0.floor() as i32,
            px1: x1.floor() as i32,
            pz1: z1.floor() as i32,
        }
    }

    pub fn with_center(&self, x: f64, z: f64) -> Self {
        ChunkView::new(x, z, self.width, self.height, self.scale)
    }

    pub fn with_scale(&self, scale: i32) -> Self {
        ChunkView::new(self.x, self.z, self.width, self.height, scale)
    }

    pub fn with_size(&self, width: i32, height: i32) -> Self {
        ChunkView::new(self.x, self.z, width, height, self.scale)
    }

    /// Pan by a number of screen pixels.
    pub fn panned(&self, dx_px: i32, dz_px: i32) -> Self {
        let s = self.scale as f64;
        self.with_center(self.x + dx_px as f64 / s, self.z + dz_px as f64 / s)
    }

    #[inline]
    pub fn chunks_wide(&self) -> i32 {
        self.px1 - self.px0 + 1
    }

    #[inline]
    pub fn chunks_high(&self) -> i32 {
        self.pz1 - self.pz0 + 1
    }

    #[inline]
    pub fn contains(&self, pos: ChunkPos) -> bool {
        pos.x >= self.px0 && pos.x <= self.px1 && pos.z >= self.pz0 && pos.z <= self.pz1
    }

    /// Pixel offset of the screen origin inside a grid-aligned map buffer.
    #[inline]
    pub fn buffer_offset(&self) -> (i32, i32) {
        let s = self.scale as f64;
        let cs = i64::from(self.chunk_scale);
        (
            ((self.x0 * s).floor() as i64 - i64::from(self.px0) * cs) as i32,
            ((self.z0 * s).floor() as i64 - i64::from(self.pz0) * cs) as i32,
        )
    }

    /// Chunk under the screen pixel `(sx, sy)`.
    pub fn chunk_at_screen(&self, sx: i32, sy: i32) -> ChunkPos {
        let (ox, oz) = self.buffer_offset();
        ChunkPos::new(
            self.px0 + (sx + ox).div_euclid(self.chunk_scale),
            self.pz0 + (sy + oz).div_euclid(self.chunk_scale),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_view_extent() {
        let v = ChunkView::new(0.0, 0.0, 320, 160, 16);
        assert_eq!((v.x0, v.x1), (-10.0, 10.0));
        assert_eq!((v.z0, v.z1), (-5.0, 5.0));
        assert_eq!((v.px0, v.px1, v.pz0, v.pz1), (-10, 10, -5, 5));
        assert_eq!(v.buffer_offset(), (0, 0));
    }

    #[test]
    fn fractional_origin_offsets_buffer() {
        let v = ChunkView::new(0.25, 0.0, 32, 32, 16);
        assert_eq!(v.px0, -1);
        // x0 = -0.75 → screen origin is 4px into chunk -1
        assert_eq!(v.buffer_offset().0, 4);
        assert_eq!(v.chunk_at_screen(0, 0), ChunkPos::new(-1, -1));
        assert_eq!(v.chunk_at_screen(12, 16), ChunkPos::new(0, 0));
    }

    #[test]
    fn far_view_offset_fits() {
        // 1e7 chunks at 256 px each is past i32 pixels
        let v = ChunkView::new(1.0e7 + 0.25, 0.0, 32, 32, 256);
        assert_eq!(v.px0, 10_000_000);
        assert_eq!(v.buffer_offset(), (48, 240));
        assert_eq!(v.chunk_at_screen(0, 0), ChunkPos::new(10_000_000, -1));
    }

    #[test]
    fn scale_is_clamped() {
        assert_eq!(ChunkView::new(0.0, 0.0, 10, 10, 0).scale, MIN_SCALE);
        assert_eq!(ChunkView::new(0.0, 0.0, 10, 10, 10_000).scale, MAX_SCALE);
    }

    #[test]
    fn pan_moves_center_in_chunk_units() {
        let v = ChunkView::new(0.0, 0.0, 100, 100, 32).panned(64, -32);
        assert_eq!((v.x, v.z), (2.0, -1.0));
    }
}
