use chunkmap_geom::{Argb, ChunkPos};

use crate::bitmap::Bitmap;
use crate::view::ChunkView;

/// Text settings recorded on a buffer for whoever draws captions onto it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Font {
    pub family: String,
    pub bold: bool,
    pub size: u16,
}

impl Font {
    pub fn new(family: impl Into<String>, bold: bool, size: u16) -> Self {
        Self {
            family: family.into(),
            bold,
            size,
        }
    }
}

/// Off-screen map image aligned to the chunk grid of its view.
///
/// Pixel `(0, 0)` is the north-west corner of chunk `(px0, pz0)`; the buffer
/// spans every chunk column and row that intersects the view.
#[derive(Clone, Debug)]
pub struct MapBuffer {
    view: ChunkView,
    image: Bitmap,
    font: Option<Font>,
}

impl MapBuffer {
    pub fn new(view: ChunkView) -> Self {
        let (w, h) = Self::dims_for(&view);
        Self {
            view,
            image: Bitmap::filled(w, h, Argb::BLACK),
            font: None,
        }
    }

    fn dims_for(view: &ChunkView) -> (i32, i32) {
        (
            view.chunks_wide() * view.chunk_scale,
            view.chunks_high() * view.chunk_scale,
        )
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.image.height()
    }

    #[inline]
    pub fn view(&self) -> &ChunkView {
        &self.view
    }

    /// Switch to a new view. Contents are kept only when the pixel
    /// dimensions are unchanged; callers redraw after every view change.
    pub fn set_view(&mut self, view: ChunkView) {
        let (w, h) = Self::dims_for(&view);
        if w != self.image.width() || h != self.image.height() {
            self.image.reset(w, h, Argb::BLACK);
        }
        self.view = view;
    }

    #[inline]
    pub fn image(&self) -> &Bitmap {
        &self.image
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Argb> {
        self.image.pixel(x, y)
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }

    pub fn fill(&mut self, color: Argb) {
        self.image.fill(color);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Argb) {
        self.image.fill_rect(x, y, w, h, color);
    }

    pub fn fill_rect_alpha(&mut self, x: i32, y: i32, w: i32, h: i32, color: Argb) {
        self.image.fill_rect_alpha(x, y, w, h, color);
    }

    pub fn draw_image(&mut self, src: &Bitmap, x: i32, y: i32, w: i32, h: i32) {
        self.image.draw_image(src, x, y, w, h);
    }

    /// Buffer pixel of the north-west corner of chunk `(x, z)`.
    #[inline]
    pub fn cell_origin(&self, x: i32, z: i32) -> (i32, i32) {
        (
            self.view.chunk_scale * (x - self.view.px0),
            self.view.chunk_scale * (z - self.view.pz0),
        )
    }

    /// Visible chunk positions, row by row from the north-west corner.
    pub fn chunks(&self) -> ChunkIter {
        ChunkIter::new(&self.view)
    }

    /// Copy the visible window of this buffer into a screen-sized frame.
    pub fn present(&self, frame: &mut Bitmap) {
        let (ox, oz) = self.view.buffer_offset();
        frame.copy_from(&self.image, -ox, -oz);
    }
}

/// Row-major walk over `px0..=px1 × pz0..=pz1`.
#[derive(Clone, Debug)]
pub struct ChunkIter {
    px0: i32,
    px1: i32,
    pz1: i32,
    x: i32,
    z: i32,
}

impl ChunkIter {
    fn new(view: &ChunkView) -> Self {
        Self {
            px0: view.px0,
            px1: view.px1,
            pz1: view.pz1,
            x: view.px0,
            z: view.pz0,
        }
    }
}

impl Iterator for ChunkIter {
    type Item = ChunkPos;

    fn next(&mut self) -> Option<ChunkPos> {
        if self.z > self.pz1 || self.px0 > self.px1 {
            return None;
        }
        let pos = ChunkPos::new(self.x, self.z);
        if self.x == self.px1 {
            self.x = self.px0;
            self.z += 1;
        } else {
            self.x += 1;
        }
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.z > self.pz1 || self.px0 > self.px1 {
            return (0, Some(0));
        }
        let w = (self.px1 - self.px0 + 1) as usize;
        let rows_after = (self.pz1 - self.z) as usize;
        let n = rows_after * w + (self.px1 - self.x + 1) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ChunkIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_covers_every_visible_chunk() {
        let view = ChunkView::new(0.5, 0.5, 40, 24, 16);
        let buf = MapBuffer::new(view);
        assert_eq!(buf.width(), view.chunks_wide() * 16);
        assert_eq!(buf.height(), view.chunks_high() * 16);
        assert_eq!(buf.chunks().len(), (view.chunks_wide() * view.chunks_high()) as usize);
    }

    #[test]
    fn iteration_is_row_major() {
        let view = ChunkView::new(0.0, 0.0, 32, 16, 16);
        let buf = MapBuffer::new(view);
        let got: Vec<(i32, i32)> = buf.chunks().map(Into::into).collect();
        assert_eq!(
            got,
            vec![
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (0, 0),
                (1, 0),
            ]
        );
    }

    #[test]
    fn set_view_resizes_only_on_dimension_change() {
        let view = ChunkView::new(0.0, 0.0, 32, 32, 16);
        let mut buf = MapBuffer::new(view);
        buf.fill(Argb::WHITE);
        buf.set_view(view.with_center(3.0, 3.0));
        assert_eq!(buf.pixel(0, 0), Some(Argb::WHITE));
        buf.set_view(view.with_scale(32));
        assert_eq!(buf.pixel(0, 0), Some(Argb::BLACK));
    }

    #[test]
    fn present_applies_sub_chunk_offset() {
        let view = ChunkView::new(0.25, 0.0, 32, 32, 16);
        let mut buf = MapBuffer::new(view);
        let (cx, cz) = buf.cell_origin(0, 0);
        buf.fill_rect(cx, cz, 16, 16, Argb::RED);
        let mut frame = Bitmap::new(32, 32);
        buf.present(&mut frame);
        // chunk 0 starts at 16 - 4 on screen
        assert_eq!(frame.pixel(11, 16), Some(Argb::BLACK));
        assert_eq!(frame.pixel(12, 16), Some(Argb::RED));
    }
}
