use chunkmap_geom::Argb;

/// Source-over blend of one 8-bit channel.
/// Uses `(x + 1 + (x >> 8)) >> 8` in place of `x / 255`.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Composite `src` over `dst`.
#[inline]
pub fn blend(src: Argb, dst: Argb) -> Argb {
    match src.a() {
        0 => dst,
        255 => src,
        a => {
            let a16 = a as u16;
            let inv = 255 - a16;
            let da = dst.a() as u16;
            let out_a = a16 + ((da * inv + 127) / 255);
            Argb::from_rgba(
                blend_channel(src.r(), dst.r(), a16),
                blend_channel(src.g(), dst.g(), a16),
                blend_channel(src.b(), dst.b(), a16),
                out_a.min(255) as u8,
            )
        }
    }
}

/// ARGB image with clipped drawing primitives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: i32,
    height: i32,
    pixels: Vec<Argb>,
}

impl Bitmap {
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Argb::TRANSPARENT)
    }

    pub fn filled(width: i32, height: i32, color: Argb) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(i32, i32) -> Argb) -> Self {
        let mut bmp = Self::new(width, height);
        for y in 0..bmp.height {
            for x in 0..bmp.width {
                let i = bmp.index(x, y);
                bmp.pixels[i] = f(x, y);
            }
        }
        bmp
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Argb> {
        self.in_bounds(x, y).then(|| self.pixels[self.index(x, y)])
    }

    /// Resize, discarding contents.
    pub fn reset(&mut self, width: i32, height: i32, color: Argb) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.pixels.clear();
        self.pixels
            .resize((self.width * self.height) as usize, color);
    }

    pub fn fill(&mut self, color: Argb) {
        self.pixels.fill(color);
    }

    /// Clip `(x, y, w, h)` to the bitmap; `None` when nothing is left.
    fn clip(&self, x: i32, y: i32, w: i32, h: i32) -> Option<(i32, i32, i32, i32)> {
        if w <= 0 || h <= 0 {
            return None;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Argb) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        for yy in y0..y1 {
            let row = self.index(x0, yy);
            self.pixels[row..row + (x1 - x0) as usize].fill(color);
        }
    }

    pub fn fill_rect_alpha(&mut self, x: i32, y: i32, w: i32, h: i32, color: Argb) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        for yy in y0..y1 {
            let row = self.index(x0, yy);
            for p in &mut self.pixels[row..row + (x1 - x0) as usize] {
                *p = blend(color, *p);
            }
        }
    }

    /// Draw `src` scaled to `w × h` at `(x, y)`, nearest-neighbour, alpha-blended.
    pub fn draw_image(&mut self, src: &Bitmap, x: i32, y: i32, w: i32, h: i32) {
        if src.width == 0 || src.height == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        for yy in y0..y1 {
            let sy = ((yy - y) as i64 * src.height as i64 / h as i64) as i32;
            for xx in x0..x1 {
                let sx = ((xx - x) as i64 * src.width as i64 / w as i64) as i32;
                let s = src.pixels[src.index(sx, sy)];
                let i = self.index(xx, yy);
                self.pixels[i] = blend(s, self.pixels[i]);
            }
        }
    }

    /// Copy `src` unblended with its origin at `(x, y)`.
    pub fn copy_from(&mut self, src: &Bitmap, x: i32, y: i32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, src.width, src.height) else {
            return;
        };
        let n = (x1 - x0) as usize;
        for yy in y0..y1 {
            let d = self.index(x0, yy);
            let s = src.index(x0 - x, yy - y);
            self.pixels[d..d + n].copy_from_slice(&src.pixels[s..s + n]);
        }
    }

    /// Same image with every pixel's alpha scaled by `factor`.
    pub fn faded(&self, factor: f32) -> Bitmap {
        let mut out = self.clone();
        for p in &mut out.pixels {
            let a = (p.a() as f32 * factor).clamp(0.0, 255.0) as u8;
            *p = p.with_alpha(a);
        }
        out
    }

    /// RGBA8 bytes, row-major, for texture upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            out.extend_from_slice(&[p.r(), p.g(), p.b(), p.a()]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_extremes() {
        let dst = Argb::opaque(0x123456);
        assert_eq!(blend(Argb::TRANSPARENT, dst), dst);
        assert_eq!(blend(Argb::RED, dst), Argb::RED);
    }

    #[test]
    fn selection_red_over_white() {
        let out = blend(Argb(0x75FF_0000), Argb::WHITE);
        assert_eq!(out.a(), 255);
        assert_eq!(out.r(), 255);
        // 0x75 = 117: white keeps (255 - 117) / 255 of its green and blue
        assert!((137..=139).contains(&out.g()));
        assert_eq!(out.g(), out.b());
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut bmp = Bitmap::filled(4, 4, Argb::BLACK);
        bmp.fill_rect(-2, 2, 4, 10, Argb::WHITE);
        assert_eq!(bmp.pixel(0, 2), Some(Argb::WHITE));
        assert_eq!(bmp.pixel(1, 3), Some(Argb::WHITE));
        assert_eq!(bmp.pixel(2, 2), Some(Argb::BLACK));
        assert_eq!(bmp.pixel(0, 1), Some(Argb::BLACK));
        assert_eq!(bmp.pixel(0, 4), None);
    }

    #[test]
    fn negative_extent_draws_nothing() {
        let mut bmp = Bitmap::filled(4, 4, Argb::BLACK);
        bmp.fill_rect(0, 0, -3, 2, Argb::WHITE);
        bmp.fill_rect_alpha(0, 0, 2, 0, Argb::WHITE);
        assert!(bmp.pixels().iter().all(|p| *p == Argb::BLACK));
    }

    #[test]
    fn draw_image_scales_up() {
        let src = Bitmap::from_fn(2, 1, |x, _| if x == 0 { Argb::RED } else { Argb::WHITE });
        let mut dst = Bitmap::filled(4, 2, Argb::BLACK);
        dst.draw_image(&src, 0, 0, 4, 2);
        assert_eq!(dst.pixel(1, 1), Some(Argb::RED));
        assert_eq!(dst.pixel(2, 0), Some(Argb::WHITE));
    }

    #[test]
    fn copy_from_offsets_source() {
        let src = Bitmap::from_fn(3, 3, |x, y| Argb::opaque((y * 3 + x) as u32));
        let mut dst = Bitmap::filled(2, 2, Argb::BLACK);
        dst.copy_from(&src, -1, -1);
        assert_eq!(dst.pixel(0, 0), Some(Argb::opaque(4)));
        assert_eq!(dst.pixel(1, 1), Some(Argb::opaque(8)));
    }
}
