//! Marker and status icons, drawn procedurally at 16 × 16.

use std::sync::OnceLock;

use chunkmap_buffer::Bitmap;
use chunkmap_geom::Argb;

const SIZE: i32 = 16;
const GHOST_ALPHA: f32 = 0.4;

const OUTLINE: Argb = Argb(0xFF1E_1E1E);
const HAIR: Argb = Argb(0xFF4A_2F1B);
const SKIN: Argb = Argb(0xFFC6_9C7A);
const EYE_WHITE: Argb = Argb(0xFFF5_F5F5);
const EYE_BLUE: Argb = Argb(0xFF3D_5AC8);
const MOUTH: Argb = Argb(0xFF6B_3B2A);
const ROOF: Argb = Argb(0xFFB3_3A2E);
const WALL: Argb = Argb(0xFFE0_D2B0);
const DOOR: Argb = Argb(0xFF6E_4A2A);
const CLOCK_RIM: Argb = Argb(0xFF8A_6A1C);
const CLOCK_FACE: Argb = Argb(0xFFF2_E6B8);

#[derive(Clone, Debug)]
pub struct MiscImages {
    pub clock: Bitmap,
    pub face: Bitmap,
    pub face_ghost: Bitmap,
    pub home: Bitmap,
    pub home_ghost: Bitmap,
}

impl Default for MiscImages {
    fn default() -> Self {
        Self::new()
    }
}

impl MiscImages {
    pub fn new() -> Self {
        let face = face();
        let home = home();
        Self {
            clock: clock(),
            face_ghost: face.faded(GHOST_ALPHA),
            home_ghost: home.faded(GHOST_ALPHA),
            face,
            home,
        }
    }

    /// Process-wide icon set.
    pub fn shared() -> &'static MiscImages {
        static IMAGES: OnceLock<MiscImages> = OnceLock::new();
        IMAGES.get_or_init(MiscImages::new)
    }
}

fn face() -> Bitmap {
    Bitmap::from_fn(SIZE, SIZE, |x, y| {
        if x == 0 || y == 0 || x == SIZE - 1 || y == SIZE - 1 {
            OUTLINE
        } else if y < 5 {
            HAIR
        } else if (7..9).contains(&y) && ((3..6).contains(&x) || (10..13).contains(&x)) {
            // white on the outer half of each eye
            if x == 3 || x == 4 || x == 11 || x == 12 {
                EYE_WHITE
            } else {
                EYE_BLUE
            }
        } else if (11..13).contains(&y) && (5..11).contains(&x) {
            MOUTH
        } else {
            SKIN
        }
    })
}

fn home() -> Bitmap {
    Bitmap::from_fn(SIZE, SIZE, |x, y| {
        let dx = (x as f32 + 0.5 - SIZE as f32 / 2.0).abs();
        if y < 7 {
            if dx <= y as f32 + 1.0 { ROOF } else { Argb::TRANSPARENT }
        } else if (2..SIZE - 2).contains(&x) && y < SIZE - 1 {
            if (7..9).contains(&x) && y >= 10 {
                DOOR
            } else {
                WALL
            }
        } else {
            Argb::TRANSPARENT
        }
    })
}

fn clock() -> Bitmap {
    let c = (SIZE as f32 - 1.0) / 2.0;
    Bitmap::from_fn(SIZE, SIZE, |x, y| {
        let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt();
        if d > 7.5 {
            Argb::TRANSPARENT
        } else if d > 6.0 {
            CLOCK_RIM
        } else if (x == 7 && (3..=8).contains(&y)) || (y == 8 && (7..=11).contains(&x)) {
            OUTLINE
        } else {
            CLOCK_FACE
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghosts_are_faded_copies() {
        let icons = MiscImages::new();
        for (solid, ghost) in [(&icons.face, &icons.face_ghost), (&icons.home, &icons.home_ghost)] {
            assert_eq!(solid.width(), ghost.width());
            for (s, g) in solid.pixels().iter().zip(ghost.pixels()) {
                assert_eq!(s.0 & 0x00FF_FFFF, g.0 & 0x00FF_FFFF);
                assert!(g.a() <= s.a());
            }
        }
    }

    #[test]
    fn icons_have_visible_pixels() {
        let icons = MiscImages::shared();
        for bmp in [&icons.clock, &icons.face, &icons.home] {
            assert_eq!((bmp.width(), bmp.height()), (SIZE, SIZE));
            assert!(bmp.pixels().iter().any(|p| p.a() == 255));
        }
        // corners of the clock are outside the dial
        assert_eq!(icons.clock.pixel(0, 0), Some(Argb::TRANSPARENT));
    }
}
