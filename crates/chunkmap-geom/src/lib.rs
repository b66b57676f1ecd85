//! Minimal coordinate and color types shared by the map crates.
#![forbid(unsafe_code)]

use core::fmt;
use core::ops::{Add, Sub};

/// Number of blocks along each horizontal edge of a chunk.
pub const CHUNK_WIDTH: i32 = 16;

/// A world position measured in blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Integer block Y containing this position.
    #[inline]
    pub fn block_y(self) -> i32 {
        self.y.floor() as i32
    }

    /// Chunk column containing this position.
    #[inline]
    pub fn chunk(self) -> ChunkPos {
        ChunkPos::from_block(self.x.floor() as i32, self.z.floor() as i32)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Horizontal chunk grid coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the block at `(bx, bz)`.
    #[inline]
    pub fn from_block(bx: i32, bz: i32) -> Self {
        Self {
            x: bx.div_euclid(CHUNK_WIDTH),
            z: bz.div_euclid(CHUNK_WIDTH),
        }
    }

    /// World block coordinate of this chunk's north-west corner.
    #[inline]
    pub fn origin_block(self) -> (i32, i32) {
        (self.x * CHUNK_WIDTH, self.z * CHUNK_WIDTH)
    }
}

impl From<(i32, i32)> for ChunkPos {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkPos> for (i32, i32) {
    fn from(value: ChunkPos) -> Self {
        (value.x, value.z)
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

/// Packed `0xAARRGGBB` color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    pub const TRANSPARENT: Argb = Argb(0x0000_0000);
    pub const BLACK: Argb = Argb(0xFF00_0000);
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);
    pub const RED: Argb = Argb(0xFFFF_0000);

    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Argb((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    #[inline]
    pub const fn opaque(rgb: u32) -> Self {
        Argb(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Argb((self.0 & 0x00FF_FFFF) | (a as u32) << 24)
    }

    /// Multiply RGB by `factor` (alpha unchanged), saturating per channel.
    pub fn shade(self, factor: f32) -> Self {
        let f = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Argb::from_rgba(f(self.r()), f(self.g()), f(self.b()), self.a())
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        let v = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Argb::opaque(v)),
            8 => Some(Argb(v)),
            _ => None,
        }
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_of_negative_block_rounds_down() {
        assert_eq!(ChunkPos::from_block(-1, -16), ChunkPos::new(-1, -1));
        assert_eq!(ChunkPos::from_block(-17, 15), ChunkPos::new(-2, 0));
        assert_eq!(ChunkPos::from_block(16, 31), ChunkPos::new(1, 1));
    }

    #[test]
    fn argb_channels() {
        let c = Argb(0x75FF_0000);
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (0x75, 0xFF, 0, 0));
        assert_eq!(Argb::from_rgba(1, 2, 3, 4), Argb(0x0401_0203));
    }

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Argb::parse_hex("#ff0000"), Some(Argb::RED));
        assert_eq!(Argb::parse_hex("80FF0000"), Some(Argb(0x80FF_0000)));
        assert_eq!(Argb::parse_hex("#fff"), None);
        assert_eq!(Argb::parse_hex("zzzzzz"), None);
    }
}
