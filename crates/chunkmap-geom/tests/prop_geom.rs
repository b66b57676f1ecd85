use chunkmap_geom::{Argb, CHUNK_WIDTH, ChunkPos, Vec3};
use proptest::prelude::*;

fn block_coord() -> impl Strategy<Value = i32> {
    -30_000_000i32..=30_000_000
}

proptest! {
    // Every block lands in exactly the chunk whose origin is at or below it.
    #[test]
    fn from_block_contains_block(bx in block_coord(), bz in block_coord()) {
        let pos = ChunkPos::from_block(bx, bz);
        let (ox, oz) = pos.origin_block();
        prop_assert!(ox <= bx && bx < ox + CHUNK_WIDTH);
        prop_assert!(oz <= bz && bz < oz + CHUNK_WIDTH);
    }

    #[test]
    fn vec3_chunk_matches_floor(x in -1.0e6f64..1.0e6, z in -1.0e6f64..1.0e6) {
        let v = Vec3::new(x, 64.0, z);
        prop_assert_eq!(v.chunk(), ChunkPos::from_block(x.floor() as i32, z.floor() as i32));
    }

    #[test]
    fn with_alpha_keeps_rgb(rgb in 0u32..=0x00FF_FFFF, a in any::<u8>()) {
        let c = Argb::opaque(rgb).with_alpha(a);
        prop_assert_eq!(c.a(), a);
        prop_assert_eq!(c.0 & 0x00FF_FFFF, rgb);
    }

    #[test]
    fn hex_display_parses_back(v in any::<u32>()) {
        let c = Argb(v);
        prop_assert_eq!(Argb::parse_hex(&c.to_string()), Some(c));
    }
}
