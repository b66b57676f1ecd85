use chunkmap_blocks::Block;
use chunkmap_geom::ChunkPos;
use chunkmap_world::{CHUNK_HEIGHT, Chunk};
use proptest::prelude::*;

fn edit() -> impl Strategy<Value = (i32, i32, i32, Block)> {
    (
        0i32..4,
        0i32..CHUNK_HEIGHT,
        0i32..4,
        prop_oneof![Just(Block::AIR), Just(Block::STONE), Just(Block::DIAMOND_ORE)],
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // The heightmap always names the topmost non-air block, through any
    // sequence of placements and removals.
    #[test]
    fn heightmap_tracks_top_block(edits in prop::collection::vec(edit(), 0..60)) {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        for &(x, y, z, b) in &edits {
            prop_assert!(chunk.set_block(x, y, z, b));
        }
        for z in 0..4 {
            for x in 0..4 {
                let expected = (0..CHUNK_HEIGHT).rev().find(|&y| !chunk.block_at(x, y, z).is_air());
                prop_assert_eq!(chunk.height_at(x, z), expected);
                prop_assert_eq!(
                    chunk.column_contains(x, z, Block::DIAMOND_ORE),
                    (0..CHUNK_HEIGHT).any(|y| chunk.block_at(x, y, z) == Block::DIAMOND_ORE)
                );
            }
        }
    }
}
