use core::fmt;

use chunkmap_geom::Argb;

/// Block type identifier as stored in chunk data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block(pub u16);

impl Block {
    pub const AIR: Block = Block(0);
    pub const STONE: Block = Block(1);
    pub const GRASS: Block = Block(2);
    pub const DIRT: Block = Block(3);
    pub const SAND: Block = Block(4);
    pub const GRAVEL: Block = Block(5);
    pub const WATER: Block = Block(6);
    pub const LAVA: Block = Block(7);
    pub const BEDROCK: Block = Block(8);
    pub const COAL_ORE: Block = Block(9);
    pub const IRON_ORE: Block = Block(10);
    pub const GOLD_ORE: Block = Block(11);
    pub const DIAMOND_ORE: Block = Block(12);
    pub const REDSTONE_ORE: Block = Block(13);
    pub const LOG: Block = Block(14);
    pub const LEAVES: Block = Block(15);
    pub const SNOW: Block = Block(16);
    pub const CLAY: Block = Block(17);

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: Block,
    pub name: String,
    pub color: Argb,
}

/// Built-in palette: `(name, block, map color)`.
pub(crate) const BUILTIN: &[(&str, Block, u32)] = &[
    ("air", Block::AIR, 0x0000_0000),
    ("stone", Block::STONE, 0xFF7D_7D7D),
    ("grass", Block::GRASS, 0xFF5F_9F35),
    ("dirt", Block::DIRT, 0xFF86_6043),
    ("sand", Block::SAND, 0xFFDB_D3A0),
    ("gravel", Block::GRAVEL, 0xFF85_7F7E),
    ("water", Block::WATER, 0xFF2F_43F4),
    ("lava", Block::LAVA, 0xFFD4_5A12),
    ("bedrock", Block::BEDROCK, 0xFF33_3333),
    ("coal_ore", Block::COAL_ORE, 0xFF4A_4A4A),
    ("iron_ore", Block::IRON_ORE, 0xFF88_8279),
    ("gold_ore", Block::GOLD_ORE, 0xFF8F_8C7D),
    ("diamond_ore", Block::DIAMOND_ORE, 0xFF81_8C8F),
    ("redstone_ore", Block::REDSTONE_ORE, 0xFF84_6B6B),
    ("log", Block::LOG, 0xFF66_5132),
    ("leaves", Block::LEAVES, 0xFF3A_7A1E),
    ("snow", Block::SNOW, 0xFFF0_FBFB),
    ("clay", Block::CLAY, 0xFF9E_A4B0),
];
