use std::collections::HashMap;
use std::error::Error;

use chunkmap_geom::Argb;

use super::config::PaletteConfig;
use super::types::{BUILTIN, Block, BlockType};

/// Color drawn for ids the registry does not know.
pub const UNKNOWN_COLOR: Argb = Argb(0xFFFF_00FF);

#[derive(Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, Block>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BlockRegistry {
    /// Registry holding only the built-in palette.
    pub fn builtin() -> Self {
        let mut reg = BlockRegistry {
            blocks: Vec::with_capacity(BUILTIN.len()),
            by_name: HashMap::with_capacity(BUILTIN.len()),
        };
        for &(name, id, color) in BUILTIN {
            debug_assert_eq!(id.0 as usize, reg.blocks.len());
            reg.by_name.insert(name.to_string(), id);
            reg.blocks.push(BlockType {
                id,
                name: name.to_string(),
                color: Argb(color),
            });
        }
        reg
    }

    #[inline]
    pub fn get(&self, id: Block) -> Option<&BlockType> {
        self.blocks.get(id.0 as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<Block> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: Block) -> &str {
        self.get(id).map(|t| t.name.as_str()).unwrap_or("unknown")
    }

    /// Map color for `id`; unknown ids get [`UNKNOWN_COLOR`].
    #[inline]
    pub fn color(&self, id: Block) -> Argb {
        self.get(id).map(|t| t.color).unwrap_or(UNKNOWN_COLOR)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: PaletteConfig = toml::from_str(toml_str)?;
        Self::builtin().with_config(&cfg)
    }

    /// Apply color overrides, then register additional blocks.
    pub fn with_config(mut self, cfg: &PaletteConfig) -> Result<Self, Box<dyn Error>> {
        for (name, hex) in &cfg.colors {
            let id = self
                .id_by_name(name)
                .ok_or_else(|| format!("palette override for unknown block '{name}'"))?;
            let color = parse_color(name, hex)?;
            self.blocks[id.0 as usize].color = color;
        }
        for def in &cfg.blocks {
            let color = parse_color(&def.name, &def.color)?;
            let next = self.blocks.len() as u16;
            let id = Block(def.id.unwrap_or(next));
            if id.0 < next {
                let old = std::mem::replace(
                    &mut self.blocks[id.0 as usize],
                    BlockType {
                        id,
                        name: def.name.clone(),
                        color,
                    },
                );
                self.by_name.remove(&old.name);
            } else if id.0 == next {
                self.blocks.push(BlockType {
                    id,
                    name: def.name.clone(),
                    color,
                });
            } else {
                return Err(format!(
                    "block '{}' has id {} but the next free id is {}",
                    def.name, id.0, next
                )
                .into());
            }
            self.by_name.insert(def.name.clone(), id);
        }
        Ok(self)
    }
}

fn parse_color(name: &str, hex: &str) -> Result<Argb, Box<dyn Error>> {
    Argb::parse_hex(hex).ok_or_else(|| format!("invalid color '{hex}' for block '{name}'").into())
}
