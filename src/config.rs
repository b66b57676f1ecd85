use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;

use chunkmap_blocks::config::PaletteConfig;
use chunkmap_blocks::{Block, BlockRegistry};
use chunkmap_buffer::ChunkView;
use chunkmap_geom::{Argb, ChunkPos, Vec3};
use chunkmap_render::HighlightConfig;
use chunkmap_world::{FlatWorldBuilder, RenderMode};
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub view: ViewSection,
    pub highlight: HighlightSection,
    pub world: WorldSection,
    pub selection: SelectionSection,
    pub palette: PaletteConfig,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    #[default]
    Surface,
    Layer,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ViewSection {
    /// Center of the view in chunk coordinates.
    pub center: [f64; 2],
    pub width: i32,
    pub height: i32,
    pub scale: i32,
    pub mode: ModeName,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            width: 800,
            height: 600,
            scale: 16,
            mode: ModeName::Surface,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HighlightSection {
    pub enabled: bool,
    pub block: String,
    pub color: String,
}

impl Default for HighlightSection {
    fn default() -> Self {
        Self {
            enabled: false,
            block: "diamond_ore".into(),
            color: "#FF0000".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LayerDef {
    pub block: String,
    pub depth: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlacementDef {
    pub block: String,
    /// World block coordinates `[x, y, z]`.
    pub at: [i32; 3],
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldSection {
    pub radius: i32,
    /// Bottom-up layers; empty keeps the builder's defaults.
    pub layers: Vec<LayerDef>,
    pub placements: Vec<PlacementDef>,
    pub player: Option<[f64; 3]>,
    pub spawn: Option<[f64; 3]>,
    pub current_layer: Option<i32>,
    /// Pause between streamed chunks, to make loading visible.
    pub load_delay_ms: u64,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            radius: 6,
            layers: Vec::new(),
            placements: Vec::new(),
            player: None,
            spawn: None,
            current_layer: None,
            load_delay_ms: 0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SelectionSection {
    pub chunks: Vec<[i32; 2]>,
}

fn block_named(reg: &BlockRegistry, name: &str) -> Result<Block, Box<dyn Error>> {
    reg.id_by_name(name)
        .ok_or_else(|| format!("unknown block '{name}'").into())
}

impl ViewerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Built-in palette with this config's overrides applied.
    pub fn registry(&self) -> Result<BlockRegistry, Box<dyn Error>> {
        BlockRegistry::builtin().with_config(&self.palette)
    }

    pub fn highlight_config(&self, reg: &BlockRegistry) -> Result<HighlightConfig, Box<dyn Error>> {
        let h = &self.highlight;
        let color = Argb::parse_hex(&h.color)
            .ok_or_else(|| format!("invalid highlight color '{}'", h.color))?;
        Ok(HighlightConfig {
            enabled: h.enabled,
            block: block_named(reg, &h.block)?,
            color,
        })
    }

    pub fn world_builder(&self, reg: &BlockRegistry) -> Result<FlatWorldBuilder, Box<dyn Error>> {
        let w = &self.world;
        let mut builder = FlatWorldBuilder::new().radius(w.radius);
        if !w.layers.is_empty() {
            let layers = w
                .layers
                .iter()
                .map(|l| Ok((block_named(reg, &l.block)?, l.depth)))
                .collect::<Result<Vec<_>, Box<dyn Error>>>()?;
            builder = builder.layers(layers);
        }
        for p in &w.placements {
            let [x, y, z] = p.at;
            builder = builder.place(x, y, z, block_named(reg, &p.block)?);
        }
        if let Some([x, y, z]) = w.player {
            builder = builder.player(Vec3::new(x, y, z));
        }
        if let Some([x, y, z]) = w.spawn {
            builder = builder.spawn(Vec3::new(x, y, z));
        }
        if let Some(layer) = w.current_layer {
            builder = builder.current_layer(layer);
        }
        Ok(builder)
    }

    pub fn view(&self) -> ChunkView {
        let v = &self.view;
        ChunkView::new(v.center[0], v.center[1], v.width, v.height, v.scale)
    }

    pub fn mode(&self, current_layer: i32) -> RenderMode {
        match self.view.mode {
            ModeName::Surface => RenderMode::Surface,
            ModeName::Layer => RenderMode::Layer(current_layer),
        }
    }

    pub fn selected_chunks(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.selection.chunks.iter().map(|&[x, z]| ChunkPos::new(x, z))
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.world.load_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = ViewerConfig::from_toml_str("").unwrap();
        let reg = cfg.registry().unwrap();
        let hl = cfg.highlight_config(&reg).unwrap();
        assert_eq!(hl, HighlightConfig::default());
        assert_eq!(cfg.view().width, 800);
        assert_eq!(cfg.mode(12), RenderMode::Surface);
        assert_eq!(cfg.world.radius, 6);
    }

    #[test]
    fn full_config_parses() {
        let cfg = ViewerConfig::from_toml_str(
            r##"
            [view]
            center = [2.5, -1.0]
            width = 640
            height = 480
            scale = 32
            mode = "layer"

            [highlight]
            enabled = true
            block = "gold_ore"
            color = "#C000FF00"

            [world]
            radius = 1
            layers = [{ block = "bedrock", depth = 1 }, { block = "sand", depth = 4 }]
            placements = [{ block = "gold_ore", at = [3, 2, 3] }]
            player = [1.0, 5.0, 1.0]
            current_layer = 2

            [selection]
            chunks = [[0, 0], [1, -1]]

            [palette.colors]
            sand = "#FFFFAA"
        "##,
        )
        .unwrap();
        let reg = cfg.registry().unwrap();
        assert_eq!(reg.color(Block::SAND), Argb::opaque(0xFFFFAA));
        let hl = cfg.highlight_config(&reg).unwrap();
        assert!(hl.enabled);
        assert_eq!(hl.block, Block::GOLD_ORE);
        assert_eq!(hl.color, Argb(0xC000_FF00));
        assert_eq!(cfg.mode(2), RenderMode::Layer(2));

        let world = cfg.world_builder(&reg).unwrap().build();
        assert_eq!(world.chunk_count(), 9);
        assert_eq!(world.current_layer(), 2);
        assert_eq!(world.player_loc_y(), Some(5));
        let chunk = world.get_chunk(ChunkPos::new(0, 0));
        assert_eq!(chunk.block_at(3, 2, 3), Block::GOLD_ORE);
        assert_eq!(chunk.top_block(0, 0), Some((Block::SAND, 4)));
        assert_eq!(cfg.selected_chunks().count(), 2);
    }

    #[test]
    fn unknown_names_are_errors() {
        let cfg = ViewerConfig::from_toml_str("[highlight]\nblock = \"mithril\"").unwrap();
        let reg = cfg.registry().unwrap();
        assert!(cfg.highlight_config(&reg).is_err());

        let cfg =
            ViewerConfig::from_toml_str("[[world.layers]]\nblock = \"cheese\"\ndepth = 3").unwrap();
        assert!(cfg.world_builder(&reg).is_err());

        assert!(ViewerConfig::from_toml_str("[view]\nmode = \"isometric\"").is_err());
    }
}
