use std::collections::BTreeMap;

use serde::Deserialize;

/// Palette overrides and additions.
///
/// ```toml
/// [colors]
/// stone = "#707070"
///
/// [[blocks]]
/// name = "amethyst"
/// color = "#9A5CC6"
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaletteConfig {
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub id: Option<u16>,
    pub color: String,
}
