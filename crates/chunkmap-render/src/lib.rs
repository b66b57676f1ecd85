//! Top-down map compositing: chunk tiles, highlight and selection overlays,
//! and the player/spawn HUD.
#![forbid(unsafe_code)]

mod hud;
pub mod icons;
mod map;
mod state;


pub use hud::{HudContext, HudReport, Marker, MarkerRect, marker_placement};
pub use icons::MiscImages;
pub use map::{BACKGROUND_COLOR, FrameStats, SELECTION_COLOR, placeholder_font};
pub use state::{HighlightConfig, MapUpdate, WorldRenderer};
