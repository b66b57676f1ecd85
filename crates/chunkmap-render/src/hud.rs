use chunkmap_buffer::{Bitmap, ChunkView};
use chunkmap_geom::Vec3;
use chunkmap_world::{RenderMode, World};

use crate::icons::MiscImages;
use crate::state::WorldRenderer;

const CLOCK_SIZE: i32 = 32;
const MARKER_MIN: i32 = 8;
const MARKER_MAX: i32 = 16;

/// Application state the overlay depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudContext {
    /// Chunks are still being loaded in the background.
    pub loading: bool,
    pub mode: RenderMode,
}

/// Square screen area of a marker icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerRect {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
    pub rect: MarkerRect,
    /// Drawn with the solid icon rather than the faded one.
    pub same_layer: bool,
}

/// What one `render_hud` call drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HudReport {
    pub loading_icon: bool,
    pub player: Option<Marker>,
    pub spawn: Option<Marker>,
}

/// Screen rectangle for a marker at world block position `(wx, wz)`.
///
/// The icon is `2 × (scale / 16)` pixels, kept within `8..=16`, centered on
/// the position and then pushed back inside the view.
pub fn marker_placement(view: &ChunkView, wx: f64, wz: f64) -> MarkerRect {
    let scale = view.scale as f64;
    let block_scale = scale / 16.0;
    let pw = ((block_scale * 2.0) as i32).clamp(MARKER_MIN, MARKER_MAX);
    // Far from the origin these pixel coordinates exceed i32.
    let place = |w: f64, origin: f64, extent: i32| -> i32 {
        let p = (w * block_scale).floor() as i64;
        let pp = p.saturating_sub((origin * scale).floor() as i64);
        let top_left = pp.saturating_sub(i64::from(pw / 2));
        // the result lies between min(0, extent - pw) and extent - pw
        top_left.max(0).min(i64::from(extent - pw)) as i32
    };
    MarkerRect {
        x: place(wx, view.x0, view.width),
        y: place(wz, view.z0, view.height),
        size: pw,
    }
}

fn draw_marker(
    target: &mut Bitmap,
    view: &ChunkView,
    pos: Vec3,
    same_layer: bool,
    solid: &Bitmap,
    ghost: &Bitmap,
) -> Marker {
    let rect = marker_placement(view, pos.x, pos.z);
    let icon = if same_layer { solid } else { ghost };
    target.draw_image(icon, rect.x, rect.y, rect.size, rect.size);
    Marker { rect, same_layer }
}

impl WorldRenderer {
    /// Draw the loading indicator and the player and spawn markers onto a
    /// screen-sized `target` showing `view`.
    pub fn render_hud(
        &self,
        world: &World,
        hud: &HudContext,
        view: &ChunkView,
        target: &mut Bitmap,
        icons: &MiscImages,
    ) -> HudReport {
        let mut report = HudReport::default();
        if hud.loading {
            target.draw_image(
                &icons.clock,
                view.width - CLOCK_SIZE,
                0,
                CLOCK_SIZE,
                CLOCK_SIZE,
            );
            report.loading_icon = true;
        }
        report.player = self.render_player(world, target, view, hud.mode, icons);
        report.spawn = self.render_spawn(world, target, view, hud.mode, icons);
        log::trace!(target: "hud", "{report:?}");
        report
    }

    pub fn render_player(
        &self,
        world: &World,
        target: &mut Bitmap,
        view: &ChunkView,
        mode: RenderMode,
        icons: &MiscImages,
    ) -> Option<Marker> {
        let pos = world.player_pos()?;
        let same_layer = mode.same_layer(pos.block_y());
        Some(draw_marker(
            target,
            view,
            pos,
            same_layer,
            &icons.face,
            &icons.face_ghost,
        ))
    }

    pub fn render_spawn(
        &self,
        world: &World,
        target: &mut Bitmap,
        view: &ChunkView,
        mode: RenderMode,
        icons: &MiscImages,
    ) -> Option<Marker> {
        if !world.have_spawn_pos() {
            return None;
        }
        let pos = world.spawn_pos()?;
        let same_layer = mode.same_layer(world.spawn_pos_y());
        Some(draw_marker(
            target,
            view,
            pos,
            same_layer,
            &icons.home,
            &icons.home_ghost,
        ))
    }
}
