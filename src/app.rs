use std::error::Error;
use std::sync::Arc;

use chunkmap_blocks::BlockRegistry;
use chunkmap_buffer::{Bitmap, ChunkView, MapBuffer};
use chunkmap_geom::ChunkPos;
use chunkmap_render::{FrameStats, HudContext, HudReport, MiscImages, WorldRenderer, placeholder_font};
use chunkmap_world::tile::renderer_for;
use chunkmap_world::{ChunkRenderer, ChunkSelectionTracker, RenderMode, World};

use crate::config::ViewerConfig;
use crate::loader::ChunkLoader;

/// Viewer state driven by the frame loop, headless or windowed.
pub struct App {
    renderer: Arc<WorldRenderer>,
    registry: Arc<BlockRegistry>,
    world: World,
    buffer: MapBuffer,
    frame: Bitmap,
    selection: ChunkSelectionTracker,
    tiles: Box<dyn ChunkRenderer>,
    loader: Option<ChunkLoader>,
}

impl App {
    /// Build the app from `cfg` and start streaming its world in the background.
    pub fn new(
        cfg: &ViewerConfig,
        registry: Arc<BlockRegistry>,
        renderer: Arc<WorldRenderer>,
    ) -> Result<Self, Box<dyn Error>> {
        let builder = cfg.world_builder(&registry)?;
        let world = builder.build_markers();
        let mode = cfg.mode(world.current_layer());
        let loader = ChunkLoader::spawn(builder, cfg.load_delay())?;
        let mut app = Self::with_world(world, cfg.view(), mode, registry, renderer);
        app.loader = Some(loader);
        app.replace_selection(cfg);
        Ok(app)
    }

    /// App over an already loaded world.
    pub fn with_world(
        world: World,
        view: ChunkView,
        mode: RenderMode,
        registry: Arc<BlockRegistry>,
        renderer: Arc<WorldRenderer>,
    ) -> Self {
        let mut buffer = MapBuffer::new(view);
        buffer.set_font(placeholder_font());
        let mut app = Self {
            renderer,
            tiles: renderer_for(RenderMode::Surface, registry.clone()),
            registry,
            world,
            frame: Bitmap::new(view.width, view.height),
            buffer,
            selection: ChunkSelectionTracker::new(),
            loader: None,
        };
        app.set_mode(mode);
        app
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn selection(&self) -> &ChunkSelectionTracker {
        &self.selection
    }

    pub fn view(&self) -> &ChunkView {
        self.buffer.view()
    }

    /// Last composed screen frame.
    pub fn frame(&self) -> &Bitmap {
        &self.frame
    }

    pub fn mode(&self) -> RenderMode {
        self.tiles.mode()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.as_ref().is_some_and(|l| !l.is_finished())
    }

    /// Pull in chunks delivered by the loader since the last call.
    pub fn pump_loader(&mut self) -> usize {
        let Some(loader) = self.loader.as_mut() else {
            return 0;
        };
        let n = loader.drain_into(&mut self.world);
        if n > 0 {
            log::debug!(
                target: "loader",
                "{} new chunks ({} loaded)",
                n,
                self.world.chunk_count()
            );
        }
        n
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        if let RenderMode::Layer(y) = mode {
            self.world.set_current_layer(y);
        }
        let mode = match mode {
            RenderMode::Layer(_) => RenderMode::Layer(self.world.current_layer()),
            RenderMode::Surface => RenderMode::Surface,
        };
        if mode != self.tiles.mode() {
            log::info!("mode: {}", mode.label());
        }
        self.tiles = renderer_for(mode, self.registry.clone());
    }

    pub fn toggle_mode(&mut self) -> RenderMode {
        let next = match self.tiles.mode() {
            RenderMode::Surface => RenderMode::Layer(self.world.current_layer()),
            RenderMode::Layer(_) => RenderMode::Surface,
        };
        self.set_mode(next);
        self.mode()
    }

    /// Move the current layer up or down. Re-targets the tile renderer
    /// when a layer is on display.
    pub fn step_layer(&mut self, delta: i32) -> i32 {
        let layer = self.world.current_layer() + delta;
        self.world.set_current_layer(layer);
        if let RenderMode::Layer(_) = self.tiles.mode() {
            self.set_mode(RenderMode::Layer(self.world.current_layer()));
        }
        self.world.current_layer()
    }

    pub fn set_view(&mut self, view: ChunkView) {
        if view.width != self.frame.width() || view.height != self.frame.height() {
            self.frame.reset(view.width, view.height, chunkmap_geom::Argb::BLACK);
        }
        self.buffer.set_view(view);
    }

    pub fn pan(&mut self, dx_px: i32, dz_px: i32) {
        let v = self.view().panned(dx_px, dz_px);
        self.set_view(v);
    }

    /// Double (`zoom_in`) or halve the chunk scale.
    pub fn zoom(&mut self, zoom_in: bool) {
        let s = self.view().scale;
        let v = self.view().with_scale(if zoom_in { s * 2 } else { s / 2 });
        self.set_view(v);
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        let v = self.view().with_size(width, height);
        self.set_view(v);
    }

    /// Toggle selection of the chunk under a screen pixel.
    pub fn click(&mut self, sx: i32, sy: i32) -> (ChunkPos, bool) {
        let pos = self.view().chunk_at_screen(sx, sy);
        let selected = self.selection.toggle(pos);
        (pos, selected)
    }

    fn replace_selection(&mut self, cfg: &ViewerConfig) {
        self.selection.clear();
        for pos in cfg.selected_chunks() {
            self.selection.select(pos);
        }
    }

    /// Adopt the parts of a reloaded config the main loop owns.
    pub fn apply_config(&mut self, cfg: &ViewerConfig) {
        let current = *self.view();
        let v = cfg.view();
        self.set_view(
            current
                .with_center(v.x, v.z)
                .with_scale(v.scale),
        );
        if let Some(layer) = cfg.world.current_layer {
            self.world.set_current_layer(layer);
        }
        self.set_mode(cfg.mode(self.world.current_layer()));
        self.replace_selection(cfg);
    }

    /// Compose the map and the HUD into the screen frame.
    pub fn draw_frame(&mut self) -> (FrameStats, HudReport) {
        let stats = self.renderer.render(
            &self.world,
            &mut self.buffer,
            self.tiles.as_ref(),
            &self.selection,
        );
        self.buffer.present(&mut self.frame);
        let hud = HudContext {
            loading: self.is_loading(),
            mode: self.tiles.mode(),
        };
        let report = self.renderer.render_hud(
            &self.world,
            &hud,
            self.buffer.view(),
            &mut self.frame,
            MiscImages::shared(),
        );
        (stats, report)
    }
}
