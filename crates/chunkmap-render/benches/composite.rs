use std::hint::black_box;
use std::sync::Arc;

use chunkmap_blocks::{Block, BlockRegistry};
use chunkmap_buffer::{Bitmap, ChunkView, MapBuffer};
use chunkmap_geom::{ChunkPos, Vec3};
use chunkmap_render::{HudContext, MiscImages, WorldRenderer};
use chunkmap_world::{ChunkSelectionTracker, FlatWorldBuilder, LayerRenderer, RenderMode, SurfaceRenderer};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_composite(c: &mut Criterion) {
    let reg = Arc::new(BlockRegistry::builtin());
    let world = FlatWorldBuilder::new()
        .radius(8)
        .place(3, 12, 3, Block::DIAMOND_ORE)
        .player(Vec3::new(10.0, 64.0, 10.0))
        .spawn(Vec3::new(0.0, 64.0, 0.0))
        .build();
    let selection = ChunkSelectionTracker::new();
    selection.select_region(ChunkPos::new(-2, -2), ChunkPos::new(2, 2));
    let view = ChunkView::new(0.0, 0.0, 800, 600, 32);

    let surface = SurfaceRenderer::new(reg.clone());
    let layer = LayerRenderer::new(reg, 12);

    let wr = WorldRenderer::new();
    let mut buf = MapBuffer::new(view);
    c.bench_function("surface_800x600", |b| {
        b.iter(|| black_box(wr.render(&world, &mut buf, &surface, &selection)))
    });

    let highlighted = WorldRenderer::new();
    highlighted.set_highlight_enabled(true);
    c.bench_function("layer_highlight_800x600", |b| {
        b.iter(|| black_box(highlighted.render(&world, &mut buf, &layer, &selection)))
    });

    let mut frame = Bitmap::new(view.width, view.height);
    let hud = HudContext {
        loading: true,
        mode: RenderMode::Surface,
    };
    c.bench_function("hud_800x600", |b| {
        b.iter(|| black_box(wr.render_hud(&world, &hud, &view, &mut frame, MiscImages::shared())))
    });
}

criterion_group!(benches, bench_composite);
criterion_main!(benches);
