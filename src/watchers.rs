use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chunkmap_blocks::BlockRegistry;
use chunkmap_render::WorldRenderer;
use crossbeam_channel::{Receiver, unbounded};

use crate::config::ViewerConfig;

/// Re-read the config at `path` and push its highlight settings into
/// `renderer`. The palette is fixed at startup, so block names resolve
/// against `registry`.
pub fn reload_config(
    path: &Path,
    renderer: &WorldRenderer,
    registry: &BlockRegistry,
) -> Result<ViewerConfig, Box<dyn Error>> {
    let cfg = ViewerConfig::load(path)?;
    let highlight = cfg.highlight_config(registry)?;
    renderer.set_highlight(highlight);
    log::info!(
        target: "watch",
        "highlight {} block={} color={}",
        if highlight.enabled { "on" } else { "off" },
        registry.name(highlight.block),
        highlight.color
    );
    Ok(cfg)
}

/// Watch the config file. Highlight settings are applied on the watcher
/// thread; the reloaded config is forwarded for everything the main loop
/// owns (view, mode, selection).
pub fn spawn_config_watcher(
    path: PathBuf,
    renderer: Arc<WorldRenderer>,
    registry: Arc<BlockRegistry>,
) -> Receiver<ViewerConfig> {
    let (tx, rx) = unbounded::<ViewerConfig>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watched = path.clone();
        match notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            let Ok(event) = res else {
                return;
            };
            match event.kind {
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                    match reload_config(&path, &renderer, &registry) {
                        Ok(cfg) => {
                            let _ = tx.send(cfg);
                        }
                        Err(e) => {
                            log::warn!(target: "watch", "keeping previous config: {}", e);
                        }
                    }
                }
                EventKind::Remove(_) => {
                    log::warn!(target: "watch", "{} removed", path.display());
                }
                _ => {}
            }
        }) {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(watched.as_path(), RecursiveMode::NonRecursive) {
                    log::warn!(target: "watch", "cannot watch {}: {}", watched.display(), e);
                    return;
                }
                log::info!(target: "watch", "watching {}", watched.display());
                loop {
                    std::thread::sleep(std::time::Duration::from_secs(3600));
                }
            }
            Err(e) => log::warn!(target: "watch", "file watcher unavailable: {}", e),
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkmap_blocks::Block;
    use chunkmap_geom::Argb;
    use std::fs;

    fn temp_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chunkmap-{}-{}.toml", name, std::process::id()));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reload_applies_highlight() {
        let path = temp_config(
            "reload",
            "[highlight]\nenabled = true\nblock = \"iron_ore\"\ncolor = \"#00FF00\"\n",
        );
        let renderer = WorldRenderer::new();
        let reg = BlockRegistry::builtin();
        let cfg = reload_config(&path, &renderer, &reg).unwrap();
        assert!(cfg.highlight.enabled);
        assert!(renderer.is_highlight_enabled());
        assert_eq!(renderer.highlighted_block(), Block::IRON_ORE);
        assert_eq!(renderer.highlight_color(), Argb::opaque(0x00FF00));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn failed_reload_keeps_previous_settings() {
        let path = temp_config("broken", "[highlight]\nblock = \"unobtainium\"\n");
        let renderer = WorldRenderer::new();
        renderer.set_highlight_enabled(true);
        let before = renderer.highlight();
        assert!(reload_config(&path, &renderer, &BlockRegistry::builtin()).is_err());
        assert_eq!(renderer.highlight(), before);
        let _ = fs::remove_file(path);
    }
}
