use std::error::Error;

use chunkmap_render::WorldRenderer;
use crossbeam_channel::Receiver;
use raylib::prelude::*;

use crate::app::App;
use crate::config::ViewerConfig;

const PAN_STEP: i32 = 8;

fn handle_input(rl: &RaylibHandle, app: &mut App, renderer: &WorldRenderer) {
    let (mut dx, mut dz) = (0, 0);
    if rl.is_key_down(KeyboardKey::KEY_LEFT) {
        dx -= PAN_STEP;
    }
    if rl.is_key_down(KeyboardKey::KEY_RIGHT) {
        dx += PAN_STEP;
    }
    if rl.is_key_down(KeyboardKey::KEY_UP) {
        dz -= PAN_STEP;
    }
    if rl.is_key_down(KeyboardKey::KEY_DOWN) {
        dz += PAN_STEP;
    }
    if dx != 0 || dz != 0 {
        app.pan(dx, dz);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_EQUAL) || rl.is_key_pressed(KeyboardKey::KEY_KP_ADD) {
        app.zoom(true);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_MINUS) || rl.is_key_pressed(KeyboardKey::KEY_KP_SUBTRACT) {
        app.zoom(false);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_H) {
        let on = renderer.toggle_highlight();
        log::info!("highlight {}", if on { "on" } else { "off" });
    }
    if rl.is_key_pressed(KeyboardKey::KEY_M) {
        app.toggle_mode();
    }
    if rl.is_key_pressed(KeyboardKey::KEY_PAGE_UP) {
        app.step_layer(1);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_PAGE_DOWN) {
        app.step_layer(-1);
    }
    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        let p = rl.get_mouse_position();
        let (pos, selected) = app.click(p.x as i32, p.y as i32);
        log::debug!("chunk {} {}", pos, if selected { "selected" } else { "deselected" });
    }
}

/// Show the composed frame in a raylib window until it is closed.
pub fn run(
    app: &mut App,
    renderer: &WorldRenderer,
    reloads: Option<&Receiver<ViewerConfig>>,
) -> Result<(), Box<dyn Error>> {
    let (w, h) = (app.view().width, app.view().height);
    let (mut rl, thread) = raylib::init()
        .size(w, h)
        .title("chunkmap")
        .resizable()
        .build();
    rl.set_target_fps(60);

    let blank = Image::gen_image_color(w, h, Color::BLACK);
    let mut tex = rl
        .load_texture_from_image(&thread, &blank)
        .map_err(|e| format!("cannot create map texture: {}", e))?;
    tex.set_texture_filter(&thread, raylib::consts::TextureFilter::TEXTURE_FILTER_POINT);

    while !rl.window_should_close() {
        if rl.is_window_resized() {
            let (nw, nh) = (rl.get_screen_width(), rl.get_screen_height());
            app.resize(nw, nh);
            let blank = Image::gen_image_color(nw, nh, Color::BLACK);
            match rl.load_texture_from_image(&thread, &blank) {
                Ok(t) => {
                    tex = t;
                    tex.set_texture_filter(&thread, raylib::consts::TextureFilter::TEXTURE_FILTER_POINT);
                }
                Err(e) => log::warn!("resize: {}", e),
            }
        }
        if let Some(rx) = reloads {
            for cfg in rx.try_iter() {
                app.apply_config(&cfg);
            }
        }
        handle_input(&rl, app, renderer);
        app.pump_loader();
        app.draw_frame();
        if renderer.map_updated() {
            if let Err(e) = tex.update_texture(&app.frame().to_rgba8()) {
                log::warn!("texture upload: {}", e);
            }
        }

        let status = format!(
            "{} | {} chunks{} | highlight {}",
            app.mode().label(),
            app.world().chunk_count(),
            if app.is_loading() { " (loading)" } else { "" },
            if renderer.is_highlight_enabled() { "on" } else { "off" },
        );
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&tex, 0, 0, Color::WHITE);
        d.draw_text(&status, 8, app.view().height - 20, 16, Color::RAYWHITE);
    }
    Ok(())
}
