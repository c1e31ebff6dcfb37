//! CSR Viewer: shows a scene through the software rasterizer
//!
//! Usage: `csr-viewer [scene.ron]` (defaults to the spinning cube)
//! - Space: toggle solid / wireframe
//! - C: toggle backface culling
//! - Escape: quit

use macroquad::prelude::*;
use csr_renderer::export::{texture_size, to_rgba8};
use csr_renderer::logging::{init_logging, LoggingConfig};
use csr_renderer::scene::{load_scene, Scene};
use csr_renderer::{CullMode, RasterSettings, RenderMode, RenderStats, VERSION};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("CSR Viewer v{}", VERSION),
        window_width: 800,
        window_height: 600,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn toggle_mode(settings: &mut RasterSettings) {
    settings.mode = match settings.mode {
        RenderMode::Solid => RenderMode::Wireframe,
        RenderMode::Wireframe => RenderMode::Solid,
    };
}

fn toggle_culling(settings: &mut RasterSettings) {
    settings.culling = match settings.culling {
        CullMode::Backface => CullMode::Disabled,
        CullMode::Disabled => CullMode::Backface,
    };
}

/// Apply a settings change to the scene and every per-mesh override
fn apply(scene: &mut Scene, change: fn(&mut RasterSettings)) {
    change(&mut scene.settings);
    for mesh in &mut scene.meshes {
        if let Some(settings) = mesh.settings.as_mut() {
            change(settings);
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging(LoggingConfig::default());

    let mut scene = match std::env::args().nth(1) {
        Some(path) => match load_scene(&path) {
            Ok(scene) => {
                log::info!("Loaded scene {} ({} meshes)", path, scene.meshes.len());
                scene
            }
            Err(e) => {
                log::error!("Failed to load {}: {}, showing the cube instead", path, e);
                Scene::cube()
            }
        },
        None => Scene::cube(),
    };

    let mut target = match scene.new_target() {
        Ok(target) => target,
        Err(e) => {
            log::error!("Cannot create render target: {}", e);
            return;
        }
    };

    let Some((tex_w, tex_h)) = texture_size(&target) else {
        log::error!("Scene {}x{} is too large to display", target.width(), target.height());
        return;
    };

    log::info!("=== CSR Viewer {}x{} ===", target.width(), target.height());

    let mut frame = 0usize;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Space) {
            apply(&mut scene, toggle_mode);
        }
        if is_key_pressed(KeyCode::C) {
            apply(&mut scene, toggle_culling);
        }

        let stats = match scene.render_frame(&mut target, frame) {
            Ok(stats) => stats,
            Err(e) => {
                log::error!("Frame {} failed: {}", frame, e);
                RenderStats::default()
            }
        };
        frame = frame.wrapping_add(1);

        clear_background(Color::from_rgba(30, 30, 35, 255));

        // Letterbox the framebuffer into the window
        let scale = (screen_width() / target.width() as f32).min(screen_height() / target.height() as f32);
        let draw_w = target.width() as f32 * scale;
        let draw_h = target.height() as f32 * scale;
        let draw_x = (screen_width() - draw_w) * 0.5;
        let draw_y = (screen_height() - draw_h) * 0.5;

        let texture = Texture2D::from_rgba8(tex_w, tex_h, &to_rgba8(&target));
        texture.set_filter(FilterMode::Nearest);

        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "{:?} | {:?} | tris {} drawn {} culled {} near {} | px {}",
                scene.settings.mode,
                scene.settings.culling,
                stats.triangles,
                stats.rasterized,
                stats.backface_culled,
                stats.near_rejected,
                stats.pixels_written,
            ),
            5.0,
            screen_height() - 5.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await
    }
}
