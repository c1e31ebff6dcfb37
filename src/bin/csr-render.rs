//! Offline renderer: writes every frame of a scene to PNG files
//!
//! Usage: `csr-render <scene.ron> <out_dir> [png|ppm]`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use indicatif::{ProgressBar, ProgressStyle};
use csr_renderer::export::{save_frame, FrameFormat};
use csr_renderer::logging::{init_logging, LoggingConfig};
use csr_renderer::scene::{load_scene, Scene, SceneError};
use csr_renderer::RenderStats;

fn render_all(scene: &Scene, out_dir: &Path, format: FrameFormat) -> Result<RenderStats, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out_dir)?;

    let mut target = scene.new_target().map_err(SceneError::from)?;
    let mut total = RenderStats::default();

    let pb = ProgressBar::new(scene.frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})")?
            .progress_chars("=> "),
    );

    for frame in 0..scene.frames {
        let stats = scene.render_frame(&mut target, frame).map_err(SceneError::from)?;
        total += stats;

        let path = out_dir.join(format!("frame_{:05}.{}", frame, format.extension()));
        save_frame(&target, &path, format)?;
        log::debug!("frame {} -> {} ({:?})", frame, path.display(), stats);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(total)
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("csr-render");
    if args.len() != 3 && args.len() != 4 {
        eprintln!("Usage: {} <scene.ron> <out_dir> [png|ppm]", program);
        return ExitCode::FAILURE;
    }

    let format = match args.get(3) {
        None => FrameFormat::default(),
        Some(ext) => match FrameFormat::from_extension(ext) {
            Some(format) => format,
            None => {
                eprintln!("Unknown frame format '{}', expected png or ppm", ext);
                return ExitCode::FAILURE;
            }
        },
    };

    let scene = match load_scene(&args[1]) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to load {}: {}", args[1], e);
            return ExitCode::FAILURE;
        }
    };

    let out_dir = PathBuf::from(&args[2]);
    log::info!(
        "Rendering {} frames of {}x{} to {} as {}",
        scene.frames,
        scene.width,
        scene.height,
        out_dir.display(),
        format.extension()
    );

    match render_all(&scene, &out_dir, format) {
        Ok(total) => {
            log::info!(
                "Done: {} triangles, {} rasterized, {} culled, {} behind camera, {} pixels",
                total.triangles,
                total.rasterized,
                total.backface_culled,
                total.near_rejected,
                total.pixels_written
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
