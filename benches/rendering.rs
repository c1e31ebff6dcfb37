/// Benchmark suite for the rasterizer
/// Covers clearing, a single full-screen fill and whole cube frames
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csr_renderer::scene::Scene;
use csr_renderer::{render, Color, Mat4, RasterSettings, RenderTarget};

fn bench_clear(c: &mut Criterion) {
    c.bench_function("clear_640x480", |b| {
        let mut target = RenderTarget::new(640, 480, Color::new(40, 40, 40)).unwrap();
        b.iter(|| black_box(&mut target).clear());
    });
}

fn bench_fullscreen_triangle(c: &mut Criterion) {
    c.bench_function("fill_fullscreen_triangle", |b| {
        // Oversized triangle covering the whole viewport
        #[rustfmt::skip]
        let vertices = [
            -1.0, -1.0, 0.0, 255.0,   0.0,   0.0,
             3.0, -1.0, 0.0,   0.0, 255.0,   0.0,
            -1.0,  3.0, 0.0,   0.0,   0.0, 255.0,
        ];
        let indices = [0u32, 1, 2];
        let settings = RasterSettings::default();
        let mut target = RenderTarget::new(640, 480, Color::BLACK).unwrap();

        b.iter(|| {
            target.clear();
            black_box(
                render(
                    &mut target,
                    black_box(&vertices),
                    3,
                    black_box(&indices),
                    &Mat4::IDENTITY.e,
                    &settings,
                )
                .unwrap(),
            );
        });
    });
}

fn bench_cube_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_frame");

    for size in [(160, 120), (400, 300), (1280, 720)].iter() {
        let label = format!("{}x{}", size.0, size.1);
        group.bench_with_input(BenchmarkId::from_parameter(label), size, |b, &(w, h)| {
            let mut scene = Scene::cube();
            scene.width = w;
            scene.height = h;
            let mut target = scene.new_target().unwrap();
            let mut frame = 0;

            b.iter(|| {
                black_box(scene.render_frame(&mut target, frame).unwrap());
                frame = (frame + 1) % 72;
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clear, bench_fullscreen_triangle, bench_cube_frame);
criterion_main!(benches);
