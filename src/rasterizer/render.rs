//! Core rendering functions
//! Vertex stage, visibility tests and barycentric triangle fill

use super::error::RenderError;
use super::math::{maxf, minf, mul_vec4, Vec3};
use super::target::RenderTarget;
use super::types::{Color, CullMode, RasterSettings, RenderMode, RenderStats, Vertex, VertexLayout};

/// Wireframe edges may reach this many target sizes past the origin
const STROKE_GUARD_BAND: usize = 8;

/// Triangle after viewport mapping: x, y in pixels, z is NDC depth
#[derive(Debug, Clone, Copy)]
struct ScreenTriangle {
    p: [Vec3; 3],
    c: [Color; 3],
}

enum Visibility {
    Visible(ScreenTriangle),
    BehindCamera,
    Backface,
}

/// Map an NDC point to screen space. Y is flipped so +1 is the top row.
fn ndc_to_screen(width: usize, height: usize, ndc: Vec3) -> Vec3 {
    Vec3 {
        x: (ndc.x + 1.0) * 0.5 * width as f32,
        y: (1.0 - ndc.y) * 0.5 * height as f32,
        z: ndc.z,
    }
}

/// Twice the signed screen-space area, positive for triangles that survive
/// backface culling
fn face_orientation(p: &[Vec3; 3]) -> f32 {
    let ax = p[1].x - p[0].x;
    let ay = p[1].y - p[0].y;
    let bx = p[2].x - p[0].x;
    let by = p[2].y - p[0].y;
    ax * by - ay * bx
}

/// Transform, near-reject, divide, viewport-map and cull one triangle
fn project_triangle(
    width: usize,
    height: usize,
    verts: [Vertex; 3],
    transform: &[f32; 16],
    culling: CullMode,
) -> Visibility {
    let clip = verts.map(|v| mul_vec4(transform, v.position.extend()));

    // Coarse near test: any vertex on or behind the eye drops the triangle
    if clip.iter().any(|c| c.w <= 0.0) {
        return Visibility::BehindCamera;
    }

    let p = clip.map(|c| {
        let ndc = c.div(c.w);
        ndc_to_screen(width, height, Vec3::new(ndc.x, ndc.y, ndc.z))
    });

    if culling == CullMode::Backface && face_orientation(&p) <= 0.0 {
        return Visibility::Backface;
    }

    Visibility::Visible(ScreenTriangle {
        p,
        c: verts.map(|v| v.color),
    })
}

/// Fill a triangle with incremental barycentric weights, depth testing and
/// color interpolation. Returns `None` for zero-area triangles, otherwise the
/// number of pixels that passed the depth test.
fn fill_triangle(target: &mut RenderTarget, tri: &ScreenTriangle) -> Option<usize> {
    let [p0, p1, p2] = tri.p;
    let [c0, c1, c2] = tri.c;

    // Bounding box, truncated toward zero
    let min_x = minf(p0.x, minf(p1.x, p2.x)) as i32;
    let min_y = minf(p0.y, minf(p1.y, p2.y)) as i32;
    let max_x = maxf(p0.x, maxf(p1.x, p2.x)) as i32;
    let max_y = maxf(p0.y, maxf(p1.y, p2.y)) as i32;

    let area = (p1.y - p2.y) * (p0.x - p2.x) + (p2.x - p1.x) * (p0.y - p2.y);

    if area == 0.0 {
        return None;
    }

    let min_x = min_x.max(0);
    let min_y = min_y.max(0);
    let max_x = max_x.min(target.width as i32 - 1);
    let max_y = max_y.min(target.height as i32 - 1);

    let inv_area = 1.0 / area;

    // Per-pixel and per-row weight deltas
    let w0_dx = (p1.y - p2.y) * inv_area;
    let w1_dx = (p2.y - p0.y) * inv_area;
    let w2_dx = -w0_dx - w1_dx;

    let w0_dy = (p2.x - p1.x) * inv_area;
    let w1_dy = (p0.x - p2.x) * inv_area;
    let w2_dy = -w0_dy - w1_dy;

    // Weights at the top-left corner of the clamped box
    let fx = min_x as f32;
    let fy = min_y as f32;
    let w0_edge = (p1.y - p2.y) * (fx - p2.x) + (p2.x - p1.x) * (fy - p2.y);
    let w1_edge = (p2.y - p0.y) * (fx - p0.x) + (p0.x - p2.x) * (fy - p0.y);
    let w2_edge = area - w0_edge - w1_edge;

    let mut w0_row = w0_edge * inv_area;
    let mut w1_row = w1_edge * inv_area;
    let mut w2_row = w2_edge * inv_area;

    let mut written = 0;

    for y in min_y..=max_y {
        let (mut w0, mut w1, mut w2) = (w0_row, w1_row, w2_row);
        let row = y as usize * target.width;

        for x in min_x..=max_x {
            // Inclusive on all three edges
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                let z = p0.z * w0 + p1.z * w1 + p2.z * w2;
                let idx = row + x as usize;

                if z < target.depth[idx] {
                    target.color[idx] = Color::interpolate(c0, c1, c2, w0, w1, w2);
                    target.depth[idx] = z;
                    written += 1;
                }
            }

            w0 += w0_dx;
            w1 += w1_dx;
            w2 += w2_dx;
        }

        w0_row += w0_dy;
        w1_row += w1_dy;
        w2_row += w2_dy;
    }

    Some(written)
}

/// Draw the three edges of a triangle, each in its start vertex's color.
/// Edges with an endpoint far outside the target are skipped.
fn stroke_triangle(target: &mut RenderTarget, tri: &ScreenTriangle) -> usize {
    let limit_x = (target.width * STROKE_GUARD_BAND) as f32;
    let limit_y = (target.height * STROKE_GUARD_BAND) as f32;
    let in_band = |p: &Vec3| p.x.abs() <= limit_x && p.y.abs() <= limit_y;

    (0..3)
        .filter(|&i| in_band(&tri.p[i]) && in_band(&tri.p[(i + 1) % 3]))
        .map(|i| {
            let (a, b) = (tri.p[i], tri.p[(i + 1) % 3]);
            target.draw_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, tri.c[i])
        })
        .sum()
}

/// Check the whole input before anything is drawn
fn validate_input(
    vertices: &[f32],
    vertex_count: usize,
    indices: &[u32],
    stride: usize,
) -> Result<(), RenderError> {
    if indices.len() % 3 != 0 {
        return Err(RenderError::IndexCountNotMultipleOfThree { count: indices.len() });
    }

    let required = vertex_count.saturating_mul(stride);
    if vertices.len() < required {
        return Err(RenderError::VertexBufferTooShort { required, len: vertices.len() });
    }

    if let Some((position, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &i)| i as usize >= vertex_count)
    {
        return Err(RenderError::IndexOutOfRange { position, index, vertex_count });
    }

    Ok(())
}

/// Render an indexed triangle list into `target`.
///
/// `vertices` is the flat interleaved buffer described by `settings.layout`,
/// `vertex_count` the number of logical vertices in it, and every consecutive
/// index triple one triangle. `transform` is a column-major
/// projection·view·model matrix. Triangles are independent; overlap is
/// resolved by the depth buffer, not by draw order.
///
/// The input is validated up front: on error nothing has been written.
pub fn render(
    target: &mut RenderTarget,
    vertices: &[f32],
    vertex_count: usize,
    indices: &[u32],
    transform: &[f32; 16],
    settings: &RasterSettings,
) -> Result<RenderStats, RenderError> {
    let layout = settings.layout;

    if let Err(e) = validate_input(vertices, vertex_count, indices, layout.stride()) {
        log::warn!("render call rejected: {}", e);
        return Err(e);
    }

    let mut stats = RenderStats::default();

    for tri in indices.chunks_exact(3) {
        stats.triangles += 1;

        let verts = [tri[0], tri[1], tri[2]]
            .map(|i| Vertex::decode(vertices, i as usize, layout, settings.default_color));

        let screen = match project_triangle(target.width, target.height, verts, transform, settings.culling) {
            Visibility::Visible(s) => s,
            Visibility::BehindCamera => {
                stats.near_rejected += 1;
                continue;
            }
            Visibility::Backface => {
                stats.backface_culled += 1;
                continue;
            }
        };

        match settings.mode {
            RenderMode::Solid => match fill_triangle(target, &screen) {
                Some(written) => {
                    stats.rasterized += 1;
                    stats.pixels_written += written;
                }
                None => stats.degenerate += 1,
            },
            RenderMode::Wireframe => {
                stats.rasterized += 1;
                stats.pixels_written += stroke_triangle(target, &screen);
            }
        }
    }

    log::trace!("render: {:?}", stats);

    Ok(stats)
}

/// Render already-decoded vertices. Encodes them into the interleaved wire
/// format and forwards to [`render`] with `VertexLayout::PositionColor`.
pub fn render_vertices(
    target: &mut RenderTarget,
    vertices: &[Vertex],
    indices: &[u32],
    transform: &[f32; 16],
    settings: &RasterSettings,
) -> Result<RenderStats, RenderError> {
    let mut flat = Vec::with_capacity(vertices.len() * 6);
    for v in vertices {
        v.encode_into(&mut flat);
    }

    let settings = RasterSettings {
        layout: VertexLayout::PositionColor,
        ..settings.clone()
    };

    render(target, &flat, vertices.len(), indices, transform, &settings)
}
