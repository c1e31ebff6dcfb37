//! Scene description: meshes, camera and per-frame spin
//!
//! Pure data plus the glue that turns it into render calls.

use serde::{Serialize, Deserialize};
use crate::rasterizer::{
    render, Color, Mat4, RasterSettings, RenderError, RenderStats, RenderTarget, TargetError, Vec3,
};

/// Perspective camera looking at a fixed point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSetup {
    pub position: Vec3,
    pub target: Vec3,
    #[serde(default = "default_up")]
    pub up: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

fn default_up() -> Vec3 {
    Vec3::UP
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov_degrees: 90.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Rotation applied to every mesh, growing each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub axis: Vec3,
    pub degrees_per_frame: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            axis: Vec3::UP,
            degrees_per_frame: 0.0,
        }
    }
}

/// An indexed triangle mesh in the interleaved wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    /// Flat vertex scalars, laid out per the effective `RasterSettings::layout`
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    /// World-space offset applied after the spin
    #[serde(default)]
    pub translation: Vec3,
    /// Overrides the scene settings for this mesh
    #[serde(default)]
    pub settings: Option<RasterSettings>,
}

impl Mesh {
    pub fn new(name: &str, vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            indices,
            translation: Vec3::ZERO,
            settings: None,
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Vertices in the buffer for the given stride. A trailing partial
    /// vertex is an error.
    pub fn vertex_count(&self, stride: usize) -> Result<usize, RenderError> {
        let len = self.vertices.len();
        if stride == 0 || len % stride != 0 {
            return Err(RenderError::VertexBufferMisaligned { len, stride });
        }
        Ok(len / stride)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unit cube centered on the origin, one color per corner,
    /// counter-clockwise front faces
    pub fn cube() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            -0.5, -0.5,  0.5, 255.0,   0.0,   0.0,
             0.5, -0.5,  0.5,   0.0, 255.0,   0.0,
             0.5,  0.5,  0.5,   0.0,   0.0, 255.0,
            -0.5,  0.5,  0.5, 255.0, 255.0,   0.0,
            -0.5, -0.5, -0.5, 255.0,   0.0, 255.0,
             0.5, -0.5, -0.5,   0.0, 255.0, 255.0,
             0.5,  0.5, -0.5, 255.0, 255.0, 255.0,
            -0.5,  0.5, -0.5, 128.0, 128.0, 128.0,
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 3, 2, 0, 2, 1, // front  (+z)
            4, 5, 6, 4, 6, 7, // back   (-z)
            3, 7, 6, 3, 6, 2, // top    (+y)
            0, 1, 5, 0, 5, 4, // bottom (-y)
            1, 2, 6, 1, 6, 5, // right  (+x)
            0, 4, 7, 0, 7, 3, // left   (-x)
        ];

        Self::new("cube", vertices, indices)
    }
}

/// Everything needed to render a sequence of frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub clear_color: Color,
    #[serde(default)]
    pub settings: RasterSettings,
    #[serde(default)]
    pub camera: CameraSetup,
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default)]
    pub spin: Spin,
    pub meshes: Vec<Mesh>,
}

fn default_frames() -> usize {
    1
}

impl Scene {
    pub fn new(width: usize, height: usize, clear_color: Color) -> Self {
        Self {
            width,
            height,
            clear_color,
            settings: RasterSettings::default(),
            camera: CameraSetup::default(),
            frames: 1,
            spin: Spin::default(),
            meshes: Vec::new(),
        }
    }

    /// Add a mesh and return its index
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// A spinning cube seen from +Z
    pub fn cube() -> Self {
        let mut scene = Self::new(400, 300, Color::new(40, 40, 40));
        scene.frames = 10;
        scene.spin = Spin {
            axis: Vec3::new(0.5, 1.0, 0.0),
            degrees_per_frame: 5.0,
        };
        scene.add_mesh(Mesh::cube());
        scene
    }

    /// Allocate a cleared target sized for this scene
    pub fn new_target(&self) -> Result<RenderTarget, TargetError> {
        RenderTarget::new(self.width, self.height, self.clear_color)
    }

    pub fn view_projection(&self) -> Mat4 {
        let cam = &self.camera;
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let projection = Mat4::perspective(cam.fov_degrees.to_radians(), aspect, cam.near, cam.far);
        let view = Mat4::look_at(cam.position, cam.target, cam.up);
        projection * view
    }

    /// Model matrix of `mesh` at `frame`: spin first, then translate
    pub fn model_matrix(&self, mesh: &Mesh, frame: usize) -> Mat4 {
        let angle = (self.spin.degrees_per_frame * (frame + 1) as f32).to_radians();
        let spin = if self.spin.degrees_per_frame == 0.0 {
            Mat4::IDENTITY
        } else {
            Mat4::rotation(self.spin.axis, angle)
        };
        Mat4::translation(mesh.translation) * spin
    }

    /// Clear `target` and draw every mesh for `frame`
    pub fn render_frame(&self, target: &mut RenderTarget, frame: usize) -> Result<RenderStats, RenderError> {
        target.set_clear_color(self.clear_color);
        target.clear();

        let view_projection = self.view_projection();
        let mut stats = RenderStats::default();

        for mesh in &self.meshes {
            let settings = mesh.settings.as_ref().unwrap_or(&self.settings);
            let mvp = view_projection * self.model_matrix(mesh, frame);
            let drawn = mesh
                .vertex_count(settings.layout.stride())
                .and_then(|count| render(target, &mesh.vertices, count, &mesh.indices, &mvp.e, settings));

            match drawn {
                Ok(s) => stats += s,
                Err(e) => {
                    log::warn!("mesh '{}': {}", mesh.name, e);
                    return Err(e);
                }
            }
        }

        Ok(stats)
    }
}
