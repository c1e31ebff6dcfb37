//! Vector and matrix math for the pipeline
//!
//! Matrices are flat `[f32; 16]` in column-major order, the same layout the
//! render call accepts. The rasterizer itself only needs `mul_vec4`; the
//! constructors exist for scenes, tools and tests.

use std::ops::{Mul, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    /// Homogeneous point (w = 1)
    pub fn extend(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, 1.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Homogeneous 4D vector (clip space)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Divide all four components by `f`
    pub fn div(self, f: f32) -> Vec4 {
        Vec4 {
            x: self.x / f,
            y: self.y / f,
            z: self.z / f,
            w: self.w / f,
        }
    }
}

/// Multiply a column-major 4x4 matrix by a column vector: `M · v`
pub fn mul_vec4(m: &[f32; 16], v: Vec4) -> Vec4 {
    Vec4 {
        x: m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
        y: m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
        z: m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
        w: m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
    }
}

#[inline]
pub fn minf(a: f32, b: f32) -> f32 {
    if a < b { a } else { b }
}

#[inline]
pub fn maxf(a: f32, b: f32) -> f32 {
    if a > b { a } else { b }
}

/// Column-major 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub e: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        e: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// OpenGL-style perspective projection; NDC depth lands in [-1, 1]
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let mut e = [0.0; 16];
        e[0] = f / aspect;
        e[5] = f;
        e[10] = (far + near) / (near - far);
        e[11] = -1.0;
        e[14] = (2.0 * far * near) / (near - far);
        Self { e }
    }

    /// Right-handed view matrix looking from `eye` toward `target`
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        Self {
            e: [
                s.x, u.x, -f.x, 0.0,
                s.y, u.y, -f.y, 0.0,
                s.z, u.z, -f.z, 0.0,
                -s.dot(eye), -u.dot(eye), f.dot(eye), 1.0,
            ],
        }
    }

    pub fn translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.e[12] = t.x;
        m.e[13] = t.y;
        m.e[14] = t.z;
        m
    }

    /// Rotation of `angle` radians around `axis` (normalized internally)
    pub fn rotation(axis: Vec3, angle: f32) -> Self {
        let a = axis.normalize();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        Self {
            e: [
                t * a.x * a.x + c,
                t * a.x * a.y + s * a.z,
                t * a.x * a.z - s * a.y,
                0.0,
                t * a.x * a.y - s * a.z,
                t * a.y * a.y + c,
                t * a.y * a.z + s * a.x,
                0.0,
                t * a.x * a.z + s * a.y,
                t * a.y * a.z - s * a.x,
                t * a.z * a.z + c,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        }
    }

    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut e = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                e[col * 4 + row] = (0..4)
                    .map(|k| self.e[k * 4 + row] * other.e[col * 4 + k])
                    .sum();
            }
        }
        Mat4 { e }
    }

    pub fn transform(&self, v: Vec4) -> Vec4 {
        mul_vec4(&self.e, v)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        self.multiply(&other)
    }
}

/// Normalized barycentric weights of `(px, py)` in the screen-space triangle
/// `p0, p1, p2`. Returns `None` when the triangle has zero area.
pub fn barycentric(px: f32, py: f32, p0: Vec3, p1: Vec3, p2: Vec3) -> Option<(f32, f32, f32)> {
    let area = (p1.y - p2.y) * (p0.x - p2.x) + (p2.x - p1.x) * (p0.y - p2.y);

    if area == 0.0 {
        return None;
    }

    let w0 = ((p1.y - p2.y) * (px - p2.x) + (p2.x - p1.x) * (py - p2.y)) / area;
    let w1 = ((p2.y - p0.y) * (px - p0.x) + (p0.x - p2.x) * (py - p0.y)) / area;
    Some((w0, w1, 1.0 - w0 - w1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_mul_vec4_is_column_major() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        let v = m.transform(Vec3::new(1.0, 1.0, 1.0).extend());
        assert_eq!(v, Vec4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn test_identity_mul() {
        let r = Mat4::rotation(Vec3::new(0.5, 1.0, 0.0), 0.7);
        assert_eq!(Mat4::IDENTITY * r, r);
        assert_eq!(r * Mat4::IDENTITY, r);
    }

    #[test]
    fn test_rotation_quarter_turn_about_z() {
        let r = Mat4::rotation(Vec3::new(0.0, 0.0, 1.0), std::f32::consts::FRAC_PI_2);
        let v = r.transform(Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert!(approx(v.x, 0.0) && approx(v.y, 1.0) && approx(v.z, 0.0));
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 2.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let v = view.transform(eye.extend());
        assert!(approx(v.x, 0.0) && approx(v.y, 0.0) && approx(v.z, 0.0));

        // Target sits in front of the camera, down -Z
        let t = view.transform(Vec3::ZERO.extend());
        assert!(approx(t.z, -2.0));
    }

    #[test]
    fn test_perspective_near_and_far_map_to_ndc_bounds() {
        let p = Mat4::perspective(90f32.to_radians(), 1.0, 0.1, 100.0);
        let near = p.transform(Vec4::new(0.0, 0.0, -0.1, 1.0));
        let far = p.transform(Vec4::new(0.0, 0.0, -100.0, 1.0));
        assert!(approx(near.z / near.w, -1.0));
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
        assert!(near.w > 0.0 && far.w > 0.0);
    }

    #[test]
    fn test_barycentric_inside() {
        let v1 = Vec3::new(0.0, 0.0, 0.0);
        let v2 = Vec3::new(10.0, 0.0, 0.0);
        let v3 = Vec3::new(5.0, 10.0, 0.0);
        let (a, b, c) = barycentric(5.0, 3.0, v1, v2, v3).unwrap();
        assert!(a >= 0.0 && b >= 0.0 && c >= 0.0);
        assert!(approx(a + b + c, 1.0));
    }

    #[test]
    fn test_barycentric_degenerate() {
        let p = Vec3::new(1.0, 1.0, 0.0);
        assert!(barycentric(0.0, 0.0, p, p, Vec3::new(2.0, 2.0, 0.0)).is_none());
    }
}
