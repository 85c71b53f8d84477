//! Small 3-vector helpers shared by the geometry and processing modules
//!
//! Points are plain `[f32; 3]` arrays, the same layout the coordinate
//! arrays use, so no conversion happens between input and geometry code.

/// A point or direction in 3D space (Angstroms)
pub type Vec3 = [f32; 3];

/// A point with every axis unknown
pub const NAN3: Vec3 = [f32::NAN, f32::NAN, f32::NAN];

#[inline]
pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: &Vec3, s: f32) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn dot(a: &Vec3, b: &Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: &Vec3) -> f32 {
    dot(a, a).sqrt()
}

/// Unit vector in the direction of `a`.
///
/// There is deliberately no zero guard: a zero-length input yields NaN, which
/// the pipeline later turns into a masked residue.
#[inline]
pub fn normalize(a: &Vec3) -> Vec3 {
    let n = norm(a);
    [a[0] / n, a[1] / n, a[2] / n]
}

/// Whether every axis holds a finite value
#[inline]
pub fn is_finite(a: &Vec3) -> bool {
    a.iter().all(|x| x.is_finite())
}

/// Rotate `v` about the unit axis `k` (Rodrigues' formula).
///
/// `cos_t` and `sin_t` are passed in so callers rotating many vectors by the
/// same angle evaluate the trigonometry once.
pub fn rotate_about(v: &Vec3, k: &Vec3, cos_t: f32, sin_t: f32) -> Vec3 {
    let kxv = cross(k, v);
    let kv = dot(k, v);
    let one_minus_cos = 1.0 - cos_t;
    [
        v[0] * cos_t + kxv[0] * sin_t + k[0] * kv * one_minus_cos,
        v[1] * cos_t + kxv[1] * sin_t + k[1] * kv * one_minus_cos,
        v[2] * cos_t + kxv[2] * sin_t + k[2] * kv * one_minus_cos,
    ]
}
