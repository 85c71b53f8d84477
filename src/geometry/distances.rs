//! Distance calculations between residue points

use super::vectors::Vec3;

/// Compute the Euclidean distance between two 3D points
#[inline]
pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    distance_squared(a, b).sqrt()
}

/// Compute squared Euclidean distance (faster when only comparing distances)
#[inline]
pub fn distance_squared(a: &Vec3, b: &Vec3) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}
