//! Bond angle and dihedral calculations
//!
//! Angles are in radians. Non-finite input gives a NaN result rather than a
//! panic or a silent fallback value.

use super::vectors::{cross, dot, norm, normalize, sub, Vec3};

/// Compute the angle between three points (A, B, C)
/// Returns angle at B in radians, in [0, π]
pub fn angle(a: &Vec3, b: &Vec3, c: &Vec3) -> f32 {
    let ba = sub(a, b);
    let bc = sub(c, b);

    let cos_angle = dot(&ba, &bc) / (norm(&ba) * norm(&bc));
    // clamp() keeps NaN, so degenerate input stays NaN
    cos_angle.clamp(-1.0, 1.0).acos()
}

/// Compute the dihedral angle between four points (A, B, C, D)
/// The dihedral is the angle between planes ABC and BCD
/// Returns angle in radians in range [-π, π]
pub fn dihedral(a: &Vec3, b: &Vec3, c: &Vec3, d: &Vec3) -> f32 {
    let b1 = sub(b, a);
    let b2 = sub(c, b);
    let b3 = sub(d, c);

    let n1 = cross(&b1, &b2);
    let n2 = cross(&b2, &b3);

    // m1 = n1 x b2_norm
    let m1 = cross(&n1, &normalize(&b2));

    let x = dot(&n1, &n2);
    let y = dot(&m1, &n2);

    // atan2(-y, x) gives the IUPAC sign convention
    (-y).atan2(x)
}
