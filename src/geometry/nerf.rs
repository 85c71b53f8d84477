//! Natural Extension Reference Frame (NeRF) point placement

use super::vectors::{add, cross, norm, sub, Vec3};

/// Calculate the position of a new point using the NeRF algorithm.
///
/// # Arguments
///
/// * `a`, `b`, `c` - The three reference points, `c` being bonded to the
///   new point
/// * `bond_length` - Length of the C-D bond
/// * `bond_angle` - Angle B-C-D in radians
/// * `torsion` - Dihedral angle A-B-C-D in radians
///
/// # Returns
///
/// * `[f32; 3]` - Coordinates of point D (NaN if any input is NaN)
pub fn place(a: &Vec3, b: &Vec3, c: &Vec3, bond_length: f32, bond_angle: f32, torsion: f32) -> Vec3 {
    let ab = sub(b, a);
    let bc = sub(c, b);
    let bc_norm = norm(&bc);
    let bcn = [bc[0] / bc_norm, bc[1] / bc_norm, bc[2] / bc_norm];

    // D in the local frame
    let r = bond_length;
    let d_local = [
        -r * bond_angle.cos(),
        r * torsion.cos() * bond_angle.sin(),
        r * torsion.sin() * bond_angle.sin(),
    ];

    let n_raw = cross(&ab, &bcn);
    let n_norm = norm(&n_raw);

    // Collinear reference points leave the plane undefined: pick any normal.
    // NaN fails the comparison and propagates through the else branch.
    let n = if n_norm < 1e-6 {
        if bcn[0].abs() < 0.9 {
            [1.0, 0.0, 0.0]
        } else {
            [0.0, 1.0, 0.0]
        }
    } else {
        [n_raw[0] / n_norm, n_raw[1] / n_norm, n_raw[2] / n_norm]
    };

    let nbc = cross(&n, &bcn);

    // Rotation matrix M = [bcn, nbc, n] (columns)
    let d_rel = [
        bcn[0] * d_local[0] + nbc[0] * d_local[1] + n[0] * d_local[2],
        bcn[1] * d_local[0] + nbc[1] * d_local[1] + n[1] * d_local[2],
        bcn[2] * d_local[0] + nbc[2] * d_local[1] + n[2] * d_local[2],
    ];

    add(&d_rel, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{angle, dihedral, distance};

    #[test]
    fn test_place_straight_line() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let c = [2.0, 0.0, 0.0];

        let d = place(&a, &b, &c, 1.0, 180f32.to_radians(), 0.0);

        assert!((d[0] - 3.0).abs() < 1e-5);
        assert!(d[1].abs() < 1e-5);
        assert!(d[2].abs() < 1e-5);
    }

    #[test]
    fn test_place_right_angle() {
        let a = [0.0, 1.0, 0.0];
        let b = [0.0, 0.0, 0.0];
        let c = [1.0, 0.0, 0.0];

        let d = place(&a, &b, &c, 1.0, 90f32.to_radians(), 90f32.to_radians());

        assert!((d[0] - 1.0).abs() < 1e-5);
        assert!(d[1].abs() < 1e-5);
        assert!((d[2] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_place_reproduces_internal_coordinates() {
        let a = [0.3, -1.2, 0.7];
        let b = [1.1, 0.2, -0.4];
        let c = [2.4, 0.5, 0.1];
        let (length, theta, tau) = (1.53, 110.5f32.to_radians(), (-122.0f32).to_radians());

        let d = place(&a, &b, &c, length, theta, tau);

        assert!((distance(&c, &d) - length).abs() < 1e-4);
        assert!((angle(&b, &c, &d) - theta).abs() < 1e-4);
        assert!((dihedral(&a, &b, &c, &d) - tau).abs() < 1e-4);
    }

    #[test]
    fn test_place_nan_propagates() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, f32::NAN, 0.0];
        let c = [1.0, 1.0, 0.0];
        let d = place(&a, &b, &c, 1.0, 1.0, 1.0);
        assert!(d.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_place_deterministic() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.5, 0.0];
        let c = [1.5, 1.5, 0.25];
        let first = place(&a, &b, &c, 1.5, 1.9, -2.1);
        let second = place(&a, &b, &c, 1.5, 1.9, -2.1);
        assert_eq!(first, second);
    }
}
