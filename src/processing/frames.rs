//! Per-residue backbone frames
//!
//! A frame holds Cα, the effective Cβ (real, or reconstructed when the
//! structure does not have one), N, C and the virtual center derived from
//! them. Residues missing any of Cα, N or C get no frame at all.

use crate::config::{CbPlacement, EncoderConfig, VirtualCenterParams};
use crate::geometry::nerf::place;
use crate::geometry::vectors::{add, cross, is_finite, normalize, rotate_about, scale, sub, Vec3};
use crate::structure::{ChainCoords, ResidueCoords};

/// Backbone frame of one valid residue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub ca: Vec3,
    pub cb: Vec3,
    pub n: Vec3,
    pub c: Vec3,
    /// Reference point used for partner search
    pub virtual_center: Vec3,
}

/// Builds frames with a fixed Cβ placement and virtual-center geometry
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    cb_placement: CbPlacement,
    cos_alpha: f32,
    sin_alpha: f32,
    cos_beta: f32,
    sin_beta: f32,
    center_distance: f32,
}

impl FrameBuilder {
    pub fn new(cb_placement: CbPlacement, virtual_center: VirtualCenterParams) -> Self {
        // Trigonometry in f64 then rounded, so 270° gives the same cosine
        // the trained model was fitted with.
        let alpha = (virtual_center.alpha as f64).to_radians();
        let beta = (virtual_center.beta as f64).to_radians();
        Self {
            cb_placement,
            cos_alpha: alpha.cos() as f32,
            sin_alpha: alpha.sin() as f32,
            cos_beta: beta.cos() as f32,
            sin_beta: beta.sin() as f32,
            center_distance: virtual_center.distance,
        }
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        Self::new(config.cb_placement, config.virtual_center)
    }

    /// Build the frame of one residue, `None` if its backbone is incomplete
    pub fn build(&self, residue: &ResidueCoords) -> Option<Frame> {
        if !residue.has_backbone() {
            return None;
        }

        let cb = if is_finite(&residue.cb) {
            residue.cb
        } else {
            // Only the unknown axes are replaced
            let approx = self.virtual_cb(&residue.ca, &residue.n, &residue.c);
            let mut cb = residue.cb;
            for (axis, value) in cb.iter_mut().enumerate() {
                if value.is_nan() {
                    *value = approx[axis];
                }
            }
            cb
        };

        let virtual_center = self.virtual_center(&residue.ca, &cb, &residue.n);

        Some(Frame {
            ca: residue.ca,
            cb,
            n: residue.n,
            c: residue.c,
            virtual_center,
        })
    }

    /// Build frames for every residue of a chain, in chain order
    pub fn build_chain(&self, chain: &ChainCoords) -> Vec<Option<Frame>> {
        chain.residues().map(|r| self.build(&r)).collect()
    }

    /// Reconstruct a Cβ position from the backbone atoms
    pub fn virtual_cb(&self, ca: &Vec3, n: &Vec3, c: &Vec3) -> Vec3 {
        match self.cb_placement {
            CbPlacement::Tetrahedral { distance } => tetrahedral_cb(ca, n, c, distance),
            CbPlacement::Nerf {
                bond_length,
                bond_angle,
                torsion,
            } => place(
                n,
                c,
                ca,
                bond_length,
                bond_angle.to_radians(),
                torsion.to_radians(),
            ),
        }
    }

    /// Rotate the Cα→Cβ bond by alpha in the (Cβ, N) plane, then by beta
    /// about Cα→N, and scale it from Cα.
    pub fn virtual_center(&self, ca: &Vec3, cb: &Vec3, n: &Vec3) -> Vec3 {
        let v = sub(cb, ca);
        let ca_n = sub(n, ca);

        let k = normalize(&cross(&v, &ca_n));
        let v = rotate_about(&v, &k, self.cos_alpha, self.sin_alpha);

        let k = normalize(&ca_n);
        let v = rotate_about(&v, &k, self.cos_beta, self.sin_beta);

        add(ca, &scale(&v, self.center_distance))
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new(CbPlacement::default(), VirtualCenterParams::default())
    }
}

/// Idealised Cβ assuming tetrahedral geometry around Cα
fn tetrahedral_cb(ca: &Vec3, n: &Vec3, c: &Vec3, distance: f32) -> Vec3 {
    let sqrt8_3 = (8f64.sqrt() / 3.0) as f32;
    let sqrt3 = 3f64.sqrt() as f32;

    let v1 = normalize(&sub(c, ca));
    let v2 = normalize(&sub(n, ca));
    let v3 = [v1[0] / 3.0, v1[1] / 3.0, v1[2] / 3.0];
    let b1 = add(&v2, &v3);
    let b2 = cross(&v1, &b1);
    let u1 = normalize(&b1);
    let u2 = normalize(&b2);

    let mut cb = [0.0f32; 3];
    for axis in 0..3 {
        let v4 = sqrt8_3 * ((-u1[axis] / 2.0) - (u2[axis] * sqrt3 / 2.0)) - v3[axis];
        cb[axis] = ca[axis] + v4 * distance;
    }
    cb
}
