//! Conformation descriptors
//!
//! Describes residue `i` and its partner `j` through the directions of the
//! Cα trace around both residues, their Cα distance and their sequence
//! separation.

use crate::geometry::distances::distance;
use crate::geometry::vectors::{dot, normalize, sub, Vec3};
use crate::processing::frames::Frame;
use crate::processing::partners::PartnerRelation;

/// Number of features per residue
pub const DESCRIPTOR_SIZE: usize = 10;

/// Sequence separation is clamped to this range for feature 8
const MAX_SEPARATION: i64 = 4;

pub type Descriptor = [f32; DESCRIPTOR_SIZE];

/// Residue before `index`, wrapping to the last residue for index 0
#[inline]
fn previous(len: usize, index: usize) -> usize {
    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

/// Descriptor of residue `i` paired with residue `j`, computed on the Cα
/// trace. `i` needs a neighbour on each side in `ca`, `j` needs one after it
/// (the one before residue 0 is the last residue).
///
/// Features 0-6 are cosines between the unit vectors
/// `u1 = i-1→i`, `u2 = i→i+1`, `u3 = j-1→j`, `u4 = j→j+1`, `u5 = i→j`;
/// 7 is the Cα distance, 8 the clamped separation `j - i` and 9 its signed
/// logarithm.
pub fn conformation_descriptor(ca: &[Vec3], i: usize, j: usize) -> Descriptor {
    let u1 = normalize(&sub(&ca[i], &ca[i - 1]));
    let u2 = normalize(&sub(&ca[i + 1], &ca[i]));
    let u3 = normalize(&sub(&ca[j], &ca[previous(ca.len(), j)]));
    let u4 = normalize(&sub(&ca[j + 1], &ca[j]));
    let u5 = normalize(&sub(&ca[j], &ca[i]));

    let separation = j as i64 - i as i64;
    let log_separation = ((separation.abs() + 1) as f32).ln().copysign(separation as f32);

    [
        dot(&u1, &u2),
        dot(&u3, &u4),
        dot(&u1, &u5),
        dot(&u3, &u5),
        dot(&u1, &u4),
        dot(&u2, &u3),
        dot(&u1, &u3),
        distance(&ca[i], &ca[j]),
        separation.clamp(-MAX_SEPARATION, MAX_SEPARATION) as f32,
        log_separation,
    ]
}

/// Whether residue `index` and both its sequence neighbours have frames
fn window_is_valid(frames: &[Option<Frame>], index: usize) -> bool {
    index > 0
        && index + 1 < frames.len()
        && frames[index - 1..=index + 1].iter().all(Option::is_some)
}

/// Partner window, where residue 0 wraps back to the last residue
fn partner_window_is_valid(frames: &[Option<Frame>], index: usize) -> bool {
    index + 1 < frames.len()
        && [previous(frames.len(), index), index, index + 1]
            .iter()
            .all(|&k| frames[k].is_some())
}

/// Descriptor for residue `i`, or `None` when it cannot be encoded.
///
/// A residue is encodable when it has a partner and the three-residue
/// windows around both the residue and its partner are complete. Non-finite
/// features also make the residue unencodable.
pub fn residue_descriptor(
    frames: &[Option<Frame>],
    ca: &[Vec3],
    partners: &PartnerRelation,
    i: usize,
) -> Option<Descriptor> {
    let j = partners.get(i)?;
    if !window_is_valid(frames, i) || !partner_window_is_valid(frames, j) {
        return None;
    }
    let descriptor = conformation_descriptor(ca, i, j);
    descriptor
        .iter()
        .all(|x| x.is_finite())
        .then_some(descriptor)
}
