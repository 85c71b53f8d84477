//! Nearest-partner search between residues
//!
//! Each residue is paired with the residue whose virtual center is closest
//! to its own. Only valid residues with a neighbour on both sides (so not the
//! first or last residue of the chain) take part, on either end of the pair.
//! An eligible residue left without any candidate pairs with residue 0.

use crate::geometry::distances::distance_squared;
use crate::processing::frames::Frame;

/// Partner index per residue (`None` for residues that cannot be queried)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartnerRelation {
    partners: Vec<Option<usize>>,
}

impl PartnerRelation {
    pub fn new(partners: Vec<Option<usize>>) -> Self {
        Self { partners }
    }

    /// Partner of residue `index`
    pub fn get(&self, index: usize) -> Option<usize> {
        self.partners.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.partners
    }
}

/// Strategy for resolving the partner relation of a chain.
///
/// Implementations must pick, for every eligible residue, the eligible
/// residue with the smallest virtual-center distance, lowest index first on
/// ties, and [`FALLBACK_PARTNER`] when no candidate exists, so any strategy
/// yields the same relation.
pub trait PartnerSearch: Send + Sync {
    fn find_partners(&self, frames: &[Option<Frame>]) -> PartnerRelation;
}

/// Partner of an eligible residue that has no eligible candidate
pub const FALLBACK_PARTNER: usize = 0;

/// Whether residue `index` can take part in partner search
#[inline]
pub fn is_eligible(frames: &[Option<Frame>], index: usize) -> bool {
    index > 0 && index + 1 < frames.len() && frames[index].is_some()
}

/// Exhaustive O(n²) scan over all residue pairs.
///
/// Squared distances are computed per pair as `|a - b|²`, not through the
/// `|a|² - 2a·b + |b|²` expansion, so exact near-ties may resolve differently
/// from a matrix-based search.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceSearch;

impl BruteForceSearch {
    /// Nearest eligible partner of residue `i`
    fn nearest(frames: &[Option<Frame>], i: usize) -> Option<usize> {
        if !is_eligible(frames, i) {
            return None;
        }
        let center = frames[i].as_ref()?.virtual_center;

        let mut best: Option<(usize, f32)> = None;
        for (j, frame) in frames.iter().enumerate() {
            if j == i || !is_eligible(frames, j) {
                continue;
            }
            let Some(frame) = frame else { continue };
            let dist_sq = distance_squared(&center, &frame.virtual_center);
            if !dist_sq.is_finite() {
                continue;
            }
            // Strict comparison: ascending scan keeps the lowest index on ties
            if best.map_or(true, |(_, d)| dist_sq < d) {
                best = Some((j, dist_sq));
            }
        }
        Some(best.map_or(FALLBACK_PARTNER, |(j, _)| j))
    }
}

impl PartnerSearch for BruteForceSearch {
    fn find_partners(&self, frames: &[Option<Frame>]) -> PartnerRelation {
        #[cfg(feature = "parallel")]
        let partners = {
            use rayon::prelude::*;
            (0..frames.len())
                .into_par_iter()
                .map(|i| Self::nearest(frames, i))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let partners = (0..frames.len())
            .map(|i| Self::nearest(frames, i))
            .collect();

        PartnerRelation::new(partners)
    }
}
