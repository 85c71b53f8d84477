//! Encoder configuration
//!
//! Geometric constants and output options that are fixed when an
//! [`Encoder`](crate::Encoder) is built. The defaults reproduce the reference
//! 3Di encoder.

use crate::alphabet::Alphabet;

/// Distance between Cα and the idealised Cβ, in Angstroms
pub const DISTANCE_ALPHA_BETA: f32 = 1.5336;

/// How a missing Cβ is reconstructed from the backbone
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CbPlacement {
    /// Ideal tetrahedral geometry around Cα at the given distance (reference)
    Tetrahedral { distance: f32 },
    /// NeRF placement from (N, C, Cα) with fixed internal coordinates.
    /// Angles in degrees.
    Nerf {
        bond_length: f32,
        bond_angle: f32,
        torsion: f32,
    },
}

impl Default for CbPlacement {
    fn default() -> Self {
        Self::Tetrahedral {
            distance: DISTANCE_ALPHA_BETA,
        }
    }
}

/// Rotation and scale turning the Cα→Cβ bond into the virtual center
///
/// `alpha` rotates about the normal of the (Cβ, N) plane at Cα, `beta` about
/// the Cα→N axis. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualCenterParams {
    pub alpha: f32,
    pub beta: f32,
    pub distance: f32,
}

impl Default for VirtualCenterParams {
    fn default() -> Self {
        Self {
            alpha: 270.0,
            beta: 0.0,
            distance: 2.0,
        }
    }
}

/// Settings for building frames and writing the output
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncoderConfig {
    pub cb_placement: CbPlacement,
    pub virtual_center: VirtualCenterParams,
    pub alphabet: Alphabet,
    /// State index written for masked residues. `None` uses the index just
    /// past the last codebook state; foldseek-compatible output uses `Some(2)`.
    pub invalid_state: Option<u8>,
}

impl EncoderConfig {
    pub fn with_cb_placement(mut self, placement: CbPlacement) -> Self {
        self.cb_placement = placement;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_invalid_state(mut self, state: u8) -> Self {
        self.invalid_state = Some(state);
        self
    }
}
