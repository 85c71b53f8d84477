//! mini3di
//!
//! Encodes protein backbone geometry into the 3Di structural alphabet used
//! by foldseek: one symbol per residue describing the local conformation of
//! the residue and its nearest spatial partner.
//!
//! The pipeline for one chain:
//!
//! 1. [`processing::frames`] builds a frame per residue, reconstructing Cβ
//!    when it is missing and deriving the virtual center.
//! 2. [`processing::partners`] pairs every residue with the residue whose
//!    virtual center is closest.
//! 3. [`processing::descriptors`] computes 10 geometric features per pair.
//! 4. [`model`] embeds the features with a small dense network and snaps the
//!    latent vector to the nearest codebook state.
//! 5. [`Encoder::build_sequence`] maps states to letters, with `X` for
//!    residues that could not be encoded.
//!
//! # Quick start
//!
//! ```no_run
//! use mini3di::{ChainCoords, Encoder, EncoderConfig, ModelParameters, ResidueCoords};
//!
//! let params = ModelParameters::load_3di("encoder_weights_3di.kerasify")?;
//! let encoder = Encoder::new(params, EncoderConfig::default())?;
//!
//! let mut chain = ChainCoords::new();
//! chain.push(ResidueCoords::new([0.0, 0.0, 0.0], [-0.5, 1.2, 0.3], [1.5, 0.0, 0.1]));
//! // ... one entry per residue
//!
//! let sequence = encoder.encode_sequence(&chain);
//! assert_eq!(sequence.len(), chain.len());
//! # Ok::<(), mini3di::EncoderError>(())
//! ```

pub mod alphabet;
pub mod config;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod model;
pub mod processing;
pub mod structure;

pub use alphabet::{Alphabet, RawAlphabet, ALPHABET_3DI, MASKED_SYMBOL};
pub use config::{CbPlacement, EncoderConfig, VirtualCenterParams, DISTANCE_ALPHA_BETA};
pub use encoder::{EncodedChain, Encoder};
pub use error::{EncoderError, Result};
pub use model::{Codebook, ModelParameters};
pub use processing::{BruteForceSearch, Frame, PartnerRelation, PartnerSearch};
pub use structure::{ChainCoords, ResidueCoords};
