//! 3Di encoder
//!
//! Runs the full pipeline for one chain: frames → partners → descriptors →
//! latent embedding → codebook state → symbols.

use crate::config::EncoderConfig;
use crate::error::{EncoderError, Result};
use crate::geometry::vectors::Vec3;
use crate::model::ModelParameters;
use crate::processing::descriptors::{residue_descriptor, DESCRIPTOR_SIZE};
use crate::processing::frames::{Frame, FrameBuilder};
use crate::processing::partners::{BruteForceSearch, PartnerRelation, PartnerSearch};
use crate::structure::ChainCoords;

/// States of one encoded chain
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedChain {
    /// State index per residue; masked residues hold the invalid state
    pub states: Vec<u8>,
    /// `true` where the residue was encoded, `false` where it is masked
    pub mask: Vec<bool>,
}

impl EncodedChain {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_masked(&self, index: usize) -> bool {
        !self.mask.get(index).copied().unwrap_or(false)
    }

    /// Number of residues that received a real state
    pub fn num_encoded(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }
}

/// Encoder owning immutable trained parameters.
///
/// Cheap to share across threads; every `encode` call is independent.
pub struct Encoder {
    params: ModelParameters,
    config: EncoderConfig,
    frame_builder: FrameBuilder,
    partner_search: Box<dyn PartnerSearch>,
    invalid_state: u8,
}

impl Encoder {
    /// Create an encoder, checking that descriptor, network, codebook and
    /// alphabet dimensions agree.
    pub fn new(params: ModelParameters, config: EncoderConfig) -> Result<Self> {
        let model = params.model();
        let codebook = params.codebook();

        if model.input_width() != DESCRIPTOR_SIZE {
            return Err(EncoderError::Configuration(format!(
                "model expects {} inputs but descriptors have {} features",
                model.input_width(),
                DESCRIPTOR_SIZE
            )));
        }
        if codebook.len() != config.alphabet.len() {
            return Err(EncoderError::Configuration(format!(
                "codebook has {} states but the alphabet has {} symbols",
                codebook.len(),
                config.alphabet.len()
            )));
        }

        // Alphabet length is capped at u8::MAX, so K fits
        let num_states = codebook.len() as u8;
        let invalid_state = match config.invalid_state {
            None => num_states,
            Some(state) if state <= num_states => state,
            Some(state) => {
                return Err(EncoderError::Configuration(format!(
                    "invalid state {} is outside 0..={}",
                    state, num_states
                )))
            }
        };

        log::debug!(
            "Created encoder with {} states and {} layers",
            codebook.len(),
            model.layers().len()
        );

        Ok(Self {
            frame_builder: FrameBuilder::from_config(&config),
            params,
            config,
            partner_search: Box::new(BruteForceSearch),
            invalid_state,
        })
    }

    /// Replace the partner search strategy
    pub fn with_partner_search<S: PartnerSearch + 'static>(mut self, search: S) -> Self {
        self.partner_search = Box::new(search);
        self
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// State index written for masked residues
    pub fn invalid_state(&self) -> u8 {
        self.invalid_state
    }

    /// Build frames and resolve partners for a chain
    pub fn partners(&self, chain: &ChainCoords) -> (Vec<Option<Frame>>, PartnerRelation) {
        let frames = self.frame_builder.build_chain(chain);
        let partners = self.partner_search.find_partners(&frames);
        (frames, partners)
    }

    /// Encode one chain
    pub fn encode(&self, chain: &ChainCoords) -> EncodedChain {
        let (frames, partners) = self.partners(chain);

        #[cfg(feature = "parallel")]
        let states: Vec<Option<u8>> = {
            use rayon::prelude::*;
            (0..chain.len())
                .into_par_iter()
                .map(|i| self.encode_residue(&frames, &chain.ca, &partners, i))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let states: Vec<Option<u8>> = (0..chain.len())
            .map(|i| self.encode_residue(&frames, &chain.ca, &partners, i))
            .collect();

        let encoded = EncodedChain {
            mask: states.iter().map(Option::is_some).collect(),
            states: states
                .into_iter()
                .map(|s| s.unwrap_or(self.invalid_state))
                .collect(),
        };

        if encoded.num_encoded() == 0 && !encoded.is_empty() {
            log::warn!("No encodable residue in chain of length {}", encoded.len());
        } else {
            log::debug!(
                "Encoded {} of {} residues",
                encoded.num_encoded(),
                encoded.len()
            );
        }
        encoded
    }

    /// Encode a chain given as four parallel coordinate arrays
    pub fn encode_atoms(&self, ca: &[Vec3], cb: &[Vec3], n: &[Vec3], c: &[Vec3]) -> Result<EncodedChain> {
        let chain = ChainCoords::from_arrays(ca.to_vec(), cb.to_vec(), n.to_vec(), c.to_vec())?;
        Ok(self.encode(&chain))
    }

    /// Map encoded states to alphabet symbols
    pub fn build_sequence(&self, encoded: &EncodedChain) -> String {
        let alphabet = &self.config.alphabet;
        encoded
            .states
            .iter()
            .zip(&encoded.mask)
            .map(|(&state, &valid)| {
                if valid {
                    alphabet.symbol(state)
                } else {
                    alphabet.masked_symbol()
                }
            })
            .collect()
    }

    /// Encode a chain straight to its 3Di sequence
    pub fn encode_sequence(&self, chain: &ChainCoords) -> String {
        self.build_sequence(&self.encode(chain))
    }

    /// State of residue `i`, `None` when it has to be masked
    fn encode_residue(
        &self,
        frames: &[Option<Frame>],
        ca: &[Vec3],
        partners: &PartnerRelation,
        i: usize,
    ) -> Option<u8> {
        let descriptor = residue_descriptor(frames, ca, partners, i)?;
        let latent = self.params.embed(&descriptor);
        if !latent.iter().all(|x| x.is_finite()) {
            log::warn!("Non-finite embedding for residue {}, masking it", i);
            return None;
        }
        Some(self.params.codebook().quantize(&latent) as u8)
    }
}
