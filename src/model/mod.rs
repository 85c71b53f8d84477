//! Trained model: embedding network and state codebook
//!
//! The network maps a conformation descriptor to a latent vector; the
//! codebook turns the latent vector into a discrete state.

pub mod codebook;
pub mod kerasify;
pub mod layers;

use std::path::Path;

pub use codebook::{Codebook, CENTROIDS_3DI};
pub use kerasify::{load_kerasify, parse_kerasify, KerasifyReader};
pub use layers::{Activation, DenseLayer, Layer, Model};

use crate::error::{EncoderError, Result};

/// Immutable trained parameters shared by every residue an encoder sees
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    model: Model,
    codebook: Codebook,
}

impl ModelParameters {
    /// Pair a network with a codebook; the network output must have the
    /// codebook's dimension.
    pub fn new(model: Model, codebook: Codebook) -> Result<Self> {
        if model.output_width() != codebook.dim() {
            return Err(EncoderError::Configuration(format!(
                "model produces {}-dimensional latents but codebook centroids have {} dimensions",
                model.output_width(),
                codebook.dim()
            )));
        }
        Ok(Self { model, codebook })
    }

    /// Load the network from a Kerasify file and pair it with the 3Di
    /// codebook
    pub fn load_3di<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(load_kerasify(path)?, Codebook::reference_3di())
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// Latent vector of a descriptor
    pub fn embed(&self, descriptor: &[f32]) -> Vec<f32> {
        self.model.forward(descriptor)
    }
}
