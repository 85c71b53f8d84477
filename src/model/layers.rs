//! Feed-forward network evaluation
//!
//! Forward pass only: weights come from a trained model and never change.

use crate::error::{EncoderError, Result};

/// Element-wise activation function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activation {
    Linear,
    Relu,
    Softplus,
    Sigmoid,
    Tanh,
    HardSigmoid,
}

impl Activation {
    /// Activation for its Kerasify code
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Linear),
            2 => Some(Self::Relu),
            3 => Some(Self::Softplus),
            4 => Some(Self::Sigmoid),
            5 => Some(Self::Tanh),
            6 => Some(Self::HardSigmoid),
            _ => None,
        }
    }

    #[inline]
    pub fn apply(&self, x: f32) -> f32 {
        match self {
            Self::Linear => x,
            Self::Relu => x.max(0.0),
            Self::Softplus => x.exp().ln_1p(),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::Tanh => x.tanh(),
            Self::HardSigmoid => (0.2 * x + 0.5).clamp(0.0, 1.0),
        }
    }
}

/// Fully connected layer: `out = activation(x · W + b)`
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    /// Row-major (inputs × outputs)
    weights: Vec<f32>,
    biases: Vec<f32>,
    inputs: usize,
    outputs: usize,
    activation: Activation,
}

impl DenseLayer {
    /// Create a layer from a row-major `inputs × outputs` weight matrix
    pub fn new(
        weights: Vec<f32>,
        inputs: usize,
        outputs: usize,
        biases: Vec<f32>,
        activation: Activation,
    ) -> Result<Self> {
        if inputs == 0 || outputs == 0 {
            return Err(EncoderError::Configuration(format!(
                "dense layer has an empty {}x{} weight matrix",
                inputs, outputs
            )));
        }
        if weights.len() != inputs * outputs {
            return Err(EncoderError::Configuration(format!(
                "dense layer has {} weights, expected {}x{}",
                weights.len(),
                inputs,
                outputs
            )));
        }
        if biases.len() != outputs {
            return Err(EncoderError::Configuration(format!(
                "dense layer has {} biases for {} outputs",
                biases.len(),
                outputs
            )));
        }
        Ok(Self {
            weights,
            biases,
            inputs,
            outputs,
            activation,
        })
    }

    /// Create a layer from one weight row per input
    pub fn from_rows(rows: &[Vec<f32>], biases: Vec<f32>, activation: Activation) -> Result<Self> {
        let outputs = biases.len();
        if let Some(row) = rows.iter().find(|r| r.len() != outputs) {
            return Err(EncoderError::Configuration(format!(
                "weight row has {} columns for {} outputs",
                row.len(),
                outputs
            )));
        }
        let weights = rows.iter().flatten().copied().collect();
        Self::new(weights, rows.len(), outputs, biases, activation)
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        debug_assert_eq!(input.len(), self.inputs);
        let mut out = self.biases.clone();
        for (x, row) in input.iter().zip(self.weights.chunks_exact(self.outputs)) {
            for (o, w) in out.iter_mut().zip(row) {
                *o += x * w;
            }
        }
        for o in out.iter_mut() {
            *o = self.activation.apply(*o);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Dense(DenseLayer),
    Activation(Activation),
}

impl Layer {
    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        match self {
            Self::Dense(dense) => dense.forward(input),
            Self::Activation(activation) => input.iter().map(|&x| activation.apply(x)).collect(),
        }
    }
}

/// Sequential stack of layers with validated widths
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    layers: Vec<Layer>,
    input_width: usize,
    output_width: usize,
}

impl Model {
    /// Build a model, checking that consecutive dense layers fit together.
    pub fn new(layers: Vec<Layer>) -> Result<Self> {
        let mut input_width = None;
        let mut width: Option<usize> = None;

        for (index, layer) in layers.iter().enumerate() {
            if let Layer::Dense(dense) = layer {
                if let Some(w) = width {
                    if w != dense.inputs() {
                        return Err(EncoderError::Configuration(format!(
                            "layer {} expects {} inputs but the previous layer produces {}",
                            index,
                            dense.inputs(),
                            w
                        )));
                    }
                }
                input_width.get_or_insert(dense.inputs());
                width = Some(dense.outputs());
            }
        }

        match (input_width, width) {
            (Some(input_width), Some(output_width)) => Ok(Self {
                layers,
                input_width,
                output_width,
            }),
            _ => Err(EncoderError::Configuration(
                "model has no dense layer".into(),
            )),
        }
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn output_width(&self) -> usize {
        self.output_width
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Evaluate the network on one input vector
    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.layers
            .iter()
            .fold(input.to_vec(), |x, layer| layer.forward(&x))
    }
}
