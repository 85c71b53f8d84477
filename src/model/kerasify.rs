//! Reader for Kerasify model files
//!
//! Kerasify stores a Keras sequential model as a flat little-endian stream.
//! Only the layer types needed by the 3Di encoder are supported.
//!
//! Binary format:
//! - Layer count: u32
//! - For each layer:
//!   - Layer type: u32 (1 = dense, 5 = activation)
//!   - Dense: rows u32, cols u32, bias length u32,
//!     weights [f32; rows * cols] (row-major), biases [f32; bias length],
//!     activation u32
//!   - Activation: activation u32

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{EncoderError, Result};
use crate::model::layers::{Activation, DenseLayer, Layer, Model};

const LAYER_DENSE: u32 = 1;
const LAYER_ACTIVATION: u32 = 5;

/// Upper bound on a single weight matrix, to reject garbage headers before
/// allocating
const MAX_LAYER_VALUES: usize = 1 << 24;

pub struct KerasifyReader<R: Read> {
    reader: R,
}

impl KerasifyReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> KerasifyReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read every layer and assemble the model
    pub fn read_model(mut self) -> Result<Model> {
        let layer_count = self.read_u32()?;
        log::debug!("Reading Kerasify model with {} layers", layer_count);

        let mut layers = Vec::with_capacity(layer_count.min(64) as usize);
        for index in 0..layer_count {
            let layer = self.read_layer().map_err(|e| match e {
                EncoderError::ModelFormat(msg) => {
                    EncoderError::ModelFormat(format!("layer {}: {}", index, msg))
                }
                other => other,
            })?;
            layers.push(layer);
        }
        Model::new(layers)
    }

    fn read_layer(&mut self) -> Result<Layer> {
        match self.read_u32()? {
            LAYER_DENSE => {
                let rows = self.read_u32()? as usize;
                let cols = self.read_u32()? as usize;
                let bias_len = self.read_u32()? as usize;
                let count = rows.checked_mul(cols).filter(|&n| n <= MAX_LAYER_VALUES);
                let Some(count) = count else {
                    return Err(EncoderError::ModelFormat(format!(
                        "dense layer of {}x{} is too large",
                        rows, cols
                    )));
                };
                if bias_len != cols {
                    return Err(EncoderError::ModelFormat(format!(
                        "dense layer has {} biases for {} outputs",
                        bias_len, cols
                    )));
                }
                let weights = self.read_f32s(count)?;
                let biases = self.read_f32s(bias_len)?;
                let activation = self.read_activation()?;
                Ok(Layer::Dense(DenseLayer::new(
                    weights, rows, cols, biases, activation,
                )?))
            }
            LAYER_ACTIVATION => Ok(Layer::Activation(self.read_activation()?)),
            other => Err(EncoderError::ModelFormat(format!(
                "unsupported layer type {}",
                other
            ))),
        }
    }

    fn read_activation(&mut self) -> Result<Activation> {
        let code = self.read_u32()?;
        Activation::from_code(code)
            .ok_or_else(|| EncoderError::ModelFormat(format!("unknown activation {}", code)))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_f32s(&mut self, count: usize) -> Result<Vec<f32>> {
        let mut buf = vec![0u8; count * 4];
        self.read_exact(&mut buf)?;
        Ok(buf
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                EncoderError::ModelFormat("unexpected end of file".into())
            } else {
                EncoderError::Io(e)
            }
        })
    }
}

/// Parse a Kerasify model from an in-memory buffer
pub fn parse_kerasify(data: &[u8]) -> Result<Model> {
    KerasifyReader::new(data).read_model()
}

/// Load a Kerasify model from disk
pub fn load_kerasify<P: AsRef<Path>>(path: P) -> Result<Model> {
    KerasifyReader::open(path)?.read_model()
}
