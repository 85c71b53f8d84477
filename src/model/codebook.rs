//! Nearest-centroid quantization of latent vectors

use crate::error::{EncoderError, Result};

/// Trained 2-D centroids of the 20 3Di states, in alphabet order
pub const CENTROIDS_3DI: [[f32; 2]; 20] = [
    [-1.0729, -0.3600],
    [-0.1356, -1.8914],
    [0.4948, -0.4205],
    [-0.9874, 0.8128],
    [-1.6621, -0.4259],
    [2.1394, 0.0486],
    [1.5558, -0.1503],
    [2.9179, 1.1437],
    [-2.8814, 0.9956],
    [-1.1400, -2.0068],
    [3.2025, 1.7356],
    [1.7769, -1.3037],
    [0.6901, -1.2554],
    [-1.1061, -1.3397],
    [2.1495, -0.8030],
    [2.3060, -1.4988],
    [2.5522, 0.6046],
    [0.7786, -2.1660],
    [-2.3030, 0.3813],
    [1.0290, 0.8772],
];

/// Ordered reference vectors, one per state
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Codebook {
    centroids: Vec<Vec<f32>>,
    dim: usize,
}

impl Codebook {
    /// Create a codebook; every centroid must have the same, non-zero
    /// dimension and finite values.
    pub fn new(centroids: Vec<Vec<f32>>) -> Result<Self> {
        let dim = match centroids.first() {
            Some(first) if !first.is_empty() => first.len(),
            Some(_) => {
                return Err(EncoderError::Configuration(
                    "codebook centroids have no dimensions".into(),
                ))
            }
            None => return Err(EncoderError::Configuration("codebook is empty".into())),
        };
        for (index, centroid) in centroids.iter().enumerate() {
            if centroid.len() != dim {
                return Err(EncoderError::Configuration(format!(
                    "centroid {} has dimension {}, expected {}",
                    index,
                    centroid.len(),
                    dim
                )));
            }
            if !centroid.iter().all(|x| x.is_finite()) {
                return Err(EncoderError::Configuration(format!(
                    "centroid {} has a non-finite value",
                    index
                )));
            }
        }
        Ok(Self { centroids, dim })
    }

    /// The trained 3Di codebook
    pub fn reference_3di() -> Self {
        Self {
            centroids: CENTROIDS_3DI.iter().map(|c| c.to_vec()).collect(),
            dim: 2,
        }
    }

    /// Number of states (K)
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn centroid(&self, index: usize) -> Option<&[f32]> {
        self.centroids.get(index).map(Vec::as_slice)
    }

    /// Index of the centroid closest to `latent` (squared Euclidean
    /// distance); the lowest index wins exact ties.
    ///
    /// `latent` must be finite; callers mask residues with NaN latents
    /// before getting here.
    pub fn quantize(&self, latent: &[f32]) -> usize {
        debug_assert_eq!(latent.len(), self.dim);
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (index, centroid) in self.centroids.iter().enumerate() {
            let dist: f32 = centroid
                .iter()
                .zip(latent)
                .map(|(c, x)| (x - c) * (x - c))
                .sum();
            if dist < best_dist {
                best = index;
                best_dist = dist;
            }
        }
        best
    }
}
