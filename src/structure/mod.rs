//! Backbone coordinates handed to the encoder
//!
//! A chain is stored as four parallel arrays (Cα, Cβ, N, C), one entry per
//! residue. Missing atoms are written as NaN on every axis; the structure
//! parser decides which alternate location to keep before building this.

use crate::error::{EncoderError, Result};
use crate::geometry::vectors::{is_finite, Vec3, NAN3};

/// Backbone atoms of a single residue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueCoords {
    pub ca: Vec3,
    pub cb: Vec3,
    pub n: Vec3,
    pub c: Vec3,
}

impl ResidueCoords {
    /// Residue without a Cβ (glycine, or a side chain the parser dropped)
    pub fn new(ca: Vec3, n: Vec3, c: Vec3) -> Self {
        Self { ca, cb: NAN3, n, c }
    }

    pub fn with_cb(mut self, cb: Vec3) -> Self {
        self.cb = cb;
        self
    }

    /// Residue with no usable atom at all
    pub fn missing() -> Self {
        Self {
            ca: NAN3,
            cb: NAN3,
            n: NAN3,
            c: NAN3,
        }
    }

    /// Whether Cα, N and C are all known, i.e. a frame can be built
    pub fn has_backbone(&self) -> bool {
        is_finite(&self.ca) && is_finite(&self.n) && is_finite(&self.c)
    }
}

/// Backbone coordinates of one chain
#[derive(Clone, Debug, Default)]
pub struct ChainCoords {
    pub ca: Vec<Vec3>,
    pub cb: Vec<Vec3>,
    pub n: Vec<Vec3>,
    pub c: Vec<Vec3>,
}

impl ChainCoords {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with known capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ca: Vec::with_capacity(capacity),
            cb: Vec::with_capacity(capacity),
            n: Vec::with_capacity(capacity),
            c: Vec::with_capacity(capacity),
        }
    }

    /// Build from four parallel arrays, checking they have the same length.
    pub fn from_arrays(ca: Vec<Vec3>, cb: Vec<Vec3>, n: Vec<Vec3>, c: Vec<Vec3>) -> Result<Self> {
        let expected = ca.len();
        for (name, found) in [("cb", cb.len()), ("n", n.len()), ("c", c.len())] {
            if found != expected {
                return Err(EncoderError::ShapeMismatch {
                    name,
                    expected,
                    found,
                });
            }
        }
        Ok(Self { ca, cb, n, c })
    }

    /// Append a residue at the end of the chain
    pub fn push(&mut self, residue: ResidueCoords) {
        self.ca.push(residue.ca);
        self.cb.push(residue.cb);
        self.n.push(residue.n);
        self.c.push(residue.c);
    }

    pub fn len(&self) -> usize {
        self.ca.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ca.is_empty()
    }

    /// Get residue `index`, or `None` past the end of the chain
    pub fn residue(&self, index: usize) -> Option<ResidueCoords> {
        Some(ResidueCoords {
            ca: *self.ca.get(index)?,
            cb: *self.cb.get(index)?,
            n: *self.n.get(index)?,
            c: *self.c.get(index)?,
        })
    }

    pub fn residues(&self) -> impl Iterator<Item = ResidueCoords> + '_ {
        (0..self.len()).filter_map(move |i| self.residue(i))
    }
}

impl FromIterator<ResidueCoords> for ChainCoords {
    fn from_iter<I: IntoIterator<Item = ResidueCoords>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut chain = Self::with_capacity(iter.size_hint().0);
        for residue in iter {
            chain.push(residue);
        }
        chain
    }
}
