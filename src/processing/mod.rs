//! Chain processing: frames, partners and descriptors
//!
//! Geometry stages of the encoder. Frames are built for the whole chain
//! first, because partner search needs every frame before any single
//! partner can be resolved.

pub mod descriptors;
pub mod frames;
pub mod partners;

pub use descriptors::{conformation_descriptor, residue_descriptor, Descriptor, DESCRIPTOR_SIZE};
pub use frames::{Frame, FrameBuilder};
pub use partners::{BruteForceSearch, PartnerRelation, PartnerSearch};
