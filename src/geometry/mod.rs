//! Geometry operations on residue coordinates
//!
//! Provides distances, bond and dihedral angles, NeRF point placement and the
//! vector helpers they are built on. Every function is pure and lets NaN
//! propagate instead of failing.

pub mod angles;
pub mod distances;
pub mod nerf;
pub mod vectors;

pub use angles::{angle, dihedral};
pub use distances::{distance, distance_squared};
pub use nerf::place;
pub use vectors::{Vec3, NAN3};
