//! Polyhedra and Fourier-Motzkin elimination.
//!
//! This module provides:
//! - `Polyhedron`, a system of linear inequalities `Ax <= b`
//! - Projection along a direction and collapse of a single axis
//! - An emptiness test built on eliminating every axis

pub mod polyhedron;
pub mod projection;
pub mod emptiness;

pub use polyhedron::Polyhedron;
pub use projection::Partition;
pub use emptiness::EliminationConfig;
