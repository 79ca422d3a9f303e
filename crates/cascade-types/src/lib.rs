//! # cascade-types
//!
//! Shared types, cell flags, error types, and lattice constants
//! for the Cascade fluid simulation engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Cascade crates share.

pub mod constants;
pub mod error;
pub mod flags;
pub mod scalar;

pub use error::{CascadeError, CascadeResult};
pub use flags::CellFlag;
pub use scalar::Scalar;
