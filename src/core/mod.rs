// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod state;

// Re-export public types for convenient access via `pqrng::core::TypeName`
pub use error::{QubitId, SimError};
pub use state::{MAX_QUBITS, StateVector};
