//! Error handling logic

use std::fmt;

/// Index of a single wire (qubit) in the simulated register.
/// Qubit `i` owns bit `i` of every basis-state index, so `QubitId(0)`
/// is the least-significant bit of the amplitude array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Error types for circuit construction and simulation.
/// Every variant is fatal for the round that raised it; the generator
/// never retries a failed round because rounds are deterministic in
/// their inputs.
#[derive(Debug, Clone, PartialEq)] // f64 payloads rule out Eq
pub enum SimError {
    /// The seed (and hence the register) has an unusable width.
    /// Raised before any state vector is allocated.
    InvalidRegisterSize {
        /// The offending register width.
        size: usize,
        /// InvalidRegisterSize failure message
        message: String,
    },

    /// A gate instruction references a wire outside `[0, n)`.
    /// Indicates a construction-logic defect; never silently clamped.
    IndexOutOfRange {
        /// The out-of-range wire.
        qubit: QubitId,
        /// Width of the register the gate was applied to.
        num_qubits: usize,
    },

    /// A gate's operands are inconsistent with each other
    /// (e.g. a controlled-NOT whose control and target coincide).
    InvalidGate {
        /// InvalidGate failure message
        message: String,
    },

    /// Accumulated floating-point error pushed total probability away
    /// from 1 beyond tolerance. Internal-consistency failure.
    NumericDrift {
        /// The measured sum of squared amplitude magnitudes.
        total_probability: f64,
    },

    /// General error encountered during the simulation process itself.
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRegisterSize { size, message } => {
                write!(f, "Invalid Register Size ({}): {}", size, message)
            }
            SimError::IndexOutOfRange { qubit, num_qubits } => {
                write!(
                    f,
                    "Index Out Of Range: {} referenced in a {}-qubit register",
                    qubit, num_qubits
                )
            }
            SimError::InvalidGate { message } => write!(f, "Invalid Gate: {}", message),
            SimError::NumericDrift { total_probability } => {
                write!(
                    f,
                    "Numeric Drift: total probability deviated from 1 (got {})",
                    total_probability
                )
            }
            SimError::SimulationError { message } => write!(f, "Simulation Process Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for SimError {}
