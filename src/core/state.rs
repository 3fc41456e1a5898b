// src/core/state.rs

use super::error::SimError;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Hard ceiling on register width.
///
/// State-vector simulation is exponential in the number of qubits:
/// 2^24 amplitudes at 16 bytes each is already ~256 MiB. Widths above
/// this are rejected before any allocation happens.
pub const MAX_QUBITS: usize = 24;

/// The complex amplitude representation of an n-qubit register.
///
/// Holds one `Complex<f64>` amplitude per basis state, 2^n in total,
/// indexed by the binary representation of the basis state: bit `i` of
/// the index is the value of qubit `i`. While only unitary gates are
/// applied, the sum of squared magnitudes stays 1 (up to rounding);
/// measurement collapse re-establishes it exactly.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    /// One amplitude per basis state, length 2^num_qubits.
    amplitudes: Vec<Complex<f64>>,
    /// Register width n.
    num_qubits: usize,
}

impl StateVector {
    /// Creates the all-zero basis state |0...0> for an `num_qubits`-wide
    /// register: amplitude 1.0 at index 0, zero everywhere else.
    ///
    /// # Errors
    /// * `InvalidRegisterSize` if `num_qubits` is 0 or exceeds [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> Result<Self, SimError> {
        if num_qubits == 0 {
            return Err(SimError::InvalidRegisterSize {
                size: 0,
                message: "a register needs at least one qubit".to_string(),
            });
        }
        if num_qubits > MAX_QUBITS {
            return Err(SimError::InvalidRegisterSize {
                size: num_qubits,
                message: format!(
                    "state-vector simulation is capped at {} qubits (2^n amplitudes)",
                    MAX_QUBITS
                ),
            });
        }
        let dim = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or_else(|| SimError::SimulationError {
                message: "state vector dimension overflows usize".to_string(),
            })?;

        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self { amplitudes, num_qubits })
    }

    /// Wraps an existing amplitude vector. The caller is responsible for
    /// supplying a vector of length 2^num_qubits; used by the engine for
    /// collapse and by tests to inject prepared states.
    pub(crate) fn from_amplitudes(amplitudes: Vec<Complex<f64>>, num_qubits: usize) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self { amplitudes, num_qubits }
    }

    /// Register width n.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states represented (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude of one basis state; read-only accessor, mainly for testing.
    ///
    /// # Panics
    /// Panics if `index >= self.dim()`.
    pub fn amplitude(&self, index: usize) -> Complex<f64> {
        self.amplitudes[index]
    }

    /// Squared magnitude of the amplitude at `index`. Summed across all
    /// indices this is 1 (within floating-point tolerance) before any
    /// collapse.
    ///
    /// # Panics
    /// Panics if `index >= self.dim()`.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sqr()
    }

    /// Provides read-only access to the full amplitude array.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Provides mutable access for the simulation engine to evolve the state.
    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
