// src/lib.rs

//! `pqrng` - a pseudo-quantum random bit generator
//!
//! This library expresses the classic LFSR+XOR pseudo-random pattern as a
//! quantum circuit over a simulated n-qubit register. Each round encodes
//! the current seed with NOT gates, applies one controlled-NOT feedback
//! tap and a cascade of adjacent SWAPs, collapses the register via
//! projective measurement, and feeds the observed bits back as the next
//! seed.
//!
//! The state-vector engine is deliberately minimal: four permutation
//! gates (Identity, NotX, ControlledNot, Swap) plus Born-rule measurement
//! with collapse. Because no superposition-creating gate is in the set,
//! every round is deterministic: the general probabilistic sampler just
//! observes a distribution with a single point of mass.
//!
//! # Examples
//!
//! One reproducible generator round:
//!
//! ```
//! use pqrng::{BitGenerator, NullSink, Simulator};
//!
//! let seed = vec![0, 1, 1, 0, 1, 0, 1, 1];
//! let mut generator = BitGenerator::with_simulator(seed, Simulator::from_seed(7))
//!     .expect("8-bit seed is valid");
//!
//! let report = generator.round(&mut NullSink).expect("round succeeds");
//! assert_eq!(report.old_value, 107);
//! assert_eq!(report.new_seed, vec![1, 1, 0, 1, 0, 1, 1, 1]);
//! assert_eq!(report.new_value, 215);
//! ```
//!
//! Driving the loop with injected collaborators:
//!
//! ```
//! use pqrng::{BitGenerator, ReportSink, RoundEvent, RunRounds};
//!
//! /// Collects the integer value produced by each round.
//! struct ValueSink(Vec<u64>);
//!
//! impl ReportSink for ValueSink {
//!     fn report(&mut self, event: RoundEvent<'_>) {
//!         if let RoundEvent::RoundComplete(report) = event {
//!             self.0.push(report.new_value);
//!         }
//!     }
//! }
//!
//! let mut sink = ValueSink(Vec::new());
//! let mut generator = BitGenerator::new(vec![0, 1, 1, 0, 1, 0, 1, 1]).unwrap();
//! generator.run(&mut sink, &mut RunRounds(3)).unwrap();
//! assert_eq!(sink.0.len(), 3);
//! assert!(!generator.is_running());
//! ```

pub mod core;
pub mod gates;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod generator;

// Re-export the most common types for easier top-level use
pub use crate::core::{MAX_QUBITS, QubitId, SimError, StateVector};
pub use gates::Gate;
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{MeasurementRecord, Simulator};
pub use generator::{
    BitGenerator, ContinueDecision, NullSink, ReportSink, RoundEvent, RoundReport, RunRounds,
    RunState, bits_to_value, lfsr_xor_circuit, validate_seed,
};
pub use validation::{NORM_TOLERANCE, check_normalization, total_probability};
