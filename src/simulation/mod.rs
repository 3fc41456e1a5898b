// src/simulation/mod.rs

//! Simulates the execution of `pqrng::circuits::Circuit`.
//! This module contains the `Simulator` entry point and the internal
//! `SimulationEngine` responsible for evolving and collapsing the state.

// Make engine module crate visible for tests
mod results;
pub(crate) mod engine;

// Re-export the main public interface types
pub use results::MeasurementRecord;

// Import necessary types for the Simulator struct and its methods
use crate::circuits::Circuit;
use crate::core::SimError;
use crate::gates::Gate;
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The main simulator orchestrating the execution of circuits.
///
/// Owns the random source used for measurement collapse. Circuits built
/// from the classical gate set are deterministic (exactly one basis state
/// carries probability 1), but the sampler implements the general
/// probabilistic contract, so the RNG matters whenever a prepared state
/// is superposed.
pub struct Simulator {
    /// Random source for projective measurement sampling.
    rng: StdRng,
}

impl Simulator {
    /// Creates a simulator with an entropy-seeded random source.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a simulator with a fixed RNG seed, for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Runs a simulation of the provided circuit.
    ///
    /// Sizes a fresh |0...0> register from the circuit's width, applies
    /// every gate in program order, and routes each `Measure` gate through
    /// the projective-collapse path.
    ///
    /// # Arguments
    /// * `circuit` - The `Circuit` definition to simulate.
    ///
    /// # Returns
    /// * `Ok(MeasurementRecord)` containing one classical bit per measured wire.
    /// * `Err(SimError)` on invalid gates, out-of-range wires, register
    ///   widths beyond the supported ceiling, or numeric drift.
    pub fn run(&mut self, circuit: &Circuit) -> Result<MeasurementRecord, SimError> {
        // Handle empty circuit case
        if circuit.is_empty() {
            return Ok(MeasurementRecord::new());
        }

        // 1. Initialize the engine for every wire the circuit touches.
        let mut engine = SimulationEngine::init(circuit.width())?;

        // 2. Initialize the record collecting collapsed bits.
        let mut record = MeasurementRecord::new();

        // 3. Iterate through the ordered gate sequence.
        for gate in circuit.gates() {
            match gate {
                Gate::Measure { target, .. } => {
                    engine.measure(&[*target], &mut self.rng, &mut record)?;
                }
                _ => {
                    engine.apply_gate(gate)?;
                }
            }
        }

        Ok(record)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator").finish_non_exhaustive()
    }
}
