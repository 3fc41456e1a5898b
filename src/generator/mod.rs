// src/generator/mod.rs

//! The pseudo-quantum bit generator: builds one LFSR+XOR circuit per
//! round from the current seed, simulates it, and feeds the collapsed
//! measurement outcome back as the next seed.
//!
//! The loop collaborators (continuation prompt, reporting) are injected
//! through the [`ContinueDecision`] and [`ReportSink`] traits so the
//! control flow is testable without interactive input.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{MAX_QUBITS, QubitId, SimError};
use crate::gates::Gate;
use crate::simulation::Simulator;
use std::fmt;

/// Checks that a bit vector is usable as a generator seed.
///
/// Requires every element to be 0 or 1 and the length n to satisfy
/// `3 <= n <= MAX_QUBITS`. n = 2 is rejected even though two wires exist,
/// because the feedback tap `CNOT(n-2, 0)` then controls qubit 0 with
/// itself, which is not a meaningful gate.
pub fn validate_seed(seed: &[u8]) -> Result<(), SimError> {
    let n = seed.len();
    if n < 2 {
        return Err(SimError::InvalidRegisterSize {
            size: n,
            message: "the LFSR+XOR pattern needs at least two qubits".to_string(),
        });
    }
    if n == 2 {
        return Err(SimError::InvalidGate {
            message: "with a 2-bit seed the feedback tap CNOT(q0, q0) controls its own target"
                .to_string(),
        });
    }
    if n > MAX_QUBITS {
        return Err(SimError::InvalidRegisterSize {
            size: n,
            message: format!("seeds wider than {} qubits are not supported", MAX_QUBITS),
        });
    }
    for (i, &bit) in seed.iter().enumerate() {
        if bit > 1 {
            return Err(SimError::InvalidGate {
                message: format!("seed element {} is {}, expected 0 or 1", i, bit),
            });
        }
    }
    Ok(())
}

/// Builds one round's circuit from the current seed.
///
/// The pattern, for a seed of length n:
/// 1. Per qubit i: `X(i)` if seed\[i\] is 1, else `I(i)`, writing the
///    classical seed onto the freshly initialized |0...0> register.
/// 2. One `CNOT(control = n-2, target = 0)`, the XOR feedback tap.
/// 3. `SWAP(i, i+1)` for i ascending over 0..n-1, the shift cascade.
///    The ascending order is load-bearing: each swap acts on the state
///    left by the previous one.
/// 4. `M(i)` for every qubit, labeled `q{i}`.
pub fn lfsr_xor_circuit(seed: &[u8]) -> Result<Circuit, SimError> {
    validate_seed(seed)?;
    let n = seed.len();

    let mut builder = CircuitBuilder::new();

    // BLOCK 1: encode the seed bits.
    for (i, &bit) in seed.iter().enumerate() {
        builder = builder.add_gate(if bit == 1 {
            Gate::NotX { target: QubitId(i) }
        } else {
            Gate::Identity { target: QubitId(i) }
        });
    }

    // BLOCK 2: XOR feedback tap.
    builder = builder.add_gate(Gate::ControlledNot {
        control: QubitId(n - 2),
        target: QubitId(0),
    });

    // BLOCK 3: shift via cascading adjacent swaps.
    for i in 0..n - 1 {
        builder = builder.add_gate(Gate::Swap {
            a: QubitId(i),
            b: QubitId(i + 1),
        });
    }

    // Measure every wire to read the next seed.
    for i in 0..n {
        builder = builder.add_gate(Gate::Measure {
            target: QubitId(i),
            label: format!("q{}", i),
        });
    }

    Ok(builder.build())
}

/// Integer interpretation of an ordered bit vector, most significant
/// bit first (bits\[0\] is the MSB), matching the session reports.
pub fn bits_to_value(bits: &[u8]) -> u64 {
    bits.iter().fold(0u64, |acc, &b| (acc << 1) | u64::from(b))
}

/// Summary of one completed generator round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// The seed the round started from.
    pub old_seed: Vec<u8>,
    /// MSB-first integer interpretation of `old_seed`.
    pub old_value: u64,
    /// The measured outcome adopted as the next seed.
    pub new_seed: Vec<u8>,
    /// MSB-first integer interpretation of `new_seed`.
    pub new_value: u64,
}

impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of random bits: {}", self.old_seed.len())?;
        writeln!(f, "Seed: {:?} {}", self.old_seed, self.old_value)?;
        write!(f, "Output value: {:?} {}", self.new_seed, self.new_value)
    }
}

/// Structured events emitted during a round, in order of occurrence.
/// Observers receive borrows only; reporting never mutates generator,
/// circuit, or record state.
#[derive(Debug)]
pub enum RoundEvent<'a> {
    /// The round's circuit has been constructed (pre-simulation).
    CircuitBuilt(&'a Circuit),
    /// The round finished; both seeds and their integer values.
    RoundComplete(&'a RoundReport),
}

/// Sink for [`RoundEvent`]s; abstracts console output and circuit-diagram
/// rendering, with no contract on formatting.
pub trait ReportSink {
    /// Receives one event.
    fn report(&mut self, event: RoundEvent<'_>);
}

/// A sink that drops every event; for callers that only want the
/// [`RoundReport`] return values.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&mut self, _event: RoundEvent<'_>) {}
}

/// Decides, between rounds, whether another round should run.
/// Abstracts the interactive "continue sequence?" prompt.
pub trait ContinueDecision {
    /// `true` to run another round, `false` to stop the generator.
    fn ask_continue(&mut self) -> bool;
}

/// Continues until a fixed total number of rounds has run; the
/// non-interactive counterpart to a prompt.
#[derive(Debug, Clone, Copy)]
pub struct RunRounds(pub usize);

impl ContinueDecision for RunRounds {
    fn ask_continue(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 > 0
    }
}

/// Lifecycle of a [`BitGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Rounds may be executed.
    Running,
    /// Terminal: the continuation decision was denied or a round failed.
    Stopped,
}

/// The feedback controller driving the generation loop.
///
/// Holds the current seed and a [`Simulator`]; each round builds the
/// LFSR+XOR circuit from the seed, runs it, reports both seeds, and
/// adopts the measured outcome. Rounds share nothing but the seed value:
/// every round owns a fresh circuit and state vector.
#[derive(Debug)]
pub struct BitGenerator {
    /// The current seed; replaced at the end of every successful round.
    seed: Vec<u8>,
    /// The simulator (and its random source) used for every round.
    simulator: Simulator,
    /// Current lifecycle state.
    state: RunState,
}

impl BitGenerator {
    /// Creates a generator from an initial seed, validating it up front
    /// (before any state vector is allocated).
    pub fn new(seed: Vec<u8>) -> Result<Self, SimError> {
        Self::with_simulator(seed, Simulator::new())
    }

    /// Creates a generator that runs on the provided simulator; used with
    /// [`Simulator::from_seed`] for reproducible sessions.
    pub fn with_simulator(seed: Vec<u8>, simulator: Simulator) -> Result<Self, SimError> {
        validate_seed(&seed)?;
        Ok(Self {
            seed,
            simulator,
            state: RunState::Running,
        })
    }

    /// The seed the next round will start from.
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// `true` until the generator stops or fails.
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Moves the generator to its terminal state.
    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
    }

    /// Executes one round: validate seed, build the circuit, simulate,
    /// read the measured bits in wire order, report, and adopt the
    /// outcome as the next seed.
    ///
    /// A failing round moves the generator to `Stopped` before the error
    /// is returned; failures are never retried because a round is
    /// deterministic in its inputs.
    pub fn round<S: ReportSink>(&mut self, sink: &mut S) -> Result<RoundReport, SimError> {
        if self.state == RunState::Stopped {
            return Err(SimError::SimulationError {
                message: "generator is stopped".to_string(),
            });
        }

        match self.round_inner(sink) {
            Ok(report) => Ok(report),
            Err(e) => {
                self.state = RunState::Stopped;
                Err(e)
            }
        }
    }

    fn round_inner<S: ReportSink>(&mut self, sink: &mut S) -> Result<RoundReport, SimError> {
        let circuit = lfsr_xor_circuit(&self.seed)?;
        sink.report(RoundEvent::CircuitBuilt(&circuit));

        let record = self.simulator.run(&circuit)?;
        let new_seed = record.bits_in_order(self.seed.len())?;

        let report = RoundReport {
            old_seed: self.seed.clone(),
            old_value: bits_to_value(&self.seed),
            new_seed: new_seed.clone(),
            new_value: bits_to_value(&new_seed),
        };
        sink.report(RoundEvent::RoundComplete(&report));

        self.seed = new_seed;
        Ok(report)
    }

    /// Runs rounds until the continuation decision denies one or a round
    /// fails. The decision is queried after each round, matching the
    /// interactive session flow.
    pub fn run<S, D>(&mut self, sink: &mut S, decision: &mut D) -> Result<(), SimError>
    where
        S: ReportSink,
        D: ContinueDecision,
    {
        while self.is_running() {
            self.round(sink)?;
            if !decision.ask_continue() {
                self.state = RunState::Stopped;
            }
        }
        Ok(())
    }
}
