// src/simulation/engine.rs
use crate::core::{QubitId, SimError, StateVector};
use crate::gates::Gate;
use crate::simulation::MeasurementRecord;
use crate::validation;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;

/// The core simulation engine that holds and evolves the amplitude
/// representation of the register. (Internal visibility)
///
/// All four unitary gates in the set are permutations of the basis
/// states, so they are applied as in-place amplitude swaps driven by
/// bit-mask index arithmetic rather than by generic matrix products.
pub(crate) struct SimulationEngine {
    /// The global state vector, 2^n amplitudes for an n-qubit register.
    /// Bit `i` of a basis-state index is the value of qubit `i`.
    state: StateVector,
}

impl SimulationEngine {
    /// Initializes the engine for an `num_qubits`-wide register in the
    /// all-zero basis state |0...0>.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, SimError> {
        Ok(Self {
            state: StateVector::new(num_qubits)?,
        })
    }

    /// Read access to the current state, for the simulator and tests.
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Replaces the engine state directly. Used by tests to exercise the
    /// measurement path on prepared (superposed) states.
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), SimError> {
        if state.dim() != self.state.dim() {
            Err(SimError::SimulationError {
                message: format!(
                    "cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    /// Checks a wire reference against the register width.
    /// Out-of-range wires fail fast; they are never clamped.
    fn wire_index(&self, qubit: QubitId) -> Result<usize, SimError> {
        if qubit.0 >= self.state.num_qubits() {
            Err(SimError::IndexOutOfRange {
                qubit,
                num_qubits: self.state.num_qubits(),
            })
        } else {
            Ok(qubit.0)
        }
    }

    /// Applies a single unitary gate to the state.
    ///
    /// `Gate::Measure` is rejected here; the simulator routes it through
    /// [`SimulationEngine::measure`] instead.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), SimError> {
        match gate {
            Gate::Identity { target } => {
                // Validates the wire, leaves every amplitude untouched.
                self.wire_index(*target)?;
            }
            Gate::NotX { target } => {
                let t = self.wire_index(*target)?;
                self.apply_not(t);
            }
            Gate::ControlledNot { control, target } => {
                let c = self.wire_index(*control)?;
                let t = self.wire_index(*target)?;
                if c == t {
                    return Err(SimError::InvalidGate {
                        message: format!(
                            "controlled-NOT control {} coincides with its target",
                            control
                        ),
                    });
                }
                self.apply_controlled_not(c, t);
            }
            Gate::Swap { a, b } => {
                let wa = self.wire_index(*a)?;
                let wb = self.wire_index(*b)?;
                if wa == wb {
                    return Err(SimError::InvalidGate {
                        message: format!("SWAP operands coincide ({})", a),
                    });
                }
                self.apply_swap(wa, wb);
            }
            Gate::Measure { .. } => {
                return Err(SimError::SimulationError {
                    message: "measurement gates must not be passed to apply_gate".to_string(),
                });
            }
        }
        Ok(())
    }

    /// X gate: swap the amplitudes of every pair of basis states that
    /// differ only in the target bit.
    fn apply_not(&mut self, target: usize) {
        let mask = 1usize << target;
        let amps = self.state.vector_mut();
        for i in 0..amps.len() {
            // Visit each pair once, from the side where the target bit is 0.
            if i & mask == 0 {
                amps.swap(i, i | mask);
            }
        }
    }

    /// CNOT: where the control bit is 1, swap the amplitude with the
    /// index obtained by flipping the target bit. Control-0 indices are
    /// untouched.
    fn apply_controlled_not(&mut self, control: usize, target: usize) {
        let c_mask = 1usize << control;
        let t_mask = 1usize << target;
        let amps = self.state.vector_mut();
        for i in 0..amps.len() {
            if (i & c_mask) != 0 && (i & t_mask) == 0 {
                amps.swap(i, i | t_mask);
            }
        }
    }

    /// SWAP: exchange the amplitudes of every pair of indices related by
    /// exchanging bits `a` and `b`.
    fn apply_swap(&mut self, a: usize, b: usize) {
        let a_mask = 1usize << a;
        let b_mask = 1usize << b;
        let amps = self.state.vector_mut();
        for i in 0..amps.len() {
            // Each unordered pair is visited exactly once, from the side
            // where bit a is 1 and bit b is 0; indices with equal bits map
            // to themselves.
            if (i & a_mask) != 0 && (i & b_mask) == 0 {
                amps.swap(i, i ^ a_mask ^ b_mask);
            }
        }
    }

    /// Joint projective measurement of `targets`.
    ///
    /// Draws one assignment of classical bits over the measured wires with
    /// probability equal to the summed squared magnitudes of all basis
    /// states consistent with that assignment, then collapses the state:
    /// inconsistent amplitudes are zeroed and the remainder rescaled by
    /// 1/sqrt(p). One bit per target is written into `record`.
    ///
    /// # Errors
    /// * `IndexOutOfRange` for a target outside the register.
    /// * `InvalidGate` for duplicate targets in one joint measurement.
    /// * `NumericDrift` if the pre-measurement state is no longer
    ///   normalized within tolerance.
    pub(crate) fn measure<R: Rng>(
        &mut self,
        targets: &[QubitId],
        rng: &mut R,
        record: &mut MeasurementRecord,
    ) -> Result<(), SimError> {
        if targets.is_empty() {
            return Ok(()); // Nothing to measure
        }

        let mut wires = Vec::with_capacity(targets.len());
        for q in targets {
            let w = self.wire_index(*q)?;
            if wires.contains(&w) {
                return Err(SimError::InvalidGate {
                    message: format!("duplicate measurement target {}", q),
                });
            }
            wires.push(w);
        }

        // Drift beyond tolerance means the unitary bookkeeping is broken;
        // surface it before sampling from a skewed distribution.
        validation::check_normalization(&self.state, None)?;

        // 1. Marginal probability of each joint assignment over the
        //    measured wires. Assignment key: bit j holds the value of
        //    wires[j].
        let num_outcomes = 1usize << wires.len();
        let mut outcome_probs = vec![0.0f64; num_outcomes];
        for (i, amp) in self.state.vector().iter().enumerate() {
            let mut key = 0usize;
            for (j, w) in wires.iter().enumerate() {
                if (i >> *w) & 1 == 1 {
                    key |= 1 << j;
                }
            }
            outcome_probs[key] += amp.norm_sqr();
        }

        // 2. Draw one assignment by cumulative sampling.
        let total: f64 = outcome_probs.iter().sum();
        let p_sample: f64 = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut chosen = num_outcomes - 1;
        for (key, p) in outcome_probs.iter().enumerate() {
            cumulative += p;
            if p_sample < cumulative {
                chosen = key;
                break;
            }
        }
        // Fallback in case rounding let p_sample reach the total while the
        // final bucket is empty: pick the last assignment with weight.
        if outcome_probs[chosen] <= 0.0 {
            chosen = outcome_probs
                .iter()
                .rposition(|p| *p > 0.0)
                .ok_or_else(|| SimError::SimulationError {
                    message: "no measurement outcome carries probability".to_string(),
                })?;
        }

        // 3. Collapse: zero inconsistent amplitudes, renormalize the rest.
        let scale = 1.0 / outcome_probs[chosen].sqrt();
        let dim = self.state.dim();
        let mut new_vec = vec![Complex::zero(); dim];
        for (i, amp) in self.state.vector().iter().enumerate() {
            let consistent = wires
                .iter()
                .enumerate()
                .all(|(j, w)| (i >> *w) & 1 == (chosen >> j) & 1);
            if consistent {
                new_vec[i] = *amp * scale;
            }
        }
        self.state = StateVector::from_amplitudes(new_vec, self.state.num_qubits());

        // 4. Record one classical bit per measured wire.
        for (j, q) in targets.iter().enumerate() {
            record.record_bit(*q, ((chosen >> j) & 1) as u8);
        }

        Ok(())
    }
}
