// src/gates/mod.rs

//! Defines the gate set applied to the simulated register.
//!
//! The set is deliberately small: the generator's LFSR+XOR pattern only
//! needs classical-reversible gates (Identity, NotX, ControlledNot, Swap)
//! plus projective measurement. All four unitary gates are permutations
//! of the basis states, so they preserve total probability exactly.

use crate::core::QubitId;
use std::fmt;

/// A single instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Leaves the target qubit untouched. Emitted for seed bits that are 0,
    /// relying on the guarantee that every qubit starts at |0>.
    Identity {
        /// The wire the (no-op) gate sits on.
        target: QubitId,
    },

    /// The quantum NOT (X) gate: swaps the amplitudes of every pair of
    /// basis states differing only in the target bit. The only mechanism
    /// by which a classical 1 is written into the register.
    NotX {
        /// The wire whose bit is flipped.
        target: QubitId,
    },

    /// Controlled-NOT: flips the target bit on every basis state whose
    /// control bit is 1. Realizes the XOR feedback tap.
    ControlledNot {
        /// The wire whose value conditions the flip.
        control: QubitId,
        /// The wire that is conditionally flipped.
        target: QubitId,
    },

    /// Exchanges the values of two wires on every basis state.
    /// Cascaded over adjacent pairs this realizes the shift register.
    Swap {
        /// First wire of the exchanged pair.
        a: QubitId,
        /// Second wire of the exchanged pair.
        b: QubitId,
    },

    /// Projective measurement of one wire: samples a classical bit
    /// according to probability law and collapses the state to match.
    Measure {
        /// The wire to collapse.
        target: QubitId,
        /// Key under which the classical outcome is reported.
        label: String,
    },
}

impl Gate {
    /// Returns every wire the gate touches, in operand order.
    /// Used by [`Circuit`](crate::circuits::Circuit) to track the set of
    /// wires a program involves.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Identity { target } => vec![*target],
            Gate::NotX { target } => vec![*target],
            Gate::ControlledNot { control, target } => vec![*control, *target],
            Gate::Swap { a, b } => vec![*a, *b],
            Gate::Measure { target, .. } => vec![*target],
        }
    }

    /// `true` for [`Gate::Measure`], which collapses rather than evolves
    /// the state and is routed differently by the simulator.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure { .. })
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Identity { target } => write!(f, "I({})", target),
            Gate::NotX { target } => write!(f, "X({})", target),
            Gate::ControlledNot { control, target } => write!(f, "CNOT({}, {})", control, target),
            Gate::Swap { a, b } => write!(f, "SWAP({}, {})", a, b),
            Gate::Measure { target, label } => write!(f, "M({}, '{}')", target, label),
        }
    }
}
