// src/simulation/results.rs
use crate::core::{QubitId, SimError};
use std::collections::HashMap;
use std::fmt;

/// Holds the classical outcome of a circuit simulation.
/// Contains one collapsed bit per measured wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRecord {
    /// Maps measured wires to their observed classical bit.
    bits: HashMap<QubitId, u8>,
}

impl MeasurementRecord {
    /// Creates a new, empty record. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self {
            bits: HashMap::new(),
        }
    }

    /// Records the collapsed bit for a wire. (Internal visibility)
    pub(crate) fn record_bit(&mut self, qubit: QubitId, bit: u8) {
        self.bits.insert(qubit, bit);
    }

    /// Gets the observed bit for a specific wire, if it was measured.
    pub fn bit(&self, qubit: &QubitId) -> Option<u8> {
        self.bits.get(qubit).copied()
    }

    /// Returns a reference to the map containing all recorded bits.
    pub fn all_bits(&self) -> &HashMap<QubitId, u8> {
        &self.bits
    }

    /// Extracts the outcome as an ordered bit vector over wires
    /// `q0..q(n-1)`. This is the shape the generator feeds back as the
    /// next seed.
    ///
    /// # Errors
    /// `SimulationError` if any wire in `[0, num_qubits)` is missing from
    /// the record, meaning the circuit did not measure the full register.
    pub fn bits_in_order(&self, num_qubits: usize) -> Result<Vec<u8>, SimError> {
        (0..num_qubits)
            .map(|i| {
                self.bit(&QubitId(i)).ok_or_else(|| SimError::SimulationError {
                    message: format!("no measurement recorded for {}", QubitId(i)),
                })
            })
            .collect()
    }

    /// Number of measured wires in the record.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` if nothing was measured.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Record:")?;
        if self.bits.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            // Sort by wire for consistent and readable output
            let mut sorted_bits: Vec<_> = self.bits.iter().collect();
            sorted_bits.sort_by_key(|(q, _)| *q);
            for (q, bit) in sorted_bits {
                writeln!(f, "    {}: {}", q, bit)?;
            }
        }
        Ok(())
    }
}
