// tests/generator_tests.rs

use pqrng::{
    BitGenerator, ContinueDecision, Gate, NullSink, QubitId, ReportSink, RoundEvent, RunState,
    SimError, Simulator, bits_to_value, lfsr_xor_circuit, validate_seed,
};

// Helper function to create QubitId for tests
fn qid(id: usize) -> QubitId {
    QubitId(id)
}

/// Test sink that records what arrived: one tag per event, plus the
/// rendered circuit diagrams and round reports.
#[derive(Default)]
struct RecordingSink {
    tags: Vec<&'static str>,
    rendered: String,
    rounds_seen: usize,
}

impl ReportSink for RecordingSink {
    fn report(&mut self, event: RoundEvent<'_>) {
        match event {
            RoundEvent::CircuitBuilt(circuit) => {
                self.tags.push("circuit");
                self.rendered.push_str(&format!("{}", circuit));
            }
            RoundEvent::RoundComplete(report) => {
                self.tags.push("round");
                self.rendered.push_str(&format!("{}", report));
                self.rounds_seen += 1;
            }
        }
    }
}

/// Scripted continuation decision: replays a fixed list of answers,
/// then denies.
struct ScriptedDecision {
    answers: std::vec::IntoIter<bool>,
}

impl ScriptedDecision {
    fn new(answers: Vec<bool>) -> Self {
        Self { answers: answers.into_iter() }
    }
}

impl ContinueDecision for ScriptedDecision {
    fn ask_continue(&mut self) -> bool {
        self.answers.next().unwrap_or(false)
    }
}

/// Classical reference model of one LFSR+XOR round: XOR the tap into
/// bit 0, then rotate every value one index lower (the net effect of the
/// ascending adjacent swap cascade).
fn classical_round(seed: &[u8]) -> Vec<u8> {
    let n = seed.len();
    let mut v = seed.to_vec();
    v[0] ^= v[n - 2];
    for i in 0..n - 1 {
        v.swap(i, i + 1);
    }
    v
}

#[test]
fn test_circuit_shape_matches_pattern() -> Result<(), SimError> {
    let seed = vec![0, 1, 1, 0, 1, 0, 1, 1];
    let n = seed.len();
    let circuit = lfsr_xor_circuit(&seed)?;

    // n encode gates + 1 tap + (n-1) swaps + n measurements
    assert_eq!(circuit.len(), 3 * n);
    assert_eq!(circuit.width(), n);

    let gates = circuit.gates();

    // BLOCK 1: X where the seed bit is 1, I where it is 0, in wire order.
    for (i, &bit) in seed.iter().enumerate() {
        let expected = if bit == 1 {
            Gate::NotX { target: qid(i) }
        } else {
            Gate::Identity { target: qid(i) }
        };
        assert_eq!(gates[i], expected, "encode gate {}", i);
    }

    // BLOCK 2: exactly one feedback tap, control n-2 onto wire 0.
    assert_eq!(
        gates[n],
        Gate::ControlledNot { control: qid(n - 2), target: qid(0) }
    );

    // BLOCK 3: adjacent swaps in ascending order.
    for i in 0..n - 1 {
        assert_eq!(
            gates[n + 1 + i],
            Gate::Swap { a: qid(i), b: qid(i + 1) },
            "swap {}",
            i
        );
    }

    // Every wire measured, labeled after its wire.
    for i in 0..n {
        assert_eq!(
            gates[2 * n + i],
            Gate::Measure { target: qid(i), label: format!("q{}", i) },
            "measure gate {}",
            i
        );
    }
    assert_eq!(circuit.measured_qubits(), (0..n).map(qid).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_bits_to_value_is_msb_first() {
    assert_eq!(bits_to_value(&[0, 1, 1, 0, 1, 0, 1, 1]), 107);
    assert_eq!(bits_to_value(&[1, 1, 0, 1, 0, 1, 1, 1]), 215);
    assert_eq!(bits_to_value(&[1, 0, 1, 1, 0, 1, 0, 1]), 181);
    assert_eq!(bits_to_value(&[0, 0, 0]), 0);
    assert_eq!(bits_to_value(&[1]), 1);
}

#[test]
fn test_reference_seed_round() -> Result<(), SimError> {
    // Worked 8-bit example: seed 01101011 (107). The tap flips q0 to
    // seed[0] XOR seed[6] = 1, then the shift cascade rotates every value
    // one index lower. Identical for every RNG seed.
    for rng_seed in [0u64, 1, 42, 0xdead_beef] {
        let seed = vec![0, 1, 1, 0, 1, 0, 1, 1];
        let mut generator = BitGenerator::with_simulator(seed, Simulator::from_seed(rng_seed))?;

        let report = generator.round(&mut NullSink)?;
        assert_eq!(report.old_seed, vec![0, 1, 1, 0, 1, 0, 1, 1]);
        assert_eq!(report.old_value, 107);
        assert_eq!(report.new_seed, vec![1, 1, 0, 1, 0, 1, 1, 1]);
        assert_eq!(report.new_value, 215);
        assert_eq!(generator.seed(), &[1, 1, 0, 1, 0, 1, 1, 1]);
    }
    Ok(())
}

#[test]
fn test_rounds_track_classical_reference_model() -> Result<(), SimError> {
    let seeds: [&[u8]; 4] = [
        &[0, 1, 1, 0, 1, 0, 1, 1],
        &[1, 0, 0],
        &[1, 1, 1, 1],
        &[0, 0, 1, 0, 1],
    ];
    for initial in seeds {
        let mut generator = BitGenerator::with_simulator(initial.to_vec(), Simulator::from_seed(9))?;
        let mut expected = initial.to_vec();
        for round in 0..6 {
            expected = classical_round(&expected);
            let report = generator.round(&mut NullSink)?;
            assert_eq!(
                report.new_seed, expected,
                "seed {:?}, round {}",
                initial, round
            );
        }
    }
    Ok(())
}

#[test]
fn test_new_seed_is_well_formed_bit_vector() -> Result<(), SimError> {
    for n in [3usize, 4, 5, 8, 10] {
        // Alternating seed of width n
        let seed: Vec<u8> = (0..n).map(|i| (i % 2) as u8).collect();
        let mut generator = BitGenerator::with_simulator(seed, Simulator::from_seed(3))?;
        let report = generator.round(&mut NullSink)?;

        assert_eq!(report.new_seed.len(), n);
        assert!(report.new_seed.iter().all(|&b| b == 0 || b == 1));
        assert_eq!(report.new_value, bits_to_value(&report.new_seed));
    }
    Ok(())
}

#[test]
fn test_all_zero_seed_is_a_fixed_point() -> Result<(), SimError> {
    // XOR of zeros is zero and shifting zeros changes nothing.
    let mut generator = BitGenerator::with_simulator(vec![0, 0, 0, 0], Simulator::from_seed(0))?;
    for _ in 0..3 {
        let report = generator.round(&mut NullSink)?;
        assert_eq!(report.new_seed, vec![0, 0, 0, 0]);
        assert_eq!(report.new_value, 0);
    }
    Ok(())
}

#[test]
fn test_seed_validation_boundaries() {
    // n = 0 and n = 1 fail before any state vector exists.
    assert!(matches!(
        validate_seed(&[]),
        Err(SimError::InvalidRegisterSize { size: 0, .. })
    ));
    assert!(matches!(
        validate_seed(&[1]),
        Err(SimError::InvalidRegisterSize { size: 1, .. })
    ));

    // n = 2 degenerates: the tap's control (n-2 = 0) is its own target.
    assert!(matches!(validate_seed(&[0, 0]), Err(SimError::InvalidGate { .. })));
    assert!(matches!(
        lfsr_xor_circuit(&[0, 0]),
        Err(SimError::InvalidGate { .. })
    ));

    // Above the memory ceiling.
    let wide = vec![0u8; pqrng::MAX_QUBITS + 1];
    assert!(matches!(
        validate_seed(&wide),
        Err(SimError::InvalidRegisterSize { .. })
    ));

    // Non-bit seed elements are construction defects.
    assert!(matches!(validate_seed(&[0, 2, 1]), Err(SimError::InvalidGate { .. })));

    // Smallest usable width.
    assert!(validate_seed(&[0, 1, 0]).is_ok());
}

#[test]
fn test_invalid_seed_rejected_at_construction() {
    assert!(matches!(
        BitGenerator::new(vec![1]),
        Err(SimError::InvalidRegisterSize { .. })
    ));
    assert!(matches!(
        BitGenerator::new(vec![0, 0]),
        Err(SimError::InvalidGate { .. })
    ));
}

#[test]
fn test_run_stops_when_decision_denies() -> Result<(), SimError> {
    let mut generator =
        BitGenerator::with_simulator(vec![0, 1, 1, 0, 1, 0, 1, 1], Simulator::from_seed(5))?;

    let mut sink = RecordingSink::default();

    // Deny after the second round.
    let mut decision = ScriptedDecision::new(vec![true, false]);

    generator.run(&mut sink, &mut decision)?;

    assert_eq!(sink.rounds_seen, 2);
    assert_eq!(generator.state(), RunState::Stopped);
    assert!(!generator.is_running());
    Ok(())
}

#[test]
fn test_run_rounds_counts_full_rounds() -> Result<(), SimError> {
    let mut generator =
        BitGenerator::with_simulator(vec![1, 0, 1, 1], Simulator::from_seed(4))?;

    let mut sink = RecordingSink::default();
    generator.run(&mut sink, &mut pqrng::RunRounds(3))?;

    assert_eq!(sink.rounds_seen, 3);
    assert_eq!(generator.state(), RunState::Stopped);
    Ok(())
}

#[test]
fn test_round_after_stop_is_an_error() -> Result<(), SimError> {
    let mut generator =
        BitGenerator::with_simulator(vec![1, 0, 1], Simulator::from_seed(1))?;
    generator.stop();

    let result = generator.round(&mut NullSink);
    assert!(matches!(result, Err(SimError::SimulationError { .. })));
    Ok(())
}

#[test]
fn test_reporting_is_a_pure_observer() -> Result<(), SimError> {
    // Two generators with identical simulator seeds: one with a sink that
    // inspects everything, one with the null sink. Outcomes must match.
    let seed = vec![0, 1, 1, 0, 1, 0, 1, 1];
    let mut observed = BitGenerator::with_simulator(seed.clone(), Simulator::from_seed(11))?;
    let mut silent = BitGenerator::with_simulator(seed, Simulator::from_seed(11))?;

    let mut sink = RecordingSink::default();

    for _ in 0..4 {
        let a = observed.round(&mut sink)?;
        let b = silent.round(&mut NullSink)?;
        assert_eq!(a, b, "reporting must not perturb the round outcome");
    }
    assert_eq!(sink.rounds_seen, 4);
    assert!(sink.rendered.contains("Output value:"));
    Ok(())
}

#[test]
fn test_round_events_arrive_in_order() -> Result<(), SimError> {
    let mut generator =
        BitGenerator::with_simulator(vec![1, 0, 1, 1], Simulator::from_seed(2))?;

    let mut sink = RecordingSink::default();

    generator.round(&mut sink)?;
    generator.round(&mut sink)?;
    assert_eq!(sink.tags, vec!["circuit", "round", "circuit", "round"]);
    Ok(())
}
