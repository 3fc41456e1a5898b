//! Interactive generator session: builds and prints each round's circuit,
//! reports both seeds with their integer values, and asks on stdin whether
//! to continue the sequence.

use pqrng::{BitGenerator, ContinueDecision, ReportSink, RoundEvent};
use std::io::{self, BufRead, Write};

/// Prints every round event to stdout.
struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn report(&mut self, event: RoundEvent<'_>) {
        match event {
            RoundEvent::CircuitBuilt(circuit) => {
                println!("{}", circuit);
            }
            RoundEvent::RoundComplete(report) => {
                println!("{}", report);
            }
        }
    }
}

/// Asks "Continue sequence?" on stdin; anything except `n` continues.
struct StdinPrompt;

impl ContinueDecision for StdinPrompt {
    fn ask_continue(&mut self) -> bool {
        print!("Continue sequence? [n to stop] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) => false, // EOF stops the session
            Ok(_) => answer.trim() != "n",
            Err(_) => false,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The worked 8-bit example seed, 01101011 = 107.
    let seed = vec![0, 1, 1, 0, 1, 0, 1, 1];

    let mut generator = BitGenerator::new(seed)?;
    generator.run(&mut ConsoleSink, &mut StdinPrompt)?;

    Ok(())
}
