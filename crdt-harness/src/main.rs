//! Scenario-driver binary for component C11's stateful machines.
//!
//! Replays a fixed number of synchronization rounds against `R` replicas
//! of an ORSet and reports whether they converged, for manually
//! reproducing a failing interleaving found by `crdt-core`'s property
//! tests outside of `cargo test`.

use anyhow::Result;
use clap::Parser;
use crdt_core::clock::FixedClock;
use crdt_core::harness::{fully_converged, synchronize_line};
use crdt_core::orset::ORSet;
use crdt_core::process::Process;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "crdt-harness")]
#[command(about = "Replay an ORSet convergence scenario", long_about = None)]
struct Args {
    /// Number of replicas to simulate.
    #[arg(short, long, default_value_t = 5)]
    replicas: usize,

    /// Number of synchronization rounds to run.
    #[arg(long, default_value_t = 3)]
    rounds: usize,

    /// RNG seed controlling the synchronization order, for reproducing a
    /// specific interleaving.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let clock = FixedClock::new(0);
    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);

    let mut replicas: Vec<ORSet<String>> = (0..args.replicas)
        .map(|i| ORSet::new(Process::new(format!("R{i}"), i as i64)))
        .collect();

    // R0 adds x; concurrently R1 removes it without having observed R0's
    // add (spec §8 scenario S8: add-wins).
    replicas[0].add("x".to_string(), &clock);
    if replicas.len() > 1 {
        replicas[1].remove(&"x".to_string(), &clock);
    }

    for round in 0..args.rounds {
        synchronize_line(&mut replicas, &mut rng);
        let converged = fully_converged(&replicas);
        println!("round {round}: converged = {converged}");
        if converged {
            for (i, r) in replicas.iter().enumerate() {
                println!("  R{i}: {:?}", r.value());
            }
            break;
        }
    }

    Ok(())
}
