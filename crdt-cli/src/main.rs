use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crdt_core::clock::SystemMonotonicClock;
use crdt_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use crdt_core::{GCounter, ORSet, PNCounter, Process, TwoPhaseSet, GSet, LWWRegister};
use serde::Deserialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "crdt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build replicas of a CRDT kind, apply a scripted sequence of
    /// mutations, merge them pairwise, and report convergence.
    Demo {
        kind: Kind,

        /// Number of replicas to simulate.
        #[arg(short, long, default_value_t = 5)]
        replicas: usize,
    },
    /// Replay a JSON-encoded sequence of `{replica, op}` commands.
    Scenario {
        /// Path to a scenario file (see SPEC_FULL.md §5 for the format).
        file: std::path::PathBuf,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Kind {
    Gcounter,
    Pncounter,
    Gset,
    TwoPhaseSet,
    Orset,
    LwwRegister,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = LogLevel::from_str(&args.log_level).unwrap_or_else(|| {
        eprintln!("Invalid log level '{}', using 'info'", args.log_level);
        LogLevel::Info
    });
    let config = LogConfig::new(log_level).json_format(args.json_logs);
    init_logging_with_config(config)?;

    match args.command {
        Command::Demo { kind, replicas } => run_demo(kind, replicas),
        Command::Scenario { file } => run_scenario(&file),
    }
}

fn run_demo(kind: Kind, replicas: usize) -> Result<()> {
    if replicas < 2 {
        bail!("need at least 2 replicas to demonstrate convergence");
    }
    let clock = SystemMonotonicClock::new();
    let processes: Vec<Process> = (0..replicas).map(|i| Process::new(format!("R{i}"), i as i64)).collect();

    match kind {
        Kind::Gcounter => {
            let mut reps: Vec<GCounter> = processes.iter().cloned().map(GCounter::new).collect();
            for r in &mut reps {
                r.incr(&clock);
                r.incr(&clock);
            }
            merge_all_pairwise(&mut reps, |a, b| a.merge(b));
            for (p, r) in processes.iter().zip(&reps) {
                info!(process = %p, value = r.value(), "converged replica");
            }
        }
        Kind::Pncounter => {
            let mut reps: Vec<PNCounter> = processes.iter().cloned().map(PNCounter::new).collect();
            for (i, r) in reps.iter_mut().enumerate() {
                if i % 2 == 0 {
                    r.incr(&clock);
                } else {
                    r.decr(&clock);
                }
            }
            merge_all_pairwise(&mut reps, |a, b| a.merge(b));
            for (p, r) in processes.iter().zip(&reps) {
                info!(process = %p, value = r.value(), "converged replica");
            }
        }
        Kind::Gset => {
            let mut reps: Vec<GSet<String>> = processes.iter().cloned().map(GSet::new).collect();
            for (i, r) in reps.iter_mut().enumerate() {
                r.add(format!("item-{i}"));
            }
            merge_all_pairwise(&mut reps, |a, b| a.merge(b));
            for (p, r) in processes.iter().zip(&reps) {
                info!(process = %p, value = ?r.value(), "converged replica");
            }
        }
        Kind::TwoPhaseSet => {
            let mut reps: Vec<TwoPhaseSet<String>> = processes.iter().cloned().map(TwoPhaseSet::new).collect();
            reps[0].add("x".to_string());
            merge_all_pairwise(&mut reps, |a, b| a.merge(b));
            reps[1].remove("x".to_string());
            merge_all_pairwise(&mut reps, |a, b| a.merge(b));
            for (p, r) in processes.iter().zip(&reps) {
                info!(process = %p, value = ?r.value(), "converged replica");
            }
        }
        Kind::Orset => {
            let mut reps: Vec<ORSet<String>> = processes.iter().cloned().map(ORSet::new).collect();
            reps[0].add("x".to_string(), &clock);
            merge_all_pairwise(&mut reps, |a, b| a.merge(b));
            reps[1].remove(&"x".to_string(), &clock);
            reps[0].add("x".to_string(), &clock);
            merge_all_pairwise(&mut reps, |a, b| a.merge(b));
            for (p, r) in processes.iter().zip(&reps) {
                info!(process = %p, value = ?r.value(), "converged replica (add-wins)");
            }
        }
        Kind::LwwRegister => {
            let mut reps: Vec<LWWRegister<String>> = processes.iter().cloned().map(LWWRegister::new).collect();
            for (i, r) in reps.iter_mut().enumerate() {
                r.set(format!("value-from-{i}"), &clock);
            }
            merge_all_pairwise(&mut reps, |a, b| a.merge(b));
            for (p, r) in processes.iter().zip(&reps) {
                info!(process = %p, value = ?r.value(), "converged replica");
            }
        }
    }

    Ok(())
}

/// Merge every replica with every other, in index order, twice (forward
/// then backward) so the pairwise merges reach full convergence.
fn merge_all_pairwise<T: Clone>(reps: &mut [T], merge: impl Fn(&mut T, &T)) {
    let n = reps.len();
    for _ in 0..2 {
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let snapshot = reps[j].clone();
                    merge(&mut reps[i], &snapshot);
                }
            }
        }
    }
}

#[derive(Deserialize, Debug)]
struct ScenarioFile {
    kind: String,
    #[serde(default = "default_replica_count")]
    replicas: usize,
    ops: Vec<ScenarioOp>,
}

fn default_replica_count() -> usize {
    5
}

#[derive(Deserialize, Debug)]
struct ScenarioOp {
    replica: usize,
    op: String,
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    with: Option<usize>,
}

fn run_scenario(path: &std::path::Path) -> Result<()> {
    let clock = SystemMonotonicClock::new();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    let scenario: ScenarioFile = serde_json::from_str(&text).context("parsing scenario file")?;

    let processes: Vec<Process> = (0..scenario.replicas)
        .map(|i| Process::new(format!("R{i}"), i as i64))
        .collect();

    macro_rules! replica_for {
        ($op:expr, $reps:expr) => {{
            if $op.replica >= $reps.len() {
                bail!("replica index {} out of range", $op.replica);
            }
            &mut $reps[$op.replica]
        }};
    }
    macro_rules! merge_from {
        ($op:expr, $reps:expr) => {{
            let from = $op.with.context("merge op requires `with`")?;
            if from >= $reps.len() {
                bail!("replica index {from} out of range");
            }
            $reps[from].clone()
        }};
    }

    match scenario.kind.as_str() {
        "gset" => {
            let mut reps: Vec<GSet<String>> = processes.iter().cloned().map(GSet::new).collect();
            for op in &scenario.ops {
                match op.op.as_str() {
                    "add" => replica_for!(op, reps).add(op.item.clone().context("add requires item")?),
                    "merge" => {
                        let snapshot = merge_from!(op, reps);
                        replica_for!(op, reps).merge(&snapshot);
                    }
                    other => bail!("unsupported op {other}"),
                }
            }
            for (p, r) in processes.iter().zip(&reps) {
                println!("{p}: {:?}", r.value());
            }
        }
        "two-phase-set" => {
            let mut reps: Vec<TwoPhaseSet<String>> = processes.iter().cloned().map(TwoPhaseSet::new).collect();
            for op in &scenario.ops {
                match op.op.as_str() {
                    "add" => replica_for!(op, reps).add(op.item.clone().context("add requires item")?),
                    "remove" => {
                        replica_for!(op, reps).remove(op.item.clone().context("remove requires item")?);
                    }
                    "merge" => {
                        let snapshot = merge_from!(op, reps);
                        replica_for!(op, reps).merge(&snapshot);
                    }
                    other => bail!("unsupported op {other}"),
                }
            }
            for (p, r) in processes.iter().zip(&reps) {
                println!("{p}: {:?}", r.value());
            }
        }
        "orset" => {
            let mut reps: Vec<ORSet<String>> = processes.iter().cloned().map(ORSet::new).collect();
            for op in &scenario.ops {
                match op.op.as_str() {
                    "add" => replica_for!(op, reps).add(op.item.clone().context("add requires item")?, &clock),
                    "remove" => {
                        let item = op.item.clone().context("remove requires item")?;
                        replica_for!(op, reps).remove(&item, &clock);
                    }
                    "merge" => {
                        let snapshot = merge_from!(op, reps);
                        replica_for!(op, reps).merge(&snapshot);
                    }
                    other => bail!("unsupported op {other}"),
                }
            }
            for (p, r) in processes.iter().zip(&reps) {
                println!("{p}: {:?}", r.value());
            }
        }
        "gcounter" => {
            let mut reps: Vec<GCounter> = processes.iter().cloned().map(GCounter::new).collect();
            for op in &scenario.ops {
                match op.op.as_str() {
                    "incr" => replica_for!(op, reps).incr(&clock),
                    "merge" => {
                        let snapshot = merge_from!(op, reps);
                        replica_for!(op, reps).merge(&snapshot);
                    }
                    other => bail!("unsupported op {other}"),
                }
            }
            for (p, r) in processes.iter().zip(&reps) {
                println!("{p}: {}", r.value());
            }
        }
        "pncounter" => {
            let mut reps: Vec<PNCounter> = processes.iter().cloned().map(PNCounter::new).collect();
            for op in &scenario.ops {
                match op.op.as_str() {
                    "incr" => replica_for!(op, reps).incr(&clock),
                    "decr" => replica_for!(op, reps).decr(&clock),
                    "merge" => {
                        let snapshot = merge_from!(op, reps);
                        replica_for!(op, reps).merge(&snapshot);
                    }
                    other => bail!("unsupported op {other}"),
                }
            }
            for (p, r) in processes.iter().zip(&reps) {
                println!("{p}: {}", r.value());
            }
        }
        other => bail!("unsupported scenario kind {other}"),
    }

    Ok(())
}
