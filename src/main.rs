//! Tank Search entry point
//!
//! Runs one search (optionally with an operator typing sensor readings) or
//! races every strategy on the same field and prints the leaderboard.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec2;
use serde::Serialize;

use tank_search::sim::{
    Boat, Comparison, InteractiveField, LogVisualizer, OperatorConsole, Position, RunOutcome,
    Simulation, StrategyKind, Tank, TrajectoryRecorder, Visualizer, compare_strategies, run,
};
use tank_search::{Ranking, SimSettings};

#[derive(Parser, Debug)]
#[command(version, about = "Autonomous boats searching a tank for a signal source")]
struct Arguments {
    /// JSON settings file
    #[arg(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Strategy for a single run
    #[arg(short, long, value_parser = parse_strategy)]
    strategy: Option<StrategyKind>,

    /// Run seed
    #[arg(long, value_parser)]
    seed: Option<u64>,

    /// Stop a single run after this many ticks
    #[arg(long, value_parser)]
    max_ticks: Option<u64>,

    /// Race every strategy on the same field
    #[arg(long)]
    compare: bool,

    /// Type sensor readings in by hand instead of using the configured field
    #[arg(long, conflicts_with = "compare")]
    interactive: bool,

    /// Log the turning circle of every move (debug level)
    #[arg(long)]
    trace_turns: bool,

    /// Write a JSON report here
    #[arg(short, long, value_parser)]
    report: Option<PathBuf>,
}

fn parse_strategy(name: &str) -> Result<StrategyKind, String> {
    StrategyKind::from_str(name).ok_or_else(|| {
        let known: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown strategy '{}' (expected one of: {})", name, known.join(", "))
    })
}

#[derive(Serialize)]
#[serde(untagged)]
enum Report {
    Single(SingleReport),
    Comparison {
        comparison: Comparison,
        ranking: Ranking,
    },
}

#[derive(Serialize)]
struct SingleReport {
    strategy: StrategyKind,
    seed: u64,
    outcome: RunOutcome,
    coverage: f64,
    trajectories: Vec<Vec<Position>>,
}

/// Sends every snapshot to the recorder and the log
struct Tee<'a>(&'a mut TrajectoryRecorder, &'a mut LogVisualizer);

impl Visualizer for Tee<'_> {
    fn update(&mut self, tank: &Tank, boats: &[Boat]) {
        self.0.update(tank, boats);
        self.1.update(tank, boats);
    }

    fn done(&mut self) {
        self.0.done();
        self.1.done();
    }
}

/// Operator at a terminal: prompts on stderr, answers on stdin
struct TerminalConsole;

impl TerminalConsole {
    fn ask(prompt: &str) -> Option<String> {
        eprint!("{prompt}");
        std::io::stderr().flush().ok()?;
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl OperatorConsole for TerminalConsole {
    fn reading(&mut self, point: DVec2) -> f64 {
        Self::ask(&format!("Reading at ({:.2}, {:.2}): ", point.x, point.y))
            .and_then(|answer| answer.parse().ok())
            .unwrap_or(f64::NAN)
    }

    fn end_requested(&mut self) -> bool {
        match Self::ask("Source found? [y/N]: ") {
            Some(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
            // Nobody left to answer
            None => true,
        }
    }
}

fn run_single(settings: &SimSettings, interactive: bool) -> Result<Report> {
    let kind = settings.strategy;
    let mut sim = if interactive {
        let field = InteractiveField::new(TerminalConsole, Vec::new());
        let tank = Tank::new(settings.width, settings.height, Box::new(field))?;
        Simulation::new(tank, &settings.starts(), &settings.fleet(kind), settings.seed)?
    } else {
        settings.build_simulation(kind)?
    };

    let mut recorder = TrajectoryRecorder::new();
    let mut logger = LogVisualizer::new();
    let outcome = run(
        &mut sim,
        Some(&mut Tee(&mut recorder, &mut logger)),
        settings.max_ticks,
    );
    println!("{}: {}", kind, outcome);
    for boat in &sim.boats {
        println!("  boat {} ended at {}", boat.id(), boat.position());
    }

    Ok(Report::Single(SingleReport {
        strategy: kind,
        seed: settings.seed,
        outcome,
        coverage: sim.tank.coverage(),
        trajectories: recorder.into_trajectories(),
    }))
}

fn run_comparison(settings: &SimSettings) -> Result<Report> {
    let comparison = compare_strategies(settings, &StrategyKind::COMPARED)
        .context("strategy comparison failed")?;
    let ranking = Ranking::from_comparison(&comparison);

    println!(
        "Strategy comparison (seed {}, cap {} ticks):",
        settings.seed, settings.comparison_cap
    );
    for line in ranking.lines() {
        println!("{line}");
    }
    match ranking.winner() {
        Some(winner) => println!("Winner: {}", winner.kind),
        None => println!("No strategy found the source within the cap"),
    }

    Ok(Report::Comparison {
        comparison,
        ranking,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();
    let mut settings = match &args.config {
        Some(path) => SimSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SimSettings::default(),
    };
    if let Some(kind) = args.strategy {
        settings.strategy = kind;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if args.max_ticks.is_some() {
        settings.max_ticks = args.max_ticks;
    }
    settings.trace_turns |= args.trace_turns;
    settings.validate().context("invalid settings")?;

    let report = if args.compare {
        run_comparison(&settings)?
    } else {
        run_single(&settings, args.interactive)?
    };

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}
