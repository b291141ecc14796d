//! Headless Session Runner
//!
//! Runs a seeded session without a terminal UI and prints a summary, for
//! balancing map generation and replaying scripted edits.
//!
//! Script lines are `<tick> <edit command>`: the edit is applied once that
//! many ticks have run. Each edit spends one action cooldown of host time.

use circuit_commander::core::config::SimulationConfig;
use circuit_commander::core::error::{Result, SimError};
use circuit_commander::core::random::Seed;
use circuit_commander::core::types::Tick;
use circuit_commander::edit::EditCommand;
use circuit_commander::grid::{render_ascii, Grid};
use circuit_commander::simulation::{Session, SimulationEvent};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Headless Session Runner - seeded runs with summary output
#[derive(Parser, Debug)]
#[command(name = "headless_run")]
#[command(about = "Run a Circuit Commander session headless and print a summary")]
struct Args {
    /// Seed: an integer, or any text (hashed)
    #[arg(long, default_value = "circuit")]
    seed: String,

    /// Board width in tiles (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Board height in tiles (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Ticks to run. Defaults to the session length from config.
    #[arg(long)]
    ticks: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edit script, one `<tick> <command>` per line
    #[arg(long)]
    script: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include the final board in the output
    #[arg(long)]
    dump_grid: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    seed: String,
    width: usize,
    height: usize,
    ticks: Tick,
    game_over: bool,
    score: u64,
    last_consumed: u64,
    generators: usize,
    sinks: usize,
    fortified: usize,
    blocked: usize,
    edits_applied: usize,
    edits_rejected: usize,
    overload_events: usize,
    destroyed: usize,
    relocations: usize,
    round_cap_hits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<Grid>,
}

/// Fallback length when the session itself is unbounded
const UNBOUNDED_RUN_TICKS: u64 = 900;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circuit_commander=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let cooldown_ms = config.action_cooldown_ms;
    let tick_ms = config.tick_interval_ms;
    let ticks = args.ticks.unwrap_or(if config.max_ticks > 0 {
        config.max_ticks
    } else {
        UNBOUNDED_RUN_TICKS
    });

    let mut session = Session::with_config(Seed::parse(&args.seed), config)?;
    let mut summary = RunSummary {
        seed: args.seed.clone(),
        width: session.grid().width,
        height: session.grid().height,
        ticks: 0,
        game_over: false,
        score: 0,
        last_consumed: 0,
        generators: session.grid().generators().len(),
        sinks: session.grid().sinks().len(),
        fortified: session.grid().count_where(|t| t.fortified),
        blocked: session.grid().count_where(|t| t.blocked),
        edits_applied: 0,
        edits_rejected: 0,
        overload_events: 0,
        destroyed: 0,
        relocations: 0,
        round_cap_hits: 0,
        grid: None,
    };

    let mut pending = script.iter().peekable();
    for _ in 0..ticks {
        let now = session.current_tick();
        while let Some((_, command)) = pending.next_if(|(at, _)| *at <= now) {
            if session.execute(command) {
                summary.edits_applied += 1;
            } else {
                summary.edits_rejected += 1;
            }
            session.advance_clock(cooldown_ms);
        }

        let report = session.tick();
        session.advance_clock(tick_ms);

        summary.round_cap_hits += usize::from(report.hit_round_cap);
        for event in &report.events {
            match event {
                SimulationEvent::TileOverloaded { .. } => summary.overload_events += 1,
                SimulationEvent::TileDestroyed { .. } => summary.destroyed += 1,
                SimulationEvent::GeneratorRelocated { .. } => summary.relocations += 1,
                SimulationEvent::SessionOver { .. } => {}
            }
        }
        if session.is_game_over() {
            break;
        }
    }

    summary.ticks = session.current_tick();
    summary.game_over = session.is_game_over();
    summary.score = session.score();
    summary.last_consumed = session.total_consumed();

    match args.format.as_str() {
        "json" => {
            if args.dump_grid {
                summary.grid = Some(session.grid().clone());
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            println!("Session Result");
            println!("==============");
            println!("Seed: {}", summary.seed);
            println!("Board: {}x{}", summary.width, summary.height);
            println!(
                "Ticks: {}{}",
                summary.ticks,
                if summary.game_over { " (session over)" } else { "" }
            );
            println!("Score: {}", summary.score);
            println!(
                "Generators: {}, Sinks: {}, Fortified: {}, Blocked: {}",
                summary.generators, summary.sinks, summary.fortified, summary.blocked
            );
            println!(
                "Edits: {} applied, {} rejected",
                summary.edits_applied, summary.edits_rejected
            );
            println!(
                "Overloads: {}, Destroyed: {}, Relocations: {}, Round-cap hits: {}",
                summary.overload_events,
                summary.destroyed,
                summary.relocations,
                summary.round_cap_hits
            );
            if args.dump_grid {
                println!();
                print!("{}", render_ascii(session.grid()));
            }
        }
    }

    Ok(())
}

/// Parse `<tick> <command>` lines, skipping blanks and `#` comments.
/// The result is sorted by tick, keeping file order within a tick.
fn load_script(path: &Path) -> Result<Vec<(Tick, EditCommand)>> {
    let content = std::fs::read_to_string(path)?;
    let mut script = Vec::new();

    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = line.split_once(char::is_whitespace).and_then(|(tick, rest)| {
            Some((tick.parse::<Tick>().ok()?, EditCommand::parse(rest)?))
        });
        match parsed {
            Some(entry) => script.push(entry),
            None => {
                return Err(SimError::InvalidConfig(format!(
                    "{}:{}: bad script line '{}'",
                    path.display(),
                    n + 1,
                    line
                )))
            }
        }
    }

    script.sort_by_key(|(tick, _)| *tick);
    Ok(script)
}
