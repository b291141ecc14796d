//! Circuit Commander - Entry Point
//!
//! Interactive terminal loop: builds a seeded session, then reads edit and
//! tick commands from stdin. Host time between commands feeds the action
//! clock, so edits typed in quick succession hit the cooldown.

use circuit_commander::core::error::Result;
use circuit_commander::core::random::Seed;
use circuit_commander::edit::EditCommand;
use circuit_commander::grid::{render_ascii, TileKind};
use circuit_commander::simulation::{Session, SimulationEvent, TickReport};

use std::io::{self, Write};
use std::time::Instant;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circuit_commander=info".into()),
        )
        .init();

    let seed = std::env::args()
        .nth(1)
        .map(|raw| Seed::parse(&raw))
        .unwrap_or(Seed::Text("circuit".into()));

    let mut session = Session::initialize(seed, 12, 8)?;

    println!("\n=== CIRCUIT COMMANDER ===");
    println!("Route power from generators (G) on the left to sinks (S) on the right");
    println!();
    println!("Commands:");
    println!("  tick / t                  - Advance simulation by one tick");
    println!("  run <n>                   - Run n simulation ticks");
    println!("  wire <x> <y> <shape> [r]  - Place wire (straight|corner|t|cross), r quarter turns");
    println!("  breaker <x> <y> [r]       - Place breaker");
    println!("  switch <x> <y> [r]        - Place switch");
    println!("  rotate <x> <y>            - Rotate tile clockwise");
    println!("  toggle <x> <y>            - Flip a switch");
    println!("  remove <x> <y>            - Clear a tile");
    println!("  status / s                - Show detailed status");
    println!("  quit / q                  - Exit the game");
    println!();

    let mut last_input = Instant::now();

    loop {
        display_status(&session);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        let now = Instant::now();
        session.advance_clock(now.duration_since(last_input).as_millis() as u64);
        last_input = now;

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let report = session.tick();
            print_report(&report);
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&session);
            continue;
        }

        if let Some(arg) = input.strip_prefix("run ") {
            match arg.trim().parse::<u32>() {
                Ok(n) => {
                    println!("Running {} ticks...", n);
                    for _ in 0..n {
                        let report = session.tick();
                        for event in &report.events {
                            print_event(event);
                        }
                        if session.is_game_over() {
                            break;
                        }
                    }
                    println!(
                        "Now at tick {}. Score: {}",
                        session.current_tick(),
                        session.score()
                    );
                }
                Err(_) => println!("Usage: run <number>"),
            }
            continue;
        }

        match EditCommand::parse(input) {
            Some(command) if session.execute(&command) => println!("OK"),
            Some(_) => println!("Rejected"),
            None => println!(
                "Unknown command. Available: tick, run <n>, wire, breaker, switch, rotate, toggle, remove, status, quit"
            ),
        }
    }

    println!(
        "\nGoodbye! Final score: {} after {} ticks.",
        session.score(),
        session.current_tick()
    );
    Ok(())
}

fn print_report(report: &TickReport) {
    println!(
        "Tick {} complete: consumed {} in {} rounds{}",
        report.tick,
        report.consumed,
        report.rounds,
        if report.hit_round_cap { " (round cap)" } else { "" }
    );
    for event in &report.events {
        print_event(event);
    }
}

fn print_event(event: &SimulationEvent) {
    match event {
        SimulationEvent::TileOverloaded { pos, health } => {
            println!("  Overload at {} (health {})", pos, health)
        }
        SimulationEvent::TileDestroyed { pos } => println!("  Tile at {} burned out", pos),
        SimulationEvent::GeneratorRelocated { from, to } => {
            println!("  Generator moved {} -> {}", from, to)
        }
        SimulationEvent::SessionOver { tick } => println!("  Session over at tick {}", tick),
    }
}

/// Board plus a one-line summary
fn display_status(session: &Session) {
    println!();
    println!(
        "--- Tick {} | Consumed: {} | Score: {}{} ---",
        session.current_tick(),
        session.total_consumed(),
        session.score(),
        if session.is_game_over() { " | OVER" } else { "" }
    );
    print!("{}", render_ascii(session.grid()));
}

/// Every powered or damaged tile, plus infrastructure values
fn display_detailed_status(session: &Session) {
    let grid = session.grid();
    println!("\n=== Tick {} ===", session.current_tick());
    for pos in grid.positions() {
        let Some(tile) = grid.get(pos) else {
            continue;
        };
        match tile.kind {
            TileKind::Generator { output } => println!("  {} Generator output={}", pos, output),
            TileKind::Sink { demand } => {
                println!("  {} Sink demand={} power={}", pos, demand, tile.power)
            }
            TileKind::Empty => {}
            kind => println!(
                "  {} {:?} power={}/{} health={} {:?}",
                pos, kind, tile.power, tile.capacity, tile.health, tile.state
            ),
        }
    }
}
