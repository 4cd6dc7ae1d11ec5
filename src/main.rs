use anyhow::{Context, Result};
use sparselife::{Cell, GameOfLife, Window, rle};
use std::{thread, time::Duration};
use tracing_subscriber::EnvFilter;

mod console;
mod options;

use console::{ConsoleCommand, ConsoleRender};

const PAUSED_POLL: Duration = Duration::from_millis(250);

fn args_to_alive(args: &options::Args) -> Result<Vec<Cell>> {
    if let Some(file_name) = args.input_file() {
        let encoded = std::fs::read_to_string(&file_name)
            .with_context(|| format!("failed to read {file_name}"))?;
        return rle::decode(&encoded).with_context(|| format!("failed to decode {file_name}"));
    }

    let (width, height) = args.grid_size()?;
    Ok(args.fill_mode()?.create_alive(width, height))
}

fn run_console(game: &mut GameOfLife, gens: Option<u64>, sleep: Option<Duration>) -> Result<()> {
    let mut console = ConsoleRender::new()?;
    let tick = sleep.unwrap_or(Duration::ZERO);
    let mut paused = false;

    loop {
        console.render(game, paused)?;
        let mut step = false;
        let timeout = if paused { PAUSED_POLL } else { tick };
        while let Some(cmd) = console.poll_events(timeout)? {
            match cmd {
                ConsoleCommand::Exit => return Ok(()),
                ConsoleCommand::TogglePause => paused = !paused,
                ConsoleCommand::Step => step = true,
                ConsoleCommand::Handled => {}
            }
            console.render(game, paused)?;
        }

        if gens.is_some_and(|limit| game.generation() >= limit) {
            // keep the final board on screen until the user leaves
            paused = true;
            continue;
        }
        if !paused || step {
            game.next_generation();
        }
    }
}

fn run_batch(game: &mut GameOfLife, gens: u64, sleep: Option<Duration>) {
    while game.generation() < gens {
        let state = game.next_generation();
        tracing::debug!(
            generation = state.generation,
            alive = state.population(),
            "generation"
        );
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    let alive = args_to_alive(&args)?;
    let mut game = GameOfLife::new(alive);
    tracing::info!(alive = game.alive_count(), "loaded initial board");

    let gens = args.generations()?;
    let sleep = args.sleep()?;
    match gens {
        Some(gens) if !args.console() => run_batch(&mut game, gens, sleep),
        _ => run_console(&mut game, gens, sleep)?,
    }

    let state = game.into_state();
    tracing::info!(
        generation = state.generation,
        alive = state.population(),
        "simulation finished"
    );

    if args.print() {
        println!("{}", Window::bounding(&state));
    }
    if let Some(file_name) = args.output_file() {
        let name = format!("sparselife generation {}", state.generation);
        std::fs::write(&file_name, rle::encode(&state.cells, Some(&name)))
            .with_context(|| format!("failed to write {file_name}"))?;
        tracing::info!(file = %file_name, "wrote final board");
    }

    Ok(())
}
