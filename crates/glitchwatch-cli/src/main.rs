//! Glitchwatch terminal host entry point.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use glitchwatch_content::application::loader::load_from_path;
use glitchwatch_core::clock::SystemClock;
use glitchwatch_core::rng::{DeterministicRng, SystemRng};
use glitchwatch_engine::application::engine::GameEngine;
use glitchwatch_engine::application::queries::engine_status;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

mod command;
mod console;
mod error;
mod render;

use command::{Command, HELP};
use console::{ConsoleAudio, ConsoleSceneView};
use error::CliError;
use render::{DialoguePrinter, render_notices};

type ConsoleEngine = GameEngine<ConsoleSceneView, ConsoleAudio>;

#[derive(Parser, Debug)]
#[command(about = "Play a Glitchwatch configuration in the terminal", version)]
struct Args {
    /// Game configuration file (.json, .yaml or .yml).
    #[arg(env = "GLITCHWATCH_CONFIG", value_hint = clap::ValueHint::FilePath)]
    config: PathBuf,

    /// Milliseconds between engine ticks.
    #[arg(
        long,
        env = "GLITCHWATCH_TICK_MS",
        default_value_t = 16,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_ms: u64,

    /// Seed for quiz shuffles; omitted means a fresh seed per run.
    #[arg(long, env = "GLITCHWATCH_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Logs go to stderr so they do not interleave with the game text.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!("Starting Glitchwatch terminal host");

    let rng: Box<dyn DeterministicRng> = match args.seed {
        Some(seed) => Box::new(SystemRng::seeded(seed)),
        None => Box::new(SystemRng::from_entropy()),
    };

    let config = load_from_path(&args.config).map_err(CliError::from)?;
    println!("{}", config.meta.title);
    let mut engine = GameEngine::new(
        config,
        ConsoleSceneView::default(),
        ConsoleAudio,
        Arc::new(SystemClock),
        rng,
    );

    run(&mut engine, args.tick_ms).await?;

    tracing::info!("Glitchwatch terminal host stopped");
    Ok(())
}

async fn run(engine: &mut ConsoleEngine, tick_ms: u64) -> Result<(), CliError> {
    let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printer = DialoguePrinter::default();
    let mut last_tick = Instant::now();

    println!("type 'start' to begin, 'help' for commands");
    loop {
        tokio::select! {
            now = ticker.tick() => {
                let delta = now.duration_since(last_tick);
                last_tick = now;
                engine.tick(u64::try_from(delta.as_millis()).unwrap_or(u64::MAX));
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(engine, command),
                    Err(err) => println!("! {err}"),
                }
            }
        }

        for line in render_notices(&engine.drain_notices()) {
            println!("{line}");
        }
        if let Some(line) = printer.poll(engine) {
            println!("{line}");
        }
    }
    Ok(())
}

fn apply(engine: &mut ConsoleEngine, command: Command) {
    match command {
        Command::Start => engine.start_game(),
        Command::Scene(scene_id) => engine.select_module(&scene_id),
        Command::Click(hotspot_id) => engine.interact(&hotspot_id),
        Command::Next => engine.advance_dialogue(),
        Command::Answer(index) => engine.answer(index),
        Command::Close => engine.close_report(),
        Command::Home => engine.go_home(),
        Command::Restart => engine.restart(),
        Command::Pause => engine.suspend(),
        Command::Resume => engine.resume(),
        Command::Status => match serde_json::to_string_pretty(&engine_status(engine)) {
            Ok(json) => println!("{json}"),
            Err(err) => tracing::warn!(error = %err, "status serialization failed"),
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}
