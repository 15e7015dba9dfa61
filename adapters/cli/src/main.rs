#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and replays Wraptrail levels.

mod board;
mod script;
mod settings;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wraptrail_core::{Command, Event, PathDescription, ResetCause};
use wraptrail_rendering::{Feedback, EASING_PERIOD};
use wraptrail_system_generator::LevelGenerator;
use wraptrail_traversal::{self as traversal, query, Traversal};

use self::settings::LevelArgs;

/// Presentation time that passes for every replayed command.
const COMMAND_TICK: Duration = EASING_PERIOD;

#[derive(Parser, Debug)]
#[command(
    name = "wraptrail",
    version,
    about = "Generate wrap-around path puzzles and replay moves against them"
)]
struct Cli {
    /// Log generation and traversal details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a level and print its visit counts.
    Generate {
        #[command(flatten)]
        level: LevelArgs,
    },
    /// Generate a level and print the move script that solves it.
    Solve {
        #[command(flatten)]
        level: LevelArgs,
    },
    /// Generate a level and feed it a move script, one command per symbol.
    Replay {
        #[command(flatten)]
        level: LevelArgs,
        /// Moves as U/D/L/R (or N/S/W/E), `.` to idle, `!` to restart.
        #[arg(long)]
        moves: String,
        /// Paint the final board with 24-bit ANSI colours.
        #[arg(long)]
        color: bool,
    },
}

/// Entry point for the Wraptrail command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate { level } => {
            let path = build_level(&level)?;
            println!(
                "length: {} ({}x{})",
                path.length(),
                path.size().width(),
                path.size().height()
            );
            print!("{}", board::counts(path.grid(), None));
        }
        Commands::Solve { level } => {
            let path = build_level(&level)?;
            println!("{}", script::format_route(path.route()));
        }
        Commands::Replay {
            level,
            moves,
            color,
        } => {
            let commands = script::parse(&moves).context("invalid move script")?;
            let path = build_level(&level)?;
            replay(path, &commands, color);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_level(args: &LevelArgs) -> Result<PathDescription> {
    let config = args.resolve()?;
    let settings = config.validate().context("invalid level configuration")?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "seeding level generator");
    println!("seed: {seed}");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(LevelGenerator::new(settings).generate(&mut rng))
}

fn replay(path: PathDescription, commands: &[Command], color: bool) {
    let mut session = Traversal::new(path);
    let mut feedback = Feedback::default();

    for &command in commands {
        let mut events = Vec::new();
        traversal::apply(&mut session, command, &mut events);
        for event in events {
            if matches!(event, Event::CursorMoved { .. } | Event::LevelReset { .. }) {
                feedback.cursor_moved();
            }
            println!("{}", describe(&event));
        }
        feedback.advance(COMMAND_TICK, query::progress_ratio(&session));
    }

    let cursor = query::cursor(&session);
    let ratio = query::progress_ratio(&session);
    println!("state: {:?}", query::play_state(&session));
    println!(
        "progress: {}/{} ({:.0}%)",
        query::steps_completed(&session),
        query::path(&session).length(),
        ratio * 100.0
    );
    println!("cursor: ({}, {})", cursor.column(), cursor.row());

    let grid = query::grid_view(&session);
    if color {
        print!("{}", board::shaded(&feedback.scene(grid, cursor)));
    } else {
        print!("{}", board::counts(grid, Some(cursor)));
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::CursorMoved {
            from,
            to,
            remaining,
        } => format!(
            "moved ({}, {}) -> ({}, {}), {remaining} left",
            from.column(),
            from.row(),
            to.column(),
            to.row()
        ),
        Event::LevelReset {
            cause: ResetCause::Overstepped { cell },
        } => format!(
            "reset: ({}, {}) had no visits left",
            cell.column(),
            cell.row()
        ),
        Event::LevelReset {
            cause: ResetCause::Requested,
        } => "reset: restart requested".to_owned(),
        Event::LevelCompleted { steps } => format!("completed in {steps} steps"),
    }
}
