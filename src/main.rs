use std::io::{self, Write};
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use river_raid::config::{GameConfig, PickupCollision, ScoringRule};
use river_raid::game::Game;
use river_raid::rendering::{OutputTarget, ScreenBuffer};
use river_raid::session::GameSession;
use river_raid::terminal_io::SimulatedInput;

const DEBUG_WIDTH: u16 = 80;
const DEBUG_HEIGHT: u16 = 24;
const DEBUG_FRAMES: u64 = 60;

#[derive(Parser, Debug)]
#[command(name = "river-raid")]
#[command(about = "Fly up a scrolling river, shoot enemies and keep the tank topped up")]
struct Cli {
    /// Run headless into a screen buffer dumped to the log
    #[arg(long, num_args = 0..=3, value_names = ["WIDTH", "HEIGHT", "FRAMES"])]
    debug: Option<Vec<u64>>,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Score +1 per tick survived instead of per kill
    #[arg(long)]
    survival: bool,

    /// Collect fuel when any part of the label touches the plane
    #[arg(long)]
    area_pickups: bool,

    /// Ticks per unit of fuel burned
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    fuel_cadence: Option<u32>,

    /// Bounce the DVD logo instead of playing
    #[arg(long)]
    dvd: bool,
}

/// Geometry and frame cap of a headless run.
#[derive(Debug, PartialEq, Eq)]
struct DebugRun {
    width: u16,
    height: u16,
    frames: u64,
}

impl Cli {
    fn debug_run(&self) -> Result<Option<DebugRun>, clap::Error> {
        let Some(values) = &self.debug else {
            return Ok(None);
        };
        let (width, height, frames) = match values.as_slice() {
            [] => (u64::from(DEBUG_WIDTH), u64::from(DEBUG_HEIGHT), DEBUG_FRAMES),
            [width, height] => (*width, *height, DEBUG_FRAMES),
            [width, height, frames] => (*width, *height, *frames),
            _ => {
                return Err(Cli::command().error(
                    ErrorKind::WrongNumberOfValues,
                    "--debug takes WIDTH HEIGHT and an optional FRAMES",
                ));
            }
        };
        let dimension = |value: u64| {
            u16::try_from(value).map_err(|_| {
                Cli::command().error(
                    ErrorKind::ValueValidation,
                    format!("--debug size {value} does not fit a terminal"),
                )
            })
        };
        Ok(Some(DebugRun { width: dimension(width)?, height: dimension(height)?, frames }))
    }

    fn game_config(&self) -> GameConfig {
        let mut config = GameConfig { seed: self.seed, ..GameConfig::default() };
        if self.survival {
            config.scoring = ScoringRule::Survival;
        }
        if self.area_pickups {
            config.pickup_collision = PickupCollision::Area;
        }
        if let Some(cadence) = self.fuel_cadence {
            config.fuel_decay_ticks = cadence;
        }
        config
    }
}

/// Raw mode and a hidden cursor for as long as it lives. Dropping it puts
/// the terminal back, whichever way `main` leaves.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode().map_err(|e| {
            error!("Failed to enable raw mode: {}", e);
            e
        })?;
        let guard = TerminalGuard;
        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0), Hide).map_err(|e| {
            error!("Failed to prepare the screen: {}", e);
            e
        })?;
        Ok(guard)
    }
}

/// Wipes the game off the screen and brings the cursor back.
fn restore_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0), Show)
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_screen(&mut io::stdout()) {
            error!("Failed to restore the screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode on exit: {}", e);
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let debug_run = cli.debug_run().unwrap_or_else(|e| e.exit());
    let config = cli.game_config();

    let level = if debug_run.is_some() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    simple_logging::log_to_file("river-raid.log", level)?;
    info!("Starting river-raid application.");

    let (terminal_width, terminal_height) = match &debug_run {
        Some(run) => {
            info!("Debug resolution set to {}x{}", run.width, run.height);
            (run.width, run.height)
        }
        None => size().map_err(|e| {
            error!("Failed to get terminal size: {}", e);
            e
        })?,
    };
    info!("Terminal size: {}x{}", terminal_width, terminal_height);

    // Reject undersized terminals before touching the display.
    let mut session = if cli.dvd {
        None
    } else {
        match GameSession::new(terminal_width, terminal_height, config.clone()) {
            Ok(session) => Some(session),
            Err(e) => {
                error!("Cannot start: {}", e);
                eprintln!("{e}. Enlarge the terminal and try again.");
                process::exit(1);
            }
        }
    };

    let (stdout_target, simulated_input, terminal) = match &debug_run {
        Some(run) => {
            let buffer = ScreenBuffer::new(terminal_width, terminal_height);
            let script = SimulatedInput::demo_script(run.frames.saturating_sub(1));
            (OutputTarget::ScreenBuffer(buffer), Some(script), None)
        }
        None => {
            let guard = TerminalGuard::enter()?;
            (OutputTarget::Stdout(io::stdout()), None, Some(guard))
        }
    };

    let mut game = Game::new(
        terminal_width,
        terminal_height,
        stdout_target,
        simulated_input,
        debug_run.is_some(),
        debug_run.as_ref().map(|run| run.frames),
    );

    let result = match session.as_mut() {
        Some(session) => game.run(session),
        None => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            game.run_screensaver(&mut rng)
        }
    };

    drop(terminal);

    match result {
        Ok(frames) => {
            if let Some(session) = &session {
                println!("Final score: {}", session.player().score);
            }
            info!("Exiting after {} frames.", frames);
            Ok(())
        }
        Err(e) => {
            error!("Game loop failed: {}", e);
            Err(e)
        }
    }
}
