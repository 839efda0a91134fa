use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode};
use log::{error, info};
use rand::Rng;

use crate::constants::DVD_TICK_MICROS;
use crate::dvd::DvdLogo;
use crate::error::SessionError;
use crate::rendering::{GameGrid, OutputTarget, draw_session};
use crate::session::{GameSession, Intent, TickOutcome};
use crate::terminal_io::{SimulatedInput, intent_for_event};

/// Drives a session against a terminal (or a screen buffer in debug mode):
/// reads input, advances the core once per frame, paints, then waits out
/// the tick interval.
pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
        }
    }

    /// Plays until the player quits or `max_frames` is reached. Returns the
    /// number of frames run.
    pub fn run(&mut self, session: &mut GameSession) -> io::Result<u64> {
        if !self.debug_mode_active {
            self.show_title_screen()?;
        }

        let mut game_grid = GameGrid::new(session.width(), session.height());
        let mut frame_count = 0;

        while self.max_frames.is_none_or(|max| frame_count < max) {
            let frame_start = Instant::now();

            let intent = self.poll_intent(frame_count)?;
            match session.advance(intent) {
                TickOutcome::Quit => {
                    info!("Quit requested. Exiting game loop.");
                    break;
                }
                // The session logs deaths and restarts itself.
                TickOutcome::Died(_)
                | TickOutcome::Restarted
                | TickOutcome::Continue
                | TickOutcome::Frozen => {}
            }

            draw_session(&mut game_grid, session);
            self.render(&game_grid)?;
            frame_count += 1;

            if !self.debug_mode_active {
                let elapsed = frame_start.elapsed();
                let interval = session.tick_interval();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
        }

        info!("Game loop ended after {} frames.", frame_count);
        Ok(frame_count)
    }

    /// Bounces the logo until `q`/Esc (or `max_frames` in debug mode).
    pub fn run_screensaver(&mut self, rng: &mut impl Rng) -> io::Result<u64> {
        let mut logo = DvdLogo::new(self.terminal_width, self.terminal_height, rng)
            .map_err(|e: SessionError| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let tick = Duration::from_micros(DVD_TICK_MICROS);
        let mut frame_count = 0;

        while self.max_frames.is_none_or(|max| frame_count < max) {
            if self.poll_intent(frame_count)? == Intent::Quit {
                info!("Screensaver stopped.");
                break;
            }
            if logo.advance(rng) {
                info!("Logo bounced at ({}, {}).", logo.position.x, logo.position.y);
            }
            game_grid.clear();
            logo.draw(&mut game_grid);
            self.render(&game_grid)?;
            frame_count += 1;

            if !self.debug_mode_active {
                thread::sleep(tick);
            }
        }
        Ok(frame_count)
    }

    /// Drains pending input. Quit wins; otherwise the first meaningful key.
    fn poll_intent(&mut self, frame_count: u64) -> io::Result<Intent> {
        let mut events = Vec::new();
        if self.debug_mode_active {
            if let Some(sim_input) = &mut self.simulated_input {
                if sim_input.poll(frame_count)? {
                    events.push(sim_input.read()?);
                }
            }
        } else {
            while event::poll(Duration::ZERO).map_err(|e| {
                error!("Failed to poll event: {}", e);
                e
            })? {
                events.push(event::read().map_err(|e| {
                    error!("Failed to read event: {}", e);
                    e
                })?);
            }
        }

        let mut chosen = Intent::None;
        for event in &events {
            if let Event::Resize(width, height) = event {
                info!("Terminal resized to {}x{}; playfield keeps its size.", width, height);
                continue;
            }
            match intent_for_event(event) {
                Intent::Quit => return Ok(Intent::Quit),
                Intent::None => {}
                intent if chosen == Intent::None => chosen = intent,
                _ => {}
            }
        }
        Ok(chosen)
    }

    fn render(&mut self, game_grid: &GameGrid) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target).map_err(|e| {
            error!("Failed to draw frame: {}", e);
            e
        })?;
        self.stdout_target.flush().map_err(|e| {
            error!("Failed to flush frame: {}", e);
            e
        })?;
        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
                sb.print_to_log();
            }
        }
        Ok(())
    }

    fn show_title_screen(&mut self) -> io::Result<()> {
        let title_art = [
            r" ___ _              ___      _    _ ",
            r"| _ (_)_ _____ _ _ | _ \__ _(_)__| |",
            r"|   / \ V / -_) '_||   / _` | / _` |",
            r"|_|_\_|\_/\___|_|  |_|_\__,_|_\__,_|",
        ];
        let hints = [
            "Left/Right or A/D : steer",
            "Space             : fire",
            "R                 : restart after a crash",
            "Q                 : quit",
        ];

        let game_grid_dummy = GameGrid::new(self.terminal_width, self.terminal_height);
        game_grid_dummy.clear_screen_manual(&mut self.stdout_target)?;

        let title_start_y = (self.terminal_height / 2).saturating_sub(title_art.len() as u16 + 2);
        for (i, line) in title_art.iter().chain(hints.iter()).enumerate() {
            let gap = if i >= title_art.len() { 1 } else { 0 };
            let x = (self.terminal_width / 2).saturating_sub(line.len() as u16 / 2);
            self.stdout_target.move_to(x, title_start_y + i as u16 + gap)?;
            write!(self.stdout_target, "{}", line)?;
        }

        let press_any_key_msg = "Press any key to start...";
        let msg_x = (self.terminal_width / 2).saturating_sub(press_any_key_msg.len() as u16 / 2);
        self.stdout_target.move_to(msg_x, self.terminal_height.saturating_sub(3))?;
        write!(self.stdout_target, "{}", press_any_key_msg)?;
        self.stdout_target.flush()?;
        info!("Title screen displayed. Waiting for key press.");

        loop {
            if let Event::Key(key) = event::read()? {
                if key.code != KeyCode::Null {
                    break;
                }
            }
        }

        game_grid_dummy.clear_screen_manual(&mut self.stdout_target)?;
        self.stdout_target.flush()?;
        Ok(())
    }
}
