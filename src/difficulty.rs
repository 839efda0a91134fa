use std::time::Duration;

use log::info;

use crate::config::GameConfig;

/// Tick pacing and enemy spawn cadence, both tightening as ticks go by.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyRamp {
    tick_micros: u64,
    tick_min_micros: u64,
    tick_step_micros: u64,
    tick_step_every: u64,
    spawn_interval: u32,
    min_spawn_interval: u32,
    spawn_step_every: u64,
    spawn_counter: u32,
}

impl DifficultyRamp {
    pub fn new(config: &GameConfig) -> Self {
        DifficultyRamp {
            tick_micros: config.tick_start_micros,
            tick_min_micros: config.tick_min_micros,
            tick_step_micros: config.tick_step_micros,
            tick_step_every: config.tick_step_every_ticks,
            spawn_interval: config.initial_spawn_interval,
            min_spawn_interval: config.min_spawn_interval,
            spawn_step_every: config.spawn_interval_step_ticks,
            spawn_counter: 0,
        }
    }

    /// Counts one tick toward the next enemy. Returns `true` when the
    /// counter has run past the spawn interval (and resets it).
    pub fn spawn_due(&mut self) -> bool {
        self.spawn_counter += 1;
        if self.spawn_counter > self.spawn_interval {
            self.spawn_counter = 0;
            true
        } else {
            false
        }
    }

    /// Applies the ramp for the tick numbered `tick` (1-based).
    pub fn on_tick(&mut self, tick: u64) {
        if tick % self.tick_step_every == 0 && self.tick_micros > self.tick_min_micros {
            self.tick_micros = self
                .tick_micros
                .saturating_sub(self.tick_step_micros)
                .max(self.tick_min_micros);
            info!("Speeding up. Tick interval: {}us", self.tick_micros);
        }
        if tick % self.spawn_step_every == 0 && self.spawn_interval > self.min_spawn_interval {
            self.spawn_interval -= 1;
            info!("Enemies spawn faster. Spawn interval: {} ticks", self.spawn_interval);
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_micros(self.tick_micros)
    }

    pub fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }
}
