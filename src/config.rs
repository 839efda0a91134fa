use crate::constants::*;
use crate::error::SessionError;

/// How points are earned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringRule {
    /// +1 per tick survived, kills are worth nothing.
    Survival,
    /// +30 per enemy shot down and +10 every 100 ticks survived.
    Combat,
}

/// How a fuel pickup is matched against the plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupCollision {
    /// The pickup's anchor cell must lie inside the plane's box.
    Anchor,
    /// Any overlap between the `[FUEL]` label and the plane's box.
    Area,
}

/// Tunables for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub enemy_capacity: usize,
    pub fuel_capacity: usize,
    pub max_fuel: u32,
    pub fuel_decay_ticks: u32,
    pub fuel_spawn_chance_percent: u32,
    pub initial_spawn_interval: u32,
    pub min_spawn_interval: u32,
    pub spawn_interval_step_ticks: u64,
    pub tick_start_micros: u64,
    pub tick_min_micros: u64,
    pub tick_step_micros: u64,
    pub tick_step_every_ticks: u64,
    pub scoring: ScoringRule,
    pub pickup_collision: PickupCollision,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            enemy_capacity: ENEMY_POOL_CAPACITY,
            fuel_capacity: FUEL_POOL_CAPACITY,
            max_fuel: MAX_FUEL,
            fuel_decay_ticks: FUEL_DECAY_TICKS,
            fuel_spawn_chance_percent: FUEL_SPAWN_CHANCE_PERCENT,
            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            spawn_interval_step_ticks: SPAWN_INTERVAL_STEP_TICKS,
            tick_start_micros: TICK_START_MICROS,
            tick_min_micros: TICK_MIN_MICROS,
            tick_step_micros: TICK_STEP_MICROS,
            tick_step_every_ticks: TICK_STEP_EVERY_TICKS,
            scoring: ScoringRule::Combat,
            pickup_collision: PickupCollision::Anchor,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.max_fuel == 0 {
            return Err(SessionError::InvalidConfig("max_fuel must be positive".into()));
        }
        if self.fuel_decay_ticks == 0 {
            return Err(SessionError::InvalidConfig("fuel_decay_ticks must be positive".into()));
        }
        if self.fuel_spawn_chance_percent > 100 {
            return Err(SessionError::InvalidConfig(format!(
                "fuel_spawn_chance_percent {} exceeds 100",
                self.fuel_spawn_chance_percent
            )));
        }
        if self.min_spawn_interval > self.initial_spawn_interval {
            return Err(SessionError::InvalidConfig(
                "min_spawn_interval is above initial_spawn_interval".into(),
            ));
        }
        if self.tick_min_micros > self.tick_start_micros {
            return Err(SessionError::InvalidConfig(
                "tick_min_micros is above tick_start_micros".into(),
            ));
        }
        if self.spawn_interval_step_ticks == 0 || self.tick_step_every_ticks == 0 {
            return Err(SessionError::InvalidConfig("difficulty cadences must be positive".into()));
        }
        Ok(())
    }
}
