//! One River Raid session: the field, the plane, enemy and fuel pools,
//! shots in flight and the difficulty ramp, advanced one tick at a time.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::{self, Crash};
use crate::config::{GameConfig, ScoringRule};
use crate::constants::{
    MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH, SCORE_PER_KILL, SURVIVAL_BONUS, SURVIVAL_BONUS_EVERY_TICKS,
};
use crate::difficulty::DifficultyRamp;
use crate::entities::{Enemy, FuelPickup, Player, Projectile};
use crate::error::SessionError;
use crate::pool::SlotPool;
use crate::river::RiverField;
use crate::sprite::ENEMY;

/// A single discrete command for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Fire,
    Restart,
    Quit,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    Bank,
    Enemy,
    OutOfFuel,
}

/// What a call to [`GameSession::advance`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A tick was simulated and the plane is still flying.
    Continue,
    /// A tick was simulated and the plane was lost.
    Died(DeathCause),
    /// The session was reset to its starting state.
    Restarted,
    /// Dead and waiting for a restart; nothing moved.
    Frozen,
    Quit,
}

pub struct GameSession {
    config: GameConfig,
    width: u16,
    height: u16,
    field: RiverField,
    player: Player,
    enemies: SlotPool<Enemy>,
    pickups: SlotPool<FuelPickup>,
    projectiles: Vec<Projectile>,
    ramp: DifficultyRamp,
    state: SessionState,
    death_cause: Option<DeathCause>,
    ticks: u64,
    rng: StdRng,
}

impl GameSession {
    pub fn new(width: u16, height: u16, config: GameConfig) -> Result<Self, SessionError> {
        if width < MIN_FIELD_WIDTH || height < MIN_FIELD_HEIGHT {
            return Err(SessionError::PlayfieldTooSmall {
                width,
                height,
                min_width: MIN_FIELD_WIDTH,
                min_height: MIN_FIELD_HEIGHT,
            });
        }
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!("New session: {}x{}, config: {:?}", width, height, config);

        Ok(GameSession {
            width,
            height,
            field: RiverField::new(width, height),
            player: Player::new(width, height, config.max_fuel),
            enemies: SlotPool::new(config.enemy_capacity),
            pickups: SlotPool::new(config.fuel_capacity),
            projectiles: Vec::new(),
            ramp: DifficultyRamp::new(&config),
            state: SessionState::Playing,
            death_cause: None,
            ticks: 0,
            rng,
            config,
        })
    }

    /// Runs one tick for `intent`. While dead only `Restart` has an effect.
    pub fn advance(&mut self, intent: Intent) -> TickOutcome {
        if intent == Intent::Quit {
            return TickOutcome::Quit;
        }
        match self.state {
            SessionState::Dead => {
                if intent == Intent::Restart {
                    self.restart();
                    TickOutcome::Restarted
                } else {
                    TickOutcome::Frozen
                }
            }
            SessionState::Playing => self.step(intent),
        }
    }

    /// Back to a straight river, empty pools, a full tank and zero score.
    pub fn restart(&mut self) {
        self.field.reset();
        self.player = Player::new(self.width, self.height, self.config.max_fuel);
        self.enemies.clear();
        self.pickups.clear();
        self.projectiles.clear();
        self.ramp = DifficultyRamp::new(&self.config);
        self.state = SessionState::Playing;
        self.death_cause = None;
        self.ticks = 0;
        info!("Session restarted.");
    }

    fn step(&mut self, intent: Intent) -> TickOutcome {
        match intent {
            Intent::MoveLeft => self.player.steer(-1, self.field.width()),
            Intent::MoveRight => self.player.steer(1, self.field.width()),
            Intent::Fire => self.fire(),
            _ => {}
        }

        self.field.advance(&mut self.rng);

        let field_height = self.field.height();
        self.enemies.retain_active(|enemy| enemy.drift(field_height));
        if self.ramp.spawn_due() {
            self.spawn_enemy();
        }

        self.pickups.retain_active(|pickup| pickup.drift(field_height));
        if self.rng.gen_range(0..100) < self.config.fuel_spawn_chance_percent {
            self.spawn_pickup();
        }

        let kills = self.advance_projectiles();

        self.ticks += 1;
        self.award_points(kills);
        self.ramp.on_tick(self.ticks);

        self.collect_pickups();

        if self.player.burn_fuel(self.config.fuel_decay_ticks) {
            return self.kill(DeathCause::OutOfFuel);
        }
        match collision::plane_crash(&self.player, &self.field, &self.enemies) {
            Some(Crash::Bank) => self.kill(DeathCause::Bank),
            Some(Crash::Enemy(_)) => self.kill(DeathCause::Enemy),
            None => TickOutcome::Continue,
        }
    }

    fn fire(&mut self) {
        let nose = self.player.nose();
        if nose.y <= 0 {
            return;
        }
        self.projectiles.push(Projectile::new(nose));
        debug!("Shot fired from ({}, {}).", nose.x, nose.y);
    }

    /// Moves every shot up a row and settles its fate. Returns enemies destroyed.
    fn advance_projectiles(&mut self) -> u64 {
        let field = &self.field;
        let enemies = &mut self.enemies;
        let mut kills = 0;
        self.projectiles.retain_mut(|shot| {
            shot.fly();
            if collision::projectile_out_of_play(shot.position, field) {
                return false;
            }
            match collision::projectile_hits_enemy(shot.position, enemies) {
                Some(index) => {
                    enemies.release(index);
                    kills += 1;
                    false
                }
                None => true,
            }
        });
        if kills > 0 {
            info!("Shot down {} enemy(ies).", kills);
        }
        kills
    }

    fn spawn_enemy(&mut self) {
        if !self.enemies.has_free_slot() {
            debug!("Enemy pool full, spawn skipped.");
            return;
        }
        let top = self.field.top();
        let span = top.width() - ENEMY.width() - 1;
        if span <= 0 {
            debug!("Channel too narrow for an enemy, spawn skipped.");
            return;
        }
        let x = top.left + 1 + self.rng.gen_range(0..span);
        self.enemies.acquire(Enemy::new(x, 0));
        debug!("Enemy spawned at x: {}", x);
    }

    fn spawn_pickup(&mut self) {
        if !self.pickups.has_free_slot() {
            return;
        }
        let top = self.field.top();
        let span = top.width() - 2;
        if span <= 0 {
            return;
        }
        let x = top.left + 1 + self.rng.gen_range(0..span);
        self.pickups.acquire(FuelPickup::new(x, 0));
        debug!("Fuel pickup spawned at x: {}", x);
    }

    fn award_points(&mut self, kills: u64) {
        match self.config.scoring {
            ScoringRule::Survival => self.player.score += 1,
            ScoringRule::Combat => {
                self.player.score += kills * SCORE_PER_KILL;
                if self.ticks % SURVIVAL_BONUS_EVERY_TICKS == 0 {
                    self.player.score += SURVIVAL_BONUS;
                }
            }
        }
    }

    fn collect_pickups(&mut self) {
        let player = &self.player;
        let rule = self.config.pickup_collision;
        let mut collected = false;
        self.pickups.retain_active(|pickup| {
            if collision::pickup_collected(player, pickup, rule) {
                collected = true;
                false
            } else {
                true
            }
        });
        if collected {
            self.player.refuel(self.config.max_fuel);
        }
    }

    fn kill(&mut self, cause: DeathCause) -> TickOutcome {
        self.player.alive = false;
        self.state = SessionState::Dead;
        self.death_cause = Some(cause);
        info!(
            "Plane lost ({:?}) after {} ticks. Score: {}",
            cause, self.ticks, self.player.score
        );
        TickOutcome::Died(cause)
    }

    // --- Read accessors for the renderer ---

    pub fn field(&self) -> &RiverField {
        &self.field
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter_active().map(|(_, enemy)| enemy)
    }

    pub fn enemy_pool(&self) -> &SlotPool<Enemy> {
        &self.enemies
    }

    pub fn pickups(&self) -> impl Iterator<Item = &FuelPickup> {
        self.pickups.iter_active().map(|(_, pickup)| pickup)
    }

    pub fn pickup_pool(&self) -> &SlotPool<FuelPickup> {
        &self.pickups
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }

    /// How long the driver should wait before the next tick.
    pub fn tick_interval(&self) -> Duration {
        self.ramp.tick_interval()
    }

    pub fn spawn_interval(&self) -> u32 {
        self.ramp.spawn_interval()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickupCollision;
    use crate::river::Channel;
    use crate::types::Point;

    fn quiet_config() -> GameConfig {
        GameConfig {
            enemy_capacity: 0,
            fuel_capacity: 0,
            seed: Some(99),
            ..GameConfig::default()
        }
    }

    #[test]
    fn fuel_runs_out_on_tick_500() {
        let mut session = GameSession::new(40, 20, quiet_config()).unwrap();
        for tick in 1..500 {
            // Keep the river straight under the plane.
            session.field.reset();
            assert_eq!(session.advance(Intent::None), TickOutcome::Continue, "tick {}", tick);
            assert!(session.player().alive);
        }
        assert_eq!(session.player().fuel, 1);
        session.field.reset();
        assert_eq!(session.advance(Intent::None), TickOutcome::Died(DeathCause::OutOfFuel));
        assert!(!session.player().alive);
        assert_eq!(session.ticks(), 500);
    }

    fn seeded(seed: u64) -> GameConfig {
        GameConfig { seed: Some(seed), ..GameConfig::default() }
    }

    #[test]
    fn one_kill_scores_thirty_and_spares_the_rest() {
        let mut session = GameSession::new(40, 20, seeded(3)).unwrap();
        session.enemies.acquire(Enemy::new(11, 5));
        session.enemies.acquire(Enemy::new(20, 5)); // Drifts to rows 6..9 before shots move
        session.projectiles.push(Projectile::new(Point::new(22, 9)));

        assert_eq!(session.advance(Intent::None), TickOutcome::Continue);
        assert_eq!(session.player().score, 30);
        assert!(session.enemy_pool().is_active(0));
        assert!(!session.enemy_pool().is_active(1));
        assert_eq!(session.enemy_pool().get(0), Some(&Enemy::new(11, 6)));
        assert!(session.projectiles().is_empty());
    }

    #[test]
    fn survival_scoring_ignores_kills() {
        let config = GameConfig { scoring: ScoringRule::Survival, ..seeded(3) };
        let mut session = GameSession::new(40, 20, config).unwrap();
        session.enemies.acquire(Enemy::new(20, 5));
        session.projectiles.push(Projectile::new(Point::new(22, 9)));
        session.advance(Intent::None);
        assert_eq!(session.player().score, 1);
        assert_eq!(session.enemy_pool().active_count(), 0);
    }

    #[test]
    fn spawns_recycle_slots_and_skip_when_full() {
        let config = GameConfig { enemy_capacity: 2, seed: Some(5), ..GameConfig::default() };
        let mut session = GameSession::new(40, 20, config).unwrap();
        session.spawn_enemy();
        session.spawn_enemy();
        assert_eq!(session.enemy_pool().active_count(), 2);

        session.spawn_enemy();
        assert_eq!(session.enemy_pool().active_count(), 2);
        assert_eq!(session.enemy_pool().capacity(), 2);

        session.enemies.release(0);
        session.spawn_enemy();
        assert!(session.enemy_pool().is_active(0));
        assert_eq!(session.enemy_pool().capacity(), 2);
    }

    #[test]
    fn enemies_spawn_clear_of_the_banks() {
        let config = GameConfig { enemy_capacity: 1, seed: Some(11), ..GameConfig::default() };
        let mut session = GameSession::new(40, 20, config).unwrap();
        for _ in 0..200 {
            session.enemies.clear();
            session.field.advance(&mut session.rng);
            session.spawn_enemy();
            let top = session.field.top();
            let enemy = *session.enemies().next().unwrap();
            assert_eq!(enemy.position.y, 0);
            assert!(enemy.position.x > top.left);
            assert!(enemy.position.x + ENEMY.width() < top.right);
        }
    }

    #[test]
    fn dead_session_ignores_everything_but_restart() {
        let mut session = GameSession::new(40, 20, quiet_config()).unwrap();
        session.kill(DeathCause::Bank);
        let rows = session.field().rows().to_vec();

        assert_eq!(session.advance(Intent::Fire), TickOutcome::Frozen);
        assert_eq!(session.advance(Intent::MoveLeft), TickOutcome::Frozen);
        assert!(session.projectiles().is_empty());
        assert_eq!(session.player().position, Point::new(20, 16));
        assert_eq!(session.field().rows(), rows.as_slice());
        assert_eq!(session.ticks(), 0);

        assert_eq!(session.advance(Intent::Restart), TickOutcome::Restarted);
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn restart_while_playing_is_a_plain_tick() {
        let mut session = GameSession::new(40, 20, quiet_config()).unwrap();
        assert_eq!(session.advance(Intent::Restart), TickOutcome::Continue);
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn restart_resets_every_piece_of_state() {
        let mut session = GameSession::new(40, 20, seeded(8)).unwrap();
        for _ in 0..30 {
            session.advance(Intent::Fire);
        }
        session.enemies.acquire(Enemy::new(15, 3));
        session.pickups.acquire(FuelPickup::new(15, 4));
        session.projectiles.push(Projectile::new(Point::new(15, 10)));
        session.player.score = 1234;
        session.player.fuel = 7;
        session.kill(DeathCause::Enemy);

        assert_eq!(session.advance(Intent::Restart), TickOutcome::Restarted);
        assert!(session.player().alive);
        assert_eq!(session.player().fuel, 100);
        assert_eq!(session.player().score, 0);
        assert!(session.projectiles().is_empty());
        assert_eq!(session.enemy_pool().active_count(), 0);
        assert_eq!(session.pickup_pool().active_count(), 0);
        assert!(session.field().rows().iter().all(|c| *c == Channel::new(10, 30)));
        assert_eq!(session.death_cause(), None);
        assert_eq!(session.tick_interval(), Duration::from_micros(80_000));
    }

    #[test]
    fn fuel_pickup_refills_the_tank() {
        let config = GameConfig {
            fuel_capacity: 1,
            fuel_spawn_chance_percent: 0,
            ..quiet_config()
        };
        let mut session = GameSession::new(40, 20, config).unwrap();
        session.player.fuel = 40;
        // Drifts onto (21, 17), inside the plane's box at (20..25, 16..19).
        session.pickups.acquire(FuelPickup::new(21, 16));
        session.advance(Intent::None);
        assert_eq!(session.player().fuel, 100);
        assert_eq!(session.pickup_pool().active_count(), 0);
    }

    #[test]
    fn enemy_drifting_onto_the_plane_ends_the_run() {
        let config = GameConfig { enemy_capacity: 1, ..quiet_config() };
        let mut session = GameSession::new(40, 20, config).unwrap();
        // Next tick it covers rows 14..17, which holds the plane's nose at (22, 16).
        session.enemies.acquire(Enemy::new(20, 13));
        session.field.reset();

        assert_eq!(session.advance(Intent::None), TickOutcome::Died(DeathCause::Enemy));
        assert_eq!(session.state(), SessionState::Dead);
        assert_eq!(session.death_cause(), Some(DeathCause::Enemy));
        assert!(!session.player().alive);
    }

    #[test]
    fn area_rule_collects_a_label_overlapping_the_plane() {
        // The label lands on (15..21, 16): its anchor misses the plane's box,
        // its last cell does not.
        let run = |rule| {
            let config = GameConfig {
                pickup_collision: rule,
                fuel_capacity: 1,
                fuel_spawn_chance_percent: 0,
                ..quiet_config()
            };
            let mut session = GameSession::new(40, 20, config).unwrap();
            session.player.fuel = 40;
            session.pickups.acquire(FuelPickup::new(15, 15));
            session.field.reset();
            assert_eq!(session.advance(Intent::None), TickOutcome::Continue);
            session
        };

        let area = run(PickupCollision::Area);
        assert_eq!(area.player().fuel, 100);
        assert_eq!(area.pickup_pool().active_count(), 0);

        let anchor = run(PickupCollision::Anchor);
        assert_eq!(anchor.player().fuel, 40);
        assert_eq!(anchor.pickup_pool().active_count(), 1);
    }

    #[test]
    fn firing_too_close_to_the_top_is_dropped() {
        let mut session = GameSession::new(40, 20, quiet_config()).unwrap();
        session.player.position.y = 1;
        session.fire();
        assert!(session.projectiles().is_empty());
    }
}
