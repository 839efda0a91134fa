// --- Playfield ---
pub const MIN_FIELD_WIDTH: u16 = 40;
pub const MIN_FIELD_HEIGHT: u16 = 20;

// --- Pools ---
pub const ENEMY_POOL_CAPACITY: usize = 20;
pub const FUEL_POOL_CAPACITY: usize = 5;

// --- Fuel ---
pub const MAX_FUEL: u32 = 100;
pub const FUEL_DECAY_TICKS: u32 = 5; // One unit every 5 ticks
pub const FUEL_SPAWN_CHANCE_PERCENT: u32 = 3;

// --- Enemy spawning ---
pub const INITIAL_SPAWN_INTERVAL: u32 = 20; // Ticks between enemy spawns
pub const MIN_SPAWN_INTERVAL: u32 = 3;
pub const SPAWN_INTERVAL_STEP_TICKS: u64 = 500;

// --- Tick pacing (microseconds) ---
pub const TICK_START_MICROS: u64 = 80_000; // ~12.5 FPS
pub const TICK_MIN_MICROS: u64 = 20_000; // ~50 FPS
pub const TICK_STEP_MICROS: u64 = 2_000;
pub const TICK_STEP_EVERY_TICKS: u64 = 120;

// --- Scoring ---
pub const SCORE_PER_KILL: u64 = 30;
pub const SURVIVAL_BONUS: u64 = 10;
pub const SURVIVAL_BONUS_EVERY_TICKS: u64 = 100;

// --- DVD screensaver ---
pub const DVD_TICK_MICROS: u64 = 100_000;
