use crossterm::style::Color;
use log::info;

use crate::rendering::GameGrid;
use crate::sprite::{ENEMY, FUEL_LABEL, PLANE};
use crate::types::{Point, Rect};

pub const PLAYER_COLOR: Color = Color::Yellow;
pub const ENEMY_COLOR: Color = Color::Red;
pub const FUEL_COLOR: Color = Color::Magenta;
pub const PROJECTILE_COLOR: Color = Color::Yellow;

// --- Player ---
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Point, // Top-left of the plane sprite
    pub alive: bool,
    pub score: u64,
    pub fuel: u32,
    fuel_ticks: u32,
}

impl Player {
    /// A fresh plane near the bottom of a `width`×`height` field.
    pub fn new(width: u16, height: u16, fuel: u32) -> Self {
        Player {
            position: Point::new(width as i32 / 2, height as i32 - 4),
            alive: true,
            score: 0,
            fuel,
            fuel_ticks: 0,
        }
    }

    /// Shifts the plane by `dx` columns, keeping the sprite off the outer columns.
    pub fn steer(&mut self, dx: i32, field_width: i32) {
        let max_x = field_width - PLANE.width() - 1;
        self.position.x = (self.position.x + dx).clamp(1, max_x.max(1));
    }

    /// Counts one tick of flight; burns a unit of fuel every `cadence` ticks.
    /// Returns `true` once the tank is empty.
    pub fn burn_fuel(&mut self, cadence: u32) -> bool {
        self.fuel_ticks += 1;
        if self.fuel_ticks >= cadence {
            self.fuel_ticks = 0;
            self.fuel = self.fuel.saturating_sub(1);
        }
        self.fuel == 0
    }

    pub fn refuel(&mut self, fuel: u32) {
        self.fuel = fuel;
        info!("Refuelled. Fuel: {}", self.fuel);
    }

    /// Cell just above the middle of the plane, where shots leave from.
    pub fn nose(&self) -> Point {
        Point::new(self.position.x + PLANE.width() / 2, self.position.y - 1)
    }

    pub fn bounds(&self) -> Rect {
        PLANE.bounds_at(self.position)
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        for (cell, glyph) in PLANE.cells_at(self.position) {
            let glyph = if self.alive { glyph } else { 'X' };
            game_grid.set_cell(cell.x, cell.y, glyph, PLAYER_COLOR);
        }
    }
}

// --- Enemy ---
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Enemy {
    pub position: Point,
}

impl Enemy {
    pub fn new(x: i32, y: i32) -> Self {
        Enemy { position: Point::new(x, y) }
    }

    pub fn bounds(&self) -> Rect {
        ENEMY.bounds_at(self.position)
    }

    /// Moves down with the river. Returns `false` once past the bottom edge.
    pub fn drift(&mut self, field_height: i32) -> bool {
        self.position.y += 1;
        self.position.y < field_height
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        for (cell, glyph) in ENEMY.cells_at(self.position) {
            game_grid.set_cell(cell.x, cell.y, glyph, ENEMY_COLOR);
        }
    }
}

// --- Fuel pickup ---
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FuelPickup {
    pub position: Point, // Anchor cell, the '[' of the label
}

impl FuelPickup {
    pub fn new(x: i32, y: i32) -> Self {
        FuelPickup { position: Point::new(x, y) }
    }

    /// Area covered by the `[FUEL]` label.
    pub fn label_bounds(&self) -> Rect {
        Rect::new(self.position, FUEL_LABEL.len() as i32, 1)
    }

    pub fn drift(&mut self, field_height: i32) -> bool {
        self.position.y += 1;
        self.position.y < field_height
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.put_str(self.position.x, self.position.y, FUEL_LABEL, FUEL_COLOR);
    }
}

// --- Projectile ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub position: Point,
}

impl Projectile {
    pub fn new(position: Point) -> Self {
        Projectile { position }
    }

    /// One row up per tick.
    pub fn fly(&mut self) {
        self.position.y -= 1;
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.set_cell(self.position.x, self.position.y, '|', PROJECTILE_COLOR);
    }
}
