//! The bouncing "DVD" logo screensaver.

use crossterm::style::Color;
use rand::Rng;

use crate::error::SessionError;
use crate::rendering::GameGrid;
use crate::types::Point;

pub const LOGO_HEIGHT: i32 = 7;
pub const LOGO_WIDTH: i32 = 30;

const LOGO: [&str; LOGO_HEIGHT as usize] = [
    "⠀⠀⣸⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⠀⠀⠀⢀⣾⣿⣿⣿⣿⣿⣿⣿⣿⣶⣦⡀",
    "⠀⢠⣿⣿⡿⠀⠀⠈⢹⣿⣿⡿⣿⣿⣇⠀⣠⣿⣿⠟⣽⣿⣿⠇⠀⠀⢹⣿⣿⣿",
    "⠀⢸⣿⣿⡇⠀⢀⣠⣾⣿⡿⠃⢹⣿⣿⣶⣿⡿⠋⢰⣿⣿⡿⠀⠀⣠⣼⣿⣿⠏",
    "⠀⣿⣿⣿⣿⣿⣿⠿⠟⠋⠁⠀⠀⢿⣿⣿⠏⠀⠀⢸⣿⣿⣿⣿⣿⡿⠟⠋⠁⠀",
    "⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⣀⣀⣀⣸⣟⣁⣀⣀⡀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀",
    "⣠⣴⣶⣾⣿⣿⣻⡟⣻⣿⢻⣿⡟⣛⢻⣿⡟⣛⣿⡿⣛⣛⢻⣿⣿⣶⣦⣄⡀⠀",
    "⠉⠛⠻⠿⠿⠿⠷⣼⣿⣿⣼⣿⣧⣭⣼⣿⣧⣭⣿⣿⣬⡭⠾⠿⠿⠿⠛⠉⠀",
];

pub const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

#[derive(Clone, Debug, PartialEq)]
pub struct DvdLogo {
    pub position: Point,
    pub velocity: Point,
    pub color_index: usize,
    width: i32,
    height: i32,
}

impl DvdLogo {
    /// A logo at a random spot of a `width`×`height` screen, heading diagonally.
    pub fn new(width: u16, height: u16, rng: &mut impl Rng) -> Result<Self, SessionError> {
        if (width as i32) <= LOGO_WIDTH || (height as i32) <= LOGO_HEIGHT {
            return Err(SessionError::PlayfieldTooSmall {
                width,
                height,
                min_width: LOGO_WIDTH as u16 + 1,
                min_height: LOGO_HEIGHT as u16 + 1,
            });
        }
        let mut logo = DvdLogo {
            position: Point::new(0, 0),
            velocity: Point::new(1, 1),
            color_index: 0,
            width: width as i32,
            height: height as i32,
        };
        logo.reset(rng);
        Ok(logo)
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.position = Point::new(
            rng.gen_range(0..self.width - LOGO_WIDTH),
            rng.gen_range(0..self.height - LOGO_HEIGHT),
        );
        let dx = if rng.gen_bool(0.5) { 1 } else { -1 };
        let dy = if rng.gen_bool(0.5) { 1 } else { -1 };
        self.velocity = Point::new(dx, dy);
        self.color_index = 0;
    }

    /// Moves one cell per axis; touching an edge flips that axis and
    /// switches colour. Returns `true` on a bounce.
    pub fn advance(&mut self, rng: &mut impl Rng) -> bool {
        let moved = self.position.offset(self.velocity.x, self.velocity.y);
        self.position = Point::new(
            moved.x.clamp(0, self.width - LOGO_WIDTH),
            moved.y.clamp(0, self.height - LOGO_HEIGHT),
        );
        let mut bounced = false;
        if self.position.x <= 0 || self.position.x >= self.width - LOGO_WIDTH {
            self.velocity.x = -self.velocity.x;
            self.change_color(rng);
            bounced = true;
        }
        if self.position.y <= 0 || self.position.y >= self.height - LOGO_HEIGHT {
            self.velocity.y = -self.velocity.y;
            self.change_color(rng);
            bounced = true;
        }
        bounced
    }

    fn change_color(&mut self, rng: &mut impl Rng) {
        let current = self.color_index;
        while self.color_index == current {
            self.color_index = rng.gen_range(0..PALETTE.len());
        }
    }

    pub fn color(&self) -> Color {
        PALETTE[self.color_index]
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        for (row, line) in LOGO.iter().enumerate() {
            game_grid.put_str(self.position.x, self.position.y + row as i32, line, self.color());
        }
    }
}
