//! River Raid for the terminal: a scrolling river with procedurally
//! meandering banks, enemies and fuel pickups drifting down, and a plane
//! that steers, shoots and burns fuel. The DVD bouncing-logo screensaver
//! ships alongside.

pub mod collision;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod dvd;
pub mod entities;
pub mod error;
pub mod game;
pub mod pool;
pub mod rendering;
pub mod river;
pub mod session;
pub mod sprite;
pub mod terminal_io;
pub mod types;
