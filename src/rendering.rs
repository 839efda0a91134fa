use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::info;

use crate::session::{GameSession, SessionState};

pub const BANK_COLOR: Color = Color::Green;
pub const WATER_COLOR: Color = Color::Blue;
pub const HUD_COLOR: Color = Color::Yellow;

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn line(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            row.fill(' ');
        }
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

// --- OutputTarget: the real terminal or a ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, MoveTo(x, y)),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(x, y);
                Ok(())
            }
        }
    }

    pub fn set_color(&mut self, color: Color) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, SetForegroundColor(color)),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Colourless in headless mode
        }
    }

    pub fn reset_color(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, ResetColor),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => crossterm::execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                let s = String::from_utf8_lossy(buf);
                sb.write_str(&s);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: one frame of coloured cells ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

const BLANK: Cell = Cell { glyph: ' ', color: Color::Reset };

pub struct GameGrid {
    pub grid: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![BLANK; width as usize]; height as usize],
            width,
            height,
        }
    }

    /// Cells outside the grid are silently clipped.
    pub fn set_cell(&mut self, x: i32, y: i32, glyph: char, color: Color) {
        if x >= 0 && y >= 0 && (x as u16) < self.width && (y as u16) < self.height {
            self.grid[y as usize][x as usize] = Cell { glyph, color };
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (i, glyph) in text.chars().enumerate() {
            self.set_cell(x + i as i32, y, glyph, color);
        }
    }

    pub fn glyph(&self, x: u16, y: u16) -> Option<char> {
        self.grid
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .map(|cell| cell.glyph)
    }

    pub fn row_text(&self, y: u16) -> String {
        self.grid
            .get(y as usize)
            .map(|row| row.iter().map(|cell| cell.glyph).collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(BLANK);
        }
    }

    /// Writes the grid row by row, switching colour only between runs.
    pub fn render(&self, out: &mut OutputTarget) -> io::Result<()> {
        for (y, row) in self.grid.iter().enumerate() {
            out.move_to(0, y as u16)?;
            let mut current: Option<Color> = None;
            let mut run = String::with_capacity(row.len());
            for cell in row {
                if current != Some(cell.color) {
                    if let Some(color) = current {
                        out.set_color(color)?;
                        write!(out, "{}", run)?;
                        run.clear();
                    }
                    current = Some(cell.color);
                }
                run.push(cell.glyph);
            }
            if let Some(color) = current {
                out.set_color(color)?;
                write!(out, "{}", run)?;
            }
        }
        out.reset_color()?;
        Ok(())
    }

    pub fn clear_screen_manual(&self, out: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            out.move_to(0, y)?;
            write!(out, "{}", " ".repeat(self.width as usize))?;
        }
        out.move_to(0, 0)?;
        Ok(())
    }
}

/// Heads-up line shown on row 0.
pub fn hud_text(session: &GameSession) -> String {
    let player = session.player();
    let status = match session.state() {
        SessionState::Playing => "",
        SessionState::Dead => "[DEAD - R=restart]",
    };
    format!(
        "SCORE: {}  FUEL: {}  {}  | SPACE=fire  Q=quit",
        player.score, player.fuel, status
    )
}

/// Paints the whole scene: river, enemies, pickups, shots, plane, HUD.
pub fn draw_session(game_grid: &mut GameGrid, session: &GameSession) {
    game_grid.clear();

    let width = session.field().width();
    for (y, channel) in session.field().rows().iter().enumerate() {
        let y = y as i32;
        for x in 0..width {
            if channel.is_bank(x) {
                game_grid.set_cell(x, y, '#', BANK_COLOR);
            } else {
                game_grid.set_cell(x, y, ' ', WATER_COLOR);
            }
        }
    }

    for enemy in session.enemies() {
        enemy.draw(game_grid);
    }
    for pickup in session.pickups() {
        pickup.draw(game_grid);
    }
    for projectile in session.projectiles() {
        projectile.draw(game_grid);
    }
    session.player().draw(game_grid);

    game_grid.put_str(2, 0, &hud_text(session), HUD_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn draws_banks_water_and_plane() {
        let config = GameConfig { seed: Some(1), ..GameConfig::default() };
        let session = GameSession::new(40, 20, config).unwrap();
        let mut grid = GameGrid::new(40, 20);
        draw_session(&mut grid, &session);

        let row = grid.row_text(10);
        assert_eq!(&row[..11], "###########");
        assert_eq!(&row[11..30], " ".repeat(19));
        assert_eq!(&row[30..], "##########");
        assert_eq!(grid.glyph(22, 16), Some('^'));
        assert_eq!(grid.glyph(20, 17), Some('<'));
        assert!(grid.row_text(0).contains("SCORE: 0  FUEL: 100"));
    }

    #[test]
    fn screen_buffer_receives_rendered_rows() {
        let mut grid = GameGrid::new(6, 2);
        grid.put_str(0, 1, "[FUEL]", Color::Magenta);
        grid.set_cell(7, 0, 'x', Color::Red); // Clipped
        let mut out = OutputTarget::ScreenBuffer(ScreenBuffer::new(6, 2));
        grid.render(&mut out).unwrap();
        match out {
            OutputTarget::ScreenBuffer(sb) => {
                assert_eq!(sb.line(0), "      ");
                assert_eq!(sb.line(1), "[FUEL]");
            }
            OutputTarget::Stdout(_) => unreachable!(),
        }
    }
}
