use std::collections::HashMap;
use std::io;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::session::Intent;

/// Maps a key press to the game command it stands for.
pub fn intent_for_key(code: KeyCode) -> Intent {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Intent::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Intent::MoveRight,
        KeyCode::Char(' ') => Intent::Fire,
        KeyCode::Char('r') | KeyCode::Char('R') => Intent::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Intent::Quit,
        _ => Intent::None,
    }
}

/// Key releases and anything that is not a key map to `Intent::None`.
pub fn intent_for_event(event: &Event) -> Intent {
    match event {
        Event::Key(KeyEvent { code, kind, .. }) if *kind != KeyEventKind::Release => {
            intent_for_key(*code)
        }
        _ => Intent::None,
    }
}

// --- SimulatedInput for headless runs ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    /// A short flight: weave, fire a few shots, then quit at `quit_frame`.
    pub fn demo_script(quit_frame: u64) -> Self {
        let mut events = HashMap::new();
        events.insert(2, Event::Key(KeyCode::Char(' ').into()));
        events.insert(4, Event::Key(KeyCode::Left.into()));
        events.insert(6, Event::Key(KeyCode::Char(' ').into()));
        events.insert(8, Event::Key(KeyCode::Right.into()));
        events.insert(9, Event::Key(KeyCode::Right.into()));
        events.insert(12, Event::Key(KeyCode::Char(' ').into()));
        events.insert(quit_frame, Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.contains_key(&frame_count))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.events.remove(&self.current_frame) {
            Ok(event)
        } else {
            Ok(Event::Key(KeyCode::Null.into()))
        }
    }
}
