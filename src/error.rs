use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("playfield {width}x{height} is too small, need at least {min_width}x{min_height}")]
    PlayfieldTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
