use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while editing or persisting a level.
///
/// A missing save file is deliberately absent: the store substitutes the
/// default record instead of reporting it.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level dimensions {width}x{height}; both must be positive and the board at most 2048x2048 cells")]
    InvalidDimension { width: i32, height: i32 },

    #[error("cell ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        col: i32,
        row: i32,
        width: i32,
        height: i32,
    },

    #[error("tile offset ({dx}, {dz}) is not finite")]
    InvalidOffset { dx: f32, dz: f32 },

    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("a level already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("invalid level name {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, LevelError>;
