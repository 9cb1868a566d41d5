use serde::{Deserialize, Serialize};

use crate::Tile;

/// Value placed by every random insertion.
pub const SEED_TILE: Tile = 2;

/// Largest tile a saved game may hold; two of them still merge without
/// overflowing [`Tile`].
pub const MAX_TILE: Tile = 1 << 30;

pub const DEFAULT_TILES: usize = 4;
pub const DEFAULT_WINNING_NUMBER: Tile = 2048;

/// Fixed parameters of a game: grid dimension and target tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grid dimension N (the grid is N x N).
    pub tiles: usize,
    /// Reaching this tile wins the game.
    pub winning_number: Tile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { tiles: DEFAULT_TILES, winning_number: DEFAULT_WINNING_NUMBER }
    }
}

impl EngineConfig {
    pub fn new(tiles: usize, winning_number: Tile) -> Self { Self { tiles, winning_number } }

    /// Reject configurations no game can start from.
    ///
    /// ```
    /// use grid_2048::config::EngineConfig;
    /// assert!(EngineConfig::default().validate().is_ok());
    /// assert!(EngineConfig::new(1, 2048).validate().is_err());
    /// assert!(EngineConfig::new(4, 1000).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), EngineError> {
        // begin_game needs two empty cells
        if self.tiles < 2 {
            return Err(EngineError::InvalidTiles(self.tiles));
        }
        if !self.winning_number.is_power_of_two()
            || self.winning_number <= SEED_TILE
            || self.winning_number > MAX_TILE
        {
            return Err(EngineError::InvalidWinningNumber(self.winning_number));
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("grid needs at least 2 tiles per side, got {0}")]
    InvalidTiles(usize),
    #[error("winning number must be a power of two from 4 to 2^30, got {0}")]
    InvalidWinningNumber(Tile),
    #[error("grid is {found}x{found} but config expects {expected}x{expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("tile ({row}, {col}) holds {value}, not 0 or a power of two")]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("tile ({row}, {col}) holds {value}, above the 2^30 limit")]
    TileTooLarge { row: usize, col: usize, value: Tile },
    #[error("grid with {tiles} tiles per side has {found} cells")]
    CellCount { tiles: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.tiles, 4);
        assert_eq!(cfg.winning_number, 2048);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn it_rejects_bad_config() {
        assert_eq!(EngineConfig::new(0, 2048).validate(), Err(EngineError::InvalidTiles(0)));
        assert_eq!(EngineConfig::new(4, 2).validate(), Err(EngineError::InvalidWinningNumber(2)));
        assert_eq!(EngineConfig::new(4, 0).validate(), Err(EngineError::InvalidWinningNumber(0)));
        assert_eq!(EngineConfig::new(4, 96).validate(), Err(EngineError::InvalidWinningNumber(96)));
        assert!(EngineConfig::new(2, 4).validate().is_ok());
        assert!(EngineConfig::new(6, 65536).validate().is_ok());
        assert!(EngineConfig::new(4, MAX_TILE).validate().is_ok());
        assert_eq!(
            EngineConfig::new(4, MAX_TILE << 1).validate(),
            Err(EngineError::InvalidWinningNumber(MAX_TILE << 1))
        );
    }

    #[test]
    fn it_error_messages() {
        let err = EngineError::DimensionMismatch { expected: 4, found: 3 };
        assert_eq!(err.to_string(), "grid is 3x3 but config expects 4x4");
        let err = EngineError::InvalidWinningNumber(10);
        assert_eq!(err.to_string(), "winning number must be a power of two from 4 to 2^30, got 10");
    }
}
