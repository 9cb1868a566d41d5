use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, EngineError, MAX_TILE, SEED_TILE};
use crate::grid::{Grid, LineRef};
use crate::line::{self, LineOutcome};
use crate::{Score, Tile};

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// The `idx`-th line this move slides, and whether it is read reversed.
    ///
    /// Lines are oriented so tiles always travel toward the high index:
    /// Right/Down read natural order, Left/Up read reversed.
    #[inline]
    fn line(self, idx: usize) -> (LineRef, bool) {
        match self {
            Move::Right => (LineRef::Row(idx), false),
            Move::Left => (LineRef::Row(idx), true),
            Move::Down => (LineRef::Col(idx), false),
            Move::Up => (LineRef::Col(idx), true),
        }
    }
}

/// Terminal-state summary. A won grid reports `Won` even if it is also
/// deadlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool { self != GameStatus::InProgress }
}

/// What one call to [`GridEngine::make_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// True if any row/column changed. Unchanged moves spawn nothing.
    pub changed: bool,
    /// Score earned by merges in this move.
    pub gained: Score,
    /// Running score after the move.
    pub score: Score,
    /// Where the new tile went, if one was inserted.
    pub inserted: Option<(usize, usize)>,
    pub status: GameStatus,
}

/// Serializable snapshot of a game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub config: EngineConfig,
    pub grid: Grid,
    pub score: Score,
    pub last_inserted: Option<(usize, usize)>,
}

/// Owns the grid and score of one game.
///
/// The RNG is injected so games can be replayed; [`GridEngine::new`] seeds
/// from OS entropy, [`GridEngine::seeded`] from a fixed seed.
///
/// ```
/// use grid_2048::config::EngineConfig;
/// use grid_2048::engine::{GridEngine, Move};
///
/// let mut game = GridEngine::seeded(EngineConfig::default(), 42).unwrap();
/// assert_eq!(game.grid().count_empty(), 14);
/// for dir in Move::ALL {
///     let out = game.make_move(dir);
///     assert_eq!(out.inserted.is_some(), out.changed);
/// }
/// assert!(!game.is_lost());
/// ```
#[derive(Debug, Clone)]
pub struct GridEngine<R = StdRng> {
    config: EngineConfig,
    grid: Grid,
    score: Score,
    last_inserted: Option<(usize, usize)>,
    rng: R,
}

impl GridEngine<StdRng> {
    /// Start a game seeded from OS entropy.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a reproducible game.
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GridEngine<R> {
    /// Validate `config` and begin a game using `rng` for insertions.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        let mut engine = GridEngine {
            config,
            grid: Grid::new(config.tiles),
            score: 0,
            last_inserted: None,
            rng,
        };
        engine.begin_game();
        Ok(engine)
    }

    /// Resume a saved game. The grid must match the config and hold only
    /// zeros and powers of two no larger than [`MAX_TILE`].
    pub fn from_state(state: GameState, rng: R) -> Result<Self, EngineError> {
        let GameState { config, grid, score, last_inserted } = state;
        config.validate()?;
        if grid.tiles() != config.tiles {
            return Err(EngineError::DimensionMismatch { expected: config.tiles, found: grid.tiles() });
        }
        if let Some((row, col, value)) =
            grid.iter().find(|&(_, _, v)| v != 0 && (v < SEED_TILE || !v.is_power_of_two()))
        {
            return Err(EngineError::InvalidTile { row, col, value });
        }
        if let Some((row, col, value)) = grid.iter().find(|&(_, _, v)| v > MAX_TILE) {
            return Err(EngineError::TileTooLarge { row, col, value });
        }
        // presentation hint only; drop it rather than fail
        let last_inserted = last_inserted.filter(|&(r, c)| r < config.tiles && c < config.tiles);
        Ok(GridEngine { config, grid, score, last_inserted, rng })
    }

    /// Snapshot the current game.
    pub fn state(&self) -> GameState {
        GameState {
            config: self.config,
            grid: self.grid.clone(),
            score: self.score,
            last_inserted: self.last_inserted,
        }
    }

    #[inline]
    pub fn config(&self) -> EngineConfig { self.config }

    /// Grid dimension N.
    #[inline]
    pub fn tiles(&self) -> usize { self.grid.tiles() }

    #[inline]
    pub fn winning_number(&self) -> Tile { self.config.winning_number }

    #[inline]
    pub fn grid(&self) -> &Grid { &self.grid }

    #[inline]
    pub fn score(&self) -> Score { self.score }

    /// Coordinate of the most recent random insertion.
    #[inline]
    pub fn last_inserted(&self) -> Option<(usize, usize)> { self.last_inserted }

    /// Panics if `(row, col)` is off the grid.
    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> Tile { self.grid.get(row, col) }

    /// Panics if `(row, col)` is off the grid.
    #[inline]
    pub fn set_tile(&mut self, row: usize, col: usize, val: Tile) { self.grid.set(row, col, val) }

    pub fn clear_grid(&mut self) { self.grid.clear() }

    /// Read a row or column, optionally reversed.
    pub fn read_line(&self, line: LineRef, reversed: bool) -> Vec<Tile> { self.grid.line(line, reversed) }

    /// Write a row or column back. Panics unless `vals.len() == tiles()`.
    pub fn write_line(&mut self, line: LineRef, vals: &[Tile], reversed: bool) {
        self.grid.set_line(line, vals, reversed)
    }

    /// Reset grid and score, then place two seed tiles.
    pub fn begin_game(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.last_inserted = None;
        self.insert_new_number();
        self.insert_new_number();
        log::debug!(
            "new {n}x{n} game, target {}",
            self.config.winning_number,
            n = self.config.tiles
        );
        log::trace!("{}", self.grid);
    }

    /// Slide/merge every line in `dir` and add merges to the score. No
    /// random insertion.
    ///
    /// ```
    /// use grid_2048::config::EngineConfig;
    /// use grid_2048::engine::{GridEngine, Move};
    /// use grid_2048::grid::LineRef;
    ///
    /// let mut game = GridEngine::seeded(EngineConfig::default(), 7).unwrap();
    /// game.clear_grid();
    /// game.write_line(LineRef::Row(0), &[0, 2, 0, 2], false);
    /// let out = game.shift(Move::Right);
    /// assert!(out.changed);
    /// assert_eq!(game.read_line(LineRef::Row(0), false), vec![0, 0, 0, 4]);
    /// assert_eq!(game.score(), 4);
    /// ```
    pub fn shift(&mut self, dir: Move) -> LineOutcome {
        let mut total = LineOutcome::default();
        for idx in 0..self.grid.tiles() {
            let (line_ref, reversed) = dir.line(idx);
            let mut vals = self.grid.line(line_ref, reversed);
            let out = line::slide(&mut vals);
            if out.changed {
                self.grid.set_line(line_ref, &vals, reversed);
            }
            total.absorb(out);
        }
        self.score += total.gained;
        log::debug!("move {:?}: changed={} gained={}", dir, total.changed, total.gained);
        total
    }

    /// Play one turn: shift, insert a tile if anything changed, then
    /// report the resulting status.
    pub fn make_move(&mut self, dir: Move) -> MoveOutcome {
        let moved = self.shift(dir);
        // a changed line always leaves at least one empty cell behind
        let inserted = if moved.changed { Some(self.insert_new_number()) } else { None };
        let status = self.status();
        log::trace!("{}", self.grid);
        MoveOutcome {
            changed: moved.changed,
            gained: moved.gained,
            score: self.score,
            inserted,
            status,
        }
    }

    /// Put a seed tile on a uniformly chosen empty cell and return where.
    ///
    /// Panics if the grid is full.
    pub fn insert_new_number(&mut self) -> (usize, usize) {
        let empty = self.grid.empty_cells();
        assert!(!empty.is_empty(), "insert_new_number called with no empty cell");
        let (row, col) = empty[self.rng.gen_range(0..empty.len())];
        self.grid.set(row, col, SEED_TILE);
        self.last_inserted = Some((row, col));
        log::debug!("inserted {} at ({}, {})", SEED_TILE, row, col);
        (row, col)
    }

    /// True if any tile equals the winning number.
    pub fn is_win(&self) -> bool { self.grid.contains(self.config.winning_number) }

    /// True if the grid is full and no direction would change it.
    pub fn is_lost(&self) -> bool { self.grid.count_empty() == 0 && !self.can_move() }

    /// True if some move would change the grid.
    ///
    /// Runs the real line algorithm on scratch copies of every row and
    /// column in both orientations; grid and score are untouched.
    pub fn can_move(&self) -> bool {
        for line_ref in self.grid.lines() {
            if line::can_slide(&self.grid.line(line_ref, false))
                || line::can_slide(&self.grid.line(line_ref, true))
            {
                log::debug!("{:?} has movement", line_ref);
                return true;
            }
        }
        log::debug!("no movements available");
        false
    }

    /// Win takes precedence over loss.
    pub fn status(&self) -> GameStatus {
        if self.is_win() {
            GameStatus::Won
        } else if self.is_lost() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }
}
