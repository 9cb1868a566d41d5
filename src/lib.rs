//! grid-2048: rule engine for the 2048 sliding-tile puzzle
//!
//! This crate provides:
//! - A square `Grid` of tile values with row/column projection (`grid` module)
//! - The per-line compact/merge algorithm every move is built on (`line` module)
//! - `GridEngine`, which owns one game: moves, scoring, random insertion,
//!   win/loss detection and snapshots (`engine` module)
//! - A caller-owned `BestScore` (`best` module)
//!
//! Quick start:
//! ```
//! use grid_2048::best::BestScore;
//! use grid_2048::config::EngineConfig;
//! use grid_2048::engine::{GridEngine, Move};
//!
//! // Deterministic game with a seeded RNG
//! let mut game = GridEngine::seeded(EngineConfig::default(), 42).unwrap();
//! let mut best = BestScore::new(0);
//!
//! let mut moves = 0;
//! while !game.status().is_over() && moves < 8 {
//!     let out = game.make_move(Move::ALL[moves % 4]);
//!     best.observe(out.score);
//!     moves += 1;
//! }
//! assert_eq!(best.get(), game.score());
//! ```
//!
//! The engine does no I/O. Rendering, input and persistence belong to the
//! caller: read the grid through `GridEngine::grid`, drive it with
//! `GridEngine::make_move`, and keep the best score yourself.
//!
pub mod best;
pub mod config;
pub mod engine;
pub mod grid;
pub mod line;

/// Tile value; `0` is an empty cell.
pub type Tile = u32;
/// Running score: the sum of every tile produced by a merge.
pub type Score = u64;
