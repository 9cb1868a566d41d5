use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use grid_2048::best::BestScore;
use grid_2048::config::{EngineConfig, DEFAULT_TILES, DEFAULT_WINNING_NUMBER};
use grid_2048::engine::{GameStatus, GridEngine, Move};
use grid_2048::{Score, Tile};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about = "Play seeded 2048 games with a random-direction policy")]
struct Args {
    /// Grid dimension N (N x N tiles)
    #[arg(long, default_value_t = DEFAULT_TILES)]
    tiles: usize,

    /// Tile value that wins the game
    #[arg(long, default_value_t = DEFAULT_WINNING_NUMBER)]
    winning_number: Tile,

    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Seed of the first game; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop a game after this many moves
    #[arg(long, value_name = "N")]
    max_moves: Option<u64>,

    /// Number of worker threads (defaults to Rayon default)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Best score carried over from earlier runs
    #[arg(long, default_value_t = 0)]
    best: Score,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
struct GameSummary {
    seed: u64,
    moves: u64,
    score: Score,
    highest_tile: Tile,
    status: GameStatus,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = EngineConfig::new(args.tiles, args.winning_number);
    config.validate()?;
    if let Some(n) = args.workers {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    let pb = if args.quiet { ProgressBar::hidden() } else { ProgressBar::new(args.games) };
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise}")?);

    let start = Instant::now();
    let summaries = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let summary = play_game(config, args.seed.wrapping_add(i), args.max_moves);
            pb.inc(1);
            summary
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();

    let mut best = BestScore::new(args.best);
    let (mut won, mut lost, mut unfinished) = (0u64, 0u64, 0u64);
    for s in &summaries {
        match s.status {
            GameStatus::Won => won += 1,
            GameStatus::Lost => lost += 1,
            GameStatus::InProgress => unfinished += 1,
        }
        if best.observe(s.score) {
            info!("seed {}: new best score {}", s.seed, s.score);
        }
    }
    let total_moves: u64 = summaries.iter().map(|s| s.moves).sum();
    let top_tile = summaries.iter().map(|s| s.highest_tile).max().unwrap_or(0);

    info!(
        "{} games in {:.1}s: won {}, lost {}, unfinished {} | best score {} | highest tile {} | moves {}",
        summaries.len(),
        start.elapsed().as_secs_f64(),
        won,
        lost,
        unfinished,
        best.get(),
        top_tile,
        total_moves
    );
    Ok(())
}

/// Play one game to the end (or `max_moves`), picking a random direction
/// that changes the grid each turn.
fn play_game(config: EngineConfig, seed: u64, max_moves: Option<u64>) -> Result<GameSummary> {
    let mut game = GridEngine::seeded(config, seed)?;
    // independent stream so the policy does not perturb tile placement
    let mut policy = StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
    let mut moves = 0u64;
    let mut status = game.status();

    while !status.is_over() && max_moves.map_or(true, |m| moves < m) {
        let mut dirs = Move::ALL;
        dirs.shuffle(&mut policy);
        let Some(out) = dirs.iter().map(|&d| game.make_move(d)).find(|o| o.changed) else {
            break;
        };
        moves += 1;
        status = out.status;
    }

    debug!("seed {}: {:?} after {} moves, score {}{}", seed, status, moves, game.score(), game.grid());
    Ok(GameSummary {
        seed,
        moves,
        score: game.score(),
        highest_tile: game.grid().highest_tile(),
        status,
    })
}
