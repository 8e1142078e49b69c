//! Tournament mode: autoplay many deals in parallel and collect statistics
//!
//! Each game gets its own seed derived from the tournament seed and the game
//! index, so a tournament is reproducible whatever the thread count.

use crate::config::GameConfig;
use crate::game::{GameLogger, RandomPlayer, Solitaire, VerbosityLevel};
use crate::{Result, SolitaireError};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourneyOptions {
    pub games: usize,
    pub seed: u64,
    /// Moves per game before giving up
    pub max_moves: usize,
}

impl Default for TourneyOptions {
    fn default() -> Self {
        TourneyOptions {
            games: 100,
            seed: 42,
            max_moves: 2000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourneyStats {
    pub games: usize,
    pub wins: usize,
    pub total_moves: usize,
    /// Seeds of the deals that were won, ascending
    pub winning_seeds: Vec<u64>,
    pub elapsed: Duration,
}

impl TourneyStats {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    pub fn average_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

/// Seed for game `index` of a tournament seeded with `seed`
pub fn game_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play `options.games` deals of `base` with the random player
///
/// `base.seed` is ignored; every game is seeded from the tournament seed.
pub fn run_tourney(base: &GameConfig, options: TourneyOptions) -> Result<TourneyStats> {
    if options.games == 0 {
        return Err(SolitaireError::InvalidConfig(
            "tournament needs at least one game".to_string(),
        ));
    }
    base.validate()?;

    let stats = Arc::new(Mutex::new(TourneyStats::default()));
    let start_time = Instant::now();

    (0..options.games)
        .into_par_iter()
        .try_for_each(|game_idx| -> Result<()> {
            let seed = game_seed(options.seed, game_idx);
            let config = base.clone().with_seed(seed);
            let mut game =
                Solitaire::with_logger(config, GameLogger::with_verbosity(VerbosityLevel::Silent))?;

            let player_seed = seed.wrapping_add(0x1234_5678_9ABC_DEF0);
            let result = RandomPlayer::with_seed(player_seed).play_out(&mut game, options.max_moves);

            let mut stats = stats
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            stats.games += 1;
            stats.total_moves += result.moves;
            if result.won {
                stats.wins += 1;
                stats.winning_seeds.push(seed);
            }
            Ok(())
        })?;

    let mut stats = match Arc::try_unwrap(stats) {
        Ok(mutex) => mutex.into_inner().unwrap_or_else(|p| p.into_inner()),
        Err(shared) => shared.lock().unwrap_or_else(|p| p.into_inner()).clone(),
    };
    stats.winning_seeds.sort_unstable();
    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

/// Print a tournament summary to stdout
pub fn print_summary(stats: &TourneyStats) {
    println!("=== Tournament Complete ===");
    println!("Total games played: {}", stats.games);
    println!("Elapsed time: {:.2}s", stats.elapsed.as_secs_f64());
    if stats.elapsed.as_secs_f64() > 0.0 {
        println!(
            "Games per second: {:.2}",
            stats.games as f64 / stats.elapsed.as_secs_f64()
        );
    }
    println!("Wins: {} ({:.1}%)", stats.wins, 100.0 * stats.win_rate());
    println!("Average moves: {:.1}", stats.average_moves());
}
