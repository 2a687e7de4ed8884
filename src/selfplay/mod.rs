use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::board::cozy::Position;
use crate::board::Rules;
use crate::error::SearchError;
use crate::game::{outcome, play_out, GameOutcome};
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::eval::Heuristic;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    /// Uniformly random moves played before the engine takes over, so that
    /// games from the same seed family diverge.
    pub random_opening_plies: usize,
    pub seed: u64,
    pub search: SearchParams,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 10,
            max_plies: 200,
            random_opening_plies: 2,
            seed: 42,
            search: SearchParams::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<String>,
    pub result: i8, // 1 white win, 0 draw, -1 black win
    pub outcome: GameOutcome,
}

/// Play `params.games` games in parallel. Each game owns its own search
/// session and an RNG seeded from `seed` and the game index, so the batch
/// is reproducible whatever the thread count.
pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>, SearchError> {
    generate_games_with_progress(params, || {})
}

pub fn generate_games_with_progress<F>(
    params: &SelfPlayParams,
    on_game: F,
) -> Result<Vec<GameRecord>, SearchError>
where
    F: Fn() + Sync,
{
    (0..params.games)
        .into_par_iter()
        .map(|gi| {
            let record = play_one(params, gi as u64);
            on_game();
            record
        })
        .collect()
}

fn play_one(params: &SelfPlayParams, game_index: u64) -> Result<GameRecord, SearchError> {
    let stream = game_index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = SmallRng::seed_from_u64(params.seed ^ stream);
    let mut pos = Position::startpos();
    let mut moves = Vec::new();
    for _ in 0..params.random_opening_plies.min(params.max_plies) {
        if outcome(&pos).is_some() { break; }
        let legal = pos.legal_moves();
        let mv = legal[rng.gen_range(0..legal.len())];
        moves.push(pos.uci(mv));
        pos.apply(mv)?;
    }

    let mut engine = Searcher::new(Heuristic, params.search);
    let played = play_out(&mut pos, &mut engine, params.max_plies - moves.len(), |_, _| {})?;
    moves.extend(played.moves);
    Ok(GameRecord { moves, result: played.outcome.result(), outcome: played.outcome })
}

/// One JSON object per line.
pub fn write_games<P: AsRef<Path>>(games: &[GameRecord], path: P) -> std::io::Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()
}

pub fn read_games<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<GameRecord>> {
    let rdr = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in rdr.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
