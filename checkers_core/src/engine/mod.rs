use crate::logic::board::{Board, Turn};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod search;

/// Position score from the point of view of a given side. Exactly `WIN` or
/// `LOSS` is a decided game; everything else is a heuristic in (-1, 1).
pub type Score = f64;

pub const WIN: Score = 1.0;
pub const LOSS: Score = -1.0;

#[allow(clippy::float_cmp)]
pub fn is_terminal(score: Score) -> bool {
    score == WIN || score == LOSS
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub score: Score,
    pub time_ms: u64,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board, turn: Turn) -> Score;
}

pub trait Searcher {
    fn search(&mut self, board: &Board, turn: Turn) -> Option<(Board, SearchStats)>;
}
