use crate::engine::config::EngineConfig;
use crate::engine::eval::SimpleEvaluator;
use crate::engine::{is_terminal, Evaluator, Score, SearchStats, Searcher};
use crate::logic::board::{Board, Turn};
use crate::logic::generator::MoveGenerator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Max,
    Min,
}

impl NodeKind {
    const fn flip(self) -> Self {
        match self {
            Self::Max => Self::Min,
            Self::Min => Self::Max,
        }
    }
}

/// Fixed-depth minimax with alpha-beta pruning. Equal best children are
/// broken by a uniform draw from `rng`.
pub struct AlphaBetaEngine<R: Rng = StdRng> {
    config: Arc<EngineConfig>,
    evaluator: SimpleEvaluator,
    generator: MoveGenerator,
    rng: R,
    nodes_searched: u32,
}

impl AlphaBetaEngine<StdRng> {
    pub fn from_seed(config: Arc<EngineConfig>, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: Arc<EngineConfig>) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> AlphaBetaEngine<R> {
    pub fn new(config: Arc<EngineConfig>, rng: R) -> Self {
        Self {
            evaluator: SimpleEvaluator::new(config.clone()),
            config,
            generator: MoveGenerator::new(),
            rng,
            nodes_searched: 0,
        }
    }

    /// The engine's reply for the side moving on `turn`, or `None` when that
    /// side has no legal move.
    pub fn choose_move(&mut self, board: &Board, turn: Turn) -> Option<Board> {
        self.search(board, turn).map(|(next, _)| next)
    }

    /// Returns the chosen child (if any) and the node value. Each node is
    /// scored for the side moving on its own `turn`.
    fn alpha_beta(
        &mut self,
        board: &Board,
        mut alpha: Score,
        mut beta: Score,
        turn: Turn,
        depth: u8,
        node: NodeKind,
    ) -> (Option<Board>, Score) {
        self.nodes_searched += 1;

        let value = self.evaluator.evaluate(board, turn);
        // Max nodes stop on a win, min nodes on a loss.
        let decided = is_terminal(value) && (value > 0.0) == (node == NodeKind::Max);
        if depth == 0 || decided {
            return (None, value);
        }

        let mut best_children = Vec::new();
        for child in self.generator.successors(board, turn) {
            let (_, child_value) =
                self.alpha_beta(&child, alpha, beta, turn.next(), depth - 1, node.flip());

            // A decided game below dominates any bound.
            if is_terminal(child_value) {
                return (Some(child), child_value);
            }

            match node {
                NodeKind::Max if child_value >= alpha => {
                    if child_value > alpha {
                        alpha = child_value;
                        best_children.clear();
                    }
                    best_children.push(child);
                }
                NodeKind::Min if child_value <= beta => {
                    if child_value < beta {
                        beta = child_value;
                        best_children.clear();
                    }
                    best_children.push(child);
                }
                _ => {}
            }

            if alpha >= beta {
                return (None, bound(node, alpha, beta));
            }
        }

        if best_children.is_empty() {
            return (None, value);
        }

        let pick = self.rng.gen_range(0..best_children.len());
        let choice = best_children.swap_remove(pick);
        (Some(choice), bound(node, alpha, beta))
    }
}

const fn bound(node: NodeKind, alpha: Score, beta: Score) -> Score {
    match node {
        NodeKind::Max => alpha,
        NodeKind::Min => beta,
    }
}

impl<R: Rng> Searcher for AlphaBetaEngine<R> {
    fn search(&mut self, board: &Board, turn: Turn) -> Option<(Board, SearchStats)> {
        self.nodes_searched = 0;
        let start = Instant::now();
        let depth = self.config.search_depth;

        let (choice, score) = self.alpha_beta(
            board,
            self.config.alpha_bound,
            self.config.beta_bound,
            turn,
            depth,
            NodeKind::Max,
        );

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            score,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        log::debug!(
            "search for {} on turn {}: depth={} nodes={} score={:.4} time={}ms",
            turn.color(),
            turn.0,
            stats.depth,
            stats.nodes,
            stats.score,
            stats.time_ms
        );

        choice.map(|next| (next, stats))
    }
}

/// Picks a move with the default configuration and the given random source.
pub fn choose_move<R: Rng>(board: &Board, turn: Turn, rng: R) -> Option<Board> {
    AlphaBetaEngine::new(Arc::new(EngineConfig::default()), rng).choose_move(board, turn)
}
