use crate::engine::config::{EngineConfig, EvalWeights};
use crate::engine::{Evaluator, Score, LOSS, WIN};
use crate::logic::board::{Board, BoardCoordinate, Color, Turn};
use std::sync::Arc;

pub struct SimpleEvaluator {
    config: Arc<EngineConfig>,
}

impl SimpleEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for SimpleEvaluator {
    fn evaluate(&self, board: &Board, turn: Turn) -> Score {
        score_position(&self.config.weights, board, turn)
    }
}

/// Evaluates `board` for the side moving on `turn` with the default weights.
pub fn evaluate(board: &Board, turn: Turn) -> Score {
    score_position(&EvalWeights::default(), board, turn)
}

/// `LOSS` when the mover has no pieces left, `WIN` when the opponent has
/// none, otherwise the weighted sum of the position terms over `w.scale`.
pub fn score_position(w: &EvalWeights, board: &Board, turn: Turn) -> Score {
    let mover = turn.color();
    let (my_men, my_kings) = board.locate(mover);
    let (opp_men, opp_kings) = board.locate(mover.opposite());

    let my_total = my_men.len() + my_kings.len();
    let opp_total = opp_men.len() + opp_kings.len();
    if my_total == 0 {
        return LOSS;
    }
    if opp_total == 0 {
        return WIN;
    }

    // Half of the board nearer the opponent's back row; both sides' men are
    // classified against the mover's zone.
    let in_threat_zone = |pos: &BoardCoordinate| match mover {
        Color::Red => pos.row > 4,
        Color::Black => pos.row < 5,
    };

    let mut total = 0;
    let mut my_seen = 0;
    let mut opp_seen = 0;

    // 1. Mover's pieces
    let my_crowded = my_men.len() > w.crowded_men_threshold;
    for pos in &my_men {
        my_seen += 1;
        total += if pos.is_promotion_row() {
            if my_crowded {
                w.man_back_row_crowded
            } else {
                w.man_back_row_sparse
            }
        } else if in_threat_zone(pos) {
            w.man_threat_zone
        } else {
            w.man_other
        };
    }
    for _ in &my_kings {
        my_seen += 1;
        total += w.king;
    }

    // 2. Opponent's pieces
    let opp_crowded = opp_men.len() > w.crowded_men_threshold;
    for pos in &opp_men {
        opp_seen += 1;
        total -= if pos.is_promotion_row() {
            if opp_crowded {
                w.opp_man_back_row_crowded
            } else {
                w.opp_man_back_row_sparse
            }
        } else if in_threat_zone(pos) {
            w.opp_man_threat_zone
        } else {
            w.opp_man_other
        };
    }
    for _ in &opp_kings {
        opp_seen += 1;
        total -= w.opp_king;
    }

    // 3. Bookkeeping terms
    total += if my_seen == my_total {
        w.count_parity
    } else {
        -w.count_parity
    };
    total += if opp_seen < opp_total {
        w.attrition
    } else {
        -w.attrition
    };
    total += if my_seen > opp_seen {
        w.material
    } else {
        -w.material
    };

    f64::from(total) / w.scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::is_terminal;
    use crate::logic::board::PieceType;

    fn board_from(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    fn assert_close(actual: Score, expected: Score) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_opening_score() {
        // Mover: 4 crowded back-row men (60) + 8 others (8).
        // Opponent: 4 crowded back-row men (-20) + 8 in the zone (-24).
        // Terms: +4 -5 -2.
        let board = Board::new();
        assert_close(evaluate(&board, Turn(0)), 21.0 / 200.0);
        assert_close(evaluate(&board, Turn(1)), 21.0 / 200.0);
    }

    #[test]
    fn test_terminal_scores() {
        let only_red = board_from("8/8/3r4/8/8/8/8/8");
        assert_eq!(evaluate(&only_red, Turn(0)), WIN);
        assert_eq!(evaluate(&only_red, Turn(1)), LOSS);
        assert_eq!(evaluate(&Board::empty(), Turn(0)), LOSS);
    }

    #[test]
    fn test_sparse_position_terms() {
        // Red man on the far row, red man in the zone, red king,
        // black man in red's zone and black king.
        let mut board = Board::empty();
        let sq = |r, c| BoardCoordinate::new(r, c).unwrap();
        board.add_piece(sq(8, 1), PieceType::Man, Color::Red);
        board.add_piece(sq(5, 2), PieceType::Man, Color::Red);
        board.add_piece(sq(2, 1), PieceType::King, Color::Red);
        board.add_piece(sq(6, 5), PieceType::Man, Color::Black);
        board.add_piece(sq(1, 4), PieceType::King, Color::Black);

        // 2 + 3 + 5 - 3 - 5 + 4 - 5 + 2
        assert_close(evaluate(&board, Turn(0)), 3.0 / 200.0);

        // From Black's side: zone is rows 1-4, so red men count as "other".
        // Black: man other (+1), king (+5); Red: sparse back row (-2),
        // other (-1), king (-5); +4 -5 -2.
        assert_close(evaluate(&board, Turn(1)), -5.0 / 200.0);
    }

    #[test]
    fn test_scores_stay_inside_open_interval() {
        let positions = [
            Board::new(),
            board_from("1r1r1r1r/r1r1r1r1/1r1r1r1r/8/8/8/8/6b1"),
            board_from("1R1R1R1R/R1R1R1R1/1R1R1R1R/8/8/8/8/6b1"),
            board_from("1r6/8/8/8/8/8/8/b1b1b1b1"),
        ];
        for board in &positions {
            for turn in 0..2 {
                let score = evaluate(board, Turn(turn));
                assert!(!is_terminal(score));
                assert!(score > -1.0 && score < 1.0, "score {score} out of range");
            }
        }
    }

    #[test]
    fn test_blocked_side_is_not_terminal() {
        let board = board_from("8/8/8/8/8/8/1r6/b1b5");
        let score = evaluate(&board, Turn(0));
        assert!(!is_terminal(score));
    }

    #[test]
    fn test_custom_weights() {
        let config = EngineConfig {
            weights: EvalWeights {
                scale: 400.0,
                ..EvalWeights::default()
            },
            ..EngineConfig::default()
        };
        let evaluator = SimpleEvaluator::new(Arc::new(config));
        assert_close(evaluator.evaluate(&Board::new(), Turn(0)), 21.0 / 400.0);
    }
}
