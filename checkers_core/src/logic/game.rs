use crate::logic::board::{Board, Color, Turn};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{validate_move, MoveError};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The loser has no pieces left.
    NoPieces,
    /// The loser still has pieces but none of them can move.
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won { winner: Color, reason: EndReason },
}

/// Which color the engine plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    pub engine: Color,
    pub human: Color,
}

impl Seats {
    pub const fn with_engine(engine: Color) -> Self {
        Self {
            engine,
            human: engine.opposite(),
        }
    }

    /// Coin flip between the two colors.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::with_engine(Turn(rng.gen_range(0..2)).color())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Turn,
    pub status: GameStatus,
    pub history: Vec<Board>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Board::new(), Turn(0))
    }

    #[must_use]
    pub fn from_position(board: Board, turn: Turn) -> Self {
        let mut game = Self {
            board,
            turn,
            status: GameStatus::Playing,
            history: Vec::new(),
        };
        game.update_status();
        game
    }

    pub fn side_to_move(&self) -> Color {
        self.turn.color()
    }

    /// Validates and plays a move typed by the human player.
    pub fn make_move(&mut self, from: &str, destinations: &[&str]) -> Result<(), MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }
        let next = validate_move(&self.board, from, destinations, self.turn)?;
        self.advance(next);
        Ok(())
    }

    /// Plays a board chosen by the engine. It must be a successor of the
    /// current position.
    pub fn apply_board(&mut self, next: Board) -> Result<(), MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }
        if !MoveGenerator::new()
            .successors(&self.board, self.turn)
            .contains(&next)
        {
            return Err(MoveError::IllegalMove);
        }
        self.advance(next);
        Ok(())
    }

    fn advance(&mut self, next: Board) {
        let previous = std::mem::replace(&mut self.board, next);
        self.history.push(previous);
        self.turn = self.turn.next();
        self.update_status();
    }

    /// The side to move loses once it has no successor position.
    fn update_status(&mut self) {
        let mover = self.turn.color();
        if MoveGenerator::new().has_legal_moves(&self.board, self.turn) {
            self.status = GameStatus::Playing;
            return;
        }

        let reason = if self.board.count(mover).total() == 0 {
            EndReason::NoPieces
        } else {
            EndReason::Blocked
        };
        self.status = GameStatus::Won {
            winner: mover.opposite(),
            reason,
        };
        log::info!("{} wins on turn {} ({reason:?})", mover.opposite(), self.turn.0);
    }
}
