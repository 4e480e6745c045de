use crate::logic::board::{get_king, Board, BoardCoordinate, Color, Turn, BOARD_SIZE};
use crate::logic::generator::MoveGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a human move is rejected. The messages are shown to the player
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("You don't have a piece there!")]
    NoPieceThere,
    #[error("Invalid row.")]
    InvalidRow,
    #[error("Invalid column.")]
    InvalidColumn,
    #[error("Must specify at least one move.")]
    NoDestination,
    #[error("Invalid move.")]
    InvalidMove,
    #[error("Invalid multi-move.")]
    InvalidMultiMove,
    #[error("Non-legal move.")]
    IllegalMove,
    #[error("The game is already over.")]
    GameOver,
}

/// An origin square and the ordered squares the piece lands on. More than
/// one step means a capture chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: BoardCoordinate,
    pub steps: Vec<BoardCoordinate>,
}

impl Move {
    /// Parses `B3` style squares, checking each step's geometry as it goes.
    pub fn parse(from: &str, destinations: &[&str]) -> Result<Self, MoveError> {
        let from = parse_square(from, MoveError::NoPieceThere)?;
        if destinations.is_empty() {
            return Err(MoveError::NoDestination);
        }

        let is_chain = destinations.len() > 1;
        let mut steps = Vec::with_capacity(destinations.len());
        let mut current = from;
        for text in destinations {
            let to = parse_square(text, MoveError::InvalidMove)?;
            let dr = i16::from(to.row) - i16::from(current.row);
            let dc = i16::from(to.col) - i16::from(current.col);
            if !matches!(dr.abs(), 1 | 2) || dr.abs() != dc.abs() {
                return Err(MoveError::InvalidMove);
            }
            if is_chain && dr.abs() < 2 {
                return Err(MoveError::InvalidMultiMove);
            }
            steps.push(to);
            current = to;
        }

        Ok(Self { from, steps })
    }

    /// Reconstructs the origin and final square of the piece that moved from
    /// `before` to `after`. Intermediate landings of a chain are not
    /// recoverable from the two boards and are left out.
    pub fn between(before: &Board, after: &Board, color: Color) -> Option<Self> {
        let mut from = None;
        let mut to = None;
        for pos in BoardCoordinate::all() {
            let was = before.get_piece(pos).filter(|p| p.color == color);
            let is = after.get_piece(pos).filter(|p| p.color == color);
            match (was, is) {
                (Some(_), None) => from = Some(pos),
                (None, Some(_)) => to = Some(pos),
                _ => {}
            }
        }
        Some(Self {
            from: from?,
            steps: vec![to?],
        })
    }

    pub fn destination(&self) -> BoardCoordinate {
        self.steps.last().copied().unwrap_or(self.from)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        for step in &self.steps {
            write!(f, "-{step}")?;
        }
        Ok(())
    }
}

/// Two characters: column letter `A`-`H` (any case) then row digit `1`-`8`.
/// A string of any other length is reported as `wrong_length`.
pub fn parse_square(text: &str, wrong_length: MoveError) -> Result<BoardCoordinate, MoveError> {
    let mut chars = text.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(wrong_length);
    };

    let row = rank
        .to_digit(10)
        .and_then(|r| u8::try_from(r).ok())
        .filter(|r| (1..=BOARD_SIZE).contains(r))
        .ok_or(MoveError::InvalidRow)?;

    let file = file.to_ascii_uppercase();
    if !('A'..='H').contains(&file) {
        return Err(MoveError::InvalidColumn);
    }
    let col = u8::try_from(file).map_err(|_| MoveError::InvalidColumn)? - b'A' + 1;

    BoardCoordinate::new(row, col).ok_or(MoveError::InvalidRow)
}

/// Plays `mv` step by step on a copy of `board`: a piece landing on row 1 or
/// row 8 becomes the mover's king and a two-square step removes the jumped
/// square's occupant. No legality checks happen here.
pub fn replay(board: &Board, mv: &Move, turn: Turn) -> Board {
    let mut next = board.clone();
    let mut from = mv.from;
    for &to in &mv.steps {
        let moving = next.remove_piece(from);
        let landed = if to.is_promotion_row() {
            Some(get_king(turn))
        } else {
            moving
        };
        next.set_piece(to, landed);

        if from.row.abs_diff(to.row) == 2 {
            if let Some(over) = BoardCoordinate::new(
                (from.row + to.row) / 2,
                (from.col + to.col) / 2,
            ) {
                next.set_piece(over, None);
            }
        }
        from = to;
    }
    next
}

/// Checks a move typed by a human and returns the resulting board. A move is
/// legal exactly when its result belongs to the successor set.
pub fn validate_move(
    board: &Board,
    from: &str,
    destinations: &[&str],
    turn: Turn,
) -> Result<Board, MoveError> {
    let mv = Move::parse(from, destinations)?;
    let next = replay(board, &mv, turn);

    if MoveGenerator::new().successors(board, turn).contains(&next) {
        log::debug!("accepted {mv} for {}", turn.color());
        Ok(next)
    } else {
        Err(MoveError::IllegalMove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Piece, PieceType};

    fn sq(row: u8, col: u8) -> BoardCoordinate {
        BoardCoordinate::new(row, col).unwrap()
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("B3", MoveError::InvalidMove), Ok(sq(3, 2)));
        assert_eq!(parse_square("h8", MoveError::InvalidMove), Ok(sq(8, 8)));
        assert_eq!(
            parse_square("B", MoveError::NoPieceThere),
            Err(MoveError::NoPieceThere)
        );
        assert_eq!(
            parse_square("B10", MoveError::InvalidMove),
            Err(MoveError::InvalidMove)
        );
        assert_eq!(
            parse_square("B9", MoveError::InvalidMove),
            Err(MoveError::InvalidRow)
        );
        assert_eq!(
            parse_square("B0", MoveError::InvalidMove),
            Err(MoveError::InvalidRow)
        );
        assert_eq!(
            parse_square("BB", MoveError::InvalidMove),
            Err(MoveError::InvalidRow)
        );
        assert_eq!(
            parse_square("Z3", MoveError::InvalidMove),
            Err(MoveError::InvalidColumn)
        );
    }

    #[test]
    fn test_parse_move_errors() {
        assert_eq!(Move::parse("B3", &[]), Err(MoveError::NoDestination));
        assert_eq!(Move::parse("B3", &["B4"]), Err(MoveError::InvalidMove));
        assert_eq!(Move::parse("B3", &["E6"]), Err(MoveError::InvalidMove));
        assert_eq!(Move::parse("B3", &["C5"]), Err(MoveError::InvalidMove));
        assert_eq!(
            Move::parse("B3", &["C4", "D5"]),
            Err(MoveError::InvalidMultiMove)
        );
        assert_eq!(
            Move::parse("B3", &["D5", "E6"]),
            Err(MoveError::InvalidMultiMove)
        );
        assert_eq!(Move::parse("B3", &["D5", "Q7"]), Err(MoveError::InvalidColumn));
    }

    #[test]
    fn test_parse_chain() {
        let mv = Move::parse("b3", &["D5", "F7"]).unwrap();
        assert_eq!(mv.from, sq(3, 2));
        assert_eq!(mv.steps, vec![sq(5, 4), sq(7, 6)]);
        assert_eq!(mv.to_string(), "B3-D5-F7");
        assert_eq!(mv.destination(), sq(7, 6));
    }

    #[test]
    fn test_validate_opening_move() {
        let board = Board::new();
        let next = validate_move(&board, "B3", &["A4"], Turn(0)).unwrap();
        assert!(next.get_piece(sq(3, 2)).is_none());
        assert_eq!(next.get_piece(sq(4, 1)), Some(Piece::man(Color::Red)));

        assert_eq!(
            validate_move(&board, "A1", &["B2"], Turn(0)),
            Err(MoveError::IllegalMove)
        );
        // Moving the opponent's piece is never in the successor set.
        assert_eq!(
            validate_move(&board, "A6", &["B5"], Turn(0)),
            Err(MoveError::IllegalMove)
        );
        assert_eq!(
            validate_move(&board, "A6", &["B5"], Turn(1)).map(|b| b.count(Color::Black).men),
            Ok(12)
        );
    }

    #[test]
    fn test_validate_double_jump() {
        let mut board = Board::empty();
        board.add_piece(sq(3, 2), PieceType::Man, Color::Red);
        board.add_piece(sq(4, 1), PieceType::Man, Color::Black);
        board.add_piece(sq(4, 3), PieceType::Man, Color::Black);
        board.add_piece(sq(6, 5), PieceType::Man, Color::Black);

        // Stopping halfway is not a complete move.
        assert_eq!(
            validate_move(&board, "B3", &["D5"], Turn(0)),
            Err(MoveError::IllegalMove)
        );

        let next = validate_move(&board, "B3", &["D5", "F7"], Turn(0)).unwrap();
        assert_eq!(next.get_piece(sq(7, 6)), Some(Piece::man(Color::Red)));
        assert_eq!(next.count(Color::Black).total(), 1);
    }

    #[test]
    fn test_replay_promotes() {
        let mut board = Board::empty();
        board.add_piece(sq(7, 2), PieceType::Man, Color::Red);
        board.add_piece(sq(1, 2), PieceType::Man, Color::Black);

        let next = validate_move(&board, "B7", &["C8"], Turn(0)).unwrap();
        assert_eq!(next.get_piece(sq(8, 3)), Some(Piece::king(Color::Red)));
    }

    #[test]
    fn test_move_between_boards() {
        let board = Board::new();
        let next = validate_move(&board, "D3", &["E4"], Turn(0)).unwrap();
        let mv = Move::between(&board, &next, Color::Red).unwrap();
        assert_eq!(mv.to_string(), "D3-E4");
        assert!(Move::between(&board, &board, Color::Red).is_none());
    }
}
