use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use thiserror::Error;

pub const BOARD_SIZE: u8 = 8;
/// Pieces a side starts with; no position holds more.
pub const MAX_PIECES_PER_SIDE: usize = 12;
const CELL_COUNT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row delta of a forward step. Red advances towards row 8.
    pub const fn forward(self) -> i8 {
        match self {
            Self::Red => 1,
            Self::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "Red"),
            Self::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self {
            piece_type: PieceType::Man,
            color,
        }
    }

    pub const fn king(color: Color) -> Self {
        Self {
            piece_type: PieceType::King,
            color,
        }
    }

    pub const fn is_king(self) -> bool {
        matches!(self.piece_type, PieceType::King)
    }

    /// Single-letter symbol: `r`/`b` for men, `R`/`B` for kings.
    pub const fn symbol(self) -> char {
        match (self.color, self.piece_type) {
            (Color::Red, PieceType::Man) => 'r',
            (Color::Red, PieceType::King) => 'R',
            (Color::Black, PieceType::Man) => 'b',
            (Color::Black, PieceType::King) => 'B',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'r' => Some(Self::man(Color::Red)),
            'R' => Some(Self::king(Color::Red)),
            'b' => Some(Self::man(Color::Black)),
            'B' => Some(Self::king(Color::Black)),
            _ => None,
        }
    }
}

/// Integer turn counter. Its parity picks the side to move: even turns
/// belong to Red, odd turns to Black.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Turn(pub u32);

impl Turn {
    pub const fn color(self) -> Color {
        if self.0 % 2 == 0 {
            Color::Red
        } else {
            Color::Black
        }
    }

    pub const fn direction(self) -> i8 {
        self.color().forward()
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Regular piece marker of the side moving on `turn`.
pub const fn get_piece(turn: Turn) -> Piece {
    Piece::man(turn.color())
}

/// King marker of the side moving on `turn`.
pub const fn get_king(turn: Turn) -> Piece {
    Piece::king(turn.color())
}

/// A square on the board, 1-indexed in both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub row: u8,
    pub col: u8,
}

impl BoardCoordinate {
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row >= 1 && row <= BOARD_SIZE && col >= 1 && col <= BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Neighbor `dr` rows and `dc` columns away, or `None` off the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Self::new(row, col)
    }

    /// Row 1 and row 8 crown whatever lands on them.
    pub const fn is_promotion_row(self) -> bool {
        self.row == 1 || self.row == BOARD_SIZE
    }

    /// Only the dark squares (odd `row + col`) ever hold pieces.
    pub const fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=BOARD_SIZE).flat_map(|row| (1..=BOARD_SIZE).map(move |col| Self { row, col }))
    }

    const fn index(self) -> usize {
        (self.row as usize - 1) * BOARD_SIZE as usize + (self.col as usize - 1)
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'A' + self.col - 1);
        write!(f, "{file}{}", self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceCount {
    pub men: usize,
    pub kings: usize,
}

impl PieceCount {
    pub const fn total(self) -> usize {
        self.men + self.kings
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 8 rows, found {0}")]
    WrongRowCount(usize),
    #[error("row {row} describes {len} squares instead of 8")]
    BadRowLength { row: u8, len: usize },
    #[error("unknown piece symbol '{0}'")]
    UnknownSymbol(char),
    #[error("piece on unplayable square {0}")]
    UnplayableSquare(BoardCoordinate),
    #[error("{0} has more than 12 pieces")]
    TooManyPieces(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard 12-vs-12 opening: Red on rows 1-3, Black on rows 6-8.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [None; CELL_COUNT],
        }
    }

    fn setup_initial_position(&mut self) {
        for pos in BoardCoordinate::all().filter(|pos| pos.is_playable()) {
            match pos.row {
                1..=3 => self.add_piece(pos, PieceType::Man, Color::Red),
                6..=8 => self.add_piece(pos, PieceType::Man, Color::Black),
                _ => {}
            }
        }
    }

    #[must_use]
    pub const fn get_piece(&self, pos: BoardCoordinate) -> Option<Piece> {
        self.grid[pos.index()]
    }

    pub fn set_piece(&mut self, pos: BoardCoordinate, piece: Option<Piece>) {
        self.grid[pos.index()] = piece;
    }

    pub fn add_piece(&mut self, pos: BoardCoordinate, piece_type: PieceType, color: Color) {
        self.set_piece(pos, Some(Piece { piece_type, color }));
    }

    pub fn remove_piece(&mut self, pos: BoardCoordinate) -> Option<Piece> {
        self.grid[pos.index()].take()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (BoardCoordinate, Piece)> + '_ {
        BoardCoordinate::all().filter_map(|pos| self.get_piece(pos).map(|p| (pos, p)))
    }

    /// Men and kings of `color`, each list in row-major order.
    pub fn locate(&self, color: Color) -> (Vec<BoardCoordinate>, Vec<BoardCoordinate>) {
        let mut men = Vec::with_capacity(12);
        let mut kings = Vec::new();
        for (pos, piece) in self.pieces().filter(|(_, p)| p.color == color) {
            match piece.piece_type {
                PieceType::Man => men.push(pos),
                PieceType::King => kings.push(pos),
            }
        }
        (men, kings)
    }

    pub fn count(&self, color: Color) -> PieceCount {
        self.pieces()
            .filter(|(_, p)| p.color == color)
            .fold(PieceCount::default(), |mut acc, (_, p)| {
                match p.piece_type {
                    PieceType::Man => acc.men += 1,
                    PieceType::King => acc.kings += 1,
                }
                acc
            })
    }

    /// Rows 1 to 8 separated by `/`; digits are runs of empty squares.
    pub fn to_fen_string(&self) -> String {
        let mut fen = String::new();
        for row in 1..=BOARD_SIZE {
            let mut empty_count = 0;
            for col in 1..=BOARD_SIZE {
                let piece = BoardCoordinate::new(row, col).and_then(|pos| self.get_piece(pos));
                if let Some(piece) = piece {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.symbol());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < BOARD_SIZE {
                fen.push('/');
            }
        }
        fen
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let rows: Vec<&str> = fen.trim().split('/').collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(FenError::WrongRowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, text) in (1..=BOARD_SIZE).zip(rows) {
            let mut len = 0usize;
            for symbol in text.chars() {
                if let Some(run) = symbol.to_digit(10) {
                    len += run as usize;
                    continue;
                }
                let piece = Piece::from_symbol(symbol).ok_or(FenError::UnknownSymbol(symbol))?;
                len += 1;
                let pos = u8::try_from(len)
                    .ok()
                    .and_then(|col| BoardCoordinate::new(row, col))
                    .ok_or(FenError::BadRowLength { row, len })?;
                if !pos.is_playable() {
                    return Err(FenError::UnplayableSquare(pos));
                }
                board.set_piece(pos, Some(piece));
            }
            if len != BOARD_SIZE as usize {
                return Err(FenError::BadRowLength { row, len });
            }
        }
        for color in [Color::Red, Color::Black] {
            if board.count(color).total() > MAX_PIECES_PER_SIDE {
                return Err(FenError::TooManyPieces(color));
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> BoardCoordinate {
        BoardCoordinate::new(row, col).unwrap()
    }

    #[test]
    fn test_initial_setup() {
        let board = Board::new();
        assert_eq!(board.get_piece(sq(1, 2)), Some(Piece::man(Color::Red)));
        assert_eq!(board.get_piece(sq(3, 8)), Some(Piece::man(Color::Red)));
        assert_eq!(board.get_piece(sq(6, 1)), Some(Piece::man(Color::Black)));
        assert_eq!(board.get_piece(sq(8, 7)), Some(Piece::man(Color::Black)));
        assert!(board.get_piece(sq(4, 3)).is_none());
        assert!(board.get_piece(sq(1, 1)).is_none());

        assert_eq!(board.count(Color::Red), PieceCount { men: 12, kings: 0 });
        assert_eq!(board.count(Color::Black), PieceCount { men: 12, kings: 0 });
        assert!(board.pieces().all(|(pos, _)| pos.is_playable()));
    }

    #[test]
    fn test_fen_generation() {
        let board = Board::new();
        assert_eq!(
            board.to_fen_string(),
            "1r1r1r1r/r1r1r1r1/1r1r1r1r/8/8/b1b1b1b1/1b1b1b1b/b1b1b1b1"
        );
        assert_eq!(Board::from_fen(&board.to_fen_string()), Ok(board));
    }

    #[test]
    fn test_fen_errors() {
        assert_eq!(Board::from_fen("8/8/8"), Err(FenError::WrongRowCount(3)));
        assert_eq!(
            Board::from_fen("1r1r1r/8/8/8/8/8/8/8"),
            Err(FenError::BadRowLength { row: 1, len: 6 })
        );
        assert_eq!(
            Board::from_fen("1x6/8/8/8/8/8/8/8"),
            Err(FenError::UnknownSymbol('x'))
        );
        assert_eq!(
            Board::from_fen("r7/8/8/8/8/8/8/8"),
            Err(FenError::UnplayableSquare(sq(1, 1)))
        );
        assert_eq!(
            Board::from_fen("1r1r1r1r/r1r1r1r1/1r1r1r1r/r7/8/8/8/8"),
            Err(FenError::TooManyPieces(Color::Red))
        );
    }

    #[test]
    fn test_turn_parity() {
        assert_eq!(Turn(0).color(), Color::Red);
        assert_eq!(Turn(0).direction(), 1);
        assert_eq!(Turn(7).color(), Color::Black);
        assert_eq!(Turn(7).direction(), -1);
        assert_eq!(get_piece(Turn(2)), Piece::man(Color::Red));
        assert_eq!(get_king(Turn(3)), Piece::king(Color::Black));
        assert_eq!(get_king(Turn(3)).symbol(), 'B');
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(BoardCoordinate::new(0, 3).is_none());
        assert!(BoardCoordinate::new(9, 3).is_none());
        assert_eq!(sq(1, 1).offset(-1, 1), None);
        assert_eq!(sq(7, 7).offset(2, 2), None);
        assert_eq!(sq(3, 2).offset(2, 2), Some(sq(5, 4)));
        assert_eq!(sq(3, 2).to_string(), "B3");
        assert!(sq(8, 1).is_promotion_row());
    }
}
