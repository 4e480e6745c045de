use checkers_core::logic::board::{Board, BoardCoordinate, BOARD_SIZE};
use std::fmt;

const BORDER: &str = "  +-----------------+";
const FILES: &str = "    A B C D E F G H";

/// Text rendering of a board with row labels, a border, the file letters and
/// arrows showing which way each side's men travel.
pub struct BoardView<'a> {
    board: &'a Board,
}

impl<'a> BoardView<'a> {
    pub const fn new(board: &'a Board) -> Self {
        Self { board }
    }
}

/// Marker printed right of the border on `row`.
const fn arrow(row: u8) -> Option<char> {
    match row {
        1 => Some('r'),
        2 | 7 => Some('|'),
        3 => Some('v'),
        6 => Some('^'),
        8 => Some('b'),
        _ => None,
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BORDER}")?;
        for row in 1..=BOARD_SIZE {
            write!(f, "{row} |")?;
            for col in 1..=BOARD_SIZE {
                let glyph = BoardCoordinate::new(row, col)
                    .and_then(|pos| self.board.get_piece(pos))
                    .map_or(' ', |piece| piece.symbol());
                write!(f, " {glyph}")?;
            }
            write!(f, " |")?;
            if let Some(mark) = arrow(row) {
                write!(f, " {mark}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{BORDER}")?;
        write!(f, "{FILES}")
    }
}
