use crate::logic::board::{get_king, Board, BoardCoordinate, Piece, Turn};

/// Column deltas of the two diagonals, left first.
const SIDE_STEPS: [i8; 2] = [-1, 1];

pub struct MoveGenerator;

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Every board reachable from `board` by one complete move of one piece
    /// of the side moving on `turn`. Capture chains are followed to the end,
    /// captures are optional, duplicates are dropped and the input board is
    /// never part of the result.
    pub fn successors(&self, board: &Board, turn: Turn) -> Vec<Board> {
        let mut succ = Vec::new();
        let (men, kings) = board.locate(turn.color());

        for from in men {
            self.gen_simple_moves(board, from, turn, false, &mut succ);
            self.gen_jump_chains(board, from, turn, false, &mut succ);
        }
        for from in kings {
            self.gen_simple_moves(board, from, turn, true, &mut succ);
            self.gen_jump_chains(board, from, turn, true, &mut succ);
        }

        succ.retain(|s| s != board);
        log::trace!(
            "{} successors for {} on turn {}",
            succ.len(),
            turn.color(),
            turn.0
        );
        succ
    }

    /// Checks if the side moving on `turn` has at least one legal move.
    pub fn has_legal_moves(&self, board: &Board, turn: Turn) -> bool {
        !self.successors(board, turn).is_empty()
    }

    fn gen_simple_moves(
        &self,
        board: &Board,
        from: BoardCoordinate,
        turn: Turn,
        is_king: bool,
        succ: &mut Vec<Board>,
    ) {
        let Some(piece) = board.get_piece(from) else {
            return;
        };

        for (dr, dc) in directions(turn, is_king) {
            let Some(to) = from.offset(dr, dc) else {
                continue;
            };
            if board.get_piece(to).is_some() {
                continue;
            }

            let mut next = board.clone();
            next.set_piece(from, None);
            next.set_piece(to, Some(landed(piece, to, turn)));
            push_unique(succ, next);
        }
    }

    /// Follows every jump available to the piece on `from`. Only boards where
    /// the chain cannot be extended are recorded. Returns whether at least
    /// one jump was possible.
    fn gen_jump_chains(
        &self,
        board: &Board,
        from: BoardCoordinate,
        turn: Turn,
        is_king: bool,
        succ: &mut Vec<Board>,
    ) -> bool {
        let Some(piece) = board.get_piece(from) else {
            return false;
        };
        let mut jumped = false;

        for (dr, dc) in directions(turn, is_king) {
            let (Some(over), Some(to)) = (from.offset(dr, dc), from.offset(2 * dr, 2 * dc))
            else {
                continue;
            };
            let captures = board
                .get_piece(over)
                .is_some_and(|victim| victim.color != turn.color());
            if !captures || board.get_piece(to).is_some() {
                continue;
            }

            let piece = landed(piece, to, turn);
            let mut next = board.clone();
            next.set_piece(from, None);
            next.set_piece(over, None);
            next.set_piece(to, Some(piece));
            jumped = true;

            if !self.gen_jump_chains(&next, to, turn, piece.is_king(), succ) {
                push_unique(succ, next);
            }
        }

        jumped
    }
}

/// Shorthand for `MoveGenerator::new().successors(board, turn)`.
pub fn successors(board: &Board, turn: Turn) -> Vec<Board> {
    MoveGenerator::new().successors(board, turn)
}

/// Forward diagonals first; kings also get the two backward ones.
fn directions(turn: Turn, is_king: bool) -> impl Iterator<Item = (i8, i8)> {
    let forward = turn.direction();
    let backward = is_king.then_some(-forward);
    std::iter::once(forward)
        .chain(backward)
        .flat_map(|dr| SIDE_STEPS.map(|dc| (dr, dc)))
}

fn landed(piece: Piece, to: BoardCoordinate, turn: Turn) -> Piece {
    if to.is_promotion_row() {
        get_king(turn)
    } else {
        piece
    }
}

fn push_unique(succ: &mut Vec<Board>, board: Board) {
    if !succ.contains(&board) {
        succ.push(board);
    }
}
