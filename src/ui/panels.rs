pub const WELCOME: &str = "Welcome to Checkers!\n";

pub const MENU: &str = "Please select an option:\n  1. Play Game\n  2. Rules\n  3. Exit";

pub const HOW_TO_MOVE: &str = "
Select a piece to move (e.g. B3) and location to move.
Separate locations with a comma (e.g. C4,B6).
Type 'rules' to see the Rules or 'resign' to leave the game.
";

pub const RULES: &str = r#"
How to play Checkers!
  ++Basic Rules++
    1. Players alternate turns, moving only their own pieces.
    2. A move consists of moving a piece diagonally to an adjacent
       unoccupied space.
    3. A piece can only move forward based on the player's starting
       direction.
    4. If the adjacent space contains an opponent's piece, and the
       space immediately beyond it is vacant, the piece may be
       captured (and removed) by jumping over it.
  ++Advanced Rules++
    1. Multiple enemy pieces can be captured in a single turn by
       successive jumps made by a single piece. Jumps may be along a
       diagonal, or "zig-zag" across the board.
    2. When a regular piece reaches the farthest opposite row, it is
       upgraded to a King.
    3. Kings can move and capture pieces (regular and Kings) both
       forwards and backwards.
  ++Winning the Game++
    The game ends when one player has no pieces left on the board
    or cannot make any moves due to being blocked.
"#;

pub const HUMAN_WINS: &str = "\nYou have defeated me...\n";
pub const ENGINE_WINS: &str = "The AI takeover begins now...";
pub const RESIGNED: &str = "You are no match for me.";
pub const FAREWELL: &str = "Farewell!";
