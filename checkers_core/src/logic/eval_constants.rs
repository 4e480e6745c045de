// Default evaluation weights. All terms are summed as integers and the
// total is divided by EVAL_SCALE, which keeps heuristic scores well inside
// the open interval (-1, 1).

// Mover's men
pub const MAN_BACK_ROW_CROWDED: i32 = 15;
pub const MAN_BACK_ROW_SPARSE: i32 = 2;
pub const MAN_THREAT_ZONE: i32 = 3;
pub const MAN_OTHER: i32 = 1;
pub const KING: i32 = 5;

// Opponent's men, subtracted
pub const OPP_MAN_BACK_ROW_CROWDED: i32 = 5;
pub const OPP_MAN_BACK_ROW_SPARSE: i32 = 2;
pub const OPP_MAN_THREAT_ZONE: i32 = 3;
pub const OPP_MAN_OTHER: i32 = 1;
pub const OPP_KING: i32 = 5;

/// A side holding more men than this on the board counts as "crowded".
pub const CROWDED_MEN_THRESHOLD: usize = 6;

pub const BONUS_COUNT_PARITY: i32 = 4;
pub const BONUS_ATTRITION: i32 = 5;
pub const BONUS_MATERIAL: i32 = 2;

pub const EVAL_SCALE: f64 = 200.0;

// Search defaults
pub const DEFAULT_SEARCH_DEPTH: u8 = 6;
pub const DEFAULT_ALPHA_BOUND: f64 = -100.0;
pub const DEFAULT_BETA_BOUND: f64 = 100.0;
