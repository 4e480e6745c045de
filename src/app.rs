use crate::ui::board::BoardView;
use crate::ui::panels::{
    ENGINE_WINS, FAREWELL, HOW_TO_MOVE, HUMAN_WINS, MENU, RESIGNED, RULES, WELCOME,
};
use anyhow::Context;
use checkers_core::engine::search::AlphaBetaEngine;
use checkers_core::engine::Searcher;
use checkers_core::logic::board::Piece;
use checkers_core::logic::game::{GameState, GameStatus, Seats};
use checkers_core::logic::rules::Move;
use std::io::{BufRead, Write};

/// How a human turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnOutcome {
    Moved,
    Resigned,
    /// Input closed before a move was made.
    Closed,
}

/// Terminal front-end: menu, rules screen and the turn loop between the
/// engine and a human typing moves.
pub struct App<R: BufRead, W: Write> {
    input: R,
    output: W,
    game: GameState,
    seats: Seats,
    engine: AlphaBetaEngine,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub const fn new(
        input: R,
        output: W,
        game: GameState,
        seats: Seats,
        engine: AlphaBetaEngine,
    ) -> Self {
        Self {
            input,
            output,
            game,
            seats,
            engine,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{WELCOME}")?;
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Option: ")? else {
                return self.leave();
            };
            match choice.as_str() {
                "1" => break,
                "2" => self.show_rules()?,
                "3" => return self.leave(),
                _ => writeln!(self.output, "Invalid input.")?,
            }
        }
        self.play()
    }

    fn play(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "\nI will play {}. You will play {}.",
            Piece::man(self.seats.engine).symbol(),
            Piece::man(self.seats.human).symbol()
        )?;

        while self.game.status == GameStatus::Playing {
            if self.game.side_to_move() == self.seats.engine {
                writeln!(self.output, "\nMy turn!")?;
                self.show_board()?;
                self.engine_turn()?;
            } else {
                writeln!(self.output, "\nYour turn!")?;
                self.show_board()?;
                match self.human_turn()? {
                    TurnOutcome::Moved => {}
                    TurnOutcome::Resigned => {
                        writeln!(self.output, "{RESIGNED}")?;
                        return self.leave();
                    }
                    TurnOutcome::Closed => return self.leave(),
                }
            }
        }

        self.show_board()?;
        if let GameStatus::Won { winner, reason } = self.game.status {
            tracing::info!(%winner, ?reason, turn = self.game.turn.0, "game over");
            if winner == self.seats.human {
                writeln!(self.output, "{HUMAN_WINS}")?;
            } else {
                writeln!(self.output, "{ENGINE_WINS}")?;
            }
        }
        Ok(())
    }

    fn engine_turn(&mut self) -> anyhow::Result<()> {
        let turn = self.game.turn;
        let (next, stats) = self
            .engine
            .search(&self.game.board, turn)
            .context("engine has no move in a position still in play")?;
        tracing::debug!(
            depth = stats.depth,
            nodes = stats.nodes,
            score = stats.score,
            time_ms = stats.time_ms,
            "engine move"
        );

        if let Some(mv) = Move::between(&self.game.board, &next, self.seats.engine) {
            writeln!(self.output, "I moved {mv}")?;
        }
        self.game.apply_board(next)?;
        Ok(())
    }

    fn human_turn(&mut self) -> anyhow::Result<TurnOutcome> {
        loop {
            writeln!(self.output, "{HOW_TO_MOVE}")?;
            let Some(piece) = self.prompt("Piece: ")? else {
                return Ok(TurnOutcome::Closed);
            };
            match piece.to_lowercase().as_str() {
                "rules" => {
                    self.show_rules()?;
                    self.show_board()?;
                    continue;
                }
                "resign" => return Ok(TurnOutcome::Resigned),
                _ => {}
            }

            let Some(targets) = self.prompt("Move to: ")? else {
                return Ok(TurnOutcome::Closed);
            };
            let destinations: Vec<&str> = targets.split(',').collect();
            match self.game.make_move(&piece, &destinations) {
                Ok(()) => return Ok(TurnOutcome::Moved),
                Err(err) => {
                    tracing::debug!(%err, piece = %piece, targets = %targets, "rejected move");
                    writeln!(self.output, "{err} Please try again.\n")?;
                    self.show_board()?;
                }
            }
        }
    }

    fn show_board(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{}", BoardView::new(&self.game.board))?;
        Ok(())
    }

    fn show_rules(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{RULES}")?;
        self.prompt("Press enter when done.\n")?;
        Ok(())
    }

    fn leave(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{FAREWELL}")?;
        Ok(())
    }

    /// Prints `label` and reads one trimmed line, `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
