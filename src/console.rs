//! SpeedChess - Console Game Module
//!
//! Plays a game on a text console. Each side is either a human typing
//! squares such as `e2` or the search engine. Humans may also type `undo`
//! to take back the last two plies, or `quit` / `q` to leave.
//!
//! Input and output are generic so a scripted game can be driven from a
//! byte buffer.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::board::Board;
use crate::chess_move::Move;
use crate::search::SearchEngine;
use crate::types::{parse_square, Side};

/// Who chooses the moves for one side
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerKind {
    Human,
    Cpu,
}

/// How a console game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { loser: Side },
    Stalemate { stuck: Side },
    PlyLimit,
    Quit,
}

/// One line of human input at a square prompt
enum Input {
    Square(usize),
    Undo,
    Quit,
}

pub struct ConsoleGame<R, W> {
    board: Board,
    players: [PlayerKind; 2],
    engine: SearchEngine,
    max_plies: Option<usize>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleGame<R, W> {
    pub fn new(
        board: Board,
        white: PlayerKind,
        black: PlayerKind,
        engine: SearchEngine,
        input: R,
        output: W,
    ) -> Self {
        ConsoleGame {
            board,
            players: [white, black],
            engine,
            max_plies: None,
            input,
            output,
        }
    }

    /// Stop after this many plies, which keeps CPU-only games finite
    pub fn with_max_plies(mut self, max_plies: Option<usize>) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Alternate turns until the game is decided or a player quits
    pub fn play(&mut self) -> io::Result<GameOutcome> {
        let mut plies = 0;

        loop {
            let side = self.board.side_to_move();

            if self.board.is_checkmate(side) {
                self.print_board()?;
                self.send("===(CHECK MATE)===")?;
                info!(loser = %side, plies, "game over by checkmate");
                return Ok(GameOutcome::Checkmate { loser: side });
            }
            if self.board.is_stalemate(side) {
                self.print_board()?;
                self.send("===(STALE MATE)===")?;
                info!(stuck = %side, plies, "game over by stalemate");
                return Ok(GameOutcome::Stalemate { stuck: side });
            }
            if self.max_plies.is_some_and(|limit| plies >= limit) {
                self.print_board()?;
                self.send("===(PLY LIMIT)===")?;
                return Ok(GameOutcome::PlyLimit);
            }

            self.print_board()?;

            let next = match self.players[side.index()] {
                PlayerKind::Cpu => self.cpu_move(side)?,
                PlayerKind::Human => match self.human_move(side)? {
                    Some(mv) => Some(mv),
                    None => return Ok(GameOutcome::Quit),
                },
            };

            // A finished position is caught at the top of the loop
            if let Some(mv) = next {
                self.board.make_move(&mv);
                plies += 1;
            }
        }
    }

    fn cpu_move(&mut self, side: Side) -> io::Result<Option<Move>> {
        let result = self.engine.search(&mut self.board, side);
        if let Some(result) = &result {
            self.send(&format!("CPU plays {}", result.best_move))?;
        }
        Ok(result.map(|r| r.best_move))
    }

    /// Prompt until the human enters a legal move; None means quit
    fn human_move(&mut self, side: Side) -> io::Result<Option<Move>> {
        if self.board.in_check(side) {
            self.send("   [CHECK]")?;
        }

        loop {
            let from = match self.read_input("Input Source Position: ")? {
                Input::Square(sq) => sq,
                Input::Undo => {
                    self.undo()?;
                    continue;
                }
                Input::Quit => return Ok(None),
            };
            let to = match self.read_input("Input Destination Position: ")? {
                Input::Square(sq) => sq,
                Input::Undo => {
                    self.undo()?;
                    continue;
                }
                Input::Quit => return Ok(None),
            };

            match self.board.find_legal_move(from, to) {
                Ok(mv) => return Ok(Some(mv)),
                Err(err) => self.send(&format!("{}. Try again.", err))?,
            }
        }
    }

    /// Take back the opponent's reply and the player's own previous move
    fn undo(&mut self) -> io::Result<()> {
        if self.board.history().len() < 2 {
            return self.send("Nothing to undo.");
        }
        self.board.unmake_move();
        self.board.unmake_move();
        self.print_board()
    }

    /// Read one square token or command; end of input counts as quitting
    fn read_input(&mut self, prompt: &str) -> io::Result<Input> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Input::Quit);
            }

            match line.trim() {
                "undo" => return Ok(Input::Undo),
                "q" | "quit" => return Ok(Input::Quit),
                token => match parse_square(token) {
                    Ok(sq) => return Ok(Input::Square(sq)),
                    Err(err) => self.send(&format!("{}. Try again.", err))?,
                },
            }
        }
    }

    fn print_board(&mut self) -> io::Result<()> {
        let white = self.engine.evaluate(&mut self.board, Side::White);
        let black = self.engine.evaluate(&mut self.board, Side::Black);
        writeln!(self.output, "{}", self.board)?;
        writeln!(self.output)?;
        self.send(&format!("            [{} <> {}]", white, black))
    }

    fn send(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTING_FEN;
    use crate::config::EngineConfig;
    use std::io::Cursor;
    use PlayerKind::{Cpu, Human};

    type ScriptedGame = ConsoleGame<Cursor<Vec<u8>>, Vec<u8>>;

    fn game(fen: &str, white: PlayerKind, black: PlayerKind, script: &str) -> ScriptedGame {
        let engine = SearchEngine::new(EngineConfig {
            depth: 1.0,
            ..EngineConfig::default()
        })
        .unwrap();
        ConsoleGame::new(
            Board::from_fen(fen).unwrap(),
            white,
            black,
            engine,
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    fn text(game: ScriptedGame) -> String {
        String::from_utf8(game.into_output()).unwrap()
    }

    #[test]
    fn human_moves_until_quit() {
        let mut g = game(STARTING_FEN, Human, Human, "e2\ne4\ne7\ne5\nquit\n");
        assert_eq!(g.play().unwrap(), GameOutcome::Quit);
        assert_eq!(g.board().history().len(), 2);
        assert_eq!(g.board().history()[0].to_string(), "e2 -> e4");
    }

    #[test]
    fn bad_input_is_reported_and_retried() {
        let mut g = game(STARTING_FEN, Human, Human, "z9\ne2\ne5\ne2\ne4\nq\n");
        assert_eq!(g.play().unwrap(), GameOutcome::Quit);
        assert_eq!(g.board().history().len(), 1);
        let out = text(g);
        assert!(out.contains("Invalid file 'z'"));
        assert!(out.contains("No legal move from e2 to e5"));
    }

    #[test]
    fn undo_takes_back_two_plies() {
        let script = "undo\ne2\ne4\ne7\ne5\nundo\nd2\nd4\nq\n";
        let mut g = game(STARTING_FEN, Human, Human, script);
        assert_eq!(g.play().unwrap(), GameOutcome::Quit);
        let history = g.board().history();
        assert_eq!(history.len(), 1);
        assert_eq!((history[0].from, history[0].to), (11, 27));
        assert!(text(g).contains("Nothing to undo."));
    }

    #[test]
    fn end_of_input_quits() {
        let mut g = game(STARTING_FEN, Human, Cpu, "");
        assert_eq!(g.play().unwrap(), GameOutcome::Quit);
    }

    #[test]
    fn cpu_delivers_mate() {
        let mut g = game("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", Cpu, Human, "");
        assert_eq!(g.play().unwrap(), GameOutcome::Checkmate { loser: Side::Black });
        let out = text(g);
        assert!(out.contains("CPU plays a1 -> a8"));
        assert!(out.contains("===(CHECK MATE)==="));
    }

    #[test]
    fn check_is_announced() {
        let mut g = game("4k3/8/8/8/8/8/8/r3K3 w - - 0 1", Human, Human, "q\n");
        assert_eq!(g.play().unwrap(), GameOutcome::Quit);
        assert!(text(g).contains("[CHECK]"));
    }

    #[test]
    fn stalemate_ends_game() {
        let mut g = game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", Human, Human, "");
        assert_eq!(g.play().unwrap(), GameOutcome::Stalemate { stuck: Side::Black });
        assert!(text(g).contains("===(STALE MATE)==="));
    }

    #[test]
    fn ply_limit_stops_cpu_game() {
        let mut g = game(STARTING_FEN, Cpu, Cpu, "").with_max_plies(Some(2));
        assert_eq!(g.play().unwrap(), GameOutcome::PlyLimit);
        assert_eq!(g.board().history().len(), 2);
    }
}
