//! Line-oriented front-end for a single board.
//!
//! Reads commands from stdin, drives one `Chessboard` backed by a
//! `TextSurface`, and prints the board after every change.

use std::io::{self, BufRead, Write};

use crate::board::board_config::BoardConfig;
use crate::board::board_errors::BoardResult;
use crate::board::chessboard::{Chessboard, GameResult};
use crate::board::highlight::Decoration;
use crate::board::surface::InputEvent;
use crate::board::text_surface::TextSurface;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::{Color, Square};
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::render_frame::{describe_squares, MARKER_LEGEND};

const HELP: &str = "\
commands:
  click <sq>          select a piece or a target square
  hover <sq>          preview the moves of one of your pieces
  unhover <sq>        end the preview
  move <lan>          play a move for either side (e2e4, a7a8q)
  legal [sq]          list the moves you can make
  back | forward      step through the game
  first | last        jump to either end of the game
  flip                play the other color
  position startpos [w|b]
  position fen <fen> [w|b]
  result | fen | show | help | quit";

pub fn run_stdio_loop(config: BoardConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session =
        Session::new(config).map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    session.show(&mut stdout)?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = session.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct Session {
    board: Chessboard<TextSurface>,
}

impl Session {
    pub fn new(config: BoardConfig) -> BoardResult<Self> {
        Ok(Self {
            board: config.build(TextSurface::new())?,
        })
    }

    pub fn board(&self) -> &Chessboard<TextSurface> {
        &self.board
    }

    /// Run one command line. Returns `true` when the session should end.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next();

        match cmd {
            "click" | "hover" | "unhover" => {
                let square = match parse_square(arg) {
                    Ok(square) => square,
                    Err(err) => {
                        writeln!(out, "error: {err}")?;
                        return Ok(false);
                    }
                };
                let event = match cmd {
                    "click" => InputEvent::Click(square),
                    "hover" => InputEvent::HoverIn(square),
                    _ => InputEvent::HoverOut(square),
                };
                self.board.handle_input(event);
                self.show(out)?;
            }
            "move" => match self.board.play_move(arg.unwrap_or_default()) {
                Ok(mv) => {
                    writeln!(out, "played {mv}")?;
                    self.show(out)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            "legal" => match self.board.get_legal_moves(arg) {
                Ok(moves) => {
                    let listed: Vec<String> = moves.iter().map(|mv| mv.to_long_algebraic()).collect();
                    writeln!(out, "{}", listed.join(" "))?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            "back" => {
                match self.board.backward() {
                    Some(mv) => writeln!(out, "took back {mv}")?,
                    None => writeln!(out, "nothing to take back")?,
                }
                self.show(out)?;
            }
            "forward" => {
                match self.board.forward() {
                    Some(mv) => writeln!(out, "replayed {mv}")?,
                    None => writeln!(out, "nothing to replay")?,
                }
                self.show(out)?;
            }
            "first" => {
                let count = self.board.first_position();
                writeln!(out, "took back {count} move(s)")?;
                self.show(out)?;
            }
            "last" => {
                let count = self.board.last_position();
                writeln!(out, "replayed {count} move(s)")?;
                self.show(out)?;
            }
            "flip" => {
                self.board.flip_orientation();
                self.show(out)?;
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "error: {err}")?;
                } else {
                    self.show(out)?;
                }
            }
            "result" => writeln!(out, "{}", describe_result(self.board.query_game_result()))?,
            "fen" => writeln!(out, "{}", self.board.fen())?,
            "show" => self.show(out)?,
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(true),
            _ => writeln!(out, "unknown command: {cmd} (try help)")?,
        }

        Ok(false)
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let tokens: Vec<&str> = line.split_whitespace().skip(1).collect();
        let (fen, rest) = match tokens.first() {
            Some(&"startpos") => (STARTING_POSITION_FEN.to_string(), &tokens[1..]),
            Some(&"fen") if tokens.len() >= 7 => (tokens[1..7].join(" "), &tokens[7..]),
            Some(&"fen") => return Err("position fen needs all six FEN fields".to_string()),
            _ => return Err("expected 'position startpos' or 'position fen <fen>'".to_string()),
        };

        let color = match rest.first() {
            None => None,
            Some(token) => Some(
                token
                    .chars()
                    .next()
                    .and_then(Color::from_fen_char)
                    .ok_or_else(|| format!("unknown color {token}"))?,
            ),
        };

        self.board.set_position(&fen, color).map_err(|err| err.to_string())
    }

    pub fn show(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.board.surface().render())?;

        let mut status = format!(
            "player {:?}, {:?} to move",
            self.board.player_color(),
            self.board.turn_color()
        );
        if self.board.is_fog_enabled() && !self.board.is_terminated() {
            status.push_str(", fog on");
        }
        if let Some(frame) = self.board.frame() {
            let selected = describe_squares(frame, Decoration::Selected);
            if !selected.is_empty() {
                status.push_str(&format!(", selected {selected}"));
            }
        }
        if self.board.interaction_state().is_promoting() {
            status.push_str(", choose a promotion piece");
        }
        let result = self.board.query_game_result();
        if result != GameResult::None {
            status.push_str(&format!(", {}", describe_result(result)));
        }
        writeln!(out, "{status}")?;
        writeln!(out, "{MARKER_LEGEND}")
    }
}

fn parse_square(arg: Option<&str>) -> Result<Square, String> {
    algebraic_to_square(arg.ok_or_else(|| "missing square".to_string())?)
}

fn describe_result(result: GameResult) -> &'static str {
    match result {
        GameResult::None => "game in progress",
        GameResult::White => "white wins",
        GameResult::Black => "black wins",
        GameResult::Draw => "draw",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        session.handle_command(line, &mut out).expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("output is UTF-8")
    }

    #[test]
    fn click_move_and_query() {
        let mut session = Session::new(BoardConfig::new("cli")).expect("default board");
        let shown = run(&mut session, "click e2");
        assert!(shown.contains("selected e2"));
        run(&mut session, "click e4");
        assert_eq!(
            run(&mut session, "fen").trim(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert!(run(&mut session, "move e7e5").starts_with("played e7e5"));
        assert_eq!(run(&mut session, "result").trim(), "game in progress");
        assert!(run(&mut session, "legal g1").contains("g1f3"));
        assert!(run(&mut session, "back").starts_with("took back e7e5"));
        assert!(run(&mut session, "forward").starts_with("replayed e7e5"));
    }

    #[test]
    fn position_command_variants() {
        let mut session = Session::new(BoardConfig::new("cli")).expect("default board");
        run(&mut session, "position fen 4k3/8/8/8/8/8/8/4K3 w - - 0 1 b");
        assert_eq!(session.board().player_color(), Color::Black);
        assert!(run(&mut session, "position fen 4k3/8").starts_with("error"));
        assert!(run(&mut session, "position startpos x").starts_with("error"));
        run(&mut session, "position startpos");
        assert_eq!(session.board().player_color(), Color::White);
        assert!(run(&mut session, "frobnicate").contains("unknown command"));
        assert!(session.handle_command("quit", &mut Vec::<u8>::new()).expect("quit"));
    }
}
