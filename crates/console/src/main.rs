//! Terminal frontend for the game core.
//!
//! Stands in for the 3D scene: resolves typed coordinates to squares,
//! selects pieces, shows candidate destinations, commits moves, and
//! listens for capture/checkmate/reset events.

mod config;
mod render;

use std::io::{self, BufRead, Write};
use std::path::Path;

use game_core::{GameSession, MoveError, Piece, PieceKind, SessionListener, Square, Team};
use tracing_subscriber::EnvFilter;

use config::DisplayConfig;

const CONFIG_PATH: &str = "console.toml";

fn print_usage() {
    println!("Commands:");
    println!("  board                 show the board");
    println!("  select <sq>           pick a piece, list its destinations");
    println!("  commit <sq>           move the selected piece");
    println!("  move <from> <to>      select and commit in one step");
    println!("  history               list committed moves");
    println!("  captured              list captured pieces per team");
    println!("  turn                  show whose turn it is");
    println!("  save <path>           write the game record as JSON");
    println!("  reset                 back to the starting position");
    println!("  quit");
}

/// Prints session events as they happen.
struct Announcer;

impl SessionListener for Announcer {
    fn piece_captured(&mut self, piece: Piece, by: Team) {
        println!("{by} captures the {} {:?} on {}", piece.team, piece.kind, piece.position);
    }
    fn piece_promoted(&mut self, at: Square, _kind: PieceKind) {
        println!("Pawn promoted to a queen on {at}");
    }
    fn checkmate(&mut self, winner: Team) {
        println!("Checkmate — {winner} wins! (reset to play again)");
    }
    fn session_reset(&mut self) {
        println!("New game. White to move.");
    }
}

/// Turn a typed coordinate into a square, letting out-of-range input
/// surface the core's OutOfBounds error.
fn parse_square(token: &str) -> Result<Square, MoveError> {
    let b = token.as_bytes();
    if b.len() != 2 {
        return Err(MoveError::OutOfBounds { file: -1, rank: -1 });
    }
    let file = b[0].wrapping_sub(b'a') as i8;
    let rank = b[1].wrapping_sub(b'1') as i8;
    GameSession::resolve(file, rank)
}

fn show_selection(session: &GameSession) {
    let Some(selection) = session.selection() else {
        return;
    };
    let mut squares: Vec<String> = selection.candidates.iter().map(|s| s.to_string()).collect();
    squares.sort();
    match selection.special {
        game_core::SpecialMove::None => {}
        special => println!("Special move available: {special:?}"),
    }
    if squares.is_empty() {
        println!("No legal destinations.");
    } else {
        println!("Destinations: {}", squares.join(" "));
    }
}

fn do_select(session: &mut GameSession, token: &str) {
    let sq = match parse_square(token) {
        Ok(sq) => sq,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };
    if session.select_piece(sq).is_none() {
        println!("Nothing of yours to select on {sq}.");
        return;
    }
    show_selection(session);
}

fn do_commit(session: &mut GameSession, token: &str) {
    let sq = match parse_square(token) {
        Ok(sq) => sq,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };
    match session.commit_move(sq) {
        Ok(outcome) => {
            let label = session
                .record()
                .moves
                .last()
                .map(|m| m.notation.clone())
                .unwrap_or_default();
            println!("{} -> {}  ({label})", outcome.from, outcome.to);
            println!("{} to move.", session.current_turn());
        }
        Err(e) => println!("Rejected: {e}"),
    }
}

fn show_history(session: &GameSession) {
    if session.record().moves.is_empty() {
        println!("No moves yet.");
        return;
    }
    for (i, m) in session.record().moves.iter().enumerate() {
        println!("{:>3}. {}  ({} -> {})", i + 1, m.notation, m.from, m.to);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let display = DisplayConfig::load(Path::new(CONFIG_PATH));
    let mut session = GameSession::new();
    session.set_listener(Box::new(Announcer));

    println!("chess_console — type 'help' for commands");
    print!("{}", render::board_to_string(&session, &display));

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }
        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "help" => print_usage(),
            "board" | "show" => print!("{}", render::board_to_string(&session, &display)),
            "select" if parts.len() == 2 => {
                do_select(&mut session, parts[1]);
                print!("{}", render::board_to_string(&session, &display));
            }
            "commit" if parts.len() == 2 => do_commit(&mut session, parts[1]),
            "move" if parts.len() == 3 => {
                match parse_square(parts[1]) {
                    Ok(from) => {
                        if session.select_piece(from).is_none() {
                            println!("Nothing of yours to select on {from}.");
                        } else {
                            do_commit(&mut session, parts[2]);
                        }
                    }
                    Err(e) => println!("Error: {e}"),
                }
            }
            "history" => show_history(&session),
            "captured" => print!("{}", render::captured_to_string(&session, &display)),
            "turn" => println!("{} to move.", session.current_turn()),
            "save" if parts.len() == 2 => {
                match session.record().save(Path::new(parts[1])) {
                    Ok(()) => println!("Saved to {}", parts[1]),
                    Err(e) => println!("Error: {e}"),
                }
            }
            "reset" => {
                session.reset();
                print!("{}", render::board_to_string(&session, &display));
            }
            "quit" | "exit" => break,
            _ => {
                // ignore unknown commands
            }
        }
    }
}
