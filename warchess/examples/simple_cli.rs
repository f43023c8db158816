// Simple command-line application to play the 9x9 variant

use std::io::{self, BufRead, Write};
use warchess::{board::PrettyStyle, Color, GameState, Move};

fn main() {
    let mut stdin = io::stdin().lock();

    let mut game = GameState::new();

    loop {
        println!("{}", game.board().pretty(PrettyStyle::Ascii));
        let side = match game.side_to_move() {
            Color::White => "White",
            Color::Black => "Black",
        };
        print!("{} move (or new/undo/redo/quit): ", side);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        match s {
            "quit" => break,
            "new" => {
                game = GameState::new();
            }
            "undo" => {
                if let Err(e) = game.undo() {
                    println!("Cannot undo: {}", e);
                }
            }
            "redo" => {
                if let Err(e) = game.redo(game.cursor()) {
                    println!("Cannot redo: {}", e);
                }
            }
            _ => {
                // Parse the square pair and resolve it against the candidate moves by
                // identity; `apply` rejects anything which is not a candidate.
                let mv = match Move::from_text(s, game.board()) {
                    Ok(mv) => mv,
                    Err(e) => {
                        println!("Bad move: {}", e);
                        println!();
                        continue;
                    }
                };
                if let Err(e) = game.apply(mv) {
                    println!("Rejected: {}", e);
                }
            }
        }

        println!();
    }
}
