//! # warchess
//!
//! Rules engine for a 9×9 chess-variant board game.
//!
//! The engine owns the board state, enumerates candidate moves per piece kind and
//! applies or reverts moves. It is a pure in-process library: rendering, input handling,
//! clocks and the event loop belong to a host process which consumes the engine through
//! [`GameState`] and never embeds rule logic of its own.
//!
//! The seven piece kinds and their movement patterns:
//!
//! - **President** — one step in any of the 8 directions; the leader piece.
//! - **General** — slides N, NE, NW and E, plus a single step S.
//! - **ViceGeneral** — the mirror: slides S, SE, SW and W, plus a single step N.
//! - **AirMarshal** — slides NE, SE and N.
//! - **NavySeal** — leaps two squares along each diagonal, jumping over anything.
//! - **ArmyBattalion** — slides N, S, E and W. Not part of the initial layout, but
//!   fully supported in positions set up via [`GameState::from_board`].
//! - **Soldier** — advances one step forward (two from its starting rank), captures one
//!   step diagonally forward. White moves up the board, Black down.
//!
//! Generated moves are **pseudo-legal**: the engine never checks whether the mover's
//! President stays safe. The `in_check` / `checkmate` / `stalemate` flags on
//! [`GameState`] are placeholders for a future legality layer and are never set.
//!
//! # Example
//!
//! ```
//! use warchess::{Color, GameState, Move};
//!
//! let mut game = GameState::new();
//! assert_eq!(game.side_to_move(), Color::White);
//!
//! // Resolve a user gesture against the candidate list and apply it.
//! let mv = Move::from_text("e2e4", game.board()).unwrap();
//! let applied = game.apply(mv).unwrap();
//! assert!(!applied.is_capture());
//! assert_eq!(game.side_to_move(), Color::Black);
//!
//! // Take it back; the undone move stays available for redo.
//! game.undo().unwrap();
//! assert_eq!(game.side_to_move(), Color::White);
//! game.redo(0).unwrap();
//! ```

pub use warchess_base::{geometry, types};

pub mod board;
pub mod game;
pub mod movegen;
pub mod moves;

pub use board::Board;
pub use game::GameState;
pub use movegen::MoveList;
pub use moves::{Move, MoveId};
pub use types::{Cell, Color, Coord, File, Piece, Rank};
