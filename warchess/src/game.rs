//! Game state and the transition engine

use crate::board::Board;
use crate::geometry;
use crate::movegen::{self, MoveList};
use crate::moves::{Move, MoveId};
use crate::types::{Cell, Color, Coord, Piece};

use thiserror::Error;

/// Position validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a President
    #[error("no president of color {0:?}")]
    NoLeader(Color),
    /// One of the sides has more than one President
    #[error("more than one president of color {0:?}")]
    TooManyLeaders(Color),
}

/// Error applying a move
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ApplyError {
    /// The move is not among the current candidate moves
    #[error("move {0} is not among the valid moves")]
    InvalidMove(MoveId),
}

/// Error undoing a move
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum UndoError {
    /// The log holds no applied moves
    #[error("nothing to undo")]
    NothingToUndo,
}

/// Error redoing a move
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RedoError {
    /// No moves have been undone
    #[error("nothing to redo")]
    NothingToRedo,
    /// The index points before the first undone move
    #[error("move #{0} is already applied")]
    AlreadyApplied(usize),
    /// The index points past the end of the retained log
    #[error("move #{index} is past the end of the log ({len} moves retained)")]
    OutOfRange { index: usize, len: usize },
}

/// Game state
///
/// Owns the [`Board`], the move log and the leader bookkeeping, and is the only way the
/// engine mutates a position. Callers fetch the candidate moves with
/// [`GameState::valid_moves()`], pick one (usually by matching a square pair against the
/// candidates by identity) and feed it to [`GameState::apply()`].
///
/// The log is kept across [`GameState::undo()`], so undone moves can be re-applied with
/// [`GameState::redo()`] until a different move is applied at the divergence point,
/// which discards the old continuation.
///
/// All candidate moves are **pseudo-legal**: a move which leaves the mover's President
/// capturable is generated, accepted and applied like any other. The `in_check`,
/// `checkmate` and `stalemate` flags exist as placeholders for a future legality layer;
/// they are never set by this engine.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    log: Vec<Move>,
    cursor: usize,
    white_leader: Coord,
    black_leader: Coord,
    in_check: bool,
    checkmate: bool,
    stalemate: bool,
}

impl GameState {
    /// Creates a game with the initial layout, White to move
    pub fn new() -> GameState {
        GameState {
            board: Board::initial(),
            log: Vec::new(),
            cursor: 0,
            white_leader: geometry::leader_home(Color::White),
            black_leader: geometry::leader_home(Color::Black),
            in_check: false,
            checkmate: false,
            stalemate: false,
        }
    }

    /// Creates a game from an arbitrary position
    ///
    /// The board must hold exactly one President per color; this is the invariant the
    /// engine maintains through its own operations and the only one it checks here.
    pub fn from_board(board: Board) -> Result<GameState, ValidateError> {
        let mut leaders = [None, None];
        for coord in Coord::iter() {
            let cell = board.get(coord);
            if cell.piece() != Some(Piece::President) {
                continue;
            }
            if let Some(color) = cell.color() {
                let slot = &mut leaders[color as usize];
                if slot.is_some() {
                    return Err(ValidateError::TooManyLeaders(color));
                }
                *slot = Some(coord);
            }
        }
        let white_leader = leaders[Color::White as usize]
            .ok_or(ValidateError::NoLeader(Color::White))?;
        let black_leader = leaders[Color::Black as usize]
            .ok_or(ValidateError::NoLeader(Color::Black))?;
        Ok(GameState {
            board,
            log: Vec::new(),
            cursor: 0,
            white_leader,
            black_leader,
            in_check: false,
            checkmate: false,
            stalemate: false,
        })
    }

    /// Returns the current position
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side
    }

    /// Returns the tracked position of the President of color `c`
    ///
    /// The coordinate follows the President through [`GameState::apply()`] and
    /// [`GameState::undo()`]. If the President of `c` has been captured, the coordinate
    /// keeps its last tracked value.
    #[inline]
    pub fn leader(&self, c: Color) -> Coord {
        match c {
            Color::White => self.white_leader,
            Color::Black => self.black_leader,
        }
    }

    #[inline]
    fn leader_mut(&mut self, c: Color) -> &mut Coord {
        match c {
            Color::White => &mut self.white_leader,
            Color::Black => &mut self.black_leader,
        }
    }

    /// Returns the retained move log
    ///
    /// The first [`GameState::cursor()`] entries are currently applied; the rest have
    /// been undone but stay available for [`GameState::redo()`].
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.log
    }

    /// Returns the number of currently applied moves
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reserved: whether the side to move is in check. Never computed, always `false`.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Reserved: whether the game ended in checkmate. Never computed, always `false`.
    #[inline]
    pub fn checkmate(&self) -> bool {
        self.checkmate
    }

    /// Reserved: whether the game ended in stalemate. Never computed, always `false`.
    #[inline]
    pub fn stalemate(&self) -> bool {
        self.stalemate
    }

    /// Returns the candidate moves for the side to move
    ///
    /// The moves are pseudo-legal; see the struct docs.
    #[inline]
    pub fn valid_moves(&self) -> MoveList {
        movegen::gen_all(&self.board)
    }

    fn make(&mut self, mv: Move) {
        self.board.put(mv.src(), Cell::EMPTY);
        self.board.put(mv.dst(), mv.piece_moved());
        if self.cursor < self.log.len() && self.log[self.cursor].id() != mv.id() {
            self.log.truncate(self.cursor);
        }
        if self.cursor == self.log.len() {
            self.log.push(mv);
        }
        self.cursor += 1;
        self.board.side = self.board.side.inv();
        if mv.piece_moved().piece() == Some(Piece::President) {
            if let Some(color) = mv.piece_moved().color() {
                *self.leader_mut(color) = mv.dst();
            }
        }
    }

    /// Applies `mv` if its identity matches one of the current candidate moves
    ///
    /// The move actually applied is the matched candidate, whose cell snapshot was taken
    /// from the current board; it is also the returned value. A move whose identity
    /// matches no candidate is rejected and the state stays untouched.
    ///
    /// Applying a move different from the next undone log entry discards the undone
    /// continuation.
    pub fn apply(&mut self, mv: Move) -> Result<Move, ApplyError> {
        let candidate = self
            .valid_moves()
            .iter()
            .copied()
            .find(|m| m.id() == mv.id())
            .ok_or(ApplyError::InvalidMove(mv.id()))?;
        self.make(candidate);
        Ok(candidate)
    }

    /// Undoes the last applied move and returns it
    ///
    /// The undone move stays in the log for [`GameState::redo()`]. Returns
    /// [`UndoError::NothingToUndo`] when no move is applied; the state is unchanged
    /// either way.
    pub fn undo(&mut self) -> Result<Move, UndoError> {
        if self.cursor == 0 {
            return Err(UndoError::NothingToUndo);
        }
        self.cursor -= 1;
        let mv = self.log[self.cursor];
        self.board.put(mv.src(), mv.piece_moved());
        self.board.put(mv.dst(), mv.piece_captured());
        self.board.side = self.board.side.inv();
        if mv.piece_moved().piece() == Some(Piece::President) {
            if let Some(color) = mv.piece_moved().color() {
                *self.leader_mut(color) = mv.src();
            }
        }
        Ok(mv)
    }

    /// Re-applies undone moves from the cursor through `index` inclusive
    ///
    /// The moves are replayed exactly as they were first applied; their cell snapshots
    /// are not re-derived. `index` must point into the undone tail of the log.
    pub fn redo(&mut self, index: usize) -> Result<(), RedoError> {
        if self.cursor == self.log.len() {
            return Err(RedoError::NothingToRedo);
        }
        if index < self.cursor {
            return Err(RedoError::AlreadyApplied(index));
        }
        if index >= self.log.len() {
            return Err(RedoError::OutOfRange {
                index,
                len: self.log.len(),
            });
        }
        while self.cursor <= index {
            let mv = self.log[self.cursor];
            self.make(mv);
        }
        Ok(())
    }
}

impl Default for GameState {
    #[inline]
    fn default() -> GameState {
        GameState::new()
    }
}
