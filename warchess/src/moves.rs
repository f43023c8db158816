//! Moves and move identity

use crate::board::Board;
use crate::types::{Cell, Coord, CoordParseError};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a square pair like `"e2e3"`
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
}

/// Move identity key
///
/// The identity of a move consists of its source and destination squares and nothing
/// else. Two moves with equal keys denote the same transition even if they were built
/// independently, from different board snapshots. Equality is structural over the two
/// coordinates; the pieces involved never participate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveId {
    /// Source square
    pub src: Coord,
    /// Destination square
    pub dst: Coord,
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

impl FromStr for MoveId {
    type Err = RawParseError;

    fn from_str(s: &str) -> Result<MoveId, Self::Err> {
        if s.len() != 4 {
            return Err(RawParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(RawParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(RawParseError::BadDst)?;
        Ok(MoveId { src, dst })
    }
}

/// A single board transition
///
/// A move records the source and destination squares together with the contents of both
/// cells **at the moment the move was built**. The cells are never re-read when the move
/// is applied, so a `Move` stays consistent even if the board changes between generation
/// and application.
///
/// Equality and hashing are delegated to [`MoveId`]: two moves with the same squares
/// compare equal regardless of the recorded cells. This is what lets a caller match a
/// user-supplied square pair against the candidate list by a plain comparison.
#[derive(Debug, Copy, Clone)]
pub struct Move {
    src: Coord,
    dst: Coord,
    piece_moved: Cell,
    piece_captured: Cell,
}

impl Move {
    /// Creates a move from `src` to `dst`, snapshotting both cells from `board`
    #[inline]
    pub fn new(src: Coord, dst: Coord, board: &Board) -> Move {
        Move {
            src,
            dst,
            piece_moved: board.get(src),
            piece_captured: board.get(dst),
        }
    }

    /// Parses a square pair like `"e2e3"` and builds the move from `board`
    ///
    /// The returned move is **not** checked against the candidate list; resolve it via
    /// [`GameState::apply`](crate::game::GameState::apply) or by comparing with the
    /// moves from [`gen_all`](crate::movegen::gen_all).
    pub fn from_text(s: &str, board: &Board) -> Result<Move, RawParseError> {
        let id = MoveId::from_str(s)?;
        Ok(Move::new(id.src, id.dst, board))
    }

    /// Returns the move source square
    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    /// Returns the move destination square
    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns the cell which moves, as it was when the move was built
    #[inline]
    pub const fn piece_moved(&self) -> Cell {
        self.piece_moved
    }

    /// Returns the cell at the destination when the move was built
    ///
    /// Equal to [`Cell::EMPTY`] for non-captures.
    #[inline]
    pub const fn piece_captured(&self) -> Cell {
        self.piece_captured
    }

    /// Returns the identity key of this move
    #[inline]
    pub const fn id(&self) -> MoveId {
        MoveId {
            src: self.src,
            dst: self.dst,
        }
    }

    /// Returns `true` if the move captures a piece
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.piece_captured.is_occupied()
    }
}

impl PartialEq for Move {
    #[inline]
    fn eq(&self, other: &Move) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.id())
    }
}
