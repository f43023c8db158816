//! Pseudo-legal move generation
//!
//! Every generator here follows a piece's movement and capture geometry only. No check on
//! whether the mover's President stays safe is performed, and none is available elsewhere
//! in the crate: the engine is deliberately pseudo-legal (see the crate docs).

use crate::board::Board;
use crate::geometry;
use crate::moves::Move;
use crate::types::{Color, Coord, Piece};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// List of moves
///
/// Backed by a fixed-capacity vector; 512 slots is far above anything a 9×9 position can
/// produce.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 512>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 512>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Sink for generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

// Offsets and ray directions are (delta_file, delta_rank) pairs. Rank indices grow
// downwards, so N is a negative rank delta for both colors; only the Soldier moves in a
// color-dependent direction.
const PRESIDENT_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const NAVY_SEAL_OFFSETS: [(isize, isize); 4] = [(2, -2), (2, 2), (-2, 2), (-2, -2)];
const GENERAL_RAYS: [(isize, isize); 4] = [(0, -1), (1, -1), (-1, -1), (1, 0)];
const VICE_GENERAL_RAYS: [(isize, isize); 4] = [(0, 1), (1, 1), (-1, 1), (-1, 0)];
const AIR_MARSHAL_RAYS: [(isize, isize); 3] = [(1, -1), (1, 1), (0, -1)];
const ARMY_BATTALION_RAYS: [(isize, isize); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

fn push_step<P: MovePush>(b: &Board, src: Coord, color: Color, df: isize, dr: isize, dst: &mut P) {
    if let Some(next) = src.try_shift(df, dr) {
        if b.get(next).color() != Some(color) {
            dst.push(Move::new(src, next, b));
        }
    }
}

fn gen_steps<P: MovePush>(
    b: &Board,
    src: Coord,
    color: Color,
    offsets: &[(isize, isize)],
    dst: &mut P,
) {
    for &(df, dr) in offsets {
        push_step(b, src, color, df, dr, dst);
    }
}

fn gen_rays<P: MovePush>(
    b: &Board,
    src: Coord,
    color: Color,
    rays: &[(isize, isize)],
    dst: &mut P,
) {
    for &(df, dr) in rays {
        let mut cur = src;
        while let Some(next) = cur.try_shift(df, dr) {
            let cell = b.get(next);
            if cell.is_empty() {
                dst.push(Move::new(src, next, b));
                cur = next;
                continue;
            }
            if cell.color() != Some(color) {
                dst.push(Move::new(src, next, b));
            }
            break;
        }
    }
}

fn gen_soldier<P: MovePush>(b: &Board, src: Coord, color: Color, dst: &mut P) {
    let forward = geometry::soldier_forward_delta(color);
    if let Some(one) = src.try_shift(0, forward) {
        if b.get(one).is_empty() {
            dst.push(Move::new(src, one, b));
            if src.rank() == geometry::soldier_start_rank(color) {
                if let Some(two) = one.try_shift(0, forward) {
                    if b.get(two).is_empty() {
                        dst.push(Move::new(src, two, b));
                    }
                }
            }
        }
    }
    for df in [-1, 1] {
        if let Some(diag) = src.try_shift(df, forward) {
            if b.get(diag).color() == Some(color.inv()) {
                dst.push(Move::new(src, diag, b));
            }
        }
    }
}

fn gen_piece<P: MovePush>(b: &Board, src: Coord, color: Color, piece: Piece, dst: &mut P) {
    match piece {
        Piece::President => gen_steps(b, src, color, &PRESIDENT_OFFSETS, dst),
        Piece::General => {
            gen_rays(b, src, color, &GENERAL_RAYS, dst);
            push_step(b, src, color, 0, 1, dst);
        }
        Piece::ViceGeneral => {
            gen_rays(b, src, color, &VICE_GENERAL_RAYS, dst);
            push_step(b, src, color, 0, -1, dst);
        }
        Piece::AirMarshal => gen_rays(b, src, color, &AIR_MARSHAL_RAYS, dst),
        Piece::NavySeal => gen_steps(b, src, color, &NAVY_SEAL_OFFSETS, dst),
        Piece::ArmyBattalion => gen_rays(b, src, color, &ARMY_BATTALION_RAYS, dst),
        Piece::Soldier => gen_soldier(b, src, color, dst),
    }
}

/// Generates the candidate moves for the piece on `src`, pushing them into `dst`
///
/// Does nothing if `src` is empty or holds a piece of the side which is not to move.
pub fn gen_from_into<P: MovePush>(b: &Board, src: Coord, dst: &mut P) {
    let cell = b.get(src);
    if cell.color() != Some(b.side) {
        return;
    }
    if let Some(piece) = cell.piece() {
        gen_piece(b, src, b.side, piece, dst);
    }
}

/// Generates the candidate moves for the piece on `src`
pub fn gen_from(b: &Board, src: Coord) -> MoveList {
    let mut res = MoveList::new();
    gen_from_into(b, src, &mut res);
    res
}

/// Generates all candidate moves for the side to move, pushing them into `dst`
pub fn gen_all_into<P: MovePush>(b: &Board, dst: &mut P) {
    for src in Coord::iter() {
        gen_from_into(b, src, dst);
    }
}

/// Generates all candidate moves for the side to move
///
/// The result is in generation order: squares are scanned top rank first, left to right.
/// The order carries no further meaning.
pub fn gen_all(b: &Board) -> MoveList {
    let mut res = MoveList::new();
    gen_all_into(b, &mut res);
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveId;
    use crate::types::Cell;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn dests(b: &Board, src: &str) -> HashSet<String> {
        gen_from(b, Coord::from_str(src).unwrap())
            .iter()
            .map(|m| m.dst().to_string())
            .collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_own_color_never_attacked() {
        let boards = [
            Board::initial(),
            Board::from_fen("abvspgvba/ss1s1sss1/2s6/4G4/1B2s3K/3S5/5b3/SSS1SSSSS/A1VSP1VBA w")
                .unwrap(),
            Board::from_fen("abvspgvba/ss1s1sss1/2s6/4G4/1B2s3K/3S5/5b3/SSS1SSSSS/A1VSP1VBA b")
                .unwrap(),
        ];
        for mut b in boards {
            for side in [Color::White, Color::Black] {
                b.side = side;
                for mv in &gen_all(&b) {
                    assert_ne!(b.get(mv.dst()).color(), Some(side), "move {}", mv);
                    assert_eq!(b.get(mv.src()).color(), Some(side), "move {}", mv);
                }
            }
        }
    }

    #[test]
    fn test_president_boxed_in() {
        // Scenario A: in the initial position the white President has no moves at all.
        let b = Board::initial();
        assert!(gen_from(&b, Coord::from_str("e1").unwrap()).is_empty());
    }

    #[test]
    fn test_navy_seal_leap() {
        // Scenario B: three of the four leap offsets point off the board from b1.
        let b = Board::initial();
        assert_eq!(dests(&b, "b1"), set(&["d3"]));

        // The leap is not blocked by intervening pieces.
        let b = Board::from_fen("9/9/9/9/3sss3/3sBs3/3sss3/9/9 w").unwrap();
        assert_eq!(dests(&b, "e4"), set(&["c2", "c6", "g2", "g6"]));

        // Own pieces on the target squares are excluded.
        let b = Board::from_fen("9/9/9/2S3s2/9/4B4/9/2S3s2/9 w").unwrap();
        assert_eq!(dests(&b, "e4"), set(&["g6", "g2"]));
    }

    #[test]
    fn test_soldier_advance() {
        // Scenario C: single and double step from the starting rank, no captures.
        let b = Board::initial();
        assert_eq!(dests(&b, "e2"), set(&["e3", "e4"]));

        // Off the starting rank only the single step remains.
        let b = Board::from_fen("9/9/9/9/9/4S4/9/9/9 w").unwrap();
        assert_eq!(dests(&b, "e4"), set(&["e5"]));

        // A blocked intermediate square forbids the double step...
        let b = Board::from_fen("9/9/9/9/9/4s4/9/4S4/9 w").unwrap();
        assert_eq!(dests(&b, "e2"), set(&["e3"]));

        // ...and a blocked front square forbids both.
        let b = Board::from_fen("9/9/9/9/9/9/4s4/4S4/9 w").unwrap();
        assert!(dests(&b, "e2").is_empty());
    }

    #[test]
    fn test_soldier_captures() {
        // Diagonal captures are forward-only and only against the opposite color.
        let b = Board::from_fen("9/9/9/3sss3/4S4/9/9/9/9 w").unwrap();
        assert_eq!(dests(&b, "e5"), set(&["d6", "f6"]));

        let b = Board::from_fen("9/9/9/3SsS3/4S4/9/9/9/9 w").unwrap();
        assert!(dests(&b, "e5").is_empty());

        // Black advances towards growing rows and captures downwards.
        let b = Board::from_fen("9/9/9/9/4s4/3S1S3/9/9/9 b").unwrap();
        assert_eq!(dests(&b, "e5"), set(&["e4", "d4", "f4"]));
    }

    #[test]
    fn test_general_rays() {
        // The General slides N, NE, NW and E, and steps a single square S.
        let b = Board::from_fen("9/9/9/9/4G4/9/9/9/9 w").unwrap();
        assert_eq!(
            dests(&b, "e5"),
            set(&[
                "e6", "e7", "e8", "e9", // N
                "f6", "g7", "h8", "i9", // NE
                "d6", "c7", "b8", "a9", // NW
                "f5", "g5", "h5", "i5", // E
                "e4", // single step S
            ])
        );

        // W is not part of its geometry, and the S step does not extend.
        let moved: HashSet<_> = dests(&b, "e5");
        assert!(!moved.contains("d5"));
        assert!(!moved.contains("e3"));
    }

    #[test]
    fn test_vice_general_mirror() {
        // The ViceGeneral is the mirror: slides S, SE, SW and W, steps a single square N.
        let b = Board::from_fen("9/9/9/9/4V4/9/9/9/9 w").unwrap();
        assert_eq!(
            dests(&b, "e5"),
            set(&[
                "e4", "e3", "e2", "e1", // S
                "f4", "g3", "h2", "i1", // SE
                "d4", "c3", "b2", "a1", // SW
                "d5", "c5", "b5", "a5", // W
                "e6", // single step N
            ])
        );
    }

    #[test]
    fn test_air_marshal_rays() {
        let b = Board::from_fen("9/9/9/9/4A4/9/9/9/9 w").unwrap();
        assert_eq!(
            dests(&b, "e5"),
            set(&[
                "f6", "g7", "h8", "i9", // NE
                "f4", "g3", "h2", "i1", // SE
                "e6", "e7", "e8", "e9", // N
            ])
        );
    }

    #[test]
    fn test_army_battalion_rays() {
        // Dormant in the initial layout, but fully live from an edited position.
        let b = Board::from_fen("9/9/9/9/2s1K1s2/9/9/9/9 w").unwrap();
        assert_eq!(
            dests(&b, "e5"),
            set(&[
                "e6", "e7", "e8", "e9", // N
                "e4", "e3", "e2", "e1", // S
                "f5", "g5", // E, stops at the capture
                "d5", "c5", // W, stops at the capture
            ])
        );
    }

    #[test]
    fn test_slider_stops() {
        // An own piece blocks without being included; an enemy piece is the last square.
        let b = Board::from_fen("9/9/4S4/9/4G4/9/9/9/4s4 w").unwrap();
        let d = dests(&b, "e5");
        assert!(d.contains("e6"));
        assert!(!d.contains("e7"), "own piece must not be captured");
        assert!(!d.contains("e8"), "scan must stop at the blocker");

        let b = Board::from_fen("9/9/4s4/9/4G4/9/9/9/9 w").unwrap();
        let d = dests(&b, "e5");
        assert!(d.contains("e6"));
        assert!(d.contains("e7"), "enemy piece must be capturable");
        assert!(!d.contains("e8"), "scan must stop after the capture");
    }

    #[test]
    fn test_slider_contiguity() {
        // Along each ray the empty destinations form a contiguous run from the origin.
        let b =
            Board::from_fen("abvspgvba/ss1s1sss1/2s6/4G4/1B2s3K/3S5/5b3/SSS1SSSSS/A1VSP1VBA w")
                .unwrap();
        for mv in &gen_all(&b) {
            if mv.piece_moved().piece() == Some(Piece::NavySeal) {
                continue; // leaps over intervening squares
            }
            let src = mv.src();
            let dst = mv.dst();
            let df = dst.file().index() as isize - src.file().index() as isize;
            let dr = dst.rank().index() as isize - src.rank().index() as isize;
            let steps = df.abs().max(dr.abs());
            if steps <= 1 {
                continue;
            }
            let (sf, sr) = (df.signum(), dr.signum());
            let mut cur = src;
            for _ in 0..steps - 1 {
                cur = cur.try_shift(sf, sr).unwrap();
                assert!(
                    b.get(cur).is_empty(),
                    "ray move {} passes over an occupied square",
                    mv
                );
            }
        }
    }

    #[test]
    fn test_initial_move_count() {
        // From the initial layout: 9 Soldiers with 2 moves each, a NavySeal leap per
        // flank is closed for all but one offset, and every slider is boxed in.
        let b = Board::initial();
        let moves = gen_all(&b);
        let ids: HashSet<MoveId> = moves.iter().map(|m| m.id()).collect();
        assert_eq!(ids.len(), moves.len(), "no duplicate candidates");
        assert!(ids.contains(&MoveId::from_str("b1d3").unwrap()));
        assert!(ids.contains(&MoveId::from_str("h1f3").unwrap()));
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn test_gen_from_respects_side() {
        let b = Board::initial();
        // Black piece while white is to move: nothing.
        assert!(gen_from(&b, Coord::from_str("e8").unwrap()).is_empty());
        // Empty square: nothing.
        assert!(gen_from(&b, Coord::from_str("e5").unwrap()).is_empty());
    }

    #[test]
    fn test_snapshot_cells() {
        let b = Board::initial();
        for mv in &gen_all(&b) {
            assert_eq!(mv.piece_moved(), b.get(mv.src()));
            assert_eq!(mv.piece_captured(), b.get(mv.dst()));
            assert_ne!(mv.piece_moved(), Cell::EMPTY);
        }
    }

    #[test]
    fn test_general_capture_with_step() {
        // The single S step may capture, like any other destination.
        let b = Board::from_fen("9/9/9/9/4G4/4s4/9/9/9 w").unwrap();
        let d = dests(&b, "e5");
        assert!(d.contains("e4"));

        let b = Board::from_fen("9/9/9/9/4G4/4S4/9/9/9 w").unwrap();
        let d = dests(&b, "e5");
        assert!(!d.contains("e4"));
    }

    #[test]
    fn test_back_rank_counts() {
        // Sanity-check the per-kind counts from an open position with one piece of each
        // kind far apart.
        let b = Board::from_fen("9/9/9/9/9/9/9/9/P3G4 w").unwrap();
        assert_eq!(dests(&b, "a1").len(), 3);
        let g = dests(&b, "e1");
        // N 8 + NE 4 + NW 4 + E 4, no S step from the bottom rank
        assert_eq!(g.len(), 20);
    }

    #[test]
    fn test_file_rank_edges() {
        // Pieces on the edge never generate off-board squares; spot-check the corners.
        for sq in ["a1", "a9", "i1", "i9"] {
            for kind in ["P", "G", "V", "A", "B", "K", "S"] {
                let mut b = Board::empty();
                let coord = Coord::from_str(sq).unwrap();
                b.put(coord, Cell::from_str(kind).unwrap());
                for mv in &gen_from(&b, coord) {
                    assert!(mv.dst().index() < Coord::COUNT);
                }
            }
        }
    }
}
