use crate::types::{Color, Coord, File, Rank};

pub const fn back_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R9,
    }
}

pub const fn soldier_start_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R8,
    }
}

pub const fn soldier_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

pub const fn leader_home(c: Color) -> Coord {
    Coord::from_parts(File::E, back_rank(c))
}
