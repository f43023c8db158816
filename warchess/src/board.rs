//! Board and related things

use crate::types::{self, Cell, Color, Coord, File, Piece, Rank};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the cells part of the board notation
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`Board`] from its text notation
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// Notation contains non-ASCII characters
    #[error("non-ASCII data in notation")]
    NonAscii,
    /// Notation doesn't have a board part
    #[error("board not specified")]
    NoBoard,
    /// Error parsing the board part
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    /// Notation doesn't have a move side part
    #[error("no move side")]
    NoMoveSide,
    /// Error parsing move side
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorParseError),
    /// Notation contains extra data
    #[error("extra data in notation")]
    ExtraData,
}

/// 9×9 game board
///
/// The board holds the contents of all 81 squares plus the side to move, and nothing
/// else. It performs no validation and carries no game rules; it is the raw position
/// a [`GameState`](crate::game::GameState) operates on.
///
/// A board can be written to and parsed from a FEN-like text notation: nine
/// `/`-separated ranks from the top of the board down, digits compressing runs of empty
/// squares, followed by the side to move.
///
/// # Example
///
/// ```
/// # use warchess::{Board, Cell, Color, File, Piece, Rank};
/// #
/// let mut board = Board::empty();
/// board.put2(File::B, Rank::R2, Cell::from_parts(Color::White, Piece::President));
/// board.put2(File::D, Rank::R5, Cell::from_parts(Color::Black, Piece::President));
///
/// assert_eq!(board.as_fen(), "9/9/9/9/3p5/9/9/1P7/9 w");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    /// Contents of the board
    ///
    /// The indices in this array are the indices of coordinates. You might probably want
    /// to use the functions like [`Board::get()`] or [`Board::put()`] instead of indexing
    /// this array directly.
    pub cells: [Cell; Coord::COUNT],
    /// Side to move
    pub side: Color,
}

impl Board {
    /// Returns an empty board with White to move
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; Coord::COUNT],
            side: Color::White,
        }
    }

    /// Returns a board with the initial layout
    ///
    /// Both back ranks read AirMarshal, NavySeal, ViceGeneral, Soldier, President,
    /// General, ViceGeneral, NavySeal, AirMarshal, with a full rank of Soldiers in
    /// front and an empty middle.
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Soldier));
            res.put2(file, Rank::R8, Cell::from_parts(Color::Black, Piece::Soldier));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R9)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::AirMarshal));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::NavySeal));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::ViceGeneral));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Soldier));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::President));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::General));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::ViceGeneral));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::NavySeal));
            res.put2(File::I, rank, Cell::from_parts(color, Piece::AirMarshal));
        }
        res
    }

    /// Parses a board from its text notation
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function
    /// instead of `from_str()` for better readability.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        Board::from_str(fen)
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        unsafe { *self.cells.get_unchecked(c.index()) }
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` to the square with coordinate `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        unsafe {
            *self.cells.get_unchecked_mut(c.index()) = cell;
        }
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Returns the position as a 9×9 grid of two-character cell tags
    ///
    /// Rows run from the top of the board down, so `tags()[0]` is the rank where Black
    /// starts. Each tag is a color flag plus a piece letter, or `"--"` for an empty
    /// square, e.g. `"wP"` for the white President.
    pub fn tags(&self) -> [[&'static str; 9]; 9] {
        let mut res = [["--"; 9]; 9];
        for c in Coord::iter() {
            res[c.rank().index()][c.file().index()] = self.get(c).tag();
        }
        res
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use warchess::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 9|abvspgvba
    /// 8|sssssssss
    /// 7|.........
    /// 6|.........
    /// 5|.........
    /// 4|.........
    /// 3|.........
    /// 2|SSSSSSSSS
    /// 1|ABVSPGVBA
    /// -+---------
    /// W|abcdefghi
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Converts the board into its text notation
    ///
    /// Does the same as `Board::to_string()`. It is recommended to use this function
    /// instead of `to_string()` for better readability.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<[Cell; Coord::COUNT], CellsParseError> {
    type Error = CellsParseError;

    let mut file = 0_usize;
    let mut rank = 0_usize;
    let mut pos = 0_usize;
    let mut cells = [Cell::EMPTY; Coord::COUNT];
    for b in s.bytes() {
        match b {
            b'1'..=b'9' => {
                let add = (b - b'0') as usize;
                if file + add > 9 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                file += add;
                pos += add;
            }
            b'/' => {
                if file < 9 {
                    return Err(Error::RankUnderflow(Rank::from_index(rank)));
                }
                rank += 1;
                file = 0;
                if rank >= 9 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if file >= 9 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                cells[pos] = Cell::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                file += 1;
                pos += 1;
            }
        };
    }

    if file < 9 {
        return Err(Error::RankUnderflow(Rank::from_index(rank)));
    }
    if rank < 8 {
        return Err(Error::Underflow);
    }
    assert_eq!(file, 9);
    assert_eq!(rank, 8);
    assert_eq!(pos, Coord::COUNT);

    Ok(cells)
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = FenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut iter = s.split(' ').fuse();

        let cells = parse_cells(iter.next().ok_or(Error::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(Error::NoMoveSide)?)?;

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        Ok(Board { cells, side })
    }
}

fn format_cells(cells: &[Cell; Coord::COUNT], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for rank in Rank::iter() {
        if rank.index() != 0 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for file in File::iter() {
            let cell = cells[Coord::from_parts(file, rank).index()];
            if cell.is_empty() {
                empty += 1;
                continue;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
                empty = 0;
            }
            write!(f, "{}", cell)?;
        }
        if empty != 0 {
            write!(f, "{}", (b'0' + empty) as char)?;
        }
    }
    Ok(())
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(&self.cells, f)?;
        write!(f, " {}", self.side)?;
        Ok(())
    }
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;

    fn indicator(c: Color) -> char {
        match c {
            Color::White => Self::WHITE_INDICATOR,
            Color::Black => Self::BLACK_INDICATOR,
        }
    }

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", b.get2(file, rank))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(b.side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
