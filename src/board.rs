//! NoGo board representation and placement rules.
//!
//! NoGo is played like Go with one twist: capturing is forbidden. A
//! placement is legal only if the cell is empty, the placed stone's group
//! keeps at least one liberty, and no adjacent opponent group loses its
//! last liberty. A side with no legal placement loses.

use std::fmt;

use thiserror::Error;

use crate::constants::{BOARDSIZE, N};

/// A cell on the board, as a row-major index in `0..BOARDSIZE`.
pub type Point = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Parse a GTP color argument (`b`, `black`, `w`, `white`).
    pub fn parse(s: &str) -> Option<Color> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("illegal move: point outside the board")]
    OutOfBounds,
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: suicide")]
    Suicide,
    #[error("illegal move: captures an opponent group")]
    Capture,
}

/// An immutable-by-convention board snapshot. Copying is a plain value copy.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Color>; BOARDSIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARDSIZE],
        }
    }

    #[inline]
    pub fn get(&self, pt: Point) -> Option<Color> {
        self.cells.get(pt).copied().flatten()
    }

    /// Number of stones on the board.
    pub fn stones(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn neighbors(pt: Point) -> impl Iterator<Item = Point> {
        let (x, y) = (pt % N, pt / N);
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push(pt - 1);
        }
        if x + 1 < N {
            v.push(pt + 1);
        }
        if y > 0 {
            v.push(pt - N);
        }
        if y + 1 < N {
            v.push(pt + N);
        }
        v.into_iter()
    }

    /// Place a stone of `color` at `pt` following NoGo rules.
    ///
    /// The board is left unchanged when the placement is illegal.
    pub fn place(&mut self, pt: Point, color: Color) -> Result<(), PlaceError> {
        if pt >= BOARDSIZE {
            return Err(PlaceError::OutOfBounds);
        }
        if self.cells[pt].is_some() {
            return Err(PlaceError::Occupied);
        }
        self.cells[pt] = Some(color);

        let opp = color.opponent();
        let captures = Self::neighbors(pt)
            .any(|n| self.cells[n] == Some(opp) && !self.has_liberty(n));
        if captures {
            self.cells[pt] = None;
            return Err(PlaceError::Capture);
        }
        if !self.has_liberty(pt) {
            self.cells[pt] = None;
            return Err(PlaceError::Suicide);
        }
        Ok(())
    }

    /// Check legality without modifying the board.
    pub fn is_legal(&self, pt: Point, color: Color) -> bool {
        let mut after = *self;
        after.place(pt, color).is_ok()
    }

    /// Whether the group containing `pt` has at least one liberty.
    fn has_liberty(&self, pt: Point) -> bool {
        let Some(color) = self.get(pt) else {
            return false;
        };
        let mut stack = vec![pt];
        let mut visited = [false; BOARDSIZE];
        while let Some(p) = stack.pop() {
            if visited[p] {
                continue;
            }
            visited[p] = true;
            for n in Self::neighbors(p) {
                match self.cells[n] {
                    None => return true,
                    Some(c) if c == color && !visited[n] => stack.push(n),
                    _ => {}
                }
            }
        }
        false
    }
}

/// A placement action: put a stone of `color` on `pt`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Place {
    pub pt: Point,
    pub color: Color,
}

impl Place {
    pub fn new(pt: Point, color: Color) -> Self {
        Self { pt, color }
    }

    /// Apply the placement to a copy of `board`, or `None` if it is illegal.
    pub fn apply(&self, board: &Board) -> Option<Board> {
        let mut after = *board;
        after.place(self.pt, self.color).ok().map(|_| after)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, str_coord(self.pt))
    }
}

/// Parse a GTP vertex such as `"D4"` into a point.
///
/// Columns skip the letter `I`; row 1 is the bottom row.
pub fn parse_coord(s: &str) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == 'I' {
        return None;
    }
    let mut col = (col_char as u8 - b'A') as usize;
    // Skip 'I' column (Go convention to avoid confusion with 'J')
    if col_char > 'I' {
        col -= 1;
    }
    let row: usize = chars.as_str().parse().ok()?;
    if col >= N || row == 0 || row > N {
        return None;
    }
    Some((N - row) * N + col)
}

/// Convert a point to a GTP vertex string (e.g. `"D4"`).
pub fn str_coord(pt: Point) -> String {
    let row = pt / N;
    let col = pt % N;

    let mut c = (b'A' + col as u8) as char;
    if c >= 'I' {
        c = (c as u8 + 1) as char;
    }

    format!("{c}{}", N - row)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            write!(f, "{:>2} ", N - y)?;
            for x in 0..N {
                let ch = match self.cells[y * N + x] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..N {
            write!(f, "{} ", &str_coord(x)[..1])?;
        }
        writeln!(f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board {{ stones: {} }}", self.stones())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        parse_coord(s).unwrap()
    }

    #[test]
    fn test_parse_str_coord_roundtrip() {
        for p in 0..BOARDSIZE {
            let s = str_coord(p);
            assert_eq!(parse_coord(&s), Some(p), "Failed roundtrip for {}", s);
        }
    }

    #[test]
    fn test_parse_coord_rejects_garbage() {
        assert_eq!(parse_coord(""), None);
        assert_eq!(parse_coord("I3"), None);
        assert_eq!(parse_coord("A0"), None);
        assert_eq!(parse_coord("pass"), None);
        assert_eq!(parse_coord(&format!("A{}", N + 1)), None);
    }

    #[test]
    fn test_corner_layout() {
        assert_eq!(pt(&format!("A{N}")), 0);
        assert_eq!(pt("A1"), (N - 1) * N);
    }

    #[test]
    fn test_place_basic() {
        let mut board = Board::new();
        assert!(board.place(pt("D4"), Color::Black).is_ok());
        assert_eq!(board.get(pt("D4")), Some(Color::Black));
        assert_eq!(board.place(pt("D4"), Color::White), Err(PlaceError::Occupied));
        assert_eq!(board.stones(), 1);
    }

    #[test]
    fn test_suicide_is_illegal() {
        let mut board = Board::new();
        board.place(pt("A2"), Color::Black).unwrap();
        board.place(pt("B1"), Color::Black).unwrap();
        let before = board;
        assert_eq!(board.place(pt("A1"), Color::White), Err(PlaceError::Suicide));
        assert_eq!(board, before, "rejected placement must not change the board");
    }

    #[test]
    fn test_capture_is_illegal() {
        let mut board = Board::new();
        board.place(pt("A1"), Color::White).unwrap();
        board.place(pt("A2"), Color::Black).unwrap();
        // Black B1 would remove the last liberty of White A1
        assert_eq!(board.place(pt("B1"), Color::Black), Err(PlaceError::Capture));
        assert!(!board.is_legal(pt("B1"), Color::Black));
        // White may fill it since its own group keeps a liberty at C1
        assert!(board.is_legal(pt("B1"), Color::White));
    }

    #[test]
    fn test_filling_own_eye_is_suicide() {
        let mut board = Board::new();
        board.place(pt("A2"), Color::Black).unwrap();
        board.place(pt("B1"), Color::Black).unwrap();
        // Black filling A1 still connects to liberties through A2 and B1
        assert!(board.is_legal(pt("A1"), Color::Black));
    }

    #[test]
    fn test_place_apply_leaves_original() {
        let board = Board::new();
        let mv = Place::new(pt("E5"), Color::White);
        let after = mv.apply(&board).unwrap();
        assert_eq!(board.stones(), 0);
        assert_eq!(after.get(pt("E5")), Some(Color::White));
        assert_eq!(mv.apply(&after), None);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("B"), Some(Color::Black));
        assert_eq!(Color::parse("white"), Some(Color::White));
        assert_eq!(Color::parse("red"), None);
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}
