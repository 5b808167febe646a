//! The move-enumeration contract the search runs against.
//!
//! The search never looks inside a position: it only asks which placements
//! exist for a side, and what position results from applying one. Any
//! two-player placement game that can answer those two questions can be
//! searched, which also lets tests plug in small artificial games.

use crate::board::{Board, Color, Place};
use crate::constants::BOARDSIZE;

pub trait Game {
    /// A board snapshot. Equality must be exact: it is used to map the
    /// chosen child back to the move that produced it.
    type Position: Clone + PartialEq;
    type Move: Copy;

    /// Every placement `side` could attempt, legal or not, in a fixed order.
    fn move_space(&self, side: Color) -> Vec<Self::Move>;

    /// Apply `mv` to a copy of `pos`, or `None` if the move is illegal there.
    fn apply(&self, mv: Self::Move, pos: &Self::Position) -> Option<Self::Position>;

    /// Legal moves for `side` at `pos`, paired with the resulting positions,
    /// in `move_space` order.
    fn legal_moves(&self, pos: &Self::Position, side: Color) -> Vec<(Self::Move, Self::Position)> {
        self.move_space(side)
            .into_iter()
            .filter_map(|mv| self.apply(mv, pos).map(|after| (mv, after)))
            .collect()
    }
}

/// NoGo on the compile-time board size.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGo;

impl Game for NoGo {
    type Position = Board;
    type Move = Place;

    fn move_space(&self, side: Color) -> Vec<Place> {
        (0..BOARDSIZE).map(|pt| Place::new(pt, side)).collect()
    }

    fn apply(&self, mv: Place, pos: &Board) -> Option<Board> {
        mv.apply(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::parse_coord;

    #[test]
    fn test_empty_board_every_cell_legal() {
        let moves = NoGo.legal_moves(&Board::new(), Color::Black);
        assert_eq!(moves.len(), BOARDSIZE);
        // enumeration order follows the cell index
        for (i, (mv, after)) in moves.iter().enumerate() {
            assert_eq!(mv.pt, i);
            assert_eq!(after.get(i), Some(Color::Black));
        }
    }

    #[test]
    fn test_legal_moves_skip_illegal_cells() {
        let mut board = Board::new();
        let a1 = parse_coord("A1").unwrap();
        board.place(parse_coord("A2").unwrap(), Color::Black).unwrap();
        board.place(parse_coord("B1").unwrap(), Color::Black).unwrap();

        let white = NoGo.legal_moves(&board, Color::White);
        assert_eq!(white.len(), BOARDSIZE - 3);
        assert!(white.iter().all(|(mv, _)| mv.pt != a1));

        let black = NoGo.legal_moves(&board, Color::Black);
        assert!(black.iter().any(|(mv, _)| mv.pt == a1));
    }
}
