use crate::{Color, Piece, Place};

/// The square grid of cells, each holding at most one piece.
///
/// This is the only record of where pieces are. It is owned by the
/// [`Game`](crate::Game), which is also the only code that mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    // Row-major, indexed by [y * size + x].
    cells: Vec<Option<Piece>>,
    size: usize,
}

impl Board {
    pub fn empty(size: usize) -> Self {
        Self {
            cells: vec![None; size * size],
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The piece at the given place. Off-board places are always empty.
    pub fn get(&self, place: Place) -> Option<Piece> {
        self.arr_idx(place).and_then(|idx| self.cells[idx])
    }

    pub fn is_occupied(&self, place: Place) -> bool {
        self.get(place).is_some()
    }

    /// Puts a piece on a cell and returns what was there before.
    ///
    /// Panics if the place is off the board.
    pub(crate) fn put(&mut self, place: Place, piece: Piece) -> Option<Piece> {
        let idx = self.arr_idx(place).expect("place is on the board");
        self.cells[idx].replace(piece)
    }

    /// Empties a cell and returns what was there.
    pub(crate) fn take(&mut self, place: Place) -> Option<Piece> {
        let idx = self.arr_idx(place)?;
        self.cells[idx].take()
    }

    /// All pieces on the board, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Place, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.map(|piece| (self.place_of_idx(idx), piece))
        })
    }

    /// The pieces of one side, in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Place, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.owner == color)
    }

    /// Counts the pieces strictly between two places on the same row or
    /// column.
    ///
    /// Returns `None` if the places are not on a common row or column, or
    /// if they are the same place.
    pub fn pieces_between(&self, from: Place, to: Place) -> Option<usize> {
        let dx = to.x() - from.x();
        let dy = to.y() - from.y();
        if (dx != 0 && dy != 0) || (dx == 0 && dy == 0) {
            return None;
        }
        let (step_x, step_y) = (dx.signum(), dy.signum());
        let mut count = 0;
        let mut cursor = from.offset(step_x, step_y);
        while cursor != to {
            if self.is_occupied(cursor) {
                count += 1;
            }
            cursor = cursor.offset(step_x, step_y);
        }
        Some(count)
    }

    // Convert the place into a "flat" array index
    fn arr_idx(&self, place: Place) -> Option<usize> {
        if !place.is_within(self.size) {
            return None;
        }
        // Casting is fine, both coordinates were checked to be non-negative
        Some(place.y() as usize * self.size + place.x() as usize)
    }

    fn place_of_idx(&self, idx: usize) -> Place {
        // Casting is fine, the board is never larger than i32::MAX cells wide
        Place::new((idx % self.size) as i32, (idx / self.size) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place;

    #[test]
    fn put_and_take() {
        let mut board = Board::empty(3);
        let knight = Piece::knight(Color::White);
        assert_eq!(board.put(place!("b3"), knight), None);
        assert_eq!(board.get(place!("b3")), Some(knight));
        assert_eq!(board.put(place!("b3"), Piece::archer(Color::Black)), Some(knight));
        assert_eq!(board.take(place!("b3")), Some(Piece::archer(Color::Black)));
        assert_eq!(board.get(place!("b3")), None);
    }

    #[test]
    fn off_board_lookups_are_empty() {
        let board = Board::empty(3);
        assert_eq!(board.get(Place::new(-1, 0)), None);
        assert_eq!(board.get(Place::new(0, 3)), None);
        assert!(!board.is_occupied(Place::new(7, 7)));
    }

    #[test]
    fn pieces_are_listed_row_major() {
        let mut board = Board::empty(3);
        board.put(place!("c3"), Piece::knight(Color::Black));
        board.put(place!("a1"), Piece::knight(Color::White));
        board.put(place!("b1"), Piece::archer(Color::White));
        let places: Vec<Place> = board.pieces().map(|(place, _)| place).collect();
        assert_eq!(places, vec![place!("a1"), place!("b1"), place!("c3")]);
        assert_eq!(board.pieces_of(Color::Black).count(), 1);
    }

    #[test]
    fn count_pieces_between() {
        let mut board = Board::empty(5);
        board.put(place!("a2"), Piece::knight(Color::White));
        board.put(place!("a4"), Piece::knight(Color::Black));
        assert_eq!(board.pieces_between(place!("a1"), place!("a5")), Some(2));
        assert_eq!(board.pieces_between(place!("a5"), place!("a1")), Some(2));
        assert_eq!(board.pieces_between(place!("a1"), place!("a3")), Some(1));
        assert_eq!(board.pieces_between(place!("a1"), place!("a2")), Some(0));
        assert_eq!(board.pieces_between(place!("a1"), place!("b2")), None);
        assert_eq!(board.pieces_between(place!("a1"), place!("a1")), None);
    }
}
