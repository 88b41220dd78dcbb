use quickcheck::{Arbitrary, Gen};

use crate::{Color, Configuration, Move, Piece, PieceKind, Place};

/// A random position, and a move that may or may not be legal in it.
#[derive(Clone, Debug)]
pub struct GameInput {
    pub config: Configuration,
    pub mv: Move,
}

impl Arbitrary for GameInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = *g.choose(&[3usize, 5, 7]).unwrap();
        let protection_moves = u32::from(u8::arbitrary(g) % 3);

        // Roughly a third of the cells get a piece
        let mut placements = Vec::new();
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                if u8::arbitrary(g) % 3 == 0 {
                    placements.push((Piece::arbitrary(g), Place::new(x, y)));
                }
            }
        }

        // Moves mostly start at a piece, and may end just off the board
        let coordinate = |g: &mut Gen| (u8::arbitrary(g) as i32 % (size as i32 + 2)) - 1;
        let source = match g.choose(&placements) {
            Some(&(_, place)) if bool::arbitrary(g) || bool::arbitrary(g) => place,
            _ => Place::new(coordinate(g), coordinate(g)),
        };
        let destination = Place::new(coordinate(g), coordinate(g));

        let config = Configuration::new(size, protection_moves, placements)
            .expect("Generated placements are on distinct cells of the board");
        GameInput {
            config,
            mv: Move::new(source, destination),
        }
    }
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Color::BOTH).unwrap()
    }
}

impl Arbitrary for PieceKind {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[PieceKind::Knight, PieceKind::Archer]).unwrap()
    }
}

impl Arbitrary for Piece {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            kind: PieceKind::arbitrary(g),
            owner: Color::arbitrary(g),
        }
    }
}
