use serde::{Deserialize, Serialize};

use crate::{Move, Place, Rule};

/// One of the two sides. White always makes the first move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Position of this side in the configured player order.
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Leaps in an L-shape, unless the leg cell is occupied.
    Knight,
    /// Slides orthogonally, and captures by jumping over exactly one screen.
    Archer,
}

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A piece on the board.
///
/// A piece does not know where it is, the board is the only record of that.
///
/// Serializes to its [label](Self::label), e.g. `"K"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, owner: Color) -> Self {
        Self { kind, owner }
    }

    pub const fn knight(owner: Color) -> Self {
        Self::new(PieceKind::Knight, owner)
    }

    pub const fn archer(owner: Color) -> Self {
        Self::new(PieceKind::Archer, owner)
    }

    /// Uppercase for white, lowercase for black.
    pub fn label(&self) -> char {
        let label = match self.kind {
            PieceKind::Knight => 'K',
            PieceKind::Archer => 'A',
        };
        match self.owner {
            Color::White => label,
            Color::Black => label.to_ascii_lowercase(),
        }
    }

    /// Parses a single label character as produced by [`Self::label()`].
    pub fn from_label(label: char) -> Option<Self> {
        let owner = if label.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match label.to_ascii_uppercase() {
            'K' => Some(Self::knight(owner)),
            'A' => Some(Self::archer(owner)),
            _ => None,
        }
    }

    /// The rules that every move of this piece has to satisfy, in the
    /// order they are checked.
    pub fn rules(&self) -> &'static [Rule] {
        Rule::chain_for(self.kind)
    }

    /// The geometric candidates for moving this piece from `source` on a
    /// board of the given size.
    ///
    /// Knight candidates may lie off the board. None of the candidates have
    /// been checked against any [`Rule`]; see
    /// [`Game::legal_moves_from()`](crate::Game::legal_moves_from) for that.
    pub fn candidate_moves(&self, source: Place, size: usize) -> Vec<Move> {
        match self.kind {
            PieceKind::Knight => KNIGHT_OFFSETS
                .iter()
                .map(|&(dx, dy)| Move::new(source, source.offset(dx, dy)))
                .collect(),
            PieceKind::Archer => {
                let mut moves = Vec::with_capacity(4 * size);
                for (dx, dy) in ORTHOGONAL_DIRECTIONS {
                    let mut destination = source.offset(dx, dy);
                    while destination.is_within(size) {
                        moves.push(Move::new(source, destination));
                        destination = destination.offset(dx, dy);
                    }
                }
                moves
            }
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.label()
    }
}

impl TryFrom<char> for Piece {
    type Error = UnknownPieceLabel;

    fn try_from(label: char) -> Result<Self, Self::Error> {
        Piece::from_label(label).ok_or(UnknownPieceLabel(label))
    }
}

/// The error type for converting a label that is not one of `K`, `A`, `k`, `a`
/// into a [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownPieceLabel(pub char);

impl std::error::Error for UnknownPieceLabel {}

impl std::fmt::Display for UnknownPieceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown piece label '{}'", self.0)
    }
}

/// The displacement of a move, if it is one of the eight knight jumps.
pub(crate) fn knight_displacement(mv: Move) -> Option<(i32, i32)> {
    let dx = mv.destination().x() - mv.source().x();
    let dy = mv.destination().y() - mv.source().y();
    KNIGHT_OFFSETS.contains(&(dx, dy)).then_some((dx, dy))
}

/// The cell a knight passes through: one step from the source along the
/// axis on which the jump covers two cells.
pub(crate) fn knight_leg(mv: Move) -> Option<Place> {
    let (dx, dy) = knight_displacement(mv)?;
    let leg = if dx.abs() == 2 {
        mv.source().offset(dx.signum(), 0)
    } else {
        mv.source().offset(0, dy.signum())
    };
    Some(leg)
}
