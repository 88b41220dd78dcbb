use crate::piece::{knight_displacement, knight_leg};
use crate::{Game, Move, PieceKind};

/// A condition that every legal move has to satisfy.
///
/// Rules are stateless: whether a move passes only depends on the game it
/// is checked against. A piece's move is legal iff it passes every rule in
/// [`Rule::chain_for()`] for its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    OutOfBoundary,
    VacantSource,
    NilMove,
    OccupiedBySelf,
    /// No captures while fewer than
    /// [`protection_moves`](crate::Configuration::protection_moves) moves
    /// have been made.
    FirstNMovesProtection,
    KnightMove,
    KnightBlock,
    /// Straight line, with exactly one screen for a capture and none
    /// otherwise.
    ArcherMove,
}

const KNIGHT_RULES: [Rule; 7] = [
    Rule::OutOfBoundary,
    Rule::VacantSource,
    Rule::NilMove,
    Rule::OccupiedBySelf,
    Rule::FirstNMovesProtection,
    Rule::KnightMove,
    Rule::KnightBlock,
];

const ARCHER_RULES: [Rule; 6] = [
    Rule::OutOfBoundary,
    Rule::VacantSource,
    Rule::NilMove,
    Rule::OccupiedBySelf,
    Rule::FirstNMovesProtection,
    Rule::ArcherMove,
];

impl Rule {
    /// The rules that apply to every piece kind, and to moves whose source
    /// is empty.
    pub const COMMON: [Rule; 5] = [
        Rule::OutOfBoundary,
        Rule::VacantSource,
        Rule::NilMove,
        Rule::OccupiedBySelf,
        Rule::FirstNMovesProtection,
    ];

    /// The rules for a piece kind, in the order they are checked.
    pub fn chain_for(kind: PieceKind) -> &'static [Rule] {
        match kind {
            PieceKind::Knight => &KNIGHT_RULES,
            PieceKind::Archer => &ARCHER_RULES,
        }
    }

    /// Does the move pass this rule?
    pub fn validate(&self, game: &Game, mv: Move) -> bool {
        let source_piece = game.piece_at(mv.source());
        let destination_piece = game.piece_at(mv.destination());
        match self {
            Rule::OutOfBoundary => mv.destination().is_within(game.configuration().size()),
            Rule::VacantSource => source_piece.is_some(),
            Rule::NilMove => mv.source() != mv.destination(),
            Rule::OccupiedBySelf => match (source_piece, destination_piece) {
                (Some(piece), Some(target)) => piece.owner != target.owner,
                _ => true,
            },
            Rule::FirstNMovesProtection => {
                if game.num_moves() >= game.configuration().protection_moves() {
                    return true;
                }
                match (source_piece, destination_piece) {
                    (Some(piece), Some(target)) => piece.owner == target.owner,
                    _ => true,
                }
            }
            Rule::KnightMove => knight_displacement(mv).is_some(),
            Rule::KnightBlock => {
                knight_leg(mv).is_some_and(|leg| game.piece_at(leg).is_none())
            }
            Rule::ArcherMove => {
                let Some(piece) = source_piece else {
                    return false;
                };
                let Some(screens) = game.board().pieces_between(mv.source(), mv.destination())
                else {
                    return false;
                };
                match destination_piece {
                    None => screens == 0,
                    Some(target) => target.owner != piece.owner && screens == 1,
                }
            }
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rule::OutOfBoundary => "The destination is outside of the board",
            Rule::VacantSource => "There is no piece at the source",
            Rule::NilMove => "The source and destination are the same",
            Rule::OccupiedBySelf => "The destination is occupied by a piece of the same player",
            Rule::FirstNMovesProtection => "Captures are not allowed during the protection window",
            Rule::KnightMove => "A knight must move in an L-shape",
            Rule::KnightBlock => "The knight is blocked by a piece on its leg",
            Rule::ArcherMove => "An archer must move in a straight line, and jump over exactly one piece to capture",
        }
    }
}

/// A move that failed a [`Rule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleViolation {
    pub rule: Rule,
    pub mv: Move,
}

impl std::error::Error for RuleViolation {}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is illegal: {}", self.mv, self.rule.description())
    }
}

/// Checks the rules in order and reports the first one the move fails.
pub fn check_rules(rules: &[Rule], game: &Game, mv: Move) -> Result<(), RuleViolation> {
    match rules.iter().find(|rule| !rule.validate(game, mv)) {
        Some(&rule) => Err(RuleViolation { rule, mv }),
        None => Ok(()),
    }
}
