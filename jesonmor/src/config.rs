use std::collections::HashSet;
use std::str::FromStr;

use crate::{Color, ConfigError, Piece, PieceKind, Place};

pub const MIN_BOARD_SIZE: usize = 3;
/// Columns are written as letters, so there can't be more than 26 of them.
pub const MAX_BOARD_SIZE: usize = 25;

/// Which board position, besides running out of moves or pieces, decides
/// the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WinCondition {
    /// The first piece to land on the centre cell wins.
    #[default]
    ReachCentre,
    /// A knight moving off the centre cell wins, once the protection window
    /// is over.
    LeaveCentre,
    /// No board position wins by itself.
    LastMover,
}

impl WinCondition {
    pub const ALL: [WinCondition; 3] = [
        WinCondition::ReachCentre,
        WinCondition::LeaveCentre,
        WinCondition::LastMover,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WinCondition::ReachCentre => "reach-centre",
            WinCondition::LeaveCentre => "leave-centre",
            WinCondition::LastMover => "last-mover",
        }
    }
}

impl std::fmt::Display for WinCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WinCondition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WinCondition::ALL
            .into_iter()
            .find(|condition| condition.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownWinCondition(String::from(s)))
    }
}

/// The immutable setup of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    size: usize,
    player_names: [String; 2],
    protection_moves: u32,
    max_moves: Option<u32>,
    win_condition: WinCondition,
    placements: Vec<(Piece, Place)>,
}

impl Configuration {
    /// Validates and creates a configuration.
    ///
    /// The board size must be odd and between [`MIN_BOARD_SIZE`] and
    /// [`MAX_BOARD_SIZE`], and every placement must be on the board and on
    /// a cell of its own.
    pub fn new(
        size: usize,
        protection_moves: u32,
        placements: Vec<(Piece, Place)>,
    ) -> Result<Self, ConfigError> {
        if size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall { size });
        }
        if size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge { size });
        }
        if size % 2 == 0 {
            return Err(ConfigError::EvenBoardSize { size });
        }

        let mut occupied = HashSet::with_capacity(placements.len());
        for &(_, place) in &placements {
            if !place.is_within(size) {
                return Err(ConfigError::PlacementOutOfBounds { place, size });
            }
            if !occupied.insert(place) {
                return Err(ConfigError::OverlappingPlacements { place });
            }
        }

        Ok(Self {
            size,
            player_names: [String::from("White"), String::from("Black")],
            protection_moves,
            max_moves: None,
            win_condition: WinCondition::default(),
            placements,
        })
    }

    /// The default setup: white on the first row, black on the last, with
    /// knights on even columns and archers on odd ones.
    pub fn standard(size: usize, protection_moves: u32) -> Result<Self, ConfigError> {
        let mut placements = Vec::with_capacity(2 * size);
        for (color, row) in [(Color::White, 0), (Color::Black, size.saturating_sub(1))] {
            for column in 0..size {
                let kind = if column % 2 == 0 {
                    PieceKind::Knight
                } else {
                    PieceKind::Archer
                };
                // Casting is fine, the size is checked in `new()` before
                // the placements are used.
                let place = Place::new(column as i32, row as i32);
                placements.push((Piece::new(kind, color), place));
            }
        }
        Self::new(size, protection_moves, placements)
    }

    pub fn with_player_names(mut self, white: impl Into<String>, black: impl Into<String>) -> Self {
        self.player_names = [white.into(), black.into()];
        self
    }

    /// Caps the total number of moves. When the cap is reached the game is
    /// decided by score.
    pub fn with_max_moves(mut self, max_moves: Option<u32>) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_win_condition(mut self, win_condition: WinCondition) -> Self {
        self.win_condition = win_condition;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn player_name(&self, color: Color) -> &str {
        &self.player_names[color.index()]
    }

    /// Captures are not allowed while fewer than this many moves have been
    /// made.
    pub fn protection_moves(&self) -> u32 {
        self.protection_moves
    }

    pub fn max_moves(&self) -> Option<u32> {
        self.max_moves
    }

    pub fn win_condition(&self) -> WinCondition {
        self.win_condition
    }

    pub fn placements(&self) -> &[(Piece, Place)] {
        &self.placements
    }

    pub fn centre(&self) -> Place {
        // Casting is fine, see MAX_BOARD_SIZE
        let mid = (self.size / 2) as i32;
        Place::new(mid, mid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place;

    #[test]
    fn board_size_is_validated() {
        assert_eq!(
            Configuration::new(1, 0, vec![]),
            Err(ConfigError::BoardTooSmall { size: 1 })
        );
        assert_eq!(
            Configuration::new(4, 0, vec![]),
            Err(ConfigError::EvenBoardSize { size: 4 })
        );
        assert_eq!(
            Configuration::new(27, 0, vec![]),
            Err(ConfigError::BoardTooLarge { size: 27 })
        );
        assert!(Configuration::new(3, 0, vec![]).is_ok());
    }

    #[test]
    fn placements_are_validated() {
        let knight = Piece::knight(Color::White);
        assert_eq!(
            Configuration::new(3, 0, vec![(knight, place!("d1"))]),
            Err(ConfigError::PlacementOutOfBounds {
                place: place!("d1"),
                size: 3
            })
        );
        assert_eq!(
            Configuration::new(
                3,
                0,
                vec![(knight, place!("b2")), (Piece::archer(Color::Black), place!("b2"))]
            ),
            Err(ConfigError::OverlappingPlacements {
                place: place!("b2")
            })
        );
    }

    #[test]
    fn standard_setup() {
        let config = Configuration::standard(5, 2).unwrap();
        assert_eq!(config.centre(), place!("c3"));
        assert_eq!(config.placements().len(), 10);
        assert!(config
            .placements()
            .contains(&(Piece::knight(Color::White), place!("a1"))));
        assert!(config
            .placements()
            .contains(&(Piece::archer(Color::White), place!("b1"))));
        assert!(config
            .placements()
            .contains(&(Piece::knight(Color::Black), place!("e5"))));
        assert_eq!(
            Configuration::standard(6, 0),
            Err(ConfigError::EvenBoardSize { size: 6 })
        );
    }

    #[test]
    fn win_condition_text_form() {
        for condition in WinCondition::ALL {
            assert_eq!(condition.to_string().parse(), Ok(condition));
        }
        assert_eq!(
            "centre".parse::<WinCondition>(),
            Err(ConfigError::UnknownWinCondition(String::from("centre")))
        );
    }
}
